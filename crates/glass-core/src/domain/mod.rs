//! Domain model (ids, task records, filters, categories, events, errors).

pub mod category;
pub mod due;
pub mod errors;
pub mod events;
pub mod filter;
pub mod ids;
pub mod task;

pub use self::category::{CategorySet, DEFAULT_CATEGORIES};
pub use self::due::DueStatus;
pub use self::errors::{ErrorKind, GlassError};
pub use self::events::{Operation, StoreEvent};
pub use self::filter::{CategoryFilter, FilterState, Matcher, PriorityFilter, StatusFilter};
pub use self::ids::TaskId;
pub use self::task::{DEFAULT_CATEGORY, Priority, TaskDraft, TaskPatch, TaskRecord};
