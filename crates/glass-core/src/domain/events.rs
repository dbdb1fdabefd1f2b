//! Domain events emitted by the task store.
//!
//! 各イベントの Display がユーザー向け通知文になる。

use std::fmt;

use super::errors::ErrorKind;
use super::ids::TaskId;

/// Store operation that produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Load,
    Create,
    Update,
    Toggle,
    Delete,
    FetchCategories,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Load => "load",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Toggle => "toggle",
            Operation::Delete => "delete",
            Operation::FetchCategories => "fetch_categories",
        }
    }

    /// User-facing failure message.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::Load => "Failed to load tasks",
            Operation::Create => "Failed to add task",
            Operation::Update | Operation::Toggle => "Failed to update task",
            Operation::Delete => "Failed to delete task",
            Operation::FetchCategories => "Failed to load categories",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Loaded { count: usize },
    Created { id: TaskId },
    Updated { id: TaskId },
    Completed { id: TaskId },
    Reopened { id: TaskId },
    Deleted { id: TaskId },
    CategoriesRefreshed { count: usize },
    Failed {
        op: Operation,
        kind: ErrorKind,
        message: String,
    },
}

impl StoreEvent {
    pub fn is_failure(&self) -> bool {
        matches!(self, StoreEvent::Failed { .. })
    }
}

impl fmt::Display for StoreEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreEvent::Loaded { count } => write!(f, "Loaded {count} tasks"),
            StoreEvent::Created { .. } => f.write_str("Task added successfully!"),
            StoreEvent::Updated { .. } => f.write_str("Task updated successfully!"),
            StoreEvent::Completed { .. } => f.write_str("Task completed!"),
            StoreEvent::Reopened { .. } => f.write_str("Task reopened"),
            StoreEvent::Deleted { .. } => f.write_str("Task deleted"),
            StoreEvent::CategoriesRefreshed { count } => write!(f, "Loaded {count} categories"),
            StoreEvent::Failed { op, .. } => f.write_str(op.failure_message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_display_names_the_operation() {
        let event = StoreEvent::Failed {
            op: Operation::Create,
            kind: ErrorKind::Transport,
            message: "connection refused".into(),
        };
        assert!(event.is_failure());
        assert_eq!(event.to_string(), "Failed to add task");
    }

    #[test]
    fn toggle_events_read_like_the_list_badges() {
        let id = TaskId::new("t");
        assert_eq!(StoreEvent::Completed { id: id.clone() }.to_string(), "Task completed!");
        assert_eq!(StoreEvent::Reopened { id }.to_string(), "Task reopened");
    }
}
