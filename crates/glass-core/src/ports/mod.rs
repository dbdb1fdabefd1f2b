//! Ports - 抽象化レイヤー
//!
//! 各 trait は外部（REST API、時刻、通知先）へのインターフェースを提供し、
//! 実装の詳細を隠蔽します。実装は `impls` にあります。

pub mod clock;
pub mod event_sink;
pub mod gateway;
pub mod id_generator;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::event_sink::{EventSink, NoopEventSink};
pub use self::gateway::TaskGateway;
pub use self::id_generator::{IdGenerator, UlidGenerator};
