//! EventSink port - 通知の抽象化
//!
//! ブラウザ版の toast に相当するものを、注入可能な sink として表現します。

use crate::domain::StoreEvent;

/// EventSink receives every store outcome, success or failure.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: StoreEvent);
}

/// Sink that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn emit(&self, _event: StoreEvent) {}
}
