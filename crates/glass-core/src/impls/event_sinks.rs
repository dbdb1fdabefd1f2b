//! EventSink 実装
//!
//! - **TracingEventSink**: 通知を tracing のイベントとして流す（CLI 用）
//! - **MemoryEventSink**: 受け取ったイベントを溜める（テスト用）

use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use crate::domain::StoreEvent;
use crate::ports::EventSink;

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: StoreEvent) {
        match &event {
            StoreEvent::Failed { op, kind, message } => {
                warn!(op = op.as_str(), kind = kind.as_str(), error = %message, "{event}");
            }
            _ => info!("{event}"),
        }
    }
}

/// Collects events in emission order. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryEventSink {
    events: Arc<Mutex<Vec<StoreEvent>>>,
}

impl MemoryEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<StoreEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<StoreEvent> {
        self.events().pop()
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }
}

impl EventSink for MemoryEventSink {
    fn emit(&self, event: StoreEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
