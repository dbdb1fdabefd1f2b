//! AppBuilder - Session の構築とワイヤリング
//!
//! # Fail-fast 設計
//! - gateway が未設定なら build() が BuildError を返す
//! - HTTP gateway の設定エラーも構築時に表面化させる

use std::sync::Arc;

use crate::config::GatewayConfig;
use crate::domain::{FilterState, GlassError};
use crate::impls::HttpGateway;
use crate::ports::{Clock, EventSink, NoopEventSink, SystemClock, TaskGateway};

use super::session::Session;
use super::store::TaskStore;

/// AppBuilder は Session を構築
///
/// # 使用例
/// ```ignore
/// let mut session = AppBuilder::new()
///     .http(&GatewayConfig::from_env()?)?
///     .event_sink(TracingEventSink)
///     .build()?;
/// session.mount().await?;
/// ```
pub struct AppBuilder {
    gateway: Option<Arc<dyn TaskGateway>>,
    events: Arc<dyn EventSink>,
    clock: Arc<dyn Clock>,
    filter: FilterState,
}

/// BuildError は構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("no task gateway configured; call gateway() or http() before build()")]
    MissingGateway,

    #[error("failed to set up the http gateway: {0}")]
    Gateway(#[from] GlassError),
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            gateway: None,
            events: Arc::new(NoopEventSink),
            clock: Arc::new(SystemClock),
            filter: FilterState::default(),
        }
    }

    pub fn gateway(mut self, gateway: Arc<dyn TaskGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    /// Use the REST API described by `config`.
    pub fn http(self, config: &GatewayConfig) -> Result<Self, BuildError> {
        let gateway = HttpGateway::new(config)?;
        Ok(self.gateway(Arc::new(gateway)))
    }

    pub fn event_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.events = Arc::new(sink);
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Initial filter state (defaults to no filtering).
    pub fn filter(mut self, filter: FilterState) -> Self {
        self.filter = filter;
        self
    }

    pub fn build(self) -> Result<Session, BuildError> {
        let gateway = self.gateway.ok_or(BuildError::MissingGateway)?;
        let store = TaskStore::new(gateway, self.events);
        Ok(Session::new(store, self.filter, self.clock))
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}
