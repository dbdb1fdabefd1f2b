//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **HttpGateway**: reqwest で REST API を叩く本番用 TaskGateway
//! - **InMemoryGateway**: REST 契約をプロセス内で再現する TaskGateway（テスト・試用）
//! - **TracingEventSink / MemoryEventSink**: 通知の出力先

pub mod event_sinks;
pub mod http_gateway;
pub mod inmem_gateway;

pub use self::event_sinks::{MemoryEventSink, TracingEventSink};
pub use self::http_gateway::HttpGateway;
pub use self::inmem_gateway::{GatewayCall, InMemoryGateway};
