//! glass-core
//!
//! Client-side core of Glass Tasks: the task list state container, the
//! filter/derivation engine and the gateway to the REST API.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, task, filter, category, due, events, errors）
//! - **ports**: 抽象化レイヤー（TaskGateway, EventSink, Clock, IdGenerator）
//! - **impls**: 実装（HttpGateway, InMemoryGateway, event sinks）
//! - **app**: アプリケーションロジック（TaskStore, view, Session, AppBuilder）
//! - **config**: gateway の設定（環境変数）

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod ports;

pub use app::{AppBuilder, Session, TaskStore};
pub use config::GatewayConfig;
pub use domain::{FilterState, GlassError, TaskDraft, TaskId, TaskPatch, TaskRecord};
