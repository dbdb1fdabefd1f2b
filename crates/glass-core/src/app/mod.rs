//! App - アプリケーション層
//!
//! ports を組み合わせてクライアントのロジックを実装します。
//!
//! # 主要コンポーネント
//! - **TaskStore**: タスク一覧とカテゴリの状態コンテナ（悲観的更新）
//! - **view**: 表示対象の絞り込みと集計（純粋関数）
//! - **Session**: store + filter + clock をまとめた画面状態
//! - **AppBuilder**: Session の構築とワイヤリング

pub mod builder;
pub mod session;
pub mod store;
pub mod view;

pub use self::builder::{AppBuilder, BuildError};
pub use self::session::Session;
pub use self::store::TaskStore;
pub use self::view::{Row, TaskStats, View, stats, visible};
