//! TaskGateway port - 外部 REST API への境界
//!
//! # 契約
//! - 各呼び出しはサーバーの正規表現（canonical JSON）を返す
//! - リトライもキャッシュもしない（キャッシュは TaskStore の責務）
//! - 失敗は GlassError の Transport / Server / Decode で返す

use async_trait::async_trait;

use crate::domain::{GlassError, TaskDraft, TaskId, TaskPatch, TaskRecord};

#[async_trait]
pub trait TaskGateway: Send + Sync {
    /// `GET /todos`
    async fn list(&self) -> Result<Vec<TaskRecord>, GlassError>;

    /// `POST /todos`
    async fn create(&self, draft: &TaskDraft) -> Result<TaskRecord, GlassError>;

    /// `PUT /todos/{id}`
    async fn update(&self, id: &TaskId, patch: &TaskPatch) -> Result<TaskRecord, GlassError>;

    /// `DELETE /todos/{id}`
    async fn delete(&self, id: &TaskId) -> Result<(), GlassError>;

    /// `GET /categories`
    async fn categories(&self) -> Result<Vec<String>, GlassError>;
}
