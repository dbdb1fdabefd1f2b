//! InMemoryGateway - プロセス内で REST 契約を再現する TaskGateway
//!
//! # 再現する挙動
//! - ID はサーバー側（ここでは IdGenerator）が採番
//! - `created_at` を Clock で刻む
//! - 未知の ID への update / delete は 404 "Todo not found"
//! - patch の欠けたフィールドは変更しない
//!
//! テスト用に失敗注入（`fail_with`）と呼び出し記録（`calls`）を持つ。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    CategorySet, GlassError, TaskDraft, TaskId, TaskPatch, TaskRecord,
};
use crate::ports::{Clock, IdGenerator, SystemClock, TaskGateway, UlidGenerator};

/// One request received by the gateway, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    List,
    Create { title: String },
    Update { id: TaskId },
    Delete { id: TaskId },
    Categories,
}

struct ServerState {
    tasks: Vec<TaskRecord>,
    categories: Vec<String>,
    failure: Option<GlassError>,
    calls: Vec<GatewayCall>,
}

pub struct InMemoryGateway {
    state: Mutex<ServerState>,
    clock: Arc<dyn Clock>,
    ids: Box<dyn IdGenerator>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    pub fn with_clock<C: Clock + Clone + 'static>(clock: C) -> Self {
        Self {
            state: Mutex::new(ServerState {
                tasks: Vec::new(),
                categories: CategorySet::default().names().to_vec(),
                failure: None,
                calls: Vec::new(),
            }),
            ids: Box::new(UlidGenerator::new(clock.clone())),
            clock: Arc::new(clock),
        }
    }

    /// Store records as if they had been created earlier (no call is logged).
    pub async fn seed(&self, tasks: Vec<TaskRecord>) {
        self.state.lock().await.tasks.extend(tasks);
    }

    pub async fn set_categories(&self, categories: Vec<String>) {
        self.state.lock().await.categories = categories;
    }

    /// Make every following call fail with `error` until [`recover`](Self::recover).
    pub async fn fail_with(&self, error: GlassError) {
        self.state.lock().await.failure = Some(error);
    }

    pub async fn recover(&self) {
        self.state.lock().await.failure = None;
    }

    /// Server-side copy of the collection.
    pub async fn snapshot(&self) -> Vec<TaskRecord> {
        self.state.lock().await.tasks.clone()
    }

    pub async fn calls(&self) -> Vec<GatewayCall> {
        self.state.lock().await.calls.clone()
    }
}

impl Default for InMemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerState {
    /// 呼び出しを記録し、失敗注入中ならそのエラーを返す
    fn begin(&mut self, call: GatewayCall) -> Result<(), GlassError> {
        self.calls.push(call);
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn position(&self, id: &TaskId) -> Result<usize, GlassError> {
        self.tasks
            .iter()
            .position(|t| t.id == *id)
            .ok_or_else(|| GlassError::Server {
                status: 404,
                message: "Todo not found".to_string(),
            })
    }
}

#[async_trait]
impl TaskGateway for InMemoryGateway {
    async fn list(&self) -> Result<Vec<TaskRecord>, GlassError> {
        let mut state = self.state.lock().await;
        state.begin(GatewayCall::List)?;
        Ok(state.tasks.clone())
    }

    async fn create(&self, draft: &TaskDraft) -> Result<TaskRecord, GlassError> {
        let mut state = self.state.lock().await;
        state.begin(GatewayCall::Create {
            title: draft.title.clone(),
        })?;

        let record = TaskRecord {
            id: self.ids.generate_task_id(),
            title: draft.title.clone(),
            description: Some(draft.description.clone()),
            category: draft.category.clone(),
            priority: draft.priority,
            due_date: draft.due_date,
            completed: false,
            created_at: Some(self.clock.now()),
        };
        state.tasks.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: &TaskId, patch: &TaskPatch) -> Result<TaskRecord, GlassError> {
        let mut state = self.state.lock().await;
        state.begin(GatewayCall::Update { id: id.clone() })?;

        let idx = state.position(id)?;
        let record = &mut state.tasks[idx];
        patch.apply_to(record);
        Ok(record.clone())
    }

    async fn delete(&self, id: &TaskId) -> Result<(), GlassError> {
        let mut state = self.state.lock().await;
        state.begin(GatewayCall::Delete { id: id.clone() })?;

        let idx = state.position(id)?;
        state.tasks.remove(idx);
        Ok(())
    }

    async fn categories(&self) -> Result<Vec<String>, GlassError> {
        let mut state = self.state.lock().await;
        state.begin(GatewayCall::Categories)?;
        Ok(state.categories.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Priority;
    use crate::ports::FixedClock;
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn create_assigns_id_and_timestamp() {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        let gateway = InMemoryGateway::with_clock(FixedClock::new(at));

        let created = gateway
            .create(&TaskDraft::new("Buy milk").with_priority(Priority::Low))
            .await
            .unwrap();

        assert!(!created.id.as_str().is_empty());
        assert_eq!(created.created_at, Some(at));
        assert!(!created.completed);
        assert_eq!(gateway.snapshot().await, vec![created]);
    }

    #[tokio::test]
    async fn update_and_delete_unknown_ids_are_404() {
        let gateway = InMemoryGateway::new();
        let id = TaskId::new("nope");

        let err = gateway.update(&id, &TaskPatch::completion(true)).await.unwrap_err();
        assert_eq!(err.status(), Some(404));

        let err = gateway.delete(&id).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn failure_injection_fails_every_call_until_recovered() {
        let gateway = InMemoryGateway::new();
        gateway
            .fail_with(GlassError::Transport("connection refused".into()))
            .await;

        assert!(gateway.list().await.is_err());
        assert!(gateway.categories().await.is_err());

        gateway.recover().await;
        assert!(gateway.list().await.is_ok());
        assert_eq!(
            gateway.calls().await,
            vec![GatewayCall::List, GatewayCall::Categories, GatewayCall::List]
        );
    }

    #[tokio::test]
    async fn categories_default_to_the_seeded_set() {
        let gateway = InMemoryGateway::new();
        let categories = gateway.categories().await.unwrap();
        assert_eq!(categories.len(), 6);

        gateway.set_categories(vec!["errands".into()]).await;
        assert_eq!(gateway.categories().await.unwrap(), vec!["errands".to_string()]);
    }
}
