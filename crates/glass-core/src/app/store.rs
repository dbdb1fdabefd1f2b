//! TaskStore - タスク一覧の状態コンテナ
//!
//! # 方針（悲観的更新）
//! - ローカル状態はサーバーの応答を受け取ってから更新する
//! - 失敗時は何も適用しない（部分適用なし）
//! - 結果はすべて EventSink に通知し、tracing にも記録する
//!
//! 変更系メソッドは `&mut self` を取るので、同じ一覧への並行変更は型で禁止される。

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::{
    CategorySet, GlassError, Operation, StoreEvent, TaskDraft, TaskId, TaskPatch, TaskRecord,
};
use crate::ports::{EventSink, TaskGateway};

pub struct TaskStore {
    gateway: Arc<dyn TaskGateway>,
    events: Arc<dyn EventSink>,
    tasks: Vec<TaskRecord>,
    categories: CategorySet,
    loaded: bool,
}

impl TaskStore {
    pub fn new(gateway: Arc<dyn TaskGateway>, events: Arc<dyn EventSink>) -> Self {
        Self {
            gateway,
            events,
            tasks: Vec::new(),
            categories: CategorySet::default(),
            loaded: false,
        }
    }

    /// Current collection, newest creations first.
    pub fn tasks(&self) -> &[TaskRecord] {
        &self.tasks
    }

    pub fn get(&self, id: &TaskId) -> Option<&TaskRecord> {
        self.tasks.iter().find(|t| t.id == *id)
    }

    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }

    /// Has a `load()` ever succeeded?
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Replace the collection with the server's.
    pub async fn load(&mut self) -> Result<usize, GlassError> {
        debug!("loading tasks");
        let tasks = self
            .gateway
            .list()
            .await
            .map_err(|e| self.fail(Operation::Load, e))?;

        let count = tasks.len();
        self.tasks = tasks;
        self.loaded = true;
        info!(count, "tasks loaded");
        self.events.emit(StoreEvent::Loaded { count });
        Ok(count)
    }

    /// Replace the category set; keep the old one on failure.
    pub async fn refresh_categories(&mut self) -> Result<(), GlassError> {
        let names = self
            .gateway
            .categories()
            .await
            .map_err(|e| self.fail(Operation::FetchCategories, e))?;

        let count = names.len();
        self.categories.replace(names);
        debug!(count, "categories refreshed");
        self.events.emit(StoreEvent::CategoriesRefreshed { count });
        Ok(())
    }

    /// Create a task and put the server's record at the front.
    pub async fn create(&mut self, draft: TaskDraft) -> Result<TaskRecord, GlassError> {
        let draft = draft
            .normalized()
            .map_err(|e| self.fail(Operation::Create, e))?;

        let record = self
            .gateway
            .create(&draft)
            .await
            .map_err(|e| self.fail(Operation::Create, e))?;

        info!(id = %record.id, title = %record.title, "task created");
        self.tasks.insert(0, record.clone());
        self.events.emit(StoreEvent::Created {
            id: record.id.clone(),
        });
        Ok(record)
    }

    /// Send `patch` and swap in the server's record at the same position.
    ///
    /// An id that is not held locally still reaches the server; the local
    /// list is simply left alone.
    pub async fn update(&mut self, id: &TaskId, patch: TaskPatch) -> Result<TaskRecord, GlassError> {
        let patch = patch
            .normalized()
            .map_err(|e| self.fail(Operation::Update, e))?;

        let record = self
            .gateway
            .update(id, &patch)
            .await
            .map_err(|e| self.fail(Operation::Update, e))?;

        if !self.replace(id, record.clone()) {
            debug!(%id, "updated task is not held locally");
        }
        info!(%id, "task updated");
        self.events.emit(StoreEvent::Updated { id: id.clone() });
        Ok(record)
    }

    /// Flip `completed` on a locally held task.
    pub async fn toggle_completion(&mut self, id: &TaskId) -> Result<TaskRecord, GlassError> {
        // 反転元の値が手元にないと patch を作れない
        let completed = match self.get(id) {
            Some(task) => task.completed,
            None => return Err(self.fail(Operation::Toggle, GlassError::UnknownTask(id.clone()))),
        };

        let record = self
            .gateway
            .update(id, &TaskPatch::completion(!completed))
            .await
            .map_err(|e| self.fail(Operation::Toggle, e))?;

        self.replace(id, record.clone());
        info!(%id, completed = record.completed, "task toggled");
        let event = if record.completed {
            StoreEvent::Completed { id: id.clone() }
        } else {
            StoreEvent::Reopened { id: id.clone() }
        };
        self.events.emit(event);
        Ok(record)
    }

    /// Delete on the server, then drop the matching local entry.
    pub async fn remove(&mut self, id: &TaskId) -> Result<(), GlassError> {
        self.gateway
            .delete(id)
            .await
            .map_err(|e| self.fail(Operation::Delete, e))?;

        if let Some(idx) = self.tasks.iter().position(|t| t.id == *id) {
            self.tasks.remove(idx);
        }
        info!(%id, "task deleted");
        self.events.emit(StoreEvent::Deleted { id: id.clone() });
        Ok(())
    }

    fn replace(&mut self, id: &TaskId, record: TaskRecord) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == *id) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    fn fail(&self, op: Operation, err: GlassError) -> GlassError {
        warn!(op = op.as_str(), kind = err.kind().as_str(), error = %err, "store operation failed");
        self.events.emit(StoreEvent::Failed {
            op,
            kind: err.kind(),
            message: err.to_string(),
        });
        err
    }
}
