//! Session - 1 画面分の状態（store + filter + clock）
//!
//! プレゼンテーション層はグローバル状態ではなく Session を受け取り、
//! 定義された遷移関数だけで状態を変更する。

use std::sync::Arc;

use crate::domain::{FilterState, GlassError};
use crate::ports::Clock;

use super::store::TaskStore;
use super::view::{self, TaskStats, View};

pub struct Session {
    store: TaskStore,
    filter: FilterState,
    clock: Arc<dyn Clock>,
}

impl Session {
    pub fn new(store: TaskStore, filter: FilterState, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            filter,
            clock,
        }
    }

    /// Initial fetch: tasks, then categories.
    ///
    /// A category failure is reported through the event sink and otherwise
    /// ignored; the default set stays in place.
    pub async fn mount(&mut self) -> Result<(), GlassError> {
        let loaded = self.store.load().await.map(|_| ());
        let _ = self.store.refresh_categories().await;
        loaded
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut TaskStore {
        &mut self.store
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
    }

    pub fn clear_filters(&mut self) {
        self.filter.clear();
    }

    pub fn view(&self) -> View<'_> {
        View::build(self.store.tasks(), &self.filter, self.clock.today())
    }

    pub fn stats(&self) -> TaskStats {
        view::stats(self.store.tasks())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Priority, PriorityFilter, StoreEvent, TaskDraft};
    use crate::impls::{InMemoryGateway, MemoryEventSink};
    use crate::ports::FixedClock;
    use chrono::{TimeZone, Utc};

    fn session(gateway: Arc<InMemoryGateway>, sink: &MemoryEventSink) -> Session {
        let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()));
        let store = TaskStore::new(gateway, Arc::new(sink.clone()));
        Session::new(store, FilterState::default(), clock)
    }

    #[tokio::test]
    async fn mount_loads_tasks_and_categories() {
        let gateway = Arc::new(InMemoryGateway::new());
        gateway.set_categories(vec!["work".into()]).await;
        let sink = MemoryEventSink::new();
        let mut session = session(gateway, &sink);

        session.mount().await.unwrap();

        assert!(session.store().is_loaded());
        assert_eq!(session.store().categories().names(), ["work".to_string()]);
        assert_eq!(
            sink.events(),
            vec![
                StoreEvent::Loaded { count: 0 },
                StoreEvent::CategoriesRefreshed { count: 1 }
            ]
        );
    }

    #[tokio::test]
    async fn view_follows_store_and_filter_changes() {
        let gateway = Arc::new(InMemoryGateway::new());
        let sink = MemoryEventSink::new();
        let mut session = session(gateway, &sink);
        session.mount().await.unwrap();

        session
            .store_mut()
            .create(TaskDraft::new("Ship release").with_priority(Priority::High))
            .await
            .unwrap();
        session
            .store_mut()
            .create(TaskDraft::new("Water plants").with_priority(Priority::Low))
            .await
            .unwrap();

        assert_eq!(session.view().showing(), 2);
        assert_eq!(session.view().rows[0].task.title, "Water plants");

        session.set_filter(FilterState::default().with_priority(PriorityFilter::Only(Priority::High)));
        let view = session.view();
        assert_eq!(view.showing(), 1);
        assert_eq!(view.rows[0].task.title, "Ship release");
        assert_eq!(view.stats.total, 2);

        session.clear_filters();
        assert_eq!(session.view().showing(), 2);
        assert_eq!(session.stats().pending, 2);
    }
}
