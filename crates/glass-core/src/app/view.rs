//! Derived view: visible tasks and stats.
//!
//! Everything here is a pure function of a task slice and a filter; nothing is
//! cached. Recompute after every store or filter change.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{DueStatus, FilterState, TaskRecord};

/// Counts over the full, unfiltered collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

pub fn stats(tasks: &[TaskRecord]) -> TaskStats {
    let completed = tasks.iter().filter(|t| t.completed).count();
    TaskStats {
        total: tasks.len(),
        completed,
        pending: tasks.len() - completed,
    }
}

/// Tasks passing `filter`, in store order.
pub fn visible<'a>(tasks: &'a [TaskRecord], filter: &FilterState) -> Vec<&'a TaskRecord> {
    let matcher = filter.matcher();
    tasks.iter().filter(|t| matcher.matches(t)).collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct Row<'a> {
    #[serde(flatten)]
    pub task: &'a TaskRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_status: Option<DueStatus>,
}

/// Snapshot handed to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct View<'a> {
    pub rows: Vec<Row<'a>>,
    pub stats: TaskStats,
    pub filter_active: bool,
}

impl<'a> View<'a> {
    pub fn build(tasks: &'a [TaskRecord], filter: &FilterState, today: NaiveDate) -> Self {
        let rows = visible(tasks, filter)
            .into_iter()
            .map(|task| Row {
                task,
                due_status: task.due_status(today),
            })
            .collect();
        Self {
            rows,
            stats: stats(tasks),
            filter_active: filter.is_active(),
        }
    }

    pub fn showing(&self) -> usize {
        self.rows.len()
    }

    /// "Showing N of M tasks", only while a filter is active.
    pub fn summary(&self) -> Option<String> {
        self.filter_active
            .then(|| format!("Showing {} of {} tasks", self.showing(), self.stats.total))
    }

    /// Placeholder text for an empty list.
    pub fn empty_message(&self) -> Option<&'static str> {
        if !self.rows.is_empty() {
            return None;
        }
        Some(if self.filter_active {
            "No matching tasks"
        } else {
            "No tasks yet"
        })
    }
}
