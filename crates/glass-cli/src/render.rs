//! Text and JSON output.

use std::io::{self, Write};

use anyhow::Result;
use serde::Serialize;
use serde_json::json;

use glass_core::app::{TaskStats, View};
use glass_core::domain::{DueStatus, TaskId, TaskRecord};

pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let mut stdout = io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, value)?;
        writeln!(stdout)?;
        Ok(())
    }

    pub fn view(&self, view: &View<'_>) -> Result<()> {
        if self.json {
            return self.print_json(view);
        }
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", stats_line(&view.stats))?;
        if let Some(summary) = view.summary() {
            writeln!(stdout, "{summary}")?;
        }
        if let Some(empty) = view.empty_message() {
            writeln!(stdout, "{empty}")?;
        }
        for row in &view.rows {
            writeln!(stdout, "{}", task_line(row.task, row.due_status))?;
        }
        Ok(())
    }

    pub fn task(&self, task: &TaskRecord) -> Result<()> {
        if self.json {
            return self.print_json(task);
        }
        writeln!(io::stdout().lock(), "{}", task_line(task, None))?;
        Ok(())
    }

    pub fn deleted(&self, id: &TaskId) -> Result<()> {
        if self.json {
            return self.print_json(&json!({ "deleted": id }));
        }
        writeln!(io::stdout().lock(), "deleted {id}")?;
        Ok(())
    }

    pub fn categories(&self, names: &[String]) -> Result<()> {
        if self.json {
            return self.print_json(&json!({ "categories": names }));
        }
        let mut stdout = io::stdout().lock();
        for name in names {
            writeln!(stdout, "{name}")?;
        }
        Ok(())
    }

    pub fn stats(&self, stats: &TaskStats) -> Result<()> {
        if self.json {
            return self.print_json(stats);
        }
        writeln!(io::stdout().lock(), "{}", stats_line(stats))?;
        Ok(())
    }
}

fn stats_line(stats: &TaskStats) -> String {
    format!(
        "{} total, {} completed, {} pending",
        stats.total, stats.completed, stats.pending
    )
}

fn task_line(task: &TaskRecord, due_status: Option<DueStatus>) -> String {
    let mark = if task.completed { "[x]" } else { "[ ]" };
    let mut line = format!("{mark} {}  ({}, {})", task.title, task.category, task.priority);
    if let Some(due) = task.due_date {
        line.push_str(&format!("  due {}", due.format("%b %-d, %Y")));
        if let Some(status @ (DueStatus::Overdue | DueStatus::Today)) = due_status {
            line.push_str(&format!(" ({})", status.label()));
        }
    }
    line.push_str(&format!("  #{}", task.id));
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use glass_core::domain::Priority;

    fn task() -> TaskRecord {
        TaskRecord {
            id: TaskId::new("01HQ"),
            title: "Buy milk".into(),
            description: None,
            category: "shopping".into(),
            priority: Priority::High,
            due_date: NaiveDate::from_ymd_opt(2025, 3, 14),
            completed: false,
            created_at: None,
        }
    }

    #[test]
    fn task_line_marks_overdue() {
        let line = task_line(&task(), Some(DueStatus::Overdue));
        assert_eq!(line, "[ ] Buy milk  (shopping, high)  due Mar 14, 2025 (Overdue)  #01HQ");
    }

    #[test]
    fn upcoming_due_dates_carry_no_label() {
        let mut t = task();
        t.completed = true;
        let line = task_line(&t, Some(DueStatus::Upcoming));
        assert!(line.starts_with("[x] Buy milk"));
        assert!(!line.contains("Upcoming"));
    }

    #[test]
    fn stats_line_lists_all_counts() {
        let stats = TaskStats { total: 3, completed: 1, pending: 2 };
        assert_eq!(stats_line(&stats), "3 total, 1 completed, 2 pending");
    }
}
