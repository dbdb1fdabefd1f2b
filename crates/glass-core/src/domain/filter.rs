//! Filter state and the per-task predicate.
//!
//! # 判定ルール（すべて AND）
//! 1. search: 空でなければ title または description に大文字小文字を無視して含まれる
//! 2. category: `all` 以外なら完全一致
//! 3. priority: `all` 以外なら完全一致
//! 4. status: completed / pending / all

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::GlassError;
use super::task::{Priority, TaskRecord};

const ALL: &str = "all";

/// Category selector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    fn admits(&self, task: &TaskRecord) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => task.category == *category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = GlassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Err(GlassError::validation("category filter must not be empty")),
            ALL => Ok(CategoryFilter::All),
            other => Ok(CategoryFilter::Only(other.to_string())),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL),
            CategoryFilter::Only(category) => f.write_str(category),
        }
    }
}

/// Priority selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(Priority),
}

impl PriorityFilter {
    // Unknown server priorities were decoded as Medium, so `Only(Medium)` admits them.
    fn admits(self, task: &TaskRecord) -> bool {
        match self {
            PriorityFilter::All => true,
            PriorityFilter::Only(priority) => task.priority == priority,
        }
    }
}

impl FromStr for PriorityFilter {
    type Err = GlassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(ALL) {
            return Ok(PriorityFilter::All);
        }
        s.parse().map(PriorityFilter::Only)
    }
}

impl fmt::Display for PriorityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriorityFilter::All => f.write_str(ALL),
            PriorityFilter::Only(priority) => priority.fmt(f),
        }
    }
}

/// Completion-status selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Pending,
}

impl StatusFilter {
    fn admits(self, task: &TaskRecord) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Completed => task.completed,
            StatusFilter::Pending => !task.completed,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = GlassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            ALL => Ok(StatusFilter::All),
            "completed" => Ok(StatusFilter::Completed),
            "pending" => Ok(StatusFilter::Pending),
            other => Err(GlassError::validation(format!(
                "unknown status '{other}' (expected all, completed or pending)"
            ))),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StatusFilter::All => ALL,
            StatusFilter::Completed => "completed",
            StatusFilter::Pending => "pending",
        })
    }
}

/// User-selected criteria narrowing the visible list.
///
/// Default is "no filtering": empty search and every selector at `all`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub search: String,
    pub category: CategoryFilter,
    pub priority: PriorityFilter,
    pub status: StatusFilter,
}

impl FilterState {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    pub fn with_priority(mut self, priority: PriorityFilter) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    /// Does any criterion narrow the list?
    pub fn is_active(&self) -> bool {
        !self.search.is_empty()
            || self.category != CategoryFilter::All
            || self.priority != PriorityFilter::All
            || self.status != StatusFilter::All
    }

    /// Reset every criterion.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Predicate for a single task.
    pub fn matches(&self, task: &TaskRecord) -> bool {
        self.matcher().matches(task)
    }

    /// Predicate with the search needle lowercased once, for filtering whole lists.
    pub fn matcher(&self) -> Matcher<'_> {
        Matcher {
            filter: self,
            needle: self.search.to_lowercase(),
        }
    }
}

/// Borrowed, ready-to-run form of a [`FilterState`].
pub struct Matcher<'a> {
    filter: &'a FilterState,
    needle: String,
}

impl Matcher<'_> {
    pub fn matches(&self, task: &TaskRecord) -> bool {
        self.matches_search(task)
            && self.filter.category.admits(task)
            && self.filter.priority.admits(task)
            && self.filter.status.admits(task)
    }

    fn matches_search(&self, task: &TaskRecord) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        task.title.to_lowercase().contains(&self.needle)
            || task
                .description_or_empty()
                .to_lowercase()
                .contains(&self.needle)
    }
}
