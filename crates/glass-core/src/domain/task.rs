//! Task records, drafts and patches.
//!
//! The JSON shape matches the `/api/todos` contract:
//! `{id, title, description, category, priority, due_date, completed, created_at}`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use super::due::DueStatus;
use super::errors::GlassError;
use super::ids::TaskId;

/// Category assigned when the user does not pick one.
pub const DEFAULT_CATEGORY: &str = "general";

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// Task priority.
///
/// Serialized lowercase. Unknown strings coming back from the server
/// decode as `Medium`, the same fallback the list badge has always used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = GlassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(GlassError::validation(format!(
                "unknown priority '{other}' (expected high, medium or low)"
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or_default())
    }
}

/// サーバーは due_date を検証しないので、壊れた値は None として読む。
/// 1 件の不正な日付で一覧全体の読み込みを落とさない。
fn lenient_due_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(date) => Ok(Some(date)),
        Err(e) => {
            warn!(due_date = %raw, error = %e, "ignoring unparseable due_date");
            Ok(None)
        }
    }
}

/// Canonical task record as returned by the server.
///
/// The store only ever holds records that came back from the gateway;
/// it never edits fields locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: TaskId,
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default = "default_category")]
    pub category: String,

    #[serde(default)]
    pub priority: Priority,

    /// Calendar date (`YYYY-MM-DD`), no time component.
    /// A value that is not a valid date reads as no due date.
    #[serde(default, deserialize_with = "lenient_due_date")]
    pub due_date: Option<NaiveDate>,

    #[serde(default)]
    pub completed: bool,

    /// Creation timestamp stamped by the server (absent on older records).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl TaskRecord {
    /// Description with a missing value read as "".
    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Due status relative to `today`. `None` when the task has no due date.
    pub fn due_status(&self, today: NaiveDate) -> Option<DueStatus> {
        self.due_date.map(|due| DueStatus::classify(due, today))
    }
}

/// User-supplied fields for a task that does not exist yet.
///
/// # 使用例
/// ```ignore
/// let draft = TaskDraft::new("Buy milk")
///     .with_category("shopping")
///     .with_priority(Priority::High);
/// store.create(draft).await?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            category: default_category(),
            priority: Priority::default(),
            due_date: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Trim text fields and check the title.
    ///
    /// 空タイトルはネットワーク呼び出しの前に弾く。
    /// 空カテゴリは "general" に戻す。
    pub fn normalized(self) -> Result<Self, GlassError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(GlassError::validation("title must not be empty"));
        }
        let category = match self.category.trim() {
            "" => default_category(),
            c => c.to_string(),
        };
        Ok(Self {
            title,
            description: self.description.trim().to_string(),
            category,
            priority: self.priority,
            due_date: self.due_date,
        })
    }
}

/// Partial field changes for an existing task.
///
/// Absent fields are not serialized, so the server leaves them alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// Patch that only sets the completion flag.
    pub fn completion(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.completed.is_none()
    }

    /// Trim text fields; a present title must stay non-empty.
    pub fn normalized(self) -> Result<Self, GlassError> {
        let title = match self.title {
            Some(t) => {
                let t = t.trim().to_string();
                if t.is_empty() {
                    return Err(GlassError::validation("title must not be empty"));
                }
                Some(t)
            }
            None => None,
        };
        Ok(Self {
            title,
            description: self.description.map(|d| d.trim().to_string()),
            category: self
                .category
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            ..self
        })
    }

    /// Set every present field on `record`, the way the server's `$set` does.
    pub fn apply_to(&self, record: &mut TaskRecord) {
        if let Some(title) = &self.title {
            record.title = title.clone();
        }
        if let Some(description) = &self.description {
            record.description = Some(description.clone());
        }
        if let Some(category) = &self.category {
            record.category = category.clone();
        }
        if let Some(priority) = self.priority {
            record.priority = priority;
        }
        if let Some(due_date) = self.due_date {
            record.due_date = Some(due_date);
        }
        if let Some(completed) = self.completed {
            record.completed = completed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> TaskRecord {
        TaskRecord {
            id: TaskId::new("t-1"),
            title: "Write report".into(),
            description: None,
            category: "work".into(),
            priority: Priority::High,
            due_date: None,
            completed: false,
            created_at: None,
        }
    }

    #[test]
    fn record_decodes_server_json() {
        let raw = json!({
            "id": "9b2e",
            "title": "Buy milk",
            "description": "",
            "category": "shopping",
            "priority": "low",
            "due_date": "2025-03-14",
            "completed": false,
            "created_at": "2025-03-01T08:30:00.123456+00:00"
        });
        let task: TaskRecord = serde_json::from_value(raw).unwrap();
        assert_eq!(task.id.as_str(), "9b2e");
        assert_eq!(task.priority, Priority::Low);
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2025, 3, 14));
        assert!(task.created_at.is_some());
    }

    #[test]
    fn record_tolerates_missing_optional_fields() {
        let task: TaskRecord =
            serde_json::from_value(json!({ "id": "x", "title": "Only a title", "due_date": null }))
                .unwrap();
        assert_eq!(task.category, DEFAULT_CATEGORY);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.description_or_empty(), "");
        assert!(!task.completed);
        assert_eq!(task.due_date, None);
    }

    #[test]
    fn malformed_due_date_reads_as_none() {
        for bad in ["", "  ", "tomorrow", "2025-13-40", "14/03/2025"] {
            let task: TaskRecord =
                serde_json::from_value(json!({ "id": "x", "title": "t", "due_date": bad }))
                    .unwrap();
            assert_eq!(task.due_date, None, "due_date {bad:?}");
        }

        let task: TaskRecord =
            serde_json::from_value(json!({ "id": "x", "title": "t", "due_date": "2025-03-14" }))
                .unwrap();
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2025, 3, 14));
    }

    #[test]
    fn unknown_priority_falls_back_to_medium() {
        let task: TaskRecord =
            serde_json::from_value(json!({ "id": "x", "title": "t", "priority": "urgent" }))
                .unwrap();
        assert_eq!(task.priority, Priority::Medium);
    }

    #[test]
    fn priority_parses_case_insensitively() {
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!(" low ".parse::<Priority>().unwrap(), Priority::Low);
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn draft_is_trimmed_and_defaulted() {
        let draft = TaskDraft::new("  Buy milk  ")
            .with_description("  two litres ")
            .with_category("   ")
            .normalized()
            .unwrap();
        assert_eq!(draft.title, "Buy milk");
        assert_eq!(draft.description, "two litres");
        assert_eq!(draft.category, DEFAULT_CATEGORY);
        assert_eq!(draft.priority, Priority::Medium);
    }

    #[test]
    fn draft_with_blank_title_is_rejected() {
        let err = TaskDraft::new("   ").normalized().unwrap_err();
        assert!(matches!(err, GlassError::Validation(_)));
    }

    #[test]
    fn draft_serializes_the_create_body() {
        let body = serde_json::to_value(TaskDraft::new("Buy milk")).unwrap();
        assert_eq!(
            body,
            json!({
                "title": "Buy milk",
                "description": "",
                "category": "general",
                "priority": "medium",
                "due_date": null
            })
        );
    }

    #[test]
    fn patch_omits_absent_fields() {
        let body = serde_json::to_value(TaskPatch::completion(true)).unwrap();
        assert_eq!(body, json!({ "completed": true }));
        assert!(TaskPatch::default().is_empty());
    }

    #[test]
    fn patch_rejects_blank_title() {
        let patch = TaskPatch {
            title: Some(" ".into()),
            ..TaskPatch::default()
        };
        assert!(patch.normalized().is_err());
    }

    #[test]
    fn patch_sets_only_present_fields() {
        let mut task = record();
        let patch = TaskPatch {
            title: Some("Write final report".into()),
            completed: Some(true),
            ..TaskPatch::default()
        };
        patch.apply_to(&mut task);

        assert_eq!(task.title, "Write final report");
        assert!(task.completed);
        assert_eq!(task.category, "work");
        assert_eq!(task.priority, Priority::High);
    }
}
