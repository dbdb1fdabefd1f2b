//! Domain identifiers.
//!
//! # サーバー採番の ID
//! TaskId はサーバーが採番する不透明な文字列です。
//! クライアントは形式を仮定せず、比較と表示だけを行います。
//! (元のバックエンドは UUID、InMemoryGateway は ULID を使う)

use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// Identifier of a task record, assigned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// ULID から TaskId を作成（InMemoryGateway の採番用）
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_id_serializes_as_plain_string() {
        let id = TaskId::new("3f0c7c1e-8d7a-4c55-9a51-6a1b1f0e2d44");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"3f0c7c1e-8d7a-4c55-9a51-6a1b1f0e2d44\"");

        let back: TaskId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn ulid_ids_keep_generation_order() {
        let first = TaskId::from_ulid(Ulid::new());
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = TaskId::from_ulid(Ulid::new());

        // ULID の文字列表現は辞書順 = 生成順
        assert!(first < second);
    }

    #[test]
    fn display_is_the_raw_value() {
        let id: TaskId = "abc".into();
        assert_eq!(id.to_string(), "abc");
        assert_eq!(id.as_str(), "abc");
    }
}
