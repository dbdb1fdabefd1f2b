//! Category set.
//!
//! クライアントは既定のカテゴリ一覧を持ち、サーバーから取得できたら丸ごと置き換える。
//! 取得に失敗した場合は直前の一覧をそのまま使う。

use serde::{Deserialize, Serialize};

/// Categories offered before the server has answered.
pub const DEFAULT_CATEGORIES: [&str; 6] =
    ["general", "work", "personal", "shopping", "health", "learning"];

/// Ordered set of category names offered for tasks and filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySet {
    names: Vec<String>,
}

impl CategorySet {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Replace the whole set with a server response.
    pub fn replace(&mut self, names: Vec<String>) {
        self.names = names;
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for CategorySet {
    fn default() -> Self {
        Self::new(DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect())
    }
}
