//! Errors - エラー型と分類
//!
//! サーバー契約は validation エラーと一般的なサーバーエラーを区別しないため、
//! クライアント側で ErrorKind を明示的に定義します。

use thiserror::Error;

use super::ids::TaskId;

/// ErrorKind はエラーの運用分類
///
/// - Validation: ローカル検証で弾いた（リクエストは送っていない）
/// - Transport: リクエストが完了しなかった（接続失敗・タイムアウト）
/// - Server: サーバーが拒否した、または応答が壊れていた
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Transport,
    Server,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Transport => "transport",
            ErrorKind::Server => "server",
        }
    }
}

/// GlassError is the single error type crossing the store and gateway seams.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GlassError {
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("task {0} is not in the local list")]
    UnknownTask(TaskId),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("server rejected the request (status {status}): {message}")]
    Server { status: u16, message: String },

    #[error("malformed server response: {0}")]
    Decode(String),
}

impl GlassError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            GlassError::Validation(_) | GlassError::UnknownTask(_) => ErrorKind::Validation,
            GlassError::Transport(_) => ErrorKind::Transport,
            GlassError::Server { .. } | GlassError::Decode(_) => ErrorKind::Server,
        }
    }

    /// HTTP status of a server rejection, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            GlassError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_failures_count_as_server_faults() {
        let err = GlassError::Decode("expected array".into());
        assert_eq!(err.kind(), ErrorKind::Server);
        assert_eq!(err.status(), None);
    }

    #[test]
    fn unknown_task_is_a_local_validation_error() {
        let err = GlassError::UnknownTask(TaskId::new("t-1"));
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "task t-1 is not in the local list");
    }

    #[test]
    fn server_error_keeps_status() {
        let err = GlassError::Server {
            status: 404,
            message: "Todo not found".into(),
        };
        assert_eq!(err.kind(), ErrorKind::Server);
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("Todo not found"));
    }
}
