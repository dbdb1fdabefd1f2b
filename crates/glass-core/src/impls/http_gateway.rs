//! HttpGateway - reqwest による TaskGateway 実装
//!
//! # エラー変換
//! - 接続失敗・タイムアウト → `Transport`
//! - 2xx 以外 → `Server { status, message }`（FastAPI の `detail` があればそれを使う）
//! - 2xx だが JSON が壊れている → `Decode`
//!
//! Task ids are pushed as single path segments, so they are percent-encoded.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::GatewayConfig;
use crate::domain::{GlassError, TaskDraft, TaskId, TaskPatch, TaskRecord};
use crate::ports::TaskGateway;

#[derive(Debug, Deserialize)]
struct CategoriesResponse {
    categories: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

pub struct HttpGateway {
    client: Client,
    api_base: Url,
}

impl HttpGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self, GlassError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GlassError::Transport(format!("http client init: {e}")))?;
        let api_base = Url::parse(&config.api_base())
            .map_err(|e| GlassError::Transport(format!("invalid api base: {e}")))?;
        Ok(Self { client, api_base })
    }

    pub fn api_base(&self) -> &str {
        self.api_base.as_str()
    }

    /// `api_base` に segment を足した URL。各 segment はエンコードされる。
    fn url(&self, segments: &[&str]) -> Result<Url, GlassError> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|()| GlassError::Transport(format!("cannot append a path to {}", self.api_base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn todo_url(&self, id: &TaskId) -> Result<Url, GlassError> {
        self.url(&["todos", id.as_str()])
    }

    /// Send and return the body of a 2xx response.
    async fn execute(&self, request: RequestBuilder) -> Result<Vec<u8>, GlassError> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        debug!(status = %status, url = %response.url(), "gateway response");

        let body = response.bytes().await.map_err(transport_error)?;
        if !status.is_success() {
            return Err(GlassError::Server {
                status: status.as_u16(),
                message: server_message(status, &body),
            });
        }
        Ok(body.to_vec())
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, GlassError> {
        let body = self.execute(request).await?;
        serde_json::from_slice(&body).map_err(|e| GlassError::Decode(e.to_string()))
    }
}

#[async_trait]
impl TaskGateway for HttpGateway {
    async fn list(&self) -> Result<Vec<TaskRecord>, GlassError> {
        let url = self.url(&["todos"])?;
        debug!(%url, "GET todos");
        self.fetch(self.client.get(url)).await
    }

    async fn create(&self, draft: &TaskDraft) -> Result<TaskRecord, GlassError> {
        let url = self.url(&["todos"])?;
        debug!(%url, title = %draft.title, "POST todo");
        self.fetch(self.client.post(url).json(draft)).await
    }

    async fn update(&self, id: &TaskId, patch: &TaskPatch) -> Result<TaskRecord, GlassError> {
        let url = self.todo_url(id)?;
        debug!(%url, "PUT todo");
        self.fetch(self.client.put(url).json(patch)).await
    }

    async fn delete(&self, id: &TaskId) -> Result<(), GlassError> {
        let url = self.todo_url(id)?;
        debug!(%url, "DELETE todo");
        // 成功はステータスだけで判定し、ボディは読み捨てる
        self.execute(self.client.delete(url)).await.map(|_| ())
    }

    async fn categories(&self) -> Result<Vec<String>, GlassError> {
        let url = self.url(&["categories"])?;
        debug!(%url, "GET categories");
        let response: CategoriesResponse = self.fetch(self.client.get(url)).await?;
        Ok(response.categories)
    }
}

fn transport_error(err: reqwest::Error) -> GlassError {
    GlassError::Transport(err.to_string())
}

fn server_message(status: StatusCode, body: &[u8]) -> String {
    if let Ok(ErrorBody { detail }) = serde_json::from_slice::<ErrorBody>(body) {
        return match detail {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
    }
    let text = String::from_utf8_lossy(body).trim().to_string();
    if text.is_empty() {
        status.canonical_reason().unwrap_or("request failed").to_string()
    } else {
        text
    }
}
