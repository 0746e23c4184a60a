//! HTTP client for network-based API calls

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{ClientConfig, ClientError, ClientResult};

/// HTTP client trait
///
/// Paths are relative to the configured base URL. Success bodies are the
/// bare JSON resource; error bodies are parsed into [`ClientError::Api`].
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn get_with_query<T: DeserializeOwned, Q: Serialize + Sync>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T>;
    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn put_with_query<T: DeserializeOwned, Q: Serialize + Sync, B: Serialize + Sync>(
        &self,
        path: &str,
        query: &Q,
        body: &B,
    ) -> ClientResult<T>;
    fn token(&self) -> Option<&str>;
}

/// Network HTTP client
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl NetworkHttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout_duration())
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Drop the bearer token (sign-out)
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    async fn send<T, Q, B>(
        &self,
        method: Method,
        path: &str,
        query: Option<&Q>,
        body: Option<&B>,
    ) -> ClientResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + Sync + ?Sized,
        B: Serialize + Sync + ?Sized,
    {
        let url = self.url(path);
        tracing::debug!(method = %method, url = %url, "Sending request");

        let mut req = self.client.request(method.clone(), &url);
        if let Some(query) = query {
            req = req.query(query);
        }
        if let Some(body) = body {
            req = req.json(body);
        }
        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = req.send().await.inspect_err(|e| {
            tracing::warn!(method = %method, url = %url, error = %e, "Request failed");
        })?;
        handle_response(response).await
    }
}

/// Join path segments under a leading `/`, percent-encoding each segment
///
/// Ids are caller-supplied, so `/`, `?` and `#` inside one must not change
/// the route. Only RFC 3986 unreserved characters pass through.
pub fn api_path(segments: &[&str]) -> String {
    let mut path = String::new();
    for segment in segments {
        path.push('/');
        for byte in segment.bytes() {
            if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
                path.push(byte as char);
            } else {
                path.push_str(&format!("%{:02X}", byte));
            }
        }
    }
    path
}

/// Map a response to the decoded body or a typed error
async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        tracing::debug!(status = status.as_u16(), "Request returned error status");
        return Err(error_from_body(status, text));
    }

    let payload = if text.trim().is_empty() { "null" } else { text.as_str() };
    serde_json::from_str(payload).map_err(|e| {
        ClientError::InvalidResponse(format!("Unexpected response shape: {}", e))
    })
}

/// Build the error for a non-2xx response
fn error_from_body(status: StatusCode, text: String) -> ClientError {
    // 尝试解析为 API 错误响应
    if let Ok(body) = serde_json::from_str::<Value>(&text)
        && let Some(message) = body
            .get("message")
            .or_else(|| body.get("error"))
            .and_then(Value::as_str)
    {
        return ClientError::Api {
            status: status.as_u16(),
            code: body
                .get("code")
                .and_then(Value::as_u64)
                .and_then(|c| u16::try_from(c).ok()),
            message: message.to_string(),
            body: Some(body.clone()),
        };
    }

    // 降级到按状态码处理
    match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized(text),
        StatusCode::FORBIDDEN => ClientError::Forbidden(text),
        StatusCode::NOT_FOUND => ClientError::NotFound(text),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ClientError::BadRequest {
            status: status.as_u16(),
            message: text,
        },
        _ => ClientError::Internal {
            status: status.as_u16(),
            message: text,
        },
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send::<T, (), ()>(Method::GET, path, None, None).await
    }

    async fn get_with_query<T: DeserializeOwned, Q: Serialize + Sync>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T> {
        self.send::<T, Q, ()>(Method::GET, path, Some(query), None)
            .await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send::<T, (), B>(Method::POST, path, None, Some(body))
            .await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send::<T, (), B>(Method::PUT, path, None, Some(body))
            .await
    }

    async fn put_with_query<T: DeserializeOwned, Q: Serialize + Sync, B: Serialize + Sync>(
        &self,
        path: &str,
        query: &Q,
        body: &B,
    ) -> ClientResult<T> {
        self.send::<T, Q, B>(Method::PUT, path, Some(query), Some(body))
            .await
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}
