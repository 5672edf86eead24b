use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::warn;
use url::Url;

use crate::error::{ApiError, InvalidBaseUrl};

/// Result of a gateway call: a decoded JSON payload, or the uniform
/// demo-mode failure. Callers must branch on this, never unwind.
pub type ApiResult<T> = Result<T, ApiError>;

/// The remote boundary of the dashboard.
///
/// Implementations never surface transport details: anything that stops a
/// JSON payload from coming back is the one `ApiError`. Semantic failures
/// (an `{"error": ...}` body, missing fields) pass through as payloads and
/// are the caller's problem.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Issues a GET against an endpoint path like `/user/1`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on any transport or parse failure.
    async fn get(&self, endpoint: &str) -> ApiResult<Value>;

    /// Issues a POST with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on any transport or parse failure.
    async fn post(&self, endpoint: &str, body: &Value) -> ApiResult<Value>;
}

/// Reqwest-backed gateway: base URL + `/api`, JSON content type on every
/// request, optional bearer token pass-through.
#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    api_base: String,
    token: Option<String>,
}

impl HttpGateway {
    /// Builds a gateway for the given base URL (e.g. `http://localhost:5001`).
    ///
    /// # Errors
    ///
    /// Returns `InvalidBaseUrl` when the base URL does not parse.
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, InvalidBaseUrl> {
        let parsed = Url::parse(base_url)?;
        let api_base = format!("{}/api", parsed.as_str().trim_end_matches('/'));
        Ok(Self {
            client: Client::new(),
            api_base,
            token,
        })
    }

    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn prepare(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header(CONTENT_TYPE, "application/json");
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn execute(&self, endpoint: &str, request: RequestBuilder) -> ApiResult<Value> {
        match Self::fetch_json(request).await {
            Ok(value) => Ok(value),
            Err(err) => {
                warn!(endpoint, error = %err, "api call failed, entering demo mode");
                Err(ApiError)
            }
        }
    }

    async fn fetch_json(request: RequestBuilder) -> Result<Value, reqwest::Error> {
        let response = request.send().await?;
        // The status line is deliberately not inspected: a non-2xx response
        // with a JSON body (e.g. {"error": "User not found"}) is a semantic
        // result for the caller, not a gateway failure.
        response.json::<Value>().await
    }
}

#[async_trait]
impl ApiClient for HttpGateway {
    async fn get(&self, endpoint: &str) -> ApiResult<Value> {
        let request = self.client.get(format!("{}{endpoint}", self.api_base));
        self.execute(endpoint, self.prepare(request)).await
    }

    async fn post(&self, endpoint: &str, body: &Value) -> ApiResult<Value> {
        let request = self
            .client
            .post(format!("{}{endpoint}", self.api_base))
            .json(body);
        self.execute(endpoint, self.prepare(request)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_base_joins_api_path_once() {
        let gateway = HttpGateway::new("http://localhost:5001", None).unwrap();
        assert_eq!(gateway.api_base(), "http://localhost:5001/api");

        let trailing = HttpGateway::new("http://localhost:5001/", None).unwrap();
        assert_eq!(trailing.api_base(), "http://localhost:5001/api");
    }

    #[test]
    fn rejects_unparseable_base_url() {
        assert!(HttpGateway::new("not a url", None).is_err());
    }
}
