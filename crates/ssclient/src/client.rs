//! HTTP transport for the Serverspace API
//!
//! Every call is a single attempt: JSON in, JSON out, `X-API-KEY` when a key
//! is configured. Non-2xx answers become [`ApiError::Response`].

use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::error::{ApiError, Result};
use crate::{
    DomainHandler, ImageHandler, LocationHandler, NetworkHandler, ProjectHandler, ServerHandler,
    SshKeyHandler, TaskHandler,
};

/// Header carrying the project API key
pub const API_KEY_HEADER: &str = "X-API-KEY";

const DEFAULT_USER_AGENT: &str = concat!("ssclient/", env!("CARGO_PKG_VERSION"));

/// Serverspace API client
///
/// Cheap to clone; handlers take their own copy.
#[derive(Debug, Clone)]
pub struct SsClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
}

/// Builder for [`SsClient`]
#[derive(Debug)]
pub struct SsClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    user_agent: String,
    timeout: Option<Duration>,
}

impl Default for SsClientBuilder {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
        }
    }
}

impl SsClientBuilder {
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Per-request timeout applied by the HTTP layer
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<SsClient> {
        let raw = self.base_url.ok_or(ApiError::MissingBaseUrl)?;
        let mut base_url = Url::parse(&raw)?;
        // Url::join drops the last segment unless the base ends with a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = reqwest::Client::builder().user_agent(self.user_agent);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(SsClient {
            http: builder.build()?,
            base_url,
            api_key: self.api_key.filter(|key| !key.is_empty()),
        })
    }
}

impl SsClient {
    pub fn builder() -> SsClientBuilder {
        SsClientBuilder::default()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn servers(&self) -> ServerHandler {
        ServerHandler::new(self.clone())
    }

    pub fn networks(&self) -> NetworkHandler {
        NetworkHandler::new(self.clone())
    }

    pub fn domains(&self) -> DomainHandler {
        DomainHandler::new(self.clone())
    }

    pub fn ssh_keys(&self) -> SshKeyHandler {
        SshKeyHandler::new(self.clone())
    }

    pub fn tasks(&self) -> TaskHandler {
        TaskHandler::new(self.clone())
    }

    pub fn project(&self) -> ProjectHandler {
        ProjectHandler::new(self.clone())
    }

    pub fn locations(&self) -> LocationHandler {
        LocationHandler::new(self.clone())
    }

    pub fn images(&self) -> ImageHandler {
        ImageHandler::new(self.clone())
    }

    pub async fn get_raw(&self, path: &str) -> Result<Value> {
        self.request(Method::GET, path, None).await
    }

    pub async fn post_raw(&self, path: &str, body: Value) -> Result<Value> {
        self.request(Method::POST, path, Some(&body)).await
    }

    pub async fn put_raw(&self, path: &str, body: Value) -> Result<Value> {
        self.request(Method::PUT, path, Some(&body)).await
    }

    pub async fn patch_raw(&self, path: &str, body: Value) -> Result<Value> {
        self.request(Method::PATCH, path, Some(&body)).await
    }

    pub async fn delete_raw(&self, path: &str) -> Result<Value> {
        self.request(Method::DELETE, path, None).await
    }

    /// GET `path` and decode the value stored under `key`
    pub(crate) async fn get_envelope<T: DeserializeOwned>(&self, path: &str, key: &str) -> Result<T> {
        let value = self.get_raw(path).await?;
        unwrap_envelope(value, key)
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let value = self.post_raw(path, serde_json::to_value(body)?).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub(crate) async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let value = self.put_raw(path, serde_json::to_value(body)?).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub(crate) async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let value = self.patch_raw(path, serde_json::to_value(body)?).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        self.delete_raw(path).await.map(|_| ())
    }

    async fn request(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value> {
        let url = self.base_url.join(path.trim_start_matches('/'))?;
        debug!(%method, %url, "Sending API request");

        let mut request = self.http.request(method, url);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }
        if let Some(body) = body {
            trace!(body = %body, "Request payload");
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        trace!(status = status.as_u16(), body = %text, "Received API response");

        if !status.is_success() {
            let message = error_message(status, &text);
            debug!(status = status.as_u16(), %message, "API request failed");
            return Err(ApiError::Response {
                status: status.as_u16(),
                message,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

fn unwrap_envelope<T: DeserializeOwned>(mut value: Value, key: &str) -> Result<T> {
    match value.get_mut(key).map(Value::take) {
        Some(inner) => Ok(serde_json::from_value(inner)?),
        None => Err(ApiError::MissingEnvelope {
            key: key.to_string(),
        }),
    }
}

/// Pick the human readable part of an error body
///
/// `errors` of a JSON object wins, then the raw body, then the status reason.
fn error_message(status: StatusCode, body: &str) -> String {
    let trimmed = body.trim();
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(map)) => {
            if let Some(errors) = map.get("errors").filter(|v| !v.is_null()) {
                return render_errors(errors);
            }
        }
        Ok(Value::String(text)) if !text.is_empty() => return text,
        _ if !trimmed.is_empty() => return trimmed.to_string(),
        _ => {}
    }
    status
        .canonical_reason()
        .unwrap_or("Unknown error")
        .to_string()
}

fn render_errors(errors: &Value) -> String {
    match errors {
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(render_errors)
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_message_prefers_errors_field() {
        let body = r#"{"errors": "Server is locked", "code": 17}"#;
        assert_eq!(
            error_message(StatusCode::CONFLICT, body),
            "Server is locked"
        );
    }

    #[test]
    fn test_error_message_joins_error_list() {
        let body = r#"{"errors": ["cpu is required", "ram_mb is required"]}"#;
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, body),
            "cpu is required; ram_mb is required"
        );
    }

    #[test]
    fn test_error_message_structured_errors_kept_as_json() {
        let body = r#"{"errors": {"name": "too long"}}"#;
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, body),
            r#"{"name":"too long"}"#
        );
    }

    #[test]
    fn test_error_message_falls_back_to_raw_text() {
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "upstream unavailable\n"),
            "upstream unavailable"
        );
    }

    #[test]
    fn test_error_message_json_string_body_is_unquoted() {
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, r#""bad request body""#),
            "bad request body"
        );
    }

    #[test]
    fn test_error_message_falls_back_to_reason() {
        assert_eq!(error_message(StatusCode::NOT_FOUND, ""), "Not Found");
        assert_eq!(
            error_message(StatusCode::UNAUTHORIZED, r#"{"detail": null}"#),
            "Unauthorized"
        );
    }

    #[test]
    fn test_unwrap_envelope() {
        let value = json!({"task": {"id": "t-1"}});
        let inner: Value = unwrap_envelope(value, "task").unwrap();
        assert_eq!(inner, json!({"id": "t-1"}));

        let err = unwrap_envelope::<Value>(json!({"tasks": []}), "task").unwrap_err();
        assert!(matches!(err, ApiError::MissingEnvelope { key } if key == "task"));
    }

    #[test]
    fn test_builder_requires_base_url() {
        let err = SsClient::builder().api_key("04abc").build().unwrap_err();
        assert!(matches!(err, ApiError::MissingBaseUrl));
    }

    #[test]
    fn test_builder_normalizes_base_url_and_key() {
        let client = SsClient::builder()
            .base_url("https://api.serverspace.io/proxy")
            .api_key("")
            .build()
            .unwrap();
        assert_eq!(client.base_url().as_str(), "https://api.serverspace.io/proxy/");
        assert!(!client.has_api_key());
        assert_eq!(
            client.base_url().join("api/v1/servers").unwrap().as_str(),
            "https://api.serverspace.io/proxy/api/v1/servers"
        );
    }
}
