use std::env;
use std::fmt;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::ApiError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ApiConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reads `EXAM_API_URL` and `EXAM_API_TIMEOUT_SECS`, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = env::var("EXAM_API_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let timeout = env::var("EXAM_API_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map_or(DEFAULT_TIMEOUT, Duration::from_secs);
        Self { base_url, timeout }
    }
}

/// Bearer token for an authenticated user.
///
/// Services receive credentials explicitly; nothing reads them from
/// process-wide state.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    token: String,
}

impl Credentials {
    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Thin HTTP transport for the exam backend (`{base}/api/...`).
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base: Url,
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the base URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base = Url::parse(config.base_url.trim())
            .map_err(|err| ApiError::Config(format!("{}: {err}", config.base_url)))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::Config(format!(
                "{} cannot be used as a base url",
                config.base_url
            )));
        }
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| ApiError::Config(err.to_string()))?;
        Ok(Self { client, base })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::Config(format!("{} cannot be a base", self.base)))?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    /// Like `endpoint`, with `query` appended as `key=value` pairs.
    fn endpoint_with_query(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<Url, ApiError> {
        let mut url = self.endpoint(segments)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    fn request(
        &self,
        method: Method,
        segments: &[&str],
        credentials: Option<&Credentials>,
    ) -> Result<RequestBuilder, ApiError> {
        self.request_with_query(method, segments, &[], credentials)
    }

    fn request_with_query(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, &str)],
        credentials: Option<&Credentials>,
    ) -> Result<RequestBuilder, ApiError> {
        let url = self.endpoint_with_query(segments, query)?;
        let builder = self.client.request(method, url);
        Ok(match credentials {
            Some(credentials) => builder.bearer_auth(credentials.token()),
            None => builder,
        })
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        credentials: Option<&Credentials>,
    ) -> Result<T, ApiError> {
        let request = self.request(Method::GET, segments, credentials)?;
        let response = execute(request).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
        credentials: Option<&Credentials>,
    ) -> Result<T, ApiError> {
        let request = self
            .request(Method::POST, segments, credentials)?
            .json(body);
        let response = execute(request).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
        credentials: Option<&Credentials>,
    ) -> Result<T, ApiError> {
        let request = self.request(Method::PUT, segments, credentials)?.json(body);
        let response = execute(request).await?;
        Ok(response.json().await?)
    }

    /// PUT without a body; the backend reads these parameters from the query string.
    pub(crate) async fn put_query<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
        credentials: Option<&Credentials>,
    ) -> Result<T, ApiError> {
        let request = self.request_with_query(Method::PUT, segments, query, credentials)?;
        let response = execute(request).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn delete(
        &self,
        segments: &[&str],
        credentials: Option<&Credentials>,
    ) -> Result<(), ApiError> {
        let request = self.request(Method::DELETE, segments, credentials)?;
        execute(request).await?;
        Ok(())
    }

    pub(crate) async fn get_bytes(
        &self,
        segments: &[&str],
        credentials: Option<&Credentials>,
    ) -> Result<Vec<u8>, ApiError> {
        let request = self.request(Method::GET, segments, credentials)?;
        let response = execute(request).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

async fn execute(request: RequestBuilder) -> Result<Response, ApiError> {
    let (client, request) = request.build_split();
    let request = request?;
    let method = request.method().clone();
    let path = request.url().path().to_string();

    tracing::debug!(%method, %path, "api request");
    let response = client.execute(request).await.map_err(|err| {
        tracing::warn!(%method, %path, error = %err, "api request failed");
        ApiError::from(err)
    })?;

    let status = response.status();
    tracing::debug!(%method, %path, status = status.as_u16(), "api response");
    if status.is_success() {
        return Ok(response);
    }

    let detail = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(ErrorBody::into_detail);
    let err = error_for_status(status, detail);
    tracing::warn!(%method, %path, status = status.as_u16(), error = %err, "api error response");
    Err(err)
}

fn error_for_status(status: StatusCode, detail: Option<String>) -> ApiError {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ApiError::Validation(detail.unwrap_or_else(|| "request was rejected".into()))
        }
        StatusCode::UNAUTHORIZED => {
            ApiError::Unauthorized(detail.unwrap_or_else(|| "not signed in".into()))
        }
        StatusCode::FORBIDDEN => ApiError::Forbidden(detail.unwrap_or_else(|| "forbidden".into())),
        StatusCode::NOT_FOUND => ApiError::NotFound(detail.unwrap_or_else(|| "not found".into())),
        _ => ApiError::Network(format!("server returned {status}")),
    }
}

/// Error body of the backend: `{"detail": "..."}`.
///
/// Request validation failures carry a list instead of a string.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

impl ErrorBody {
    fn into_detail(self) -> Option<String> {
        match self.detail {
            serde_json::Value::String(text) if !text.trim().is_empty() => Some(text),
            serde_json::Value::Array(items) => items
                .iter()
                .find_map(|item| item.get("msg").and_then(serde_json::Value::as_str))
                .map(str::to_string),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_api_prefix() {
        let api = ApiClient::new(&ApiConfig::new("http://localhost:8000")).unwrap();
        let url = api.endpoint(&["papers", "abc"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/papers/abc");
    }

    #[test]
    fn endpoint_keeps_base_path_and_encodes_segments() {
        let api = ApiClient::new(&ApiConfig::new("https://example.com/exam/")).unwrap();
        let url = api.endpoint(&["papers", "a b/c"]).unwrap();
        assert_eq!(url.as_str(), "https://example.com/exam/api/papers/a%20b%2Fc");
    }

    #[test]
    fn query_pairs_are_encoded() {
        let api = ApiClient::new(&ApiConfig::new("http://localhost:8000")).unwrap();
        let url = api
            .endpoint_with_query(&["auth", "profile"], &[("name", "Asha Rao & co")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/auth/profile?name=Asha+Rao+%26+co"
        );
        let bare = api.endpoint_with_query(&["papers"], &[]).unwrap();
        assert_eq!(bare.query(), None);
    }

    #[test]
    fn invalid_base_url_is_config_error() {
        let err = ApiClient::new(&ApiConfig::new("not a url")).err().unwrap();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn status_mapping_uses_detail() {
        assert_eq!(
            error_for_status(StatusCode::NOT_FOUND, Some("Paper not found".into())),
            ApiError::NotFound("Paper not found".into())
        );
        assert_eq!(
            error_for_status(StatusCode::UNPROCESSABLE_ENTITY, None),
            ApiError::Validation("request was rejected".into())
        );
        assert!(matches!(
            error_for_status(StatusCode::BAD_GATEWAY, Some("ignored".into())),
            ApiError::Network(_)
        ));
    }

    #[test]
    fn list_detail_uses_first_message() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"detail": [{"loc": ["body", "answers"], "msg": "field required"}]}"#,
        )
        .unwrap();
        assert_eq!(body.into_detail().as_deref(), Some("field required"));
    }

    #[test]
    fn credentials_debug_hides_token() {
        let rendered = format!("{:?}", Credentials::bearer("secret-token"));
        assert!(!rendered.contains("secret-token"));
    }
}
