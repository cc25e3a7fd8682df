use std::{fmt, sync::Arc, time::Duration};

use reqwest::{
    header::{self, HeaderMap},
    StatusCode,
};
use serde::de::DeserializeOwned;
use url::Url;
use uuid::Uuid;

use crate::{
    retry::{self, Sleeper, TokioSleeper},
    ApiRequest, ApiResponse, ClientOptions, NovuError, Result, RetryPolicy,
};

/// Hosted API origin used when no backend URL is configured.
pub const DEFAULT_BACKEND_URL: &str = "https://api.novu.co";
/// API version segment appended to unversioned backend URLs.
pub const API_VERSION: &str = "v1";

const IDEMPOTENCY_KEY: &str = "idempotency-key";

/// Resolves a configured backend URL into the versioned API root.
///
/// - `None` (or blank) → `https://api.novu.co/v1`
/// - a URL already ending in a version segment (`/v1`, `/v2`, ...) is kept
/// - anything else gets `/v1` appended
pub fn resolve_backend_url(raw: Option<&str>) -> Result<Url> {
    let raw = raw
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_BACKEND_URL);
    let mut url = Url::parse(raw).map_err(|err| NovuError::InvalidUrl(format!("{raw}: {err}")))?;

    let versioned = url
        .path_segments()
        .and_then(|segments| segments.filter(|segment| !segment.is_empty()).last())
        .is_some_and(is_version_segment);
    if !versioned {
        url.path_segments_mut()
            .map_err(|()| NovuError::InvalidUrl(format!("{raw} cannot be a base url")))?
            .pop_if_empty()
            .push(API_VERSION);
    }
    Ok(url)
}

fn is_version_segment(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// HTTP client for the Novu REST API.
///
/// Holds the immutable configuration shared by every resource service.
/// Cloning is cheap: the connection pool and sleeper are reference counted.
#[derive(Clone)]
pub struct NovuClient {
    http: reqwest::Client,
    backend_url: Url,
    authorization: String,
    options: ClientOptions,
    sleeper: Arc<dyn Sleeper>,
}

impl fmt::Debug for NovuClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NovuClient")
            .field("backend_url", &self.backend_url.as_str())
            .field("authorization", &"<redacted>")
            .field("options", &self.options)
            .finish()
    }
}

/// Response as read off the wire, before classification.
struct RawResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

impl NovuClient {
    /// Creates a client for the hosted API at `https://api.novu.co/v1`.
    pub fn new(api_key: impl AsRef<str>) -> Result<Self> {
        Self::build(api_key.as_ref(), None)
    }

    /// Creates a client for a self-hosted or regional backend.
    ///
    /// The version segment is appended when missing, so both
    /// `https://eu.api.novu.co` and `https://eu.api.novu.co/v1` work.
    pub fn new_with_backend_url(api_key: impl AsRef<str>, backend_url: &str) -> Result<Self> {
        Self::build(api_key.as_ref(), Some(backend_url))
    }

    /// Creates a client from environment variables.
    ///
    /// Reads:
    /// - `NOVU_API_KEY`: API key (required)
    /// - `NOVU_BACKEND_URL`: backend URL override (optional)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use novu_http::NovuClient;
    ///
    /// let novu = NovuClient::from_env().expect("missing NOVU_API_KEY");
    /// ```
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup("NOVU_API_KEY").ok_or_else(|| {
            NovuError::Config("missing NOVU_API_KEY environment variable".to_owned())
        })?;
        if api_key.trim().is_empty() {
            return Err(NovuError::Config(
                "NOVU_API_KEY is set but empty".to_owned(),
            ));
        }
        let backend_url = lookup("NOVU_BACKEND_URL");
        Self::build(&api_key, backend_url.as_deref())
    }

    fn build(api_key: &str, backend_url: Option<&str>) -> Result<Self> {
        Ok(Self {
            http: reqwest::Client::new(),
            backend_url: resolve_backend_url(backend_url)?,
            authorization: format!("ApiKey {}", api_key.trim()),
            options: ClientOptions::default(),
            sleeper: Arc::new(TokioSleeper),
        })
    }

    /// Applies client options such as timeout, deadline and retry behavior.
    pub fn with_options(mut self, opts: ClientOptions) -> Self {
        self.options = opts;
        self
    }

    /// Replaces the underlying `reqwest` client (proxies, TLS, pooling).
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Replaces the sleeper used between retry attempts.
    pub fn with_sleeper(mut self, sleeper: impl Sleeper + 'static) -> Self {
        self.sleeper = Arc::new(sleeper);
        self
    }

    pub fn backend_url(&self) -> &Url {
        &self.backend_url
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Executes one logical API call.
    ///
    /// Attaches `Content-Type`, `Authorization` and a fresh `Idempotency-Key`,
    /// retries according to the configured [`RetryPolicy`] with that same key,
    /// and decodes a successful body into `T`. An empty body yields
    /// `T::default()`.
    ///
    /// When [`ClientOptions::deadline_ms`] is set, the whole call including
    /// backoff sleeps is bounded by it and fails with
    /// [`NovuError::DeadlineExceeded`] on expiry.
    pub async fn send<T>(&self, request: ApiRequest) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned + Default,
    {
        let url = request.url(&self.backend_url)?;
        let idempotency_key = Uuid::new_v4().to_string();
        let call = self.send_with_retry(&request, &url, &idempotency_key);

        let raw = match self.options.deadline_ms {
            Some(deadline_ms) => tokio::time::timeout(Duration::from_millis(deadline_ms), call)
                .await
                .map_err(|_| NovuError::DeadlineExceeded { deadline_ms })??,
            None => call.await?,
        };
        decode_response(raw)
    }

    async fn send_with_retry(
        &self,
        request: &ApiRequest,
        url: &Url,
        idempotency_key: &str,
    ) -> Result<RawResponse> {
        let mut retries = 0u32;
        loop {
            let err = match self.attempt(request, url, idempotency_key).await {
                Ok(raw) if raw.status.as_u16() < 300 => return Ok(raw),
                Ok(raw) => {
                    let retry_after = retry::retry_after(raw.status, &raw.headers);
                    NovuError::from_status(raw.status, raw.body, retry_after)
                }
                Err(err) => err,
            };

            let policy = match &self.options.retry {
                Some(policy) if policy.allows_retry(retries) && should_retry(policy, &err) => {
                    policy
                }
                _ => return Err(err),
            };

            let delay = policy.delay_for(retries, err.retry_after());

            #[cfg(feature = "tracing")]
            tracing::debug!(
                method = %request.method(),
                url = %url,
                retry = retries + 1,
                delay = ?delay,
                error = %err,
                "retrying request"
            );

            self.sleeper.sleep(delay).await;
            retries += 1;
        }
    }

    async fn attempt(
        &self,
        request: &ApiRequest,
        url: &Url,
        idempotency_key: &str,
    ) -> Result<RawResponse> {
        let mut builder = self
            .http
            .request(request.method().clone(), url.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, &self.authorization)
            .header(IDEMPOTENCY_KEY, idempotency_key)
            .timeout(Duration::from_millis(self.options.timeout_ms));
        if let Some(body) = request.body() {
            builder = builder.body(body.to_vec());
        }

        let response = builder.send().await.map_err(NovuError::Transport)?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await.map_err(NovuError::Transport)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(method = %request.method(), url = %url, status = status.as_u16(), "request completed");

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

fn should_retry(policy: &RetryPolicy, err: &NovuError) -> bool {
    match err {
        NovuError::Server { status, .. } => {
            StatusCode::from_u16(*status).is_ok_and(|status| policy.retries_status(status))
        }
        other => other.is_retryable(),
    }
}

fn decode_response<T: DeserializeOwned + Default>(raw: RawResponse) -> Result<ApiResponse<T>> {
    let data = if raw.body.trim().is_empty() {
        T::default()
    } else {
        match serde_json::from_str(&raw.body) {
            Ok(data) => data,
            Err(source) => {
                return Err(NovuError::Decode {
                    source,
                    body: raw.body,
                })
            }
        }
    };
    Ok(ApiResponse {
        status: raw.status,
        headers: raw.headers,
        data,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use reqwest::{header::HeaderMap, StatusCode};
    use serde::Deserialize;

    use super::{
        decode_response, resolve_backend_url, should_retry, NovuClient, RawResponse,
    };
    use crate::{NovuError, RetryPolicy};

    #[test]
    fn default_backend_url_is_versioned_hosted_api() {
        let url = resolve_backend_url(None).expect("default must parse");
        assert_eq!(url.as_str(), "https://api.novu.co/v1");
    }

    #[test]
    fn appends_version_to_bare_origin() {
        let url = resolve_backend_url(Some("http://127.0.0.1:3000")).expect("origin must parse");
        assert_eq!(url.as_str(), "http://127.0.0.1:3000/v1");

        let url = resolve_backend_url(Some("https://novu.internal/api/")).expect("path must parse");
        assert_eq!(url.as_str(), "https://novu.internal/api/v1");
    }

    #[test]
    fn keeps_existing_version_segment() {
        let url = resolve_backend_url(Some("https://eu.api.novu.co/v1")).expect("must parse");
        assert_eq!(url.as_str(), "https://eu.api.novu.co/v1");

        let url = resolve_backend_url(Some("https://novu.internal/v2/")).expect("must parse");
        assert_eq!(url.path(), "/v2/");
    }

    #[test]
    fn rejects_unparseable_and_opaque_urls() {
        assert!(matches!(
            resolve_backend_url(Some("not a url")),
            Err(NovuError::InvalidUrl(_))
        ));
        assert!(matches!(
            resolve_backend_url(Some("mailto:ops@example.com")),
            Err(NovuError::InvalidUrl(_))
        ));
    }

    #[test]
    fn debug_redacts_api_key() {
        let client = NovuClient::new("secret-api-key").expect("client must build");
        let debug = format!("{client:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("secret-api-key"));
    }

    #[test]
    fn from_lookup_requires_api_key() {
        let err = NovuClient::from_lookup(|_| None).expect_err("missing key must fail");
        assert!(matches!(err, NovuError::Config(message) if message.contains("NOVU_API_KEY")));

        let err = NovuClient::from_lookup(|_| Some("  ".to_owned())).expect_err("blank key must fail");
        assert!(matches!(err, NovuError::Config(_)));
    }

    #[test]
    fn from_lookup_honors_backend_override() {
        let vars = HashMap::from([
            ("NOVU_API_KEY", "key".to_owned()),
            ("NOVU_BACKEND_URL", "https://eu.api.novu.co".to_owned()),
        ]);
        let client =
            NovuClient::from_lookup(|name| vars.get(name).cloned()).expect("client must build");
        assert_eq!(client.backend_url().as_str(), "https://eu.api.novu.co/v1");
    }

    #[test]
    fn server_errors_retry_only_when_policy_opts_in() {
        let err = NovuError::Server {
            status: 500,
            body: String::new(),
        };
        assert!(!should_retry(&RetryPolicy::new(), &err));
        assert!(should_retry(
            &RetryPolicy::new().with_server_error_retries(true),
            &err
        ));

        let not_found = NovuError::Client {
            status: 404,
            body: String::new(),
        };
        assert!(!should_retry(
            &RetryPolicy::new().with_server_error_retries(true),
            &not_found
        ));
    }

    #[derive(Debug, Default, Deserialize)]
    struct Envelope {
        data: Item,
    }

    #[derive(Debug, Default, Deserialize)]
    struct Item {
        id: String,
    }

    fn raw(status: StatusCode, body: &str) -> RawResponse {
        RawResponse {
            status,
            headers: HeaderMap::new(),
            body: body.to_owned(),
        }
    }

    #[test]
    fn decodes_nested_data() {
        let response = decode_response::<Envelope>(raw(StatusCode::OK, r#"{"data": {"id": "abc"}}"#))
            .expect("body must decode");
        assert_eq!(response.data.data.id, "abc");
        assert_eq!(response.status, StatusCode::OK);
    }

    #[test]
    fn empty_body_yields_default() {
        let response = decode_response::<Envelope>(raw(StatusCode::NO_CONTENT, ""))
            .expect("empty body must decode");
        assert_eq!(response.data.data.id, "");
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let err = decode_response::<Envelope>(raw(StatusCode::OK, "{not json"))
            .expect_err("malformed body must fail");
        match err {
            NovuError::Decode { body, .. } => assert_eq!(body, "{not json"),
            other => panic!("expected decode error, got {other:?}"),
        }
    }
}
