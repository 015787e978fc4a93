//! Zabbix API Transport Layer
//!
//! The transport moves one [`ApiRequest`] to the server and brings back one
//! [`ApiResponse`]. It knows nothing about Zabbix methods or sessions.
//!
//! [`HttpTransport`] is the only production transport: every request is a
//! separate HTTP POST. Tests plug in their own implementations of
//! [`Transport`] to script server behavior.

use crate::api::error::ApiError;
use crate::api::protocol::{ApiRequest, ApiResponse};
use std::time::Duration;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Content type the Zabbix frontend expects for API calls
const CONTENT_TYPE: &str = "application/json-rpc";

/// Log target for outbound API traffic
pub const LOG_TARGET: &str = "zabbix";

/// Transport trait for Zabbix API communication
#[allow(async_fn_in_trait)]
pub trait Transport: Send + Sync {
    /// Send a request and wait for its response
    async fn exchange(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError>;

    /// Endpoint description for diagnostics
    fn endpoint(&self) -> &str;
}

/// HTTP transport for a Zabbix frontend
///
/// # Example
///
/// ```ignore
/// let transport = HttpTransport::new("http://zabbix.example.com/api_jsonrpc.php")?;
/// let client = ZabbixClient::new(transport);
/// let version = client.version().await?;
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// Reqwest HTTP client
    client: reqwest::Client,

    /// API endpoint URL
    url: String,

    /// Request timeout
    timeout: Duration,
}

impl HttpTransport {
    /// Create a new HTTP transport for the given API URL
    pub fn new(url: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_timeout(url, DEFAULT_TIMEOUT)
    }

    /// Create a transport with a custom request timeout
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            url: url.into(),
            timeout,
        })
    }

    /// Get the API URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Transport for HttpTransport {
    async fn exchange(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let json = serde_json::to_string(request).map_err(ApiError::Encode)?;

        tracing::debug!(
            target: LOG_TARGET,
            "Request (POST {}): {}",
            self.url,
            redacted(request, &json)
        );

        let http_response = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE)
            .body(json)
            .send()
            .await?;

        let status = http_response.status();
        if !status.is_success() {
            return Err(ApiError::HttpStatus(status));
        }

        let body = http_response.text().await?;

        tracing::debug!(target: LOG_TARGET, "Response ({}): {}", status, body);

        serde_json::from_str(&body).map_err(|source| ApiError::Decode { body, source })
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}

/// Hide credentials of `user.login` calls from the log
fn redacted<'a>(request: &ApiRequest, json: &'a str) -> std::borrow::Cow<'a, str> {
    if request.method != "user.login" {
        return json.into();
    }
    let mut masked = request.clone();
    if let Some(password) = masked.params.get_mut("password") {
        *password = serde_json::Value::String("<redacted>".to_string());
    }
    serde_json::to_string(&masked)
        .unwrap_or_else(|_| "<redacted>".to_string())
        .into()
}
