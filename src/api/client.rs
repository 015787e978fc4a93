//! Zabbix API Client Layer
//!
//! A thin client over the transport layer exposing the handful of calls the
//! harness needs: raw `call`, `login`/`logout` and `version`. It does one
//! request per operation and never retries.
//!
//! # Usage
//!
//! ```ignore
//! use zabbix_testkit::api::{HttpTransport, ZabbixClient};
//!
//! let client = ZabbixClient::new(HttpTransport::new(url)?);
//! client.login("Admin", "zabbix").await?;
//! let hosts = client.call_with_error("host.get", Some(json!({"output": "extend"}))).await?;
//! ```

use crate::api::error::ApiError;
use crate::api::protocol::{ApiRequest, ApiResponse};
use crate::api::transport::{Transport, LOG_TARGET};
use crate::version::ServerVersion;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Methods Zabbix rejects when a session token is attached
const UNAUTHENTICATED_METHODS: &[&str] = &["apiinfo.version", "user.login"];

/// First server version that takes `username` instead of `user` in `user.login`
const USERNAME_FIELD_SINCE: &str = "5.4.0";

/// Zabbix API client
///
/// Generic over [`Transport`] so tests can script the server side.
pub struct ZabbixClient<T>
where
    T: Transport,
{
    /// Underlying transport
    transport: T,

    /// Next request ID (monotonically increasing)
    next_id: AtomicU64,

    /// Session token from the last successful login
    ///
    /// Behind a lock so a shared client can still log out.
    auth: Mutex<Option<String>>,
}

impl<T> ZabbixClient<T>
where
    T: Transport,
{
    /// Create a new client with no session
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            next_id: AtomicU64::new(1),
            auth: Mutex::new(None),
        }
    }

    /// Get the underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Current session token, if logged in
    pub fn auth(&self) -> Option<String> {
        self.session().clone()
    }

    /// Use an existing session token (e.g. an API token)
    pub fn set_auth(&self, auth: Option<String>) {
        *self.session() = auth;
    }

    fn session(&self) -> MutexGuard<'_, Option<String>> {
        self.auth.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Invoke `method` and return the raw response
    ///
    /// JSON-RPC errors are part of the returned response; only transport
    /// and decoding failures are reported as `Err`.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<ApiResponse, ApiError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let auth = if UNAUTHENTICATED_METHODS.contains(&method) {
            None
        } else {
            self.auth()
        };
        let request = ApiRequest::new(id, method, params).with_auth(auth);

        tracing::debug!(target: LOG_TARGET, method, id, "Calling {}", self.transport.endpoint());

        let response = self.transport.exchange(&request).await?;
        if let Some(error) = &response.error {
            tracing::debug!(target: LOG_TARGET, method, id, "Server returned error {}", error);
        }
        Ok(response)
    }

    /// Invoke `method`, turning a JSON-RPC error into `ApiError::Rpc`
    pub async fn call_with_error(
        &self,
        method: &str,
        params: Option<Value>,
    ) -> Result<Value, ApiError> {
        let response = self.call(method, params).await?;
        Ok(response.into_result()?)
    }

    /// Server API version as reported by `apiinfo.version`
    pub async fn version(&self) -> Result<String, ApiError> {
        let result = self.call_with_error("apiinfo.version", None).await?;
        expect_string("apiinfo.version", result)
    }

    /// Log in and keep the session token for later calls
    ///
    /// An empty token is returned as-is; callers decide whether that
    /// counts as a failed login.
    pub async fn login(&self, user: &str, password: &str) -> Result<String, ApiError> {
        let field = self.login_field().await?;
        let params = json!({ field: user, "password": password });

        let result = self.call_with_error("user.login", Some(params)).await?;
        let token = expect_string("user.login", result)?;

        tracing::debug!(target: LOG_TARGET, user, "Logged in");
        self.set_auth(Some(token.clone()));
        Ok(token)
    }

    /// End the current session
    ///
    /// Works through a shared reference, so a harness client can log out
    /// at the end of a test run.
    pub async fn logout(&self) -> Result<(), ApiError> {
        if self.auth().is_none() {
            return Ok(());
        }
        self.call_with_error("user.logout", Some(json!([]))).await?;
        self.set_auth(None);
        Ok(())
    }

    async fn login_field(&self) -> Result<&'static str, ApiError> {
        let version = self.version().await?;
        let since = ServerVersion::parse(USERNAME_FIELD_SINCE).ok();
        let field = match (ServerVersion::parse(&version).ok(), since) {
            (Some(server), Some(since)) if server < since => "user",
            _ => "username",
        };
        Ok(field)
    }
}

fn expect_string(method: &str, result: Value) -> Result<String, ApiError> {
    match result {
        Value::String(s) => Ok(s),
        other => Err(ApiError::UnexpectedResult {
            method: method.to_string(),
            detail: format!("expected a string, got {other}"),
        }),
    }
}
