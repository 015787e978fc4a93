//! Zabbix API Protocol Types (JSON-RPC 2.0)
//!
//! The Zabbix frontend exposes its API as JSON-RPC 2.0 over HTTP POST to
//! `api_jsonrpc.php`. This module only describes the wire shapes; sending
//! them is the transport layer's job.
//!
//! # Protocol Specification
//!
//! - JSON-RPC 2.0: <https://www.jsonrpc.org/specification>
//! - Zabbix API: <https://www.zabbix.com/documentation/current/en/manual/api>

use serde::{Deserialize, Serialize};

/// JSON-RPC 2.0 version constant
pub const JSONRPC_VERSION: &str = "2.0";

/// Invalid request (-32600): the JSON sent is not a valid Request object
pub const INVALID_REQUEST: i32 = -32600;

/// Method not found (-32601)
pub const METHOD_NOT_FOUND: i32 = -32601;

/// Invalid params (-32602): Zabbix also reports unknown methods this way
pub const INVALID_PARAMS: i32 = -32602;

/// Internal error (-32603)
pub const INTERNAL_ERROR: i32 = -32603;

/// Application error (-32500): Zabbix-side failure such as a rejected login
pub const APPLICATION_ERROR: i32 = -32500;

/// A JSON-RPC 2.0 request to the Zabbix API
///
/// # Example
///
/// ```json
/// {
///   "jsonrpc": "2.0",
///   "method": "host.get",
///   "params": {"output": "extend"},
///   "auth": "0424bd59b807674191e7d77572075f33",
///   "id": 1
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiRequest {
    /// JSON-RPC version (always "2.0")
    pub jsonrpc: String,

    /// Method name to invoke
    pub method: String,

    /// Method parameters; Zabbix expects an object or array, never absent
    pub params: serde_json::Value,

    /// Session token from `user.login`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<String>,

    /// Request identifier
    pub id: u64,
}

impl ApiRequest {
    /// Create a new request. `None` params are sent as an empty object.
    pub fn new(id: u64, method: impl Into<String>, params: Option<serde_json::Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params: params.unwrap_or_else(|| serde_json::json!({})),
            auth: None,
            id,
        }
    }

    /// Attach a session token
    pub fn with_auth(mut self, auth: Option<String>) -> Self {
        self.auth = auth;
        self
    }
}

/// A JSON-RPC 2.0 response from the Zabbix API
///
/// Zabbix answers protocol errors with HTTP 200 and an `error` member, so a
/// response carrying an error is still a successfully received response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiResponse {
    /// JSON-RPC version (always "2.0")
    pub jsonrpc: String,

    /// Result payload (present on success)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,

    /// Error information (present on failure)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,

    /// Echoed request id; `null` when the server could not read the request
    #[serde(default)]
    pub id: Option<u64>,
}

impl ApiResponse {
    /// Create a successful response
    pub fn ok(id: u64, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: Some(result),
            error: None,
            id: Some(id),
        }
    }

    /// Create an error response
    pub fn err(id: Option<u64>, error: RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: None,
            error: Some(error),
            id,
        }
    }

    /// Check if the response is successful
    pub fn is_success(&self) -> bool {
        self.result.is_some() && self.error.is_none()
    }

    /// Get the result, or the error if unsuccessful
    pub fn into_result(self) -> Result<serde_json::Value, RpcError> {
        match (self.result, self.error) {
            (Some(result), None) => Ok(result),
            (_, Some(error)) => Err(error),
            (None, None) => Err(RpcError::new(
                INTERNAL_ERROR,
                "Invalid response",
                "neither result nor error present",
            )),
        }
    }
}

/// A JSON-RPC 2.0 error object as Zabbix sends it
///
/// Zabbix always fills `data` with a human-readable detail string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RpcError {
    /// Error code
    pub code: i32,

    /// Short message, e.g. "Invalid params."
    pub message: String,

    /// Detail, e.g. "Incorrect method \"\"."
    #[serde(default)]
    pub data: String,
}

impl RpcError {
    pub fn new(code: i32, message: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: data.into(),
        }
    }
}

impl std::fmt::Display for RpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.code, self.message, self.data)
    }
}

impl std::error::Error for RpcError {}
