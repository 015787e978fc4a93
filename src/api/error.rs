//! API Layer Error Types

use crate::api::protocol::RpcError;

/// Errors raised while talking to the Zabbix API
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request could not be serialized
    #[error("Failed to serialize request: {0}")]
    Encode(#[source] serde_json::Error),

    /// Connection, timeout or body read failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-2xx status
    #[error("HTTP request failed with status: {0}")]
    HttpStatus(reqwest::StatusCode),

    /// Body was not a JSON-RPC response
    #[error("Failed to decode response {body:?}: {source}")]
    Decode {
        body: String,
        #[source]
        source: serde_json::Error,
    },

    /// Server returned a JSON-RPC error object
    #[error("RPC error {0}")]
    Rpc(#[from] RpcError),

    /// Result was present but not of the expected shape
    #[error("Unexpected result for {method}: {detail}")]
    UnexpectedResult { method: String, detail: String },
}

impl ApiError {
    /// The JSON-RPC error code, if the server returned one
    pub fn rpc_code(&self) -> Option<i32> {
        match self {
            ApiError::Rpc(err) => Some(err.code),
            _ => None,
        }
    }
}
