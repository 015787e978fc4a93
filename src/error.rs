//! Harness Error Types

use crate::api::{ApiError, RpcError};
use crate::config::MISSING_URL_HELP;

/// Errors raised by harness setup and the smoke checks
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// Required configuration is absent
    #[error("{}", MISSING_URL_HELP)]
    MissingUrl,

    /// Local hostname could not be determined
    #[error("Failed to read hostname: {0}")]
    Hostname(#[source] std::io::Error),

    /// API call failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// `user.login` failed
    #[error("Login as {user} failed: {source}")]
    Login {
        user: String,
        #[source]
        source: ApiError,
    },

    /// `user.login` succeeded but returned no token
    #[error("Login failed")]
    EmptyToken,

    /// Version string is not a semantic version
    #[error("Invalid version {input:?}: {reason}")]
    InvalidVersion { input: String, reason: String },

    /// Malformed call was answered with the wrong error code
    #[error("Expected code -32600 or -32602 depending on Zabbix Server version, got {0}")]
    UnexpectedErrorCode(RpcError),

    /// Malformed call was answered without an error
    #[error("Expected an error response to a malformed call, got result {0}")]
    MissingRpcError(serde_json::Value),

    /// Server version is not in `<digit>.<digit>.<digits>` form
    #[error("Unexpected version: {0}")]
    UnexpectedVersion(String),
}

impl HarnessError {
    pub(crate) fn invalid_version(input: &str, reason: impl Into<String>) -> Self {
        HarnessError::InvalidVersion {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
