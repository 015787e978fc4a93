//! Smoke checks run against any Zabbix server
//!
//! Each check returns `Ok(())` when the server behaves as expected and the
//! reason otherwise. They take the client directly so they can run under
//! the test harness and from the `zabbix-smoke` binary alike.

use crate::api::protocol::{INVALID_PARAMS, INVALID_REQUEST};
use crate::api::{Transport, ZabbixClient};
use crate::error::HarnessError;
use crate::version::is_plain_version;

/// A call with an empty method name must be rejected
///
/// Zabbix answers -32600 or -32602 depending on the server version.
pub async fn check_bad_call<T: Transport>(api: &ZabbixClient<T>) -> Result<(), HarnessError> {
    let response = api.call("", None).await?;

    match response.error {
        Some(error) if error.code == INVALID_REQUEST || error.code == INVALID_PARAMS => Ok(()),
        Some(error) => Err(HarnessError::UnexpectedErrorCode(error)),
        None => Err(HarnessError::MissingRpcError(
            response.result.unwrap_or_default(),
        )),
    }
}

/// The server must report its version as `<digit>.<digit>.<digits>`
///
/// Returns the version on success.
pub async fn check_version<T: Transport>(api: &ZabbixClient<T>) -> Result<String, HarnessError> {
    let version = api.version().await?;
    tracing::info!("Zabbix version {}", version);

    if is_plain_version(&version) {
        Ok(version)
    } else {
        Err(HarnessError::UnexpectedVersion(version))
    }
}
