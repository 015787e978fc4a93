//! Shared setup for tests that run against a live Zabbix server

use std::sync::OnceLock;
use zabbix_testkit::{Harness, HarnessConfig};

/// Process-wide setup: configuration and test host name
static SETUP: OnceLock<(HarnessConfig, String)> = OnceLock::new();

/// A harness for the current test
///
/// Environment and hostname are read once per process; a missing
/// `TEST_ZABBIX_URL` ends the process with status 1 from inside the first
/// test that asks for a harness (libtest has no process-wide setup hook, so
/// earlier tests in the run may already have reported).
/// Logging goes to stderr, verbose per `TEST_ZABBIX_VERBOSE`.
/// Each test gets its own client because every `#[tokio::test]` runs on
/// its own runtime.
pub fn harness() -> Harness {
    let (config, host) = SETUP.get_or_init(|| {
        let harness = Harness::from_env_or_exit();
        (harness.config().clone(), harness.host().to_string())
    });
    Harness::with_host(config.clone(), host.clone())
}
