//! Test Fixture
//!
//! A [`Harness`] is created once per test process and handed to every test.
//! It owns the configuration, the name tests should give the host objects
//! they create, and the API client, which is connected (and logged in) on
//! first use and shared afterwards.

use crate::api::{HttpTransport, ZabbixClient};
use crate::config::HarnessConfig;
use crate::error::HarnessError;
use crate::logging;
use crate::version::{self, Skip, VersionGate};
use std::cmp::Ordering;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing_subscriber::EnvFilter;

/// Suffix appended to the local hostname for test host objects
pub const HOST_SUFFIX: &str = "-testing";

/// Length of the random part of [`Harness::unique_name`]
const UNIQUE_SUFFIX_LEN: usize = 8;

/// Client type shared by tests
pub type Api = ZabbixClient<HttpTransport>;

/// Name for host objects created by tests: `<hostname>-testing`
pub fn test_host_name() -> Result<String, HarnessError> {
    let host = hostname::get().map_err(HarnessError::Hostname)?;
    Ok(format!("{}{HOST_SUFFIX}", host.to_string_lossy()))
}

/// Shared test fixture
pub struct Harness {
    config: HarnessConfig,
    host: String,
    api: OnceCell<Arc<Api>>,
}

impl Harness {
    /// Create a harness, resolving the test host name from the hostname
    pub fn new(config: HarnessConfig) -> Result<Self, HarnessError> {
        Ok(Self::with_host(config, test_host_name()?))
    }

    /// Create a harness with an explicit test host name
    pub fn with_host(config: HarnessConfig, host: impl Into<String>) -> Self {
        Self {
            config,
            host: host.into(),
            api: OnceCell::new(),
        }
    }

    /// Create a harness from `TEST_ZABBIX_*` environment variables
    pub fn from_env() -> Result<Self, HarnessError> {
        Self::new(HarnessConfig::from_env()?)
    }

    /// Like [`Harness::from_env`], but a setup error ends the process
    ///
    /// Installs logging at the configured verbosity. Setup errors are
    /// reported through plain logging before exiting with status 1.
    pub fn from_env_or_exit() -> Self {
        match Self::from_env() {
            Ok(harness) => {
                harness.init_logging();
                harness
            }
            Err(err) => {
                logging::init(false);
                tracing::error!("{err}");
                std::process::exit(1);
            }
        }
    }

    /// Log filter for this harness; verbose configs log every API call
    pub fn log_filter(&self) -> EnvFilter {
        logging::filter(self.config.verbose)
    }

    /// Install stderr logging at the configured verbosity
    pub fn init_logging(&self) {
        logging::init(self.config.verbose);
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Name for host objects created by tests
    pub fn host(&self) -> &str {
        &self.host
    }

    /// `<prefix>-<random>`, for objects that must not collide between runs
    pub fn unique_name(&self, prefix: &str) -> String {
        let suffix: String = std::iter::repeat_with(fastrand::alphanumeric)
            .take(UNIQUE_SUFFIX_LEN)
            .collect();
        format!("{prefix}-{suffix}")
    }

    /// Shared API client, connected and logged in on first use
    ///
    /// A failed initialization is not cached; the next call tries again.
    pub async fn api(&self) -> Result<Arc<Api>, HarnessError> {
        self.api.get_or_try_init(|| self.connect()).await.cloned()
    }

    async fn connect(&self) -> Result<Arc<Api>, HarnessError> {
        let client = ZabbixClient::new(HttpTransport::new(&self.config.url)?);

        if let Some((user, password)) = self.config.credentials() {
            let token = client
                .login(user, password)
                .await
                .map_err(|source| HarnessError::Login {
                    user: user.to_string(),
                    source,
                })?;
            if token.is_empty() {
                return Err(HarnessError::EmptyToken);
            }
            tracing::info!(user, "Logged in to {}", self.config.url);
        }

        Ok(Arc::new(client))
    }

    /// Version reported by the server
    pub async fn server_version(&self) -> Result<String, HarnessError> {
        Ok(self.api().await?.version().await?)
    }

    /// Order the server version against `compared`
    ///
    /// Returns the ordering together with the server version string.
    pub async fn compare_version(&self, compared: &str) -> Result<(Ordering, String), HarnessError> {
        let server = self.server_version().await?;
        let ordering = version::compare(&server, compared)?;
        Ok((ordering, server))
    }

    pub async fn is_version_less_than(&self, compared: &str) -> Result<(bool, String), HarnessError> {
        let (ordering, server) = self.compare_version(compared).await?;
        Ok((ordering == Ordering::Less, server))
    }

    pub async fn is_version_greater_than_or_equal(
        &self,
        compared: &str,
    ) -> Result<(bool, String), HarnessError> {
        let (ordering, server) = self.compare_version(compared).await?;
        Ok((ordering != Ordering::Less, server))
    }

    /// Skip when the server is `compared` or newer
    ///
    /// `msg` completes "... which {msg}, skipping test."
    pub async fn skip_if_version_greater_than_or_equal(
        &self,
        compared: &str,
        msg: &str,
    ) -> Result<Option<Skip>, HarnessError> {
        self.gate(VersionGate::SkipIfAtLeast, compared, msg).await
    }

    /// Skip when the server is older than `compared`
    pub async fn skip_if_version_less_than(
        &self,
        compared: &str,
        msg: &str,
    ) -> Result<Option<Skip>, HarnessError> {
        self.gate(VersionGate::SkipIfLessThan, compared, msg).await
    }

    async fn gate(
        &self,
        gate: VersionGate,
        compared: &str,
        msg: &str,
    ) -> Result<Option<Skip>, HarnessError> {
        let server = self.server_version().await?;
        gate.evaluate(&server, compared, msg)
    }
}

/// Return early from a test when a version gate says to skip it
///
/// ```ignore
/// skip_if!(harness
///     .skip_if_version_greater_than_or_equal("5.0.0", "removed the field")
///     .await
///     .unwrap());
/// ```
///
/// A second argument is the value returned, for tests returning `Result`.
#[macro_export]
macro_rules! skip_if {
    ($gate:expr) => {
        $crate::skip_if!($gate, ())
    };
    ($gate:expr, $ret:expr) => {
        if let ::std::option::Option::Some(skip) = $gate {
            skip.report();
            return $ret;
        }
    };
}
