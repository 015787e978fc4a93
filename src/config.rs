// Harness Configuration
//
// The harness is configured from the environment only:
// - TEST_ZABBIX_URL (required)
// - TEST_ZABBIX_USER / TEST_ZABBIX_PASSWORD (optional, login when user is set)
// - TEST_ZABBIX_VERBOSE (optional, log outbound API calls)

use crate::error::HarnessError;
use std::fmt;

pub const ENV_URL: &str = "TEST_ZABBIX_URL";
pub const ENV_USER: &str = "TEST_ZABBIX_USER";
pub const ENV_PASSWORD: &str = "TEST_ZABBIX_PASSWORD";
pub const ENV_VERBOSE: &str = "TEST_ZABBIX_VERBOSE";

/// Message shown when the API URL is not configured
pub const MISSING_URL_HELP: &str = "Set environment variables TEST_ZABBIX_URL (and optionally TEST_ZABBIX_USER and TEST_ZABBIX_PASSWORD)";

/// Connection settings for the server under test
#[derive(Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// API endpoint, e.g. `http://localhost/api_jsonrpc.php`
    pub url: String,

    /// Login user; no login happens when unset
    pub user: Option<String>,

    /// Login password
    pub password: Option<String>,

    /// Log every outbound API call
    pub verbose: bool,
}

impl HarnessConfig {
    /// Create a configuration for an anonymous session
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            user: None,
            password: None,
            verbose: false,
        }
    }

    /// Set login credentials
    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self.password = Some(password.into());
        self
    }

    /// Enable or disable call logging
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self, HarnessError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, HarnessError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let url = get(ENV_URL).ok_or(HarnessError::MissingUrl)?;

        Ok(Self {
            url,
            user: get(ENV_USER),
            password: get(ENV_PASSWORD),
            verbose: verbose_flag(get(ENV_VERBOSE)),
        })
    }

    /// Credentials to log in with, if a user is configured
    ///
    /// A missing password is sent as an empty string.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        self.user
            .as_deref()
            .map(|user| (user, self.password.as_deref().unwrap_or_default()))
    }
}

fn verbose_flag(value: Option<String>) -> bool {
    value.is_some_and(|v| !v.is_empty() && v != "0")
}

impl fmt::Debug for HarnessConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HarnessConfig")
            .field("url", &self.url)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("verbose", &self.verbose)
            .finish()
    }
}
