//! Zabbix Test Kit
//!
//! Fixtures for running tests against a live Zabbix API: environment
//! configuration, a shared logged-in client, server version gates and the
//! baseline smoke checks.

pub mod api;
pub mod checks;
pub mod config;
pub mod error;
pub mod harness;
pub mod logging;
pub mod version;

#[cfg(test)]
mod proptests;

pub use config::HarnessConfig;
pub use error::HarnessError;
pub use harness::{test_host_name, Api, Harness};
pub use version::{ServerVersion, Skip, VersionGate};
