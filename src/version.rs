//! Server Version Comparison
//!
//! Zabbix reports versions such as `6.0.13`, `7.0.0rc1` or `5.4`. They are
//! parsed leniently into [`ServerVersion`] and ordered by semantic-version
//! precedence, which is what decides whether version-specific tests run.

use crate::error::HarnessError;
use regex::Regex;
use semver::{BuildMetadata, Prerelease, Version};
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

static PLAIN_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]\.[0-9]\.[0-9]+$").expect("valid version regex"));

/// Check the `<digit>.<digit>.<digits>` form Zabbix uses for releases
///
/// Digits are ASCII only, matching what [`ServerVersion::parse`] accepts.
pub fn is_plain_version(version: &str) -> bool {
    PLAIN_VERSION.is_match(version)
}

/// A parsed server version
///
/// Equality and ordering follow semantic-version precedence: build metadata
/// is ignored and a pre-release sorts before its release.
#[derive(Debug, Clone)]
pub struct ServerVersion {
    raw: String,
    version: Version,
}

impl ServerVersion {
    /// Parse a version string
    ///
    /// Accepts one to three numeric components (missing ones are zero), an
    /// optional leading `v`, a pre-release either after `-` or glued to the
    /// patch number (`7.0.0alpha1`), and optional `+build` metadata.
    pub fn parse(input: &str) -> Result<Self, HarnessError> {
        let trimmed = input.trim();
        let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);

        let (rest, build) = match trimmed.split_once('+') {
            Some((rest, build)) => (rest, Some(build)),
            None => (trimmed, None),
        };

        let core_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (core, pre) = rest.split_at(core_len);
        let pre = match pre.strip_prefix('-') {
            Some(pre) => Some(pre),
            None if pre.is_empty() => None,
            None => Some(pre),
        };

        let numbers = core
            .split('.')
            .map(|part| {
                if part.is_empty() {
                    return Err(HarnessError::invalid_version(input, "empty version component"));
                }
                part.parse::<u64>()
                    .map_err(|e| HarnessError::invalid_version(input, e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if numbers.len() > 3 {
            return Err(HarnessError::invalid_version(
                input,
                "more than three numeric components",
            ));
        }

        let mut version = Version::new(
            numbers[0],
            numbers.get(1).copied().unwrap_or(0),
            numbers.get(2).copied().unwrap_or(0),
        );
        if pre.is_some_and(str::is_empty) || build.is_some_and(str::is_empty) {
            return Err(HarnessError::invalid_version(input, "empty pre-release or build"));
        }
        if let Some(pre) = pre {
            version.pre = Prerelease::new(pre)
                .map_err(|e| HarnessError::invalid_version(input, e.to_string()))?;
        }
        if let Some(build) = build {
            version.build = BuildMetadata::new(build)
                .map_err(|e| HarnessError::invalid_version(input, e.to_string()))?;
        }

        Ok(Self {
            raw: input.to_string(),
            version,
        })
    }

    /// The string this version was parsed from
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Normalized semantic version
    pub fn semver(&self) -> &Version {
        &self.version
    }
}

impl PartialEq for ServerVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ServerVersion {}

impl PartialOrd for ServerVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ServerVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (&self.version, &other.version);
        a.major
            .cmp(&b.major)
            .then(a.minor.cmp(&b.minor))
            .then(a.patch.cmp(&b.patch))
            .then_with(|| a.pre.cmp(&b.pre))
    }
}

impl fmt::Display for ServerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl std::str::FromStr for ServerVersion {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Compare a server version against a threshold
pub fn compare(server: &str, compared: &str) -> Result<Ordering, HarnessError> {
    let server: ServerVersion = server.parse()?;
    let compared: ServerVersion = compared.parse()?;
    Ok(server.cmp(&compared))
}

/// Which side of a threshold causes a test to be skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionGate {
    /// Skip when the server is at or above the threshold
    SkipIfAtLeast,
    /// Skip when the server is below the threshold
    SkipIfLessThan,
}

impl VersionGate {
    /// Decide whether a test runs against `server`
    ///
    /// `reason` completes the sentence "... which {reason}, skipping test."
    pub fn evaluate(
        self,
        server: &str,
        compared: &str,
        reason: &str,
    ) -> Result<Option<Skip>, HarnessError> {
        let ordering = compare(server, compared)?;
        let skip = match self {
            VersionGate::SkipIfAtLeast if ordering != Ordering::Less => Some(format!(
                "Zabbix version {server} is greater than or equal to {compared} which {reason}, skipping test."
            )),
            VersionGate::SkipIfLessThan if ordering == Ordering::Less => Some(format!(
                "Zabbix version {server} is less than to {compared} which {reason}, skipping test."
            )),
            _ => None,
        };
        Ok(skip.map(|message| Skip { message }))
    }
}

/// A decision to skip a test, with the message to report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skip {
    message: String,
}

impl Skip {
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Log the skip message
    pub fn report(&self) {
        tracing::warn!("{}", self.message);
    }
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
