use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::common::error::HelperError;

fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?P<prefix>[A-Za-z])?(?P<major>[0-9]+)\.(?P<minor>[0-9]+)\.(?P<patch>[0-9]+)$")
            .expect("version pattern is valid")
    })
}

/// A release version in the strict `[prefix]MAJOR.MINOR.PATCH` form.
///
/// The optional prefix is a single ASCII letter (`v1.2.3`) and is carried
/// through bumps verbatim. Ordering is numeric on the three components; the
/// prefix only breaks ties so that the order stays total.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    major: u64,
    minor: u64,
    patch: u64,
    prefix: Option<char>,
}

impl Version {
    pub fn new(prefix: Option<char>, major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            prefix,
        }
    }

    /// Lenient parse used when scanning tag listings.
    pub fn parse(value: &str) -> Option<Self> {
        let captures = version_pattern().captures(value.trim())?;
        let component = |name: &str| captures.name(name)?.as_str().parse::<u64>().ok();

        Some(Self {
            major: component("major")?,
            minor: component("minor")?,
            patch: component("patch")?,
            prefix: captures
                .name("prefix")
                .and_then(|m| m.as_str().chars().next()),
        })
    }

    pub fn prefix(&self) -> Option<char> {
        self.prefix
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    /// Increments exactly the selected component.
    ///
    /// Lower components are kept: bumping `v1.4.2` by `minor` yields
    /// `v1.5.2`.
    pub fn bump(&self, kind: VersionBump) -> Self {
        let mut next = self.clone();
        match kind {
            VersionBump::Major => next.major = next.major.saturating_add(1),
            VersionBump::Minor => next.minor = next.minor.saturating_add(1),
            VersionBump::Patch => next.patch = next.patch.saturating_add(1),
        }
        next
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = self.prefix {
            write!(f, "{}", prefix)?;
        }
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = HelperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            HelperError::invalid_version(s, "expected [prefix]MAJOR.MINOR.PATCH, e.g. v1.2.3")
        })
    }
}

/// Which version component a release increments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VersionBump {
    Major,
    Minor,
    #[default]
    Patch,
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionBump::Major => write!(f, "major"),
            VersionBump::Minor => write!(f, "minor"),
            VersionBump::Patch => write!(f, "patch"),
        }
    }
}

impl FromStr for VersionBump {
    type Err = HelperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "major" => Ok(VersionBump::Major),
            "minor" => Ok(VersionBump::Minor),
            "patch" => Ok(VersionBump::Patch),
            _ => Err(HelperError::validation_error(
                "up",
                "expected one of major, minor, patch",
                Some(s.to_string()),
            )),
        }
    }
}

/// Suggests the next version for `latest_tag`, or `None` when there is no
/// tag or it is not a strict version.
pub fn suggest_next(latest_tag: Option<&str>, kind: VersionBump) -> Option<String> {
    latest_tag
        .and_then(Version::parse)
        .map(|version| version.bump(kind).to_string())
}
