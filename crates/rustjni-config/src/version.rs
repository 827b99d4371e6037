//! Toolchain version constraints
//!
//! Three forms are accepted:
//! - exact: `1.76.0`
//! - minimum: `>=1.64.0`
//! - wildcard: `1.76.*` (any component may be `*`)

use crate::{ConfigError, ConfigResult};
use semver::Version;
use std::fmt;
use std::str::FromStr;

/// Required toolchain version
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionConstraint {
    /// Exactly this major.minor.patch
    Exact(Version),
    /// This version or newer
    AtLeast(Version),
    /// `None` components match anything
    Wildcard([Option<u64>; 3]),
}

impl VersionConstraint {
    /// Check whether a found toolchain version satisfies the constraint.
    ///
    /// Pre-release and build metadata on the found version are ignored.
    pub fn matches(&self, found: &Version) -> bool {
        let found_triple = (found.major, found.minor, found.patch);
        match self {
            Self::Exact(required) => found_triple == (required.major, required.minor, required.patch),
            Self::AtLeast(required) => found_triple >= (required.major, required.minor, required.patch),
            Self::Wildcard(parts) => {
                let found_parts = [found.major, found.minor, found.patch];
                parts
                    .iter()
                    .zip(found_parts)
                    .all(|(required, found)| required.map_or(true, |r| r == found))
            }
        }
    }
}

impl FromStr for VersionConstraint {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        let raw = s.trim();
        let invalid = |reason: &str| ConfigError::InvalidConstraint {
            constraint: s.to_string(),
            reason: reason.to_string(),
        };

        if let Some(rest) = raw.strip_prefix(">=") {
            let version = parse_triple(rest.trim()).ok_or_else(|| invalid("expected >=x.y.z"))?;
            return Ok(Self::AtLeast(version));
        }

        if raw.contains('*') {
            let parts: Vec<&str> = raw.split('.').collect();
            if parts.len() != 3 {
                return Err(invalid(
                    "wildcard version must be in format 'x.y.z' where any of them may be '*'",
                ));
            }
            let mut out = [None; 3];
            for (slot, part) in out.iter_mut().zip(parts) {
                *slot = match part {
                    "*" => None,
                    digits => Some(
                        digits
                            .parse::<u64>()
                            .map_err(|_| invalid("wildcard components must be numbers or '*'"))?,
                    ),
                };
            }
            return Ok(Self::Wildcard(out));
        }

        parse_triple(raw)
            .map(Self::Exact)
            .ok_or_else(|| invalid("expected x.y.z, >=x.y.z or a wildcard such as 1.76.*"))
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(v) => write!(f, "{}", v),
            Self::AtLeast(v) => write!(f, ">={}", v),
            Self::Wildcard(parts) => {
                let rendered: Vec<String> = parts
                    .iter()
                    .map(|p| p.map_or_else(|| "*".to_string(), |n| n.to_string()))
                    .collect();
                write!(f, "{}", rendered.join("."))
            }
        }
    }
}

/// Strict `x.y.z` parse (no pre-release or build suffixes)
fn parse_triple(s: &str) -> Option<Version> {
    let parts: Vec<&str> = s.split('.').collect();
    if parts.len() != 3 {
        return None;
    }
    if !parts
        .iter()
        .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
    {
        return None;
    }
    Version::parse(s).ok()
}
