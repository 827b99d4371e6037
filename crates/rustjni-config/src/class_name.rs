//! Fully-qualified bridge-host class names

use crate::{ConfigError, ConfigResult};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// A fully-qualified host class name such as `com.example.Main`.
///
/// Nested classes use `$` (`com.example.Outer$Inner`): the source file is the
/// outermost class, the declaration anchor is the innermost one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassName {
    package: Vec<String>,
    simple: String,
}

impl ClassName {
    pub fn parse(raw: &str) -> ConfigResult<Self> {
        let raw = raw.trim();
        let invalid = || ConfigError::InvalidClassName(raw.to_string());

        if raw.is_empty() {
            return Err(invalid());
        }

        let mut segments: Vec<String> = Vec::new();
        for segment in raw.split('.') {
            if !is_identifier(segment) {
                return Err(invalid());
            }
            segments.push(segment.to_string());
        }

        let simple = segments.pop().ok_or_else(invalid)?;
        if simple.split('$').any(|part| !is_identifier(part) || part.is_empty()) {
            return Err(invalid());
        }
        if segments.iter().any(|s| s.contains('$')) {
            return Err(invalid());
        }

        Ok(Self {
            package: segments,
            simple,
        })
    }

    /// Name as written in configuration (`com.example.Outer$Inner`)
    pub fn qualified(&self) -> String {
        if self.package.is_empty() {
            self.simple.clone()
        } else {
            format!("{}.{}", self.package.join("."), self.simple)
        }
    }

    /// Name with nested-class separators normalised to dots
    pub fn dotted(&self) -> String {
        self.qualified().replace('$', ".")
    }

    /// Package segments joined with dots (empty for the default package)
    pub fn package(&self) -> String {
        self.package.join(".")
    }

    /// Simple name including any `$` nesting
    pub fn simple_name(&self) -> &str {
        &self.simple
    }

    /// Stem of the source file holding the class
    pub fn file_stem(&self) -> &str {
        self.simple.split('$').next().unwrap_or(&self.simple)
    }

    /// Name that appears after the `class`/`object` keyword
    pub fn declaration_name(&self) -> &str {
        self.simple.rsplit('$').next().unwrap_or(&self.simple)
    }

    /// Package as a relative directory path
    pub fn package_path(&self) -> PathBuf {
        self.package.iter().collect()
    }

    /// Class path as it appears inside exported native symbol names
    pub fn symbol_path(&self) -> String {
        self.dotted().replace('.', "_")
    }
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

impl FromStr for ClassName {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified())
    }
}
