/// Native project `Cargo.toml`
use crate::error::BuildResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// JNI binding crate every native project depends on
pub const JNI_DEPENDENCY: (&str, &str) = ("jni", "0.21");

/// The subset of a cargo manifest the scaffold writes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeManifest {
    pub package: PackageSection,
    pub lib: LibSection,
    pub dependencies: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageSection {
    pub name: String,
    pub version: String,
    pub edition: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibSection {
    #[serde(rename = "crate-type")]
    pub crate_type: Vec<String>,
}

impl NativeManifest {
    /// Shared-library manifest for `name`
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        let (dep, dep_version) = JNI_DEPENDENCY;
        Self {
            package: PackageSection {
                name: name.into(),
                version: version.into(),
                edition: "2021".to_string(),
            },
            lib: LibSection {
                crate_type: vec!["cdylib".to_string()],
            },
            dependencies: BTreeMap::from([(dep.to_string(), dep_version.to_string())]),
        }
    }

    pub fn to_toml(&self) -> BuildResult<String> {
        Ok(toml::to_string(self)?)
    }
}
