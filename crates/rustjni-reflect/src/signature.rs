//! Method signatures parsed from either side of the bridge

use crate::primitive::{Dialect, PrimitiveType, TypeResolution};
use std::fmt;

/// One user-visible parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub ty: TypeResolution,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeResolution>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// A bridge method as declared on one side
///
/// `name` is the plain method name (`someMethod`), never the mangled export
/// symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    pub name: String,
    pub return_type: TypeResolution,
    pub parameters: Vec<Parameter>,
}

/// Identity used when comparing signatures: name plus ordered parameter tags.
/// The return type is deliberately not part of it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SignatureKey {
    pub name: String,
    pub parameter_types: Vec<PrimitiveType>,
}

impl MethodSignature {
    pub fn new(
        name: impl Into<String>,
        return_type: impl Into<TypeResolution>,
        parameters: Vec<Parameter>,
    ) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            parameters,
        }
    }

    pub fn key(&self) -> SignatureKey {
        SignatureKey {
            name: self.name.clone(),
            parameter_types: self.parameters.iter().map(|p| p.ty.tag()).collect(),
        }
    }

    /// Parameter names in declaration order
    pub fn parameter_names(&self) -> Vec<&str> {
        self.parameters.iter().map(|p| p.name.as_str()).collect()
    }

    /// Render as a host-style signature for diagnostics
    pub fn describe(&self, dialect: Dialect) -> String {
        let params: Vec<String> = self
            .parameters
            .iter()
            .map(|p| format!("{}: {}", p.name, p.ty.describe(dialect)))
            .collect();
        format!(
            "{}({}): {}",
            self.name,
            params.join(", "),
            self.return_type.describe(dialect)
        )
    }
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<String> = self
            .parameters
            .iter()
            .map(|p| format!("{}: {}", p.name, p.ty.tag()))
            .collect();
        write!(
            f,
            "{}({}) -> {}",
            self.name,
            params.join(", "),
            self.return_type.tag()
        )
    }
}
