use super::SignatureParser;
use crate::primitive::{Dialect, PrimitiveType};
use crate::signature::{MethodSignature, Parameter};
use regex::Regex;
use std::sync::LazyLock;

/// `external fun name(params): Ret`
static KOTLIN_EXTERNAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:public|private|protected|internal)?\s*external\s+fun\s+(\w+)\s*\(([^)]*)\)\s*(?::\s*(\w+\??))?",
    )
    .expect("kotlin external pattern is valid")
});

/// `static native Ret name(params);`
static JAVA_NATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:private|protected|public)?\s*(?:static)?\s*native\s+(\w+)\s+(\w+)\s*\(([^)]*)\)\s*;",
    )
    .expect("java native pattern is valid")
});

/// Parses external declarations from a host source file.
///
/// The whole text is assumed to belong to the bridge-host class.
pub struct HostParser {
    dialect: Dialect,
}

impl HostParser {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn parse_kotlin(&self, source: &str) -> Vec<MethodSignature> {
        KOTLIN_EXTERNAL
            .captures_iter(source)
            .filter_map(|caps| {
                let name = caps.get(1)?.as_str();
                let params = caps.get(2).map_or("", |m| m.as_str());
                let return_type = caps.get(3).map_or("", |m| m.as_str());

                let parameters = split_parameters(params)
                    .filter_map(|param| {
                        let (name, ty) = param.split_once(':')?;
                        // Default values are not part of the type
                        let ty = ty.split('=').next().unwrap_or(ty);
                        named(name, ty, Dialect::Kotlin)
                    })
                    .collect();

                Some(MethodSignature::new(
                    name,
                    PrimitiveType::from_host(return_type, Dialect::Kotlin),
                    parameters,
                ))
            })
            .collect()
    }

    fn parse_java(&self, source: &str) -> Vec<MethodSignature> {
        JAVA_NATIVE
            .captures_iter(source)
            .filter_map(|caps| {
                let return_type = caps.get(1)?.as_str();
                let name = caps.get(2)?.as_str();
                let params = caps.get(3).map_or("", |m| m.as_str());

                let parameters = split_parameters(params)
                    .filter_map(|param| {
                        let (ty, name) = param.rsplit_once(char::is_whitespace)?;
                        // `final int x` declares type `int`
                        let ty = ty.split_whitespace().last()?;
                        named(name, ty, Dialect::Java)
                    })
                    .collect();

                Some(MethodSignature::new(
                    name,
                    PrimitiveType::from_host(return_type, Dialect::Java),
                    parameters,
                ))
            })
            .collect()
    }
}

impl SignatureParser for HostParser {
    fn parse(&self, source: &str) -> Vec<MethodSignature> {
        match self.dialect {
            Dialect::Kotlin => self.parse_kotlin(source),
            Dialect::Java => self.parse_java(source),
        }
    }
}

fn split_parameters(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|p| !p.is_empty())
}

fn named(name: &str, ty: &str, dialect: Dialect) -> Option<Parameter> {
    let name = name.trim();
    let ty = ty.trim();
    if name.is_empty() || ty.is_empty() {
        return None;
    }
    Some(Parameter::new(name, PrimitiveType::from_host(ty, dialect)))
}
