use super::SignatureParser;
use crate::mangle;
use crate::primitive::PrimitiveType;
use crate::signature::{MethodSignature, Parameter};
use regex::Regex;
use rustjni_config::ClassName;
use std::sync::LazyLock;

/// `#[no_mangle] pub extern "C" fn Java_...(params) -> ret {`
static EXPORT_FN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)#\s*\[\s*no_mangle\s*\]\s*pub\s+extern\s+"C"\s+fn\s+(Java_\w+)\s*\((.*?)\)\s*(->\s*[\w:]+)?\s*\{"#,
    )
    .expect("export function pattern is valid")
});

/// Number of leading parameters that are JNI plumbing (env, class)
const PLUMBING_PARAMS: usize = 2;

/// Parses exported native functions belonging to one host class
pub struct NativeParser<'a> {
    class: &'a ClassName,
}

impl<'a> NativeParser<'a> {
    pub fn new(class: &'a ClassName) -> Self {
        Self { class }
    }
}

impl SignatureParser for NativeParser<'_> {
    fn parse(&self, source: &str) -> Vec<MethodSignature> {
        EXPORT_FN
            .captures_iter(source)
            .filter_map(|caps| {
                let symbol = caps.get(1)?.as_str();
                let Some(method) = mangle::method_for_class(symbol, self.class) else {
                    tracing::trace!(symbol, "skipping export for another class");
                    return None;
                };

                let params = caps.get(2).map_or("", |m| m.as_str());
                let return_type = caps
                    .get(3)
                    .map_or("", |m| m.as_str().trim_start_matches("->"));

                Some(MethodSignature::new(
                    method,
                    PrimitiveType::from_native(return_type),
                    parse_parameters(params),
                ))
            })
            .collect()
    }
}

fn parse_parameters(raw: &str) -> Vec<Parameter> {
    raw.split(',')
        .skip(PLUMBING_PARAMS)
        .filter_map(|param| {
            let param = param.trim();
            if param.matches(':').count() != 1 {
                return None;
            }
            let (name, ty) = param.split_once(':')?;
            let name = name.trim();
            let name = name.strip_prefix("mut ").map_or(name, str::trim);
            if name.is_empty() {
                return None;
            }
            Some(Parameter::new(name, PrimitiveType::from_native(ty)))
        })
        .collect()
}
