//! Exported native symbol names
//!
//! `Java_` + class path with `.` replaced by `_` + `_` + method name. No
//! escaping is applied, so a method name containing `_` cannot be decoded
//! unambiguously; decoding always takes the last segment as the method.

use rustjni_config::ClassName;

pub const EXPORT_PREFIX: &str = "Java_";

/// A decoded export symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSymbol {
    /// Dotted class path (`com.example.Main`)
    pub class_path: String,
    pub method: String,
}

/// Synthesize the export symbol for `method` on `class`
pub fn mangle(class: &ClassName, method: &str) -> String {
    format!("{}{}_{}", EXPORT_PREFIX, class.symbol_path(), method)
}

/// Decode an export symbol; `None` when it lacks the prefix or a class part
pub fn demangle(symbol: &str) -> Option<ExportSymbol> {
    let rest = symbol.strip_prefix(EXPORT_PREFIX)?;
    let (class, method) = rest.rsplit_once('_')?;
    if class.is_empty() || method.is_empty() {
        return None;
    }

    Some(ExportSymbol {
        class_path: class.replace('_', "."),
        method: method.to_string(),
    })
}

/// Method name when `symbol` is exported for `class`.
///
/// Matches on the known class prefix, so packages containing `_` still
/// resolve. A remainder containing `_` belongs to a class nested under
/// `class` (or names a method that cannot be mangled) and is rejected.
pub fn method_for_class(symbol: &str, class: &ClassName) -> Option<String> {
    let method = symbol
        .strip_prefix(EXPORT_PREFIX)?
        .strip_prefix(class.symbol_path().as_str())?
        .strip_prefix('_')?;
    (!method.is_empty() && !method.contains('_')).then(|| method.to_string())
}
