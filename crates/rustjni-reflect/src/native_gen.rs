//! Native stub generation and primitive import management

use crate::block::{insert_after_uses, Markers, SourceLayout};
use crate::mangle;
use crate::primitive::{Dialect, PrimitiveType};
use crate::signature::MethodSignature;
use regex::Regex;
use rustjni_config::ClassName;
use std::sync::LazyLock;

/// Header line inside the native generated block
pub const IMPORTS_HEADER: &str = "// primitive imports";

/// Primitive identifiers managed by the imports block, in import order
pub const IMPORTABLE_TYPES: [&str; 11] = [
    "jstring", "jint", "jclass", "jboolean", "jbyte", "jchar", "jdouble", "jfloat", "jlong",
    "jshort", "jobject",
];

static PRIMITIVE_IDENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:jstring|jint|jclass|jboolean|jbyte|jchar|jdouble|jfloat|jlong|jshort|jobject)\b")
        .expect("primitive identifier pattern is valid")
});

/// Render an exported skeleton for a host-declared method.
///
/// The body prints the received parameters and returns a placeholder.
/// Unsupported (opaque) return types produce a body that panics naming the
/// host type as written in `dialect`, so the stub compiles but must be
/// implemented by hand.
pub fn render_stub(class: &ClassName, sig: &MethodSignature, dialect: Dialect) -> String {
    let symbol = mangle::mangle(class, &sig.name);
    let returns = sig.return_type.tag();
    let env_binding = if returns == PrimitiveType::String {
        "mut env"
    } else {
        "_env"
    };

    let mut params = vec![
        format!("{env_binding}: JNIEnv"),
        "_class: JClass".to_string(),
    ];
    params.extend(sig.parameters.iter().map(|p| {
        format!("{}: {}", p.name, p.ty.native_name().unwrap_or("jobject"))
    }));

    let return_clause = returns
        .native_name()
        .map(|name| format!(" -> {name}"))
        .unwrap_or_default();

    let trace = format!(
        "println!(\"Parameters: {{:?}}\", ({}));",
        sig.parameter_names().join(", ")
    );

    let tail = match returns {
        PrimitiveType::Void => None,
        PrimitiveType::String => Some(format!(
            "let output = r#\"Rust Method: {}\"#;\n    env.new_string(output)\n        .expect(\"Couldn't create Java string!\")\n        .into_raw()",
            sig.name
        )),
        PrimitiveType::Object => Some(format!(
            "panic!(\"Unsupported return type: {}\");",
            sig.return_type.describe(dialect)
        )),
        scalar => scalar.sample_value().map(str::to_string),
    };

    let mut out = String::new();
    out.push_str("\n#[no_mangle]\n");
    out.push_str(&format!("pub extern \"C\" fn {symbol}(\n"));
    for param in &params {
        out.push_str(&format!("    {param},\n"));
    }
    out.push_str(&format!("){return_clause} {{\n"));
    out.push_str(&format!("    {trace}\n"));
    if let Some(tail) = tail {
        out.push_str(&format!("\n    {tail}\n"));
    }
    out.push_str("}\n");
    out
}

/// Append rendered stubs to the end of the native source
pub fn append_stubs(source: &str, stubs: &[String]) -> String {
    if stubs.is_empty() {
        return source.to_string();
    }

    let mut out = source.to_string();
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    for stub in stubs {
        out.push_str(stub);
    }
    out
}

/// Primitive identifiers used anywhere outside the generated block
pub fn used_primitives(source: &str) -> Vec<&'static str> {
    let code = match Markers::SLASH.locate(source) {
        SourceLayout::Blocked(parts) => parts.without_block_lines(),
        SourceLayout::Plain(text) => text.to_string(),
    };
    let found: Vec<&str> = PRIMITIVE_IDENT
        .find_iter(&code)
        .map(|m| m.as_str())
        .collect();

    IMPORTABLE_TYPES
        .iter()
        .copied()
        .filter(|ty| found.contains(ty))
        .collect()
}

/// Render the imports block for `types`
pub fn render_imports_block(types: &[&str]) -> String {
    Markers::SLASH.wrap(&format!(
        "{IMPORTS_HEADER}\nuse jni::sys::{{{}}};",
        types.join(", ")
    ))
}

/// Rewrite the consolidated primitive import so it names exactly the
/// primitives the file uses.
///
/// An existing block is replaced in place; otherwise a new one goes after
/// the leading `use` lines. When nothing is used the block is removed.
pub fn rewrite_imports(source: &str) -> String {
    let types = used_primitives(source);
    let layout = Markers::SLASH.locate(source);

    if types.is_empty() {
        return match layout {
            SourceLayout::Blocked(parts) => parts.without_block_lines(),
            SourceLayout::Plain(text) => text.to_string(),
        };
    }

    let block = render_imports_block(&types);
    match layout {
        SourceLayout::Blocked(parts) => parts.with_block(&block),
        SourceLayout::Plain(text) => insert_after_uses(text, &block),
    }
}
