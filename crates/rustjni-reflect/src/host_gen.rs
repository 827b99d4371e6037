//! Host declaration generation

use crate::block::Markers;
use crate::primitive::Dialect;
use crate::signature::MethodSignature;
use rustjni_config::Visibility;

/// Header line inside the host generated block
pub const HOST_HEADER: &str = "// auto-generated code";

/// Render one external declaration in the dialect's syntax
pub fn render_declaration(sig: &MethodSignature, dialect: Dialect, visibility: Visibility) -> String {
    let modifier = match visibility.keyword() {
        "" => String::new(),
        keyword => format!("{keyword} "),
    };

    match dialect {
        Dialect::Kotlin => {
            let params: Vec<String> = sig
                .parameters
                .iter()
                .map(|p| format!("{}: {}", p.name, p.ty.host_name(dialect)))
                .collect();
            let returns = if sig.return_type.is_void() {
                String::new()
            } else {
                format!(": {}", sig.return_type.host_name(dialect))
            };
            format!(
                "{modifier}external fun {}({}){returns}",
                sig.name,
                params.join(", ")
            )
        }
        Dialect::Java => {
            let params: Vec<String> = sig
                .parameters
                .iter()
                .map(|p| format!("{} {}", p.ty.host_name(dialect), p.name))
                .collect();
            format!(
                "{modifier}static native {} {}({});",
                sig.return_type.host_name(dialect),
                sig.name,
                params.join(", ")
            )
        }
    }
}

/// Statement loading the native library when the class is initialised
pub fn load_statement(dialect: Dialect, lib_name: &str) -> String {
    match dialect {
        Dialect::Kotlin => format!("init {{ System.loadLibrary(\"{lib_name}\") }}"),
        Dialect::Java => format!("static {{ System.loadLibrary(\"{lib_name}\"); }}"),
    }
}

/// Render the unindented host block: header, declarations separated by
/// blank lines, then the load statement
pub fn render_block(
    signatures: &[MethodSignature],
    dialect: Dialect,
    visibility: Visibility,
    lib_name: &str,
) -> String {
    let mut sections = vec![HOST_HEADER.to_string(), String::new()];
    for sig in signatures {
        sections.push(render_declaration(sig, dialect, visibility));
        sections.push(String::new());
    }
    sections.push(load_statement(dialect, lib_name));
    sections.push(String::new());

    Markers::SLASH.wrap(&sections.join("\n"))
}
