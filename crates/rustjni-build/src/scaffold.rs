//! Native project scaffold
//!
//! Creates the native project directory with a shared-library manifest and
//! an entry file. An existing directory is never touched.

use crate::error::{BuildError, BuildResult};
use crate::manifest::NativeManifest;
use rustjni_config::{BridgeConfig, ClassName};
use rustjni_reflect::native_gen::render_imports_block;
use rustjni_reflect::mangle;
use std::fs;
use std::path::{Path, PathBuf};

const BINDING_IMPORTS: &str = "use jni::JNIEnv;\nuse jni::objects::JClass;\n";

/// What the scaffold step did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaffoldOutcome {
    /// Native project already present
    Existing,
    /// Files written; the entry file starts from an empty imports block
    /// because the host class already declares bridge methods
    CreatedEmpty { entry: PathBuf },
    /// Files written with the sample export
    CreatedSample { entry: PathBuf },
}

impl ScaffoldOutcome {
    pub fn created(&self) -> bool {
        !matches!(self, Self::Existing)
    }
}

/// Entry file holding only the binding imports and an empty imports block,
/// ready for stubs generated from existing host declarations
pub fn empty_entry_file() -> String {
    format!("{BINDING_IMPORTS}{}\n", render_imports_block(&[]))
}

/// Entry file with one `sayHello` export returning a greeting
pub fn sample_entry_file(class: &ClassName) -> String {
    let symbol = mangle::mangle(class, "sayHello");
    format!(
        r####"{BINDING_IMPORTS}{imports}

#[no_mangle]
pub extern "C" fn {symbol}(
    mut env: JNIEnv,
    _class: JClass,
) -> jstring {{
    let output = r#"
__________________________
< Hello RustJNI >
--------------------------
Do your rust implementation there: /rust/src/lib.rs
--------------------------"#;

    env.new_string(output)
        .expect("Couldn't create Java string!")
        .into_raw()
}}
"####,
        imports = render_imports_block(&["jstring"]),
    )
}

/// Create the native project unless its directory exists
pub fn scaffold_native_project(
    config: &BridgeConfig,
    host_has_block: bool,
) -> BuildResult<ScaffoldOutcome> {
    let root = &config.native_root;
    if root.exists() {
        tracing::info!(dir = %root.display(), "native project already exists, skipping initialization");
        return Ok(ScaffoldOutcome::Existing);
    }

    let class = config.require_host_class()?;
    let manifest = NativeManifest::new(&config.lib_name, &config.lib_version);
    write(&root.join("Cargo.toml"), &manifest.to_toml()?)?;
    write(&root.join(".gitignore"), "/target\n")?;

    let entry = root.join("src").join("lib.rs");
    let outcome = if host_has_block {
        write(&entry, &empty_entry_file())?;
        ScaffoldOutcome::CreatedEmpty { entry }
    } else {
        write(&entry, &sample_entry_file(class))?;
        ScaffoldOutcome::CreatedSample { entry }
    };

    tracing::info!(dir = %root.display(), lib = %config.lib_name, "created native project");
    Ok(outcome)
}

fn write(path: &Path, content: &str) -> BuildResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| BuildError::io(parent, e))?;
    }
    fs::write(path, content).map_err(|e| BuildError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustjni_reflect::{NativeParser, PrimitiveType, SignatureParser};
    use tempfile::TempDir;

    fn class() -> ClassName {
        ClassName::parse("com.example.app.MainActivity").unwrap()
    }

    #[test]
    fn test_sample_exports_say_hello() {
        let class = class();
        let text = sample_entry_file(&class);

        assert!(text.starts_with("use jni::JNIEnv;\nuse jni::objects::JClass;\n//<RustJNI>\n// primitive imports\nuse jni::sys::{jstring};\n//</RustJNI>\n"));

        let sigs = NativeParser::new(&class).parse(&text);
        assert_eq!(sigs.len(), 1);
        assert_eq!(sigs[0].name, "sayHello");
        assert_eq!(sigs[0].return_type.tag(), PrimitiveType::String);
        assert!(sigs[0].parameters.is_empty());
    }

    #[test]
    fn test_empty_entry_has_empty_imports() {
        assert_eq!(
            empty_entry_file(),
            "use jni::JNIEnv;\nuse jni::objects::JClass;\n//<RustJNI>\n// primitive imports\nuse jni::sys::{};\n//</RustJNI>\n"
        );
    }

    #[test]
    fn test_scaffold_creates_files_once() {
        let dir = TempDir::new().unwrap();
        let config = BridgeConfig::new(dir.path()).with_host_class(class());

        let outcome = scaffold_native_project(&config, false).unwrap();
        assert!(matches!(outcome, ScaffoldOutcome::CreatedSample { .. }));
        assert!(config.native_root.join("Cargo.toml").is_file());
        let entry = config.native_root.join("src/lib.rs");
        assert!(fs::read_to_string(&entry).unwrap().contains("_sayHello("));

        fs::write(&entry, "// mine\n").unwrap();
        let again = scaffold_native_project(&config, false).unwrap();
        assert_eq!(again, ScaffoldOutcome::Existing);
        assert!(!again.created());
        assert_eq!(fs::read_to_string(&entry).unwrap(), "// mine\n");
    }

    #[test]
    fn test_scaffold_requires_host_class() {
        let dir = TempDir::new().unwrap();
        let config = BridgeConfig::new(dir.path());

        assert!(matches!(
            scaffold_native_project(&config, false),
            Err(BuildError::Config(_))
        ));
        assert!(!config.native_root.exists());
    }
}
