//! Configuration loading, validation and precedence tests

use pretty_assertions::assert_eq;
use rstest::rstest;
use rustjni_config::loader::{ENV_NDK_DIR, ENV_NDK_VERSION, ENV_PREBUILT};
use rustjni_config::{ConfigError, ConfigLoader, ProjectConfig, Visibility};
use serial_test::serial;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn create_config_file(dir: &Path, content: &str) -> PathBuf {
    let config_path = dir.join("rustjni.toml");
    fs::write(&config_path, content).unwrap();
    config_path
}

fn loader_without_machine_config(dir: &TempDir) -> ConfigLoader {
    ConfigLoader::with_global_config_path(dir.path().join("absent.toml"))
}

// ============================================================================
// Config Loading Tests
// ============================================================================

#[test]
#[serial]
fn test_load_with_empty_config_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    create_config_file(temp_dir.path(), "");

    let mut loader = loader_without_machine_config(&temp_dir);
    let config = loader.load_from_directory(temp_dir.path()).unwrap();
    let bridge = config.bridge().unwrap();

    assert!(config.is_project());
    assert_eq!(bridge.lib_name, "my_rust_lib");
    assert_eq!(bridge.lib_version, "0.1.0");
    assert_eq!(bridge.native_root, temp_dir.path().join("./rust"));
    assert_eq!(bridge.output_dir, temp_dir.path().join("build/rust"));
    assert_eq!(
        bridge.source_dirs,
        vec![
            temp_dir.path().join("src/main/java"),
            temp_dir.path().join("src/main/kotlin"),
        ]
    );
    assert_eq!(bridge.visibility, Visibility::Default);
    assert!(bridge.export_functions);
}

#[test]
#[serial]
fn test_full_project_resolves() {
    let temp_dir = TempDir::new().unwrap();
    create_config_file(
        temp_dir.path(),
        r#"
[library]
name = "bridge_core"
path = "native"

[bridge]
host = "com.devfigas.rustjni.sample.MainActivity"
visibility = "private"

[toolchain]
version = "1.86.*"

[ndk]
dir = "/opt/ndk"
version = "26.1.10909125"
prebuilt = "linux-x86_64"

[[architectures]]
target = "aarch64-linux-android"
linker = "aarch64-linux-android21-clang"

[[architectures]]
target = "x86_64-linux-android"
linker = "x86_64-linux-android21-clang"
"#,
    );

    let mut loader = loader_without_machine_config(&temp_dir);
    let bridge = loader
        .load_from_directory(temp_dir.path())
        .unwrap()
        .bridge()
        .unwrap();

    assert_eq!(bridge.lib_name, "bridge_core");
    assert_eq!(bridge.native_root, temp_dir.path().join("native"));
    assert_eq!(
        bridge.require_host_class().unwrap().symbol_path(),
        "com_devfigas_rustjni_sample_MainActivity"
    );
    assert_eq!(bridge.toolchain_version.unwrap().to_string(), "1.86.*");
    assert_eq!(bridge.ndk.dir, Some(PathBuf::from("/opt/ndk")));
    let targets: Vec<&str> = bridge
        .architectures
        .iter()
        .map(|a| a.target.as_str())
        .collect();
    assert_eq!(targets, vec!["aarch64-linux-android", "x86_64-linux-android"]);
}

// ============================================================================
// Validation Tests
// ============================================================================

#[rstest]
#[case::unknown_section("[package]\nname = \"x\"\n")]
#[case::unknown_key("[bridge]\nhostt = \"com.example.Main\"\n")]
#[case::bad_visibility("[bridge]\nvisibility = \"internal\"\n")]
#[case::bad_toml("[library\nname = \"x\"\n")]
fn test_rejected_files(#[case] content: &str) {
    let temp_dir = TempDir::new().unwrap();
    let path = create_config_file(temp_dir.path(), content);

    let err = ProjectConfig::load_from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::TomlParseError { .. }), "{err}");
}

#[rstest]
#[case::bad_class("[bridge]\nhost = \"com..Main\"\n")]
#[case::bad_constraint("[toolchain]\nversion = \"~1.70\"\n")]
#[case::bad_lib_name("[library]\nname = \"my lib\"\n")]
#[case::empty_linker("[[architectures]]\ntarget = \"aarch64-linux-android\"\nlinker = \"\"\n")]
fn test_invalid_values(#[case] content: &str) {
    let temp_dir = TempDir::new().unwrap();
    let path = create_config_file(temp_dir.path(), content);

    assert!(ProjectConfig::load_from_file(&path).is_err());
}

#[test]
fn test_missing_file_reports_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("rustjni.toml");

    assert!(matches!(
        ProjectConfig::load_from_file(&path),
        Err(ConfigError::NotFound(_))
    ));
}

// ============================================================================
// Precedence Tests
// ============================================================================

#[test]
#[serial]
fn test_machine_local_overrides_project_locations() {
    let temp_dir = TempDir::new().unwrap();
    create_config_file(
        temp_dir.path(),
        r#"
[toolchain]
cargo-dir = "/project/cargo"

[ndk]
dir = "/project/ndk"
prebuilt = "darwin-x86_64"
"#,
    );
    let machine = temp_dir.path().join("machine.toml");
    fs::write(
        &machine,
        r#"
[toolchain]
cargo-dir = "/machine/cargo"

[ndk]
prebuilt = "linux-x86_64"
"#,
    )
    .unwrap();

    let mut loader = ConfigLoader::with_global_config_path(&machine);
    let bridge = loader
        .load_from_directory(temp_dir.path())
        .unwrap()
        .bridge()
        .unwrap();

    assert_eq!(bridge.cargo_dir, Some(PathBuf::from("/machine/cargo")));
    assert_eq!(bridge.ndk.dir, Some(PathBuf::from("/project/ndk")));
    assert_eq!(bridge.ndk.prebuilt.as_deref(), Some("linux-x86_64"));
}

#[test]
#[serial]
fn test_env_overrides_ndk_settings() {
    let temp_dir = TempDir::new().unwrap();
    create_config_file(
        temp_dir.path(),
        r#"
[ndk]
dir = "/project/ndk"
version = "25.0.0"
"#,
    );

    env::set_var(ENV_NDK_DIR, "/env/ndk");
    env::set_var(ENV_NDK_VERSION, "26.1.10909125");
    env::set_var(ENV_PREBUILT, "windows-x86_64");

    let mut loader = loader_without_machine_config(&temp_dir);
    let result = loader
        .load_from_directory(temp_dir.path())
        .and_then(|c| c.bridge());

    env::remove_var(ENV_NDK_DIR);
    env::remove_var(ENV_NDK_VERSION);
    env::remove_var(ENV_PREBUILT);

    let bridge = result.unwrap();
    assert_eq!(bridge.ndk.dir, Some(PathBuf::from("/env/ndk")));
    assert_eq!(bridge.ndk.version.as_deref(), Some("26.1.10909125"));
    assert_eq!(bridge.ndk.prebuilt.as_deref(), Some("windows-x86_64"));
}

#[test]
#[serial]
fn test_blank_env_value_is_ignored() {
    let temp_dir = TempDir::new().unwrap();
    create_config_file(temp_dir.path(), "[ndk]\nversion = \"25.0.0\"\n");

    env::set_var(ENV_NDK_VERSION, "  ");

    let mut loader = loader_without_machine_config(&temp_dir);
    let result = loader
        .load_from_directory(temp_dir.path())
        .and_then(|c| c.bridge());

    env::remove_var(ENV_NDK_VERSION);

    assert_eq!(result.unwrap().ndk.version.as_deref(), Some("25.0.0"));
}
