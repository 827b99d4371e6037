//! End-to-end synchronization over a project laid out on disk

use pretty_assertions::assert_eq;
use rustjni_config::{BridgeConfig, ClassName, Visibility};
use rustjni_reflect::{ReflectError, Synchronizer};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const NATIVE_HEADER: &str = "use jni::JNIEnv;\nuse jni::objects::JClass;\n";

struct Project {
    dir: TempDir,
    config: BridgeConfig,
}

impl Project {
    fn new(class: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let config = BridgeConfig::new(dir.path())
            .with_host_class(ClassName::parse(class).unwrap())
            .with_visibility(Visibility::Private);
        Self { dir, config }
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn host(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    fn native(&self, content: &str) -> PathBuf {
        let path = self.config.native_root.join("src/lib.rs");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    fn sync(&self) -> Result<rustjni_reflect::SyncReport, ReflectError> {
        Synchronizer::new(&self.config).synchronize()
    }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

fn native_some_method0() -> String {
    format!(
        "{NATIVE_HEADER}
#[no_mangle]
pub extern \"C\" fn Java_com_example_app_MainActivity_someMethod0(
    _env: JNIEnv,
    _class: JClass,
    param0: jint,
) -> jint {{
    param0 + 1
}}
"
    )
}

#[test]
fn test_native_export_declared_in_kotlin_host() {
    let project = Project::new("com.example.app.MainActivity");
    let host = project.host(
        "src/main/kotlin/com/example/app/MainActivity.kt",
        "package com.example.app\n\nclass MainActivity {\n\n    fun hello() = \"hi\"\n}\n",
    );
    let native = project.native(&native_some_method0());

    let report = project.sync().unwrap();
    assert_eq!(report.declarations, vec!["someMethod0".to_string()]);
    assert!(report.stubs_added.is_empty());

    assert_eq!(
        read(&host),
        "package com.example.app\n\nclass MainActivity {\n\n    //<RustJNI>\n    // auto-generated code\n\n    private external fun someMethod0(param0: Int): Int\n\n    init { System.loadLibrary(\"my_rust_lib\") }\n\n    //</RustJNI>\n\n    fun hello() = \"hi\"\n}\n"
    );
    assert!(read(&native).contains(
        "use jni::objects::JClass;\n//<RustJNI>\n// primitive imports\nuse jni::sys::{jint};\n//</RustJNI>\n"
    ));
}

#[test]
fn test_native_export_declared_in_java_host() {
    let project = Project::new("com.example.app.MainActivity");
    let host = project.host(
        "src/main/java/com/example/app/MainActivity.java",
        "package com.example.app;\n\npublic class MainActivity extends Activity {\n}\n",
    );
    project.native(&native_some_method0());

    project.sync().unwrap();

    let text = read(&host);
    assert!(text.contains("    private static native int someMethod0(int param0);\n"));
    assert!(text.contains("    static { System.loadLibrary(\"my_rust_lib\"); }\n"));
}

#[test]
fn test_host_declaration_gets_native_stub() {
    let project = Project::new("com.example.app.MainActivity");
    let host = project.host(
        "src/main/kotlin/com/example/app/MainActivity.kt",
        "class MainActivity {\n    external fun someMethod(param0: Boolean): String\n}\n",
    );
    let native = project.native(NATIVE_HEADER);

    let report = project.sync().unwrap();
    assert_eq!(report.stubs_added, vec!["someMethod".to_string()]);
    // Already declared by hand, so the block only loads the library
    assert!(report.declarations.is_empty());

    let native_text = read(&native);
    assert!(native_text.contains("use jni::sys::{jstring, jboolean};"));
    assert!(native_text.contains(
        "pub extern \"C\" fn Java_com_example_app_MainActivity_someMethod(\n    mut env: JNIEnv,\n    _class: JClass,\n    param0: jboolean,\n) -> jstring {"
    ));
    assert!(native_text.contains("let output = r#\"Rust Method: someMethod\"#;"));

    let host_text = read(&host);
    assert!(host_text.contains("init { System.loadLibrary(\"my_rust_lib\") }"));
    assert_eq!(host_text.matches("external fun someMethod").count(), 1);
}

#[test]
fn test_second_run_changes_nothing() {
    let project = Project::new("com.example.app.MainActivity");
    let host = project.host(
        "src/main/kotlin/com/example/app/MainActivity.kt",
        "class MainActivity {\n    external fun load(uri: Uri): Bitmap?\n    external fun ping()\n}\n",
    );
    let native = project.native(&native_some_method0());

    let first = project.sync().unwrap();
    assert!(first.changed());
    let host_after_first = read(&host);
    let native_after_first = read(&native);

    let second = project.sync().unwrap();
    assert!(!second.changed());
    assert!(second.stubs_added.is_empty());
    assert_eq!(read(&host), host_after_first);
    assert_eq!(read(&native), native_after_first);
}

#[test]
fn test_conflicting_return_types_abort_without_writes() {
    let project = Project::new("com.example.app.MainActivity");
    let host_text = "class MainActivity {\n    external fun foo(a: Int): String\n    external fun bar()\n}\n";
    let host = project.host("src/main/kotlin/com/example/app/MainActivity.kt", host_text);
    let native_text = format!(
        "{NATIVE_HEADER}
#[no_mangle]
pub extern \"C\" fn Java_com_example_app_MainActivity_foo(_env: JNIEnv, _class: JClass, a: jint) -> jboolean {{
    0
}}
"
    );
    let native = project.native(&native_text);

    let err = project.sync().unwrap_err();
    assert!(err.is_conflict(), "{err}");
    assert!(err.to_string().contains("\"foo\""));

    assert_eq!(read(&host), host_text);
    assert_eq!(read(&native), native_text);
}

fn native_foo(return_type: &str) -> String {
    format!(
        "{NATIVE_HEADER}
#[no_mangle]
pub extern \"C\" fn Java_com_example_app_MainActivity_foo(_env: JNIEnv, _class: JClass) -> {return_type} {{
    0
}}
"
    )
}

#[test]
fn test_native_return_type_change_flows_to_host() {
    let project = Project::new("com.example.app.MainActivity");
    let host = project.host(
        "src/main/kotlin/com/example/app/MainActivity.kt",
        "class MainActivity {\n}\n",
    );
    let native = project.native(&native_foo("jint"));

    project.sync().unwrap();
    assert!(read(&host).contains("private external fun foo(): Int\n"));

    fs::write(&native, native_foo("jlong")).unwrap();
    let report = project.sync().unwrap();

    assert!(report.stubs_added.is_empty());
    assert_eq!(report.declarations, vec!["foo".to_string()]);
    let text = read(&host);
    assert!(text.contains("private external fun foo(): Long\n"));
    assert!(!text.contains("foo(): Int"));
    assert!(read(&native).contains("-> jlong {"));
}

#[test]
fn test_removed_native_export_leaves_host() {
    let project = Project::new("com.example.app.MainActivity");
    let host = project.host(
        "src/main/kotlin/com/example/app/MainActivity.kt",
        "class MainActivity {\n}\n",
    );
    let native = project.native(&native_foo("jint"));

    project.sync().unwrap();
    assert!(read(&host).contains("external fun foo()"));

    fs::write(&native, NATIVE_HEADER).unwrap();
    let report = project.sync().unwrap();

    assert!(report.stubs_added.is_empty());
    assert!(report.declarations.is_empty());
    assert!(!read(&native).contains("_foo("));
    let text = read(&host);
    assert!(!text.contains("external fun foo"));
    assert!(text.contains("System.loadLibrary(\"my_rust_lib\")"));
}

#[test]
fn test_exports_of_other_classes_are_ignored() {
    let project = Project::new("com.example.app.MainActivity");
    let host = project.host(
        "src/main/kotlin/com/example/app/MainActivity.kt",
        "class MainActivity {\n}\n",
    );
    project.native(&format!(
        "{NATIVE_HEADER}
#[no_mangle]
pub extern \"C\" fn Java_com_example_app_MainActivity_Inner_tick(_env: JNIEnv, _class: JClass) -> jint {{
    0
}}

#[no_mangle]
pub extern \"C\" fn Java_com_example_app_MainActivityHelper_tock(_env: JNIEnv, _class: JClass) -> jint {{
    0
}}

#[no_mangle]
pub extern \"C\" fn Java_com_example_app_MainActivity_ping(_env: JNIEnv, _class: JClass) {{
}}
"
    ));

    let report = project.sync().unwrap();

    assert_eq!(report.declarations, vec!["ping".to_string()]);
    let text = read(&host);
    assert!(text.contains("private external fun ping()\n"));
    assert!(!text.contains("Inner_tick"));
    assert!(!text.contains("tock"));
}

#[test]
fn test_nested_host_class() {
    let project = Project::new("com.example.app.Outer$Bridge");
    let host = project.host(
        "src/main/kotlin/com/example/app/Outer.kt",
        "class Outer {\n    class Bridge {\n    }\n}\n",
    );
    project.native(&format!(
        "{NATIVE_HEADER}
#[no_mangle]
pub extern \"C\" fn Java_com_example_app_Outer_Bridge_version(_env: JNIEnv, _class: JClass) -> jlong {{
    1
}}
"
    ));

    project.sync().unwrap();

    let text = read(&host);
    assert!(text.contains("    class Bridge {\n\n        //<RustJNI>\n"));
    assert!(text.contains("        private external fun version(): Long\n"));
}

#[test]
fn test_disabled_export_skips_everything() {
    let mut project = Project::new("com.example.app.MainActivity");
    project.config.export_functions = false;

    // No host or native files exist, yet nothing fails
    let report = project.sync().unwrap();
    assert!(report.skipped);
    assert!(!report.changed());
}

#[test]
fn test_missing_files_are_reported() {
    let project = Project::new("com.example.app.MainActivity");
    assert!(matches!(
        project.sync(),
        Err(ReflectError::HostFileNotFound { .. })
    ));

    project.host(
        "src/main/kotlin/com/example/app/MainActivity.kt",
        "class MainActivity {}\n",
    );
    assert!(matches!(
        project.sync(),
        Err(ReflectError::NativeSourceNotFound(_))
    ));
}

#[test]
fn test_missing_class_declaration_is_reported() {
    let project = Project::new("com.example.app.MainActivity");
    project.host(
        "src/main/kotlin/com/example/app/MainActivity.kt",
        "class SomethingElse {}\n",
    );
    project.native(NATIVE_HEADER);

    match project.sync() {
        Err(ReflectError::ClassDeclarationNotFound { class, .. }) => {
            assert_eq!(class, "MainActivity")
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_bodiless_host_class_is_not_anchored_elsewhere() {
    let project = Project::new("com.example.app.MainActivity");
    let host_text = "class MainActivity\n\nclass Helper {\n}\n";
    let host = project.host("src/main/kotlin/com/example/app/MainActivity.kt", host_text);
    project.native(NATIVE_HEADER);

    assert!(matches!(
        project.sync(),
        Err(ReflectError::ClassDeclarationNotFound { .. })
    ));
    assert_eq!(read(&host), host_text);
}

#[test]
fn test_missing_host_class_setting() {
    let dir = TempDir::new().unwrap();
    let config = BridgeConfig::new(dir.path());

    assert!(matches!(
        Synchronizer::new(&config).synchronize(),
        Err(ReflectError::Config(_))
    ));
}
