//! End-to-end tests for the rustjni binary
//!
//! Every test runs against a throwaway project and home directory so the
//! developer's machine-local configuration never leaks in.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const HOST_FILE: &str = "src/main/java/com/example/app/MainActivity.kt";
const HOST_CLASS: &str = "com.example.app.MainActivity";

struct Workspace {
    project: TempDir,
    home: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            project: TempDir::new().unwrap(),
            home: TempDir::new().unwrap(),
        }
    }

    fn root(&self) -> &Path {
        self.project.path()
    }

    fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.root().join(relative)).unwrap()
    }

    fn rustjni(&self) -> Command {
        let mut cmd = Command::cargo_bin("rustjni").unwrap();
        cmd.env("HOME", self.home.path())
            .env_remove("RUSTJNI_LOG")
            .env_remove("RUSTJNI_CARGO_DIR")
            .env_remove("RUSTJNI_NDK_DIR")
            .env_remove("RUSTJNI_NDK_VERSION")
            .env_remove("RUSTJNI_PREBUILT")
            .env_remove("RUSTJNI_TOOLCHAIN_VERSION")
            .arg("--project-dir")
            .arg(self.root());
        cmd
    }
}

fn project_with_host(host: &str, extra_config: &str) -> Workspace {
    let ws = Workspace::new();
    ws.write(
        "rustjni.toml",
        &format!("[bridge]\nhost = \"{HOST_CLASS}\"\n{extra_config}"),
    );
    ws.write(HOST_FILE, host);
    ws
}

const PLAIN_HOST: &str = "package com.example.app\n\nclass MainActivity : AppCompatActivity() {\n}\n";

const ARM64: &str = "\n[[architectures]]\ntarget = \"aarch64-linux-android\"\nlinker = \"aarch64-linux-android21-clang\"\n";

#[test]
fn test_help_lists_commands() {
    Command::cargo_bin("rustjni")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("sync"))
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("clean"));
}

#[test]
fn test_completions_mention_binary() {
    Command::cargo_bin("rustjni")
        .unwrap()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rustjni"));
}

#[test]
fn test_missing_project_config_fails() {
    let ws = Workspace::new();
    ws.rustjni()
        .arg("sync")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No rustjni.toml found"));
}

#[test]
fn test_init_writes_config_and_scaffold() {
    let ws = Workspace::new();
    ws.write(HOST_FILE, PLAIN_HOST);

    ws.rustjni()
        .args(["init", "--host", HOST_CLASS, "--android-api", "24"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created native library 'my_rust_lib'"));

    let config = ws.read("rustjni.toml");
    assert!(config.contains("host = \"com.example.app.MainActivity\""));
    assert!(config.contains("linker = \"armv7a-linux-androideabi24-clang\""));

    assert!(ws.read("rust/Cargo.toml").contains("crate-type = [\"cdylib\"]"));
    assert!(ws
        .read("rust/src/lib.rs")
        .contains("Java_com_example_app_MainActivity_sayHello("));
    assert!(ws
        .read("rust/.cargo/config.toml")
        .contains("[target.x86_64-linux-android]"));
    assert!(ws.read(HOST_FILE).contains("external fun sayHello(): String"));

    // Re-running keeps the native project
    fs::write(ws.root().join("rust/src/lib.rs"), "use jni::JNIEnv;\n").unwrap();
    ws.rustjni()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
    assert_eq!(ws.read("rust/src/lib.rs"), "use jni::JNIEnv;\n");
}

#[test]
fn test_init_refuses_to_overwrite_config() {
    let ws = project_with_host(PLAIN_HOST, "");
    ws.rustjni()
        .args(["init", "--host", "com.other.Main"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Project already initialized"));
}

#[test]
fn test_sync_adds_stub_and_declaration() {
    let ws = project_with_host(
        "class MainActivity {\n    external fun add(a: Int, b: Int): Int\n}\n",
        "",
    );
    ws.write("rust/src/lib.rs", "use jni::JNIEnv;\nuse jni::objects::JClass;\n");

    ws.rustjni()
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("+ native stub  add"));

    let native = ws.read("rust/src/lib.rs");
    assert!(native.contains("fn Java_com_example_app_MainActivity_add("));
    assert!(native.contains("use jni::sys::{jint};"));

    let host = ws.read(HOST_FILE);
    assert!(host.contains("System.loadLibrary(\"my_rust_lib\")"));
    assert_eq!(host.matches("external fun add").count(), 1);

    ws.rustjni()
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("Everything up to date"));
}

#[test]
fn test_sync_conflict_fails_without_writing() {
    let host = "class MainActivity {\n    external fun compute(x: Int): Int\n}\n";
    let native = "use jni::JNIEnv;\nuse jni::objects::JClass;\n\n#[no_mangle]\npub extern \"C\" fn Java_com_example_app_MainActivity_compute(\n    _env: JNIEnv,\n    _class: JClass,\n    x: jint,\n) -> jlong {\n    0\n}\n";
    let ws = project_with_host(host, "");
    ws.write("rust/src/lib.rs", native);

    ws.rustjni()
        .arg("sync")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Method \"compute\" is already defined"));

    assert_eq!(ws.read(HOST_FILE), host);
    assert_eq!(ws.read("rust/src/lib.rs"), native);
}

#[cfg(unix)]
mod toolchain {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    fn fake_tool(dir: &Path, name: &str, script: &str) {
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{script}")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    /// Cargo bin dir whose `cargo build` leaves a library behind
    fn fake_cargo_dir(cargo_script: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fake_tool(dir.path(), "cargo", cargo_script);
        fake_tool(
            dir.path(),
            "rustc",
            "echo 'rustc 1.86.0 (05f9846f8 2025-03-31)'\n",
        );
        fake_tool(dir.path(), "rustup", "exit 0\n");
        dir
    }

    const COMPILING_CARGO: &str = "if [ \"$1\" = \"build\" ]; then\n  mkdir -p \"target/$3/release\"\n  printf 'ELF' > \"target/$3/release/libmy_rust_lib.so\"\nfi\n";

    #[test]
    fn test_build_json_report() {
        let ws = project_with_host(PLAIN_HOST, &format!("\n[toolchain]\nversion = \">=1.70.0\"\n{ARM64}"));
        let cargo_dir = fake_cargo_dir(COMPILING_CARGO);

        let output = ws
            .rustjni()
            .env("RUSTJNI_CARGO_DIR", cargo_dir.path())
            .args(["build", "--json"])
            .output()
            .unwrap();
        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

        let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(report["lib_name"], "my_rust_lib");
        assert_eq!(report["toolchain_version"], "1.86.0");
        assert_eq!(report["artifacts"][0]["abi"], "arm64-v8a");
        assert_eq!(report["stats"]["architectures"], 1);

        assert_eq!(ws.read("build/rust/arm64-v8a/libmy_rust_lib.so"), "ELF");
        assert!(ws.read(HOST_FILE).contains("external fun sayHello(): String"));

        ws.rustjni()
            .arg("clean")
            .assert()
            .success()
            .stdout(predicate::str::contains("Removed 1 file(s), 3 bytes"));
        assert!(!ws.root().join("build/rust").exists());
    }

    #[test]
    fn test_failed_compile_reports_exit_code() {
        let ws = project_with_host(PLAIN_HOST, ARM64);
        let cargo_dir = fake_cargo_dir("echo 'error: could not compile' >&2\nexit 101\n");

        ws.rustjni()
            .env("RUSTJNI_CARGO_DIR", cargo_dir.path())
            .arg("build")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Build failed"))
            .stderr(predicate::str::contains("cargo command failed with exit code 101"))
            .stderr(predicate::str::contains("could not compile"));
        assert!(!ws.root().join("build/rust").exists());
    }

    #[test]
    fn test_unsatisfied_toolchain_version() {
        let ws = project_with_host(PLAIN_HOST, ARM64);
        let cargo_dir = fake_cargo_dir(COMPILING_CARGO);

        ws.rustjni()
            .env("RUSTJNI_CARGO_DIR", cargo_dir.path())
            .env("RUSTJNI_TOOLCHAIN_VERSION", "1.70.0")
            .arg("build")
            .assert()
            .failure()
            .stderr(predicate::str::contains(
                "Rust version 1.86.0 does not satisfy required version 1.70.0",
            ));
    }

    #[test]
    fn test_missing_cargo_dir() {
        let ws = project_with_host(PLAIN_HOST, ARM64);
        let missing = ws.root().join("no-cargo-here");

        ws.rustjni()
            .env("RUSTJNI_CARGO_DIR", &missing)
            .arg("build")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Cargo directory does not exist"));
    }
}
