//! File-level synchronization passes
//!
//! Host → native: every hand-written host declaration without a native
//! export gets a stub appended to the native entry file, then the primitive
//! imports block is rewritten. The host generated block mirrors earlier
//! native exports and is ignored here, except when seeding a freshly created
//! native project.
//!
//! Native → host: every native export not already declared by hand in the
//! host class is declared inside the host generated block, which is rebuilt
//! from scratch and re-anchored after the class's opening brace.

use crate::block::{insert_after_class, Markers};
use crate::error::{ReflectError, ReflectResult};
use crate::host_gen;
use crate::native_gen;
use crate::parser::{HostParser, NativeParser, SignatureParser};
use crate::primitive::Dialect;
use crate::reconcile;
use crate::signature::MethodSignature;
use rustjni_config::{BridgeConfig, ClassName, Visibility};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default native entry file, relative to the native project root
pub const DEFAULT_NATIVE_SOURCE: &str = "src/lib.rs";

/// The part of the native Cargo.toml that locates the entry file
#[derive(Debug, Deserialize)]
struct NativeManifest {
    lib: Option<NativeLibSection>,
}

#[derive(Debug, Deserialize)]
struct NativeLibSection {
    path: Option<PathBuf>,
}

/// Entry file of the native project: `[lib] path` when set, else `src/lib.rs`
pub fn native_source_path(native_root: &Path) -> ReflectResult<PathBuf> {
    let manifest_path = native_root.join("Cargo.toml");
    if !manifest_path.exists() {
        return Ok(native_root.join(DEFAULT_NATIVE_SOURCE));
    }

    let content =
        fs::read_to_string(&manifest_path).map_err(|e| ReflectError::io(&manifest_path, e))?;
    let manifest: NativeManifest =
        toml::from_str(&content).map_err(|error| ReflectError::ManifestParse {
            path: manifest_path.clone(),
            error,
        })?;

    let relative = manifest
        .lib
        .and_then(|lib| lib.path)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_NATIVE_SOURCE));
    Ok(native_root.join(relative))
}

/// Source file holding the bridge-host class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostFile {
    pub path: PathBuf,
    pub dialect: Dialect,
}

/// Find the host class file: for each source dir, `<pkg path>/<stem>.kt`
/// then `.java`; the first existing file wins
pub fn locate_host_file(class: &ClassName, source_dirs: &[PathBuf]) -> ReflectResult<HostFile> {
    let mut searched = Vec::new();

    for dir in source_dirs {
        for dialect in Dialect::ALL {
            let candidate = dir
                .join(class.package_path())
                .join(format!("{}.{}", class.file_stem(), dialect.file_extension()));
            if candidate.is_file() {
                return Ok(HostFile {
                    path: candidate,
                    dialect,
                });
            }
            searched.push(candidate);
        }
    }

    Err(ReflectError::HostFileNotFound {
        class: class.qualified(),
        searched,
    })
}

/// Result of the host → native pass over in-memory text
#[derive(Debug, Clone, PartialEq)]
pub struct NativeUpdate {
    pub text: String,
    pub added: Vec<MethodSignature>,
}

/// Host declarations that drive the host → native pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostScope {
    /// Declarations outside the generated block
    HandWritten,
    /// Whole file, generated block included
    WholeFile,
}

/// Host → native over in-memory text
pub fn update_native_text(
    class: &ClassName,
    host_text: &str,
    dialect: Dialect,
    native_text: &str,
    scope: HostScope,
) -> ReflectResult<NativeUpdate> {
    let parser = HostParser::new(dialect);
    let host = match scope {
        HostScope::HandWritten => parser.parse(&Markers::SLASH.strip(host_text)),
        HostScope::WholeFile => parser.parse(host_text),
    };
    let native = NativeParser::new(class).parse(native_text);
    tracing::debug!(host = host.len(), native = native.len(), "parsed signatures");

    let missing = reconcile::missing_on_native(&host, &native, dialect)?;
    let stubs: Vec<String> = missing
        .iter()
        .map(|sig| native_gen::render_stub(class, sig, dialect))
        .collect();

    let with_stubs = native_gen::append_stubs(native_text, &stubs);
    Ok(NativeUpdate {
        text: native_gen::rewrite_imports(&with_stubs),
        added: missing,
    })
}

/// Result of the native → host pass over in-memory text
#[derive(Debug, Clone, PartialEq)]
pub struct HostUpdate {
    pub text: String,
    pub declared: Vec<MethodSignature>,
}

/// Everything the host pass needs besides the two texts
#[derive(Debug, Clone, Copy)]
pub struct HostRender<'a> {
    pub class: &'a ClassName,
    pub dialect: Dialect,
    pub visibility: Visibility,
    pub lib_name: &'a str,
}

/// Native → host over in-memory text; `host_path` only names the file in errors
pub fn update_host_text(
    render: HostRender<'_>,
    host_text: &str,
    native_text: &str,
    host_path: &Path,
) -> ReflectResult<HostUpdate> {
    let stripped = Markers::SLASH.strip(host_text);
    let hand_written = HostParser::new(render.dialect).parse(&stripped);
    let native = NativeParser::new(render.class).parse(native_text);

    let declared = reconcile::missing_on_host(&native, &hand_written, render.dialect)?;
    let block = host_gen::render_block(&declared, render.dialect, render.visibility, render.lib_name);

    let anchor = render.class.declaration_name();
    let text = insert_after_class(&stripped, &block, anchor).ok_or_else(|| {
        ReflectError::ClassDeclarationNotFound {
            class: anchor.to_string(),
            file: host_path.to_path_buf(),
        }
    })?;

    Ok(HostUpdate { text, declared })
}

/// What a synchronization pass did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Declaration generation is disabled in configuration
    pub skipped: bool,
    /// Methods that received a native stub
    pub stubs_added: Vec<String>,
    /// Methods declared in the host generated block
    pub declarations: Vec<String>,
    pub native_file: Option<PathBuf>,
    pub host_file: Option<PathBuf>,
    pub native_written: bool,
    pub host_written: bool,
}

impl SyncReport {
    fn skipped() -> Self {
        Self {
            skipped: true,
            ..Default::default()
        }
    }

    /// Whether any file changed on disk
    pub fn changed(&self) -> bool {
        self.native_written || self.host_written
    }
}

/// Runs synchronization passes for one resolved configuration
pub struct Synchronizer<'a> {
    config: &'a BridgeConfig,
}

impl<'a> Synchronizer<'a> {
    pub fn new(config: &'a BridgeConfig) -> Self {
        Self { config }
    }

    pub fn host_class(&self) -> ReflectResult<&'a ClassName> {
        Ok(self.config.require_host_class()?)
    }

    pub fn host_file(&self) -> ReflectResult<HostFile> {
        locate_host_file(self.host_class()?, &self.config.source_dirs)
    }

    /// Native entry file; it must exist
    pub fn native_file(&self) -> ReflectResult<PathBuf> {
        let path = native_source_path(&self.config.native_root)?;
        if !path.is_file() {
            return Err(ReflectError::NativeSourceNotFound(path));
        }
        Ok(path)
    }

    /// Whether the host class file already carries a generated block
    pub fn host_has_block(&self) -> ReflectResult<bool> {
        let host = self.host_file()?;
        Ok(Markers::SLASH.contains(&read(&host.path)?))
    }

    /// Host → native pass over hand-written host declarations
    pub fn sync_native(&self) -> ReflectResult<SyncReport> {
        self.native_pass(HostScope::HandWritten)
    }

    /// Host → native pass that also stubs the host generated block, for a
    /// native project created after the host block already existed
    pub fn seed_native(&self) -> ReflectResult<SyncReport> {
        self.native_pass(HostScope::WholeFile)
    }

    fn native_pass(&self, scope: HostScope) -> ReflectResult<SyncReport> {
        if !self.config.export_functions {
            tracing::info!("declaration generation disabled, skipping native sync");
            return Ok(SyncReport::skipped());
        }

        let class = self.host_class()?;
        let host = self.host_file()?;
        let native_path = self.native_file()?;
        let host_text = read(&host.path)?;
        let native_text = read(&native_path)?;

        let update = update_native_text(class, &host_text, host.dialect, &native_text, scope)?;
        for sig in &update.added {
            tracing::info!(method = %sig.name, file = %native_path.display(), "added native stub");
        }
        let native_written = write_if_changed(&native_path, &native_text, &update.text)?;

        Ok(SyncReport {
            stubs_added: update.added.into_iter().map(|s| s.name).collect(),
            native_file: Some(native_path),
            native_written,
            ..Default::default()
        })
    }

    /// Native → host pass
    pub fn sync_host(&self) -> ReflectResult<SyncReport> {
        if !self.config.export_functions {
            tracing::info!("declaration generation disabled, skipping host sync");
            return Ok(SyncReport::skipped());
        }

        let class = self.host_class()?;
        let host = self.host_file()?;
        let native_path = self.native_file()?;
        let host_text = read(&host.path)?;
        let native_text = read(&native_path)?;

        let update = update_host_text(
            self.render(class, host.dialect),
            &host_text,
            &native_text,
            &host.path,
        )?;
        let host_written = write_if_changed(&host.path, &host_text, &update.text)?;
        if host_written {
            tracing::info!(
                declarations = update.declared.len(),
                file = %host.path.display(),
                "rewrote host declarations"
            );
        }

        Ok(SyncReport {
            declarations: update.declared.into_iter().map(|s| s.name).collect(),
            host_file: Some(host.path),
            host_written,
            ..Default::default()
        })
    }

    /// Both passes: host → native, then native → host.
    ///
    /// Both new texts are computed before anything is written, so a
    /// conflict in either direction leaves both files untouched.
    pub fn synchronize(&self) -> ReflectResult<SyncReport> {
        if !self.config.export_functions {
            tracing::info!("declaration generation disabled, skipping synchronization");
            return Ok(SyncReport::skipped());
        }

        let class = self.host_class()?;
        let host = self.host_file()?;
        let native_path = self.native_file()?;
        let host_text = read(&host.path)?;
        let native_text = read(&native_path)?;

        let native_update = update_native_text(
            class,
            &host_text,
            host.dialect,
            &native_text,
            HostScope::HandWritten,
        )?;
        let host_update = update_host_text(
            self.render(class, host.dialect),
            &host_text,
            &native_update.text,
            &host.path,
        )?;

        let native_written = write_if_changed(&native_path, &native_text, &native_update.text)?;
        let host_written = write_if_changed(&host.path, &host_text, &host_update.text)?;
        for sig in &native_update.added {
            tracing::info!(method = %sig.name, "added native stub");
        }

        Ok(SyncReport {
            skipped: false,
            stubs_added: native_update.added.into_iter().map(|s| s.name).collect(),
            declarations: host_update.declared.into_iter().map(|s| s.name).collect(),
            native_file: Some(native_path),
            host_file: Some(host.path),
            native_written,
            host_written,
        })
    }

    fn render(&self, class: &'a ClassName, dialect: Dialect) -> HostRender<'a> {
        HostRender {
            class,
            dialect,
            visibility: self.config.visibility,
            lib_name: &self.config.lib_name,
        }
    }
}

fn read(path: &Path) -> ReflectResult<String> {
    fs::read_to_string(path).map_err(|e| ReflectError::io(path, e))
}

fn write_if_changed(path: &Path, old: &str, new: &str) -> ReflectResult<bool> {
    if old == new {
        tracing::debug!(file = %path.display(), "unchanged");
        return Ok(false);
    }
    fs::write(path, new).map_err(|e| ReflectError::io(path, e))?;
    Ok(true)
}
