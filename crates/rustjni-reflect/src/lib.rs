//! RustJNI signature reflection
//!
//! Reads method signatures out of a bridge-host class (Kotlin or Java) and
//! out of the native Rust entry file, reconciles the two sets and writes
//! back whatever either side is missing:
//!
//! - host declarations without a native export get a native stub
//! - native exports without a host declaration get an `external`/`native`
//!   declaration inside the host class generated block
//!
//! Generated code always lives between `//<RustJNI>` markers so it can be
//! rebuilt without touching hand-written code.
//!
//! # Example
//!
//! ```no_run
//! use rustjni_config::ConfigLoader;
//! use rustjni_reflect::Synchronizer;
//! use std::path::Path;
//!
//! let config = ConfigLoader::new().load_from_directory(Path::new(".")).unwrap();
//! let bridge = config.bridge().unwrap();
//! let report = Synchronizer::new(&bridge).synchronize().unwrap();
//! println!("{} stubs added", report.stubs_added.len());
//! ```

pub mod block;
pub mod error;
pub mod host_gen;
pub mod mangle;
pub mod native_gen;
pub mod parser;
pub mod primitive;
pub mod reconcile;
pub mod signature;
pub mod sync;

pub use block::{Markers, SourceLayout};
pub use error::{ReflectError, ReflectResult};
pub use mangle::{demangle, mangle, ExportSymbol};
pub use parser::{HostParser, NativeParser, SignatureParser};
pub use primitive::{Dialect, PrimitiveType, TypeResolution};
pub use signature::{MethodSignature, Parameter, SignatureKey};
pub use sync::{
    locate_host_file, native_source_path, update_host_text, update_native_text, HostFile,
    HostRender, HostScope, SyncReport, Synchronizer,
};
