//! Signature parsers
//!
//! Both sides are parsed with signature-shaped regular expressions rather
//! than a real grammar. Callers only see [`SignatureParser`], so either
//! backend can be replaced without touching the synchronization pass.

mod host;
mod native;

pub use host::HostParser;
pub use native::NativeParser;

use crate::signature::MethodSignature;

/// Extracts bridge method signatures from source text
pub trait SignatureParser {
    /// Parse every recognised declaration, in source order.
    ///
    /// Malformed declarations and parameters are skipped, never reported.
    fn parse(&self, source: &str) -> Vec<MethodSignature>;
}
