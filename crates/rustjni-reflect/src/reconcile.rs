//! Signature reconciliation
//!
//! Two signatures match when their [`SignatureKey`]s are equal. A matched
//! pair whose return tags differ is a hard conflict: picking either side
//! would break the calling convention.

use crate::error::{ReflectError, ReflectResult};
use crate::primitive::Dialect;
use crate::signature::{MethodSignature, SignatureKey};
use std::collections::HashSet;

/// Host signatures with no native counterpart (stubs to generate)
pub fn missing_on_native(
    host: &[MethodSignature],
    native: &[MethodSignature],
    dialect: Dialect,
) -> ReflectResult<Vec<MethodSignature>> {
    unmatched(host, native, |host_sig, native_sig| {
        conflict(host_sig, native_sig, dialect)
    })
}

/// Native signatures with no host counterpart (declarations to generate)
pub fn missing_on_host(
    native: &[MethodSignature],
    host: &[MethodSignature],
    dialect: Dialect,
) -> ReflectResult<Vec<MethodSignature>> {
    unmatched(native, host, |native_sig, host_sig| {
        conflict(host_sig, native_sig, dialect)
    })
}

/// Entries of `source` without a key match in `target`, first occurrence
/// of each key only, in source order
fn unmatched<F>(
    source: &[MethodSignature],
    target: &[MethodSignature],
    on_conflict: F,
) -> ReflectResult<Vec<MethodSignature>>
where
    F: Fn(&MethodSignature, &MethodSignature) -> ReflectError,
{
    let mut seen: HashSet<SignatureKey> = HashSet::new();
    let mut missing = Vec::new();

    for sig in source {
        let key = sig.key();
        if !seen.insert(key.clone()) {
            continue;
        }

        match target.iter().find(|other| other.key() == key) {
            Some(other) if other.return_type.tag() != sig.return_type.tag() => {
                return Err(on_conflict(sig, other));
            }
            Some(_) => {}
            None => missing.push(sig.clone()),
        }
    }

    Ok(missing)
}

fn conflict(host: &MethodSignature, native: &MethodSignature, dialect: Dialect) -> ReflectError {
    ReflectError::conflict(
        host.name.clone(),
        host.return_type.describe(dialect),
        native.return_type.describe(dialect),
    )
}
