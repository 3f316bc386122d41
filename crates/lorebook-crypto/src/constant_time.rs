//! Constant-time MAC comparison.

use subtle::ConstantTimeEq;

/// Compare two MAC strings without an early exit at the first mismatch.
///
/// A length mismatch returns false immediately; the MAC length is fixed
/// by the algorithm and is not secret. Equal-length inputs are compared
/// across their full length unconditionally.
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
