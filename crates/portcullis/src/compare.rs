//! Constant-time credential comparison.

use subtle::ConstantTimeEq;

/// Compares two byte strings in constant time with respect to their content.
///
/// Both operands are zero-padded to the longer length before the comparison,
/// and the length check itself is folded in via constant-time integer
/// equality. Execution time depends only on the pair of lengths involved,
/// never on where the inputs first differ — a mismatch in length is the only
/// thing an observer can learn.
pub fn timing_safe_eq(actual: &[u8], expected: &[u8]) -> bool {
    let len = actual.len().max(expected.len());
    let mut a = vec![0u8; len];
    a[..actual.len()].copy_from_slice(actual);
    let mut b = vec![0u8; len];
    b[..expected.len()].copy_from_slice(expected);
    (a.ct_eq(&b) & actual.len().ct_eq(&expected.len())).into()
}
