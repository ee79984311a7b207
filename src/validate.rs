//! Constant-time code comparison shared by every validation path.

use subtle::ConstantTimeEq;

/// Compares a derived code against a submitted one without leaking the
/// position of the first mismatching character. Callers check lengths up
/// front, so both sides are always the same size here.
pub(crate) fn codes_match(expected: &str, candidate: &str) -> bool {
  expected.as_bytes().ct_eq(candidate.as_bytes()).into()
}
