//! OATH Challenge-Response Algorithm (RFC 6287).
//!
//! OCRA is a HOTP-family derivation over a richer, suite-configurable
//! message: the raw suite descriptor, a NUL separator, then the included
//! input fields in a fixed order. Validation is single-shot per exchange
//! (the challenge/response context is caller-synchronized), so there is no
//! windowing here.

mod input;
mod suite;

pub use input::{MAX_CHALLENGE_LEN, MAX_SESSION_LEN, OcraInput};
pub use suite::{
  ChallengeFormat, PasswordHashAlgorithm, Suite, SuiteConfig, is_known_suite, list_suites,
};

use crate::{
  engine,
  error::{OtpError, OtpResult},
  secret::decode_secret,
  truncate::{format_decimal, pad_bytes, truncate},
  validate::codes_match,
};

const SEPARATOR: u8 = 0x00;

/// RFC 6287 section 5.1 message construction and derivation.
pub(crate) fn derive_rfc6287(secret: &[u8], suite: &Suite, input: &OcraInput) -> OtpResult<String> {
  let config = suite.config();
  input.validate(config)?;

  let mut message = Vec::with_capacity(config.raw.len() + 1 + 8 + 128 + 64 + 128 + 8);
  message.extend_from_slice(config.raw.as_bytes());
  message.push(SEPARATOR);

  if config.include_counter {
    message.extend_from_slice(&pad_bytes(&input.counter, 8));
  }
  if config.include_challenge {
    message.extend_from_slice(&pad_bytes(&input.challenge, MAX_CHALLENGE_LEN));
  }
  if config.include_password {
    // Exact length (20/32/64), verified above.
    message.extend_from_slice(&input.password);
  }
  if config.include_session {
    message.extend_from_slice(&pad_bytes(&input.session_info, MAX_SESSION_LEN));
  }
  if config.include_timestamp {
    message.extend_from_slice(&pad_bytes(&input.timestamp, 8));
  }

  let digest = engine::hmac_digest(config.hash, secret, &message);
  let digits = config.digits as usize;

  Ok(format_decimal(truncate(&digest, digits), digits))
}

/// Generates an OCRA code for the given base32 secret, suite and input.
///
/// # Errors
///
/// - [`OtpError::InvalidSecret`] when the secret is not valid base32.
/// - [`OtpError::InvalidInputField`] when the input does not satisfy the
///   suite's field rules.
///
/// # Example
///
/// ```rust
/// use oath_otp::{
///   generate_ocra,
///   ocra::{OcraInput, Suite},
///   utils::decimal_challenge,
/// };
///
/// let suite = Suite::new("OCRA-1:HOTP-SHA1-6:QN08")?;
/// let input = OcraInput { challenge: decimal_challenge("00000000")?, ..OcraInput::default() };
/// // RFC 6287 Appendix C.1, 20-byte ASCII key "12345678901234567890".
/// let code = generate_ocra("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ", &suite, &input)?;
/// assert_eq!(code, "237653");
/// # Ok::<(), oath_otp::error::OtpError>(())
/// ```
pub fn generate_ocra(secret: &str, suite: &Suite, input: &OcraInput) -> OtpResult<String> {
  let secret = decode_secret(secret)?;

  derive_rfc6287(&secret, suite, input)
}

/// Checks whether `code` is valid for the given suite, secret and input,
/// comparing in constant time. Returns `Ok(true)` on a match.
///
/// # Errors
///
/// - [`OtpError::InvalidCodeLength`] when `code` is not `suite.digits` long;
///   rejected before any derivation work.
/// - [`OtpError::InvalidSecret`] / [`OtpError::InvalidInputField`] as for
///   [`generate_ocra`].
/// - [`OtpError::InvalidCode`] when the derivation does not match.
pub fn validate_ocra(secret: &str, code: &str, suite: &Suite, input: &OcraInput) -> OtpResult<bool> {
  if code.len() != suite.config().digits as usize {
    return Err(OtpError::InvalidCodeLength);
  }

  let secret = decode_secret(secret)?;
  let expected = derive_rfc6287(&secret, suite, input)?;

  if codes_match(&expected, code) { Ok(true) } else { Err(OtpError::InvalidCode) }
}

#[cfg(test)]
mod tests {
  use super::*;

  const SECRET: &str = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ";

  fn qn08_input() -> OcraInput {
    OcraInput { challenge: crate::utils::decimal_challenge("00000000").unwrap(), ..OcraInput::default() }
  }

  #[test]
  fn generate_and_validate_round_trip() {
    let suite = Suite::must("OCRA-1:HOTP-SHA1-6:QN08");
    let input = qn08_input();

    let code = generate_ocra(SECRET, &suite, &input).unwrap();
    assert_eq!(code.len(), 6);
    assert!(validate_ocra(SECRET, &code, &suite, &input).unwrap());
  }

  #[test]
  fn validate_checks_length_before_hashing() {
    let suite = Suite::must("OCRA-1:HOTP-SHA1-6:QN08");
    let result = validate_ocra(SECRET, "12345", &suite, &qn08_input());
    assert!(matches!(result, Err(OtpError::InvalidCodeLength)));
  }

  #[test]
  fn rejects_invalid_secret() {
    let suite = Suite::must("OCRA-1:HOTP-SHA1-6:QN08");
    assert!(matches!(
      generate_ocra("!!INVALID_BASE32!!", &suite, &qn08_input()),
      Err(OtpError::InvalidSecret(_))
    ));
    assert!(matches!(
      validate_ocra("!!INVALID_BASE32!!", "000000", &suite, &qn08_input()),
      Err(OtpError::InvalidSecret(_))
    ));
  }

  #[test]
  fn mismatched_code_is_invalid() {
    let suite = Suite::must("OCRA-1:HOTP-SHA1-6:QN08");
    let input = qn08_input();
    let mut code = generate_ocra(SECRET, &suite, &input).unwrap();
    // Flip the last digit.
    let last = code.pop().unwrap();
    code.push(if last == '0' { '1' } else { '0' });
    assert!(matches!(validate_ocra(SECRET, &code, &suite, &input), Err(OtpError::InvalidCode)));
  }

  #[test]
  fn counter_changes_the_code() {
    let with_counter = Suite::must("OCRA-1:HOTP-SHA1-6:C-QN08");
    let challenge = crate::utils::decimal_challenge("11111111").unwrap();

    let a = generate_ocra(
      SECRET,
      &with_counter,
      &OcraInput {
        counter: 1u64.to_be_bytes().to_vec(),
        challenge: challenge.clone(),
        ..OcraInput::default()
      },
    )
    .unwrap();
    let b = generate_ocra(
      SECRET,
      &with_counter,
      &OcraInput {
        counter: 2u64.to_be_bytes().to_vec(),
        challenge,
        ..OcraInput::default()
      },
    )
    .unwrap();
    assert_ne!(a, b);
  }
}
