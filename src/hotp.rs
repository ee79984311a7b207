//! Counter-based one-time passwords (RFC 4226).

use url::Url;

use crate::{
  engine,
  error::{OtpError, OtpResult},
  otp::{Algorithm, MAX_SKEW, OtpKind, Param, UrlParam},
  otpauth,
  secret::decode_secret,
  truncate::{format_decimal, truncate},
  validate::codes_match,
};

/// Core RFC 4226 derivation: HMAC over the 8-byte big-endian counter,
/// dynamic truncation, zero-padded decimal rendering. TOTP and the HOTP
/// entry points all funnel through here.
pub(crate) fn derive_rfc4226(
  secret: &[u8],
  counter: u64,
  digits: usize,
  algorithm: Algorithm,
) -> String {
  let digest = engine::hmac_digest(algorithm, secret, &counter.to_be_bytes());
  format_decimal(truncate(&digest, digits), digits)
}

/// Windowed HOTP/TOTP validation over counter positions `[-skew, +skew]`.
/// Candidate counters that would underflow are skipped rather than wrapped.
pub(crate) fn validate_window(
  secret: &[u8],
  code: &str,
  counter: u64,
  skew: u32,
  digits: usize,
  algorithm: Algorithm,
) -> OtpResult<bool> {
  for i in -i64::from(skew)..=i64::from(skew) {
    let Some(candidate) = counter.checked_add_signed(i) else { continue };
    let expected = derive_rfc4226(secret, candidate, digits, algorithm);
    if codes_match(&expected, code) {
      return Ok(true);
    }
  }

  Err(OtpError::InvalidCode)
}

/// Generates an HOTP code from a base32 secret and counter.
///
/// # Errors
///
/// [`OtpError::InvalidSecret`] when the secret is not valid base32.
///
/// # Example
///
/// ```rust
/// use oath_otp::{generate_hotp, otp::Param};
///
/// // RFC 4226 Appendix D, counter 0.
/// let code = generate_hotp("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ", 0, Param::HOTP_DEFAULT)?;
/// assert_eq!(code, "755224");
/// # Ok::<(), oath_otp::error::OtpError>(())
/// ```
pub fn generate_hotp(secret: &str, counter: u64, param: Param) -> OtpResult<String> {
  let secret = decode_secret(secret)?;

  Ok(derive_rfc4226(&secret, counter, param.digits.count(), param.algorithm))
}

/// Checks whether `code` is valid for the given secret and counter, searching
/// `param.skew` adjacent counter positions and comparing in constant time.
///
/// Returns `Ok(true)` on a match.
///
/// # Errors
///
/// - [`OtpError::InvalidSkew`] when `param.skew` exceeds 10.
/// - [`OtpError::InvalidCodeLength`] when `code` is not `param.digits` long;
///   rejected before any derivation work.
/// - [`OtpError::InvalidCode`] when no window position matches.
pub fn validate_hotp(secret: &str, code: &str, counter: u64, param: Param) -> OtpResult<bool> {
  if param.skew > MAX_SKEW {
    return Err(OtpError::InvalidSkew);
  }
  if code.len() != param.digits.count() {
    return Err(OtpError::InvalidCodeLength);
  }

  let secret = decode_secret(secret)?;

  validate_window(&secret, code, counter, param.skew, param.digits.count(), param.algorithm)
}

/// Constructs an `otpauth://` URL for configuring HOTP-based authenticators.
///
/// Example output:
/// `otpauth://hotp/Example:alice@domain.com?secret=BASE32SECRET&issuer=Example&algorithm=SHA1&digits=6&counter=0`
///
/// # Errors
///
/// [`OtpError::IssuerRequired`], [`OtpError::AccountNameRequired`] or
/// [`OtpError::SecretRequired`] when the corresponding field is empty.
pub fn generate_hotp_url(param: &UrlParam) -> OtpResult<Url> {
  // The initial counter is assumed to be 0.
  otpauth::build_otp_url(OtpKind::Hotp, param, &[("counter", "0".into())])
}
