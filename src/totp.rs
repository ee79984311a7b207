//! Time-based one-time passwords (RFC 6238).

use std::time::SystemTime;

use url::Url;

use crate::{
  error::{OtpError, OtpResult},
  hotp::{derive_rfc4226, validate_window},
  otp::{MAX_SKEW, OtpKind, Param, UrlParam, time_counter},
  otpauth,
  secret::decode_secret,
};

/// Generates a TOTP code for the given base32 secret and timestamp. The
/// counter is the Unix time divided by `param.period` (0 falls back to 30
/// seconds). The caller supplies the time, which keeps the clock injectable.
///
/// # Errors
///
/// [`OtpError::InvalidSecret`] when the secret is not valid base32.
///
/// # Example
///
/// ```rust
/// use std::time::{Duration, SystemTime};
///
/// use oath_otp::{generate_totp, otp::Param};
///
/// let t = SystemTime::UNIX_EPOCH + Duration::from_secs(59);
/// let code = generate_totp("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ", t, Param::TOTP_DEFAULT)?;
/// assert_eq!(code.len(), 6);
/// # Ok::<(), oath_otp::error::OtpError>(())
/// ```
pub fn generate_totp(secret: &str, t: SystemTime, param: Param) -> OtpResult<String> {
  let secret = decode_secret(secret)?;
  let counter = time_counter(t, param.period);

  Ok(derive_rfc4226(&secret, counter, param.digits.count(), param.algorithm))
}

/// Checks whether `code` is valid for the given secret at time `t`, searching
/// `param.skew` adjacent time steps and comparing in constant time.
///
/// Returns `Ok(true)` on a match.
///
/// # Errors
///
/// - [`OtpError::InvalidSkew`] when `param.skew` exceeds 10.
/// - [`OtpError::InvalidCodeLength`] when `code` is not `param.digits` long;
///   rejected before any derivation work.
/// - [`OtpError::InvalidCode`] when no window position matches.
pub fn validate_totp(secret: &str, code: &str, t: SystemTime, param: Param) -> OtpResult<bool> {
  if param.skew > MAX_SKEW {
    return Err(OtpError::InvalidSkew);
  }
  if code.len() != param.digits.count() {
    return Err(OtpError::InvalidCodeLength);
  }

  let secret = decode_secret(secret)?;
  let counter = time_counter(t, param.period);

  validate_window(&secret, code, counter, param.skew, param.digits.count(), param.algorithm)
}

/// Constructs an `otpauth://` URL for configuring TOTP-based authenticators
/// (e.g. Google Authenticator).
///
/// Example output:
/// `otpauth://totp/Example:alice@domain.com?secret=BASE32SECRET&issuer=Example&algorithm=SHA1&digits=6&period=30`
///
/// # Errors
///
/// [`OtpError::IssuerRequired`], [`OtpError::AccountNameRequired`] or
/// [`OtpError::SecretRequired`] when the corresponding field is empty.
pub fn generate_totp_url(param: &UrlParam) -> OtpResult<Url> {
  let period = if param.period == 0 { 30 } else { param.period };

  otpauth::build_otp_url(OtpKind::Totp, param, &[("period", period.to_string())])
}
