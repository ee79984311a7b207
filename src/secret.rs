//! Shared-secret codec: base32 text to raw key bytes, and secure generation.

use data_encoding::{BASE32, BASE32_NOPAD};

use crate::{error::OtpResult, otp::Algorithm, rng};

/// Decodes a base32 shared secret into raw key bytes.
///
/// Whitespace is ignored, lower-case input is accepted, and missing `=`
/// padding is supplied before decoding, so secrets copied out of provisioning
/// UIs decode as-is.
///
/// # Errors
///
/// [`OtpError::InvalidSecret`](crate::error::OtpError::InvalidSecret) when the
/// normalized text is not valid base32.
pub fn decode_secret(secret: &str) -> OtpResult<Vec<u8>> {
  let mut cleaned: String =
    secret.chars().filter(|c| !c.is_whitespace()).map(|c| c.to_ascii_uppercase()).collect();

  let rem = cleaned.len() % 8;
  if rem != 0 {
    cleaned.extend(std::iter::repeat_n('=', 8 - rem));
  }

  Ok(BASE32.decode(cleaned.as_bytes())?)
}

/// Generates a base32-encoded (unpadded) random secret of the canonical key
/// length for the given algorithm: 20 bytes for SHA1, 32 for SHA256, 64 for
/// SHA512.
///
/// # Errors
///
/// [`OtpError::RandomSource`](crate::error::OtpError::RandomSource) when the
/// OS entropy source fails.
pub fn random_secret(algorithm: Algorithm) -> OtpResult<String> {
  let mut secret = vec![0u8; algorithm.secret_len()];
  rng::try_fill_bytes(&mut secret)?;

  Ok(BASE32_NOPAD.encode(&secret))
}
