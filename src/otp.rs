//! Shared parameter types for HOTP, TOTP and OCRA derivation.

use std::{
  fmt,
  str::FromStr,
  time::{SystemTime, UNIX_EPOCH},
};

use serde::{Deserialize, Serialize};

use crate::error::{OtpError, OtpResult};

/// Hashing algorithm used in the HMAC function. Supported values are SHA1,
/// SHA256 and SHA512, per RFC 6238.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
  /// The default algorithm in TOTP/HOTP (RFC 4226, RFC 6238).
  #[default]
  #[serde(rename = "SHA1")]
  Sha1,
  #[serde(rename = "SHA256")]
  Sha256,
  #[serde(rename = "SHA512")]
  Sha512,
}

impl Algorithm {
  /// Canonical shared-secret length in bytes for this algorithm, used by
  /// [`random_secret`](crate::secret::random_secret).
  pub const fn secret_len(self) -> usize {
    match self {
      Algorithm::Sha1 => 20,
      Algorithm::Sha256 => 32,
      Algorithm::Sha512 => 64,
    }
  }
}

impl fmt::Display for Algorithm {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Algorithm::Sha1 => "SHA1",
      Algorithm::Sha256 => "SHA256",
      Algorithm::Sha512 => "SHA512",
    })
  }
}

impl FromStr for Algorithm {
  type Err = OtpError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if s.eq_ignore_ascii_case("SHA1") {
      Ok(Algorithm::Sha1)
    } else if s.eq_ignore_ascii_case("SHA256") {
      Ok(Algorithm::Sha256)
    } else if s.eq_ignore_ascii_case("SHA512") {
      Ok(Algorithm::Sha512)
    } else {
      Err(OtpError::UnsupportedAlgorithm)
    }
  }
}

/// Number of decimal digits in a generated code.
///
/// RFC 6287 permits 4 through 10 digits; the common HOTP/TOTP lengths are
/// available as named constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digits(u8);

impl Digits {
  pub const SIX: Digits = Digits(6);
  pub const EIGHT: Digits = Digits(8);
  pub const NINE: Digits = Digits(9);
  pub const TEN: Digits = Digits(10);

  /// Fails with [`OtpError::InvalidDigits`] outside the 4..=10 range.
  pub fn new(count: u8) -> OtpResult<Digits> {
    if (4..=10).contains(&count) {
      Ok(Digits(count))
    } else {
      Err(OtpError::InvalidDigits(count.to_string()))
    }
  }

  pub const fn count(self) -> usize {
    self.0 as usize
  }
}

impl Default for Digits {
  fn default() -> Self {
    Digits::SIX
  }
}

impl fmt::Display for Digits {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl TryFrom<u8> for Digits {
  type Error = OtpError;

  fn try_from(count: u8) -> Result<Self, Self::Error> {
    Digits::new(count)
  }
}

impl From<Digits> for u8 {
  fn from(digits: Digits) -> u8 {
    digits.0
  }
}

impl FromStr for Digits {
  type Err = OtpError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let count: u8 = s.parse().map_err(|_| OtpError::InvalidDigits(s.to_string()))?;
    Digits::new(count)
  }
}

/// Maximum accepted validation window half-width, in counter/time steps.
pub const MAX_SKEW: u32 = 10;

/// Configuration parameters for generating and validating OTPs.
///
/// Construct fresh per call site, starting from [`Param::HOTP_DEFAULT`] or
/// [`Param::TOTP_DEFAULT`]; the library never mutates a `Param`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
  /// Length of the generated OTP code (commonly 6 or 8).
  pub digits: Digits,

  /// Time step in seconds for TOTP (e.g. 30 means the code changes every
  /// 30s). Not used in HOTP.
  pub period: u64,

  /// Allowed number of counter/time steps (forward and backward) during
  /// validation, to account for counter drift or clock skew. Validation
  /// rejects values above [`MAX_SKEW`].
  pub skew: u32,

  /// HMAC hashing algorithm (SHA1, SHA256, SHA512).
  pub algorithm: Algorithm,
}

impl Param {
  /// SHA1, 6 digits. Period and skew are unused for counter-based codes.
  pub const HOTP_DEFAULT: Param =
    Param { digits: Digits::SIX, period: 0, skew: 0, algorithm: Algorithm::Sha1 };
  /// SHA1, 6 digits, 30-second period, zero skew.
  pub const TOTP_DEFAULT: Param =
    Param { digits: Digits::SIX, period: 30, skew: 0, algorithm: Algorithm::Sha1 };
}

impl Default for Param {
  fn default() -> Self {
    Param::TOTP_DEFAULT
  }
}

/// The OTP family tag carried as the host of an `otpauth://` URL.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OtpKind {
  Totp,
  Hotp,
}

impl fmt::Display for OtpKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      OtpKind::Totp => "totp",
      OtpKind::Hotp => "hotp",
    })
  }
}

impl FromStr for OtpKind {
  type Err = OtpError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "totp" => Ok(OtpKind::Totp),
      "hotp" => Ok(OtpKind::Hotp),
      other => Err(OtpError::InvalidUrl(format!("unsupported otp type: {other}"))),
    }
  }
}

/// Parameters for building or parsing a provisioning URL.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlParam {
  /// Name of the issuing organization/company.
  pub issuer: String,
  /// Name of the user's account (e.g. an email address).
  pub account_name: String,
  /// Number of seconds a TOTP code is valid for. Defaults to 30 seconds.
  pub period: u64,
  /// Base32-encoded secret to store.
  pub secret: String,
  /// Digits to request. Defaults to 6.
  pub digits: Digits,
  /// Algorithm to use for HMAC. Defaults to SHA1.
  pub algorithm: Algorithm,
}

/// Returns the TOTP counter value for the given time and period: integer
/// division of the Unix timestamp by the period. A zero period falls back to
/// the 30-second default; times before the epoch count as zero.
pub fn time_counter(t: SystemTime, period: u64) -> u64 {
  let period = if period == 0 { 30 } else { period };
  let secs = t.duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0);
  secs / period
}
