//! Caller-supplied OCRA input fields and their per-suite validation.

use serde::{Deserialize, Serialize};

use crate::{
  error::{OtpError, OtpResult},
  ocra::suite::{PasswordHashAlgorithm, SuiteConfig},
};

/// Maximum challenge and session-info length in bytes (RFC 6287).
pub const MAX_CHALLENGE_LEN: usize = 128;
pub const MAX_SESSION_LEN: usize = 128;

/// Raw data concatenated (in the order defined by RFC 6287) into the HMAC
/// message. Which fields are required depends on the active [`SuiteConfig`];
/// empty fields are treated as absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcraInput {
  /// 8-byte big-endian counter, used when the suite includes `C`. Typically
  /// incremented for each new OCRA calculation.
  pub counter: Vec<u8>,

  /// Raw challenge data. When the suite includes `Q`, a format-dependent
  /// minimum length (8 or 10 bytes) and a maximum of 128 bytes apply. Use
  /// [`decimal_challenge`](crate::utils::decimal_challenge) to format numeric
  /// questions the RFC 6287 way.
  pub challenge: Vec<u8>,

  /// Hashed PIN or passphrase. When the suite includes `PSHA1`/`PSHA256`/
  /// `PSHA512`, the length must match that digest (20/32/64 bytes).
  pub password: Vec<u8>,

  /// Session or channel-binding data, up to 128 bytes, used when the suite
  /// includes `S`.
  pub session_info: Vec<u8>,

  /// 8-byte big-endian time-step counter, used when the suite includes `T`.
  pub timestamp: Vec<u8>,
}

impl OcraInput {
  /// Checks the input against the suite's field-size rules. Invalid
  /// combinations are rejected, never silently coerced.
  ///
  /// # Errors
  ///
  /// [`OtpError::InvalidInputField`] naming the missing or mis-sized field.
  pub fn validate(&self, config: &SuiteConfig) -> OtpResult<()> {
    if config.include_counter && self.counter.len() != 8 {
      return Err(OtpError::InvalidInputField(format!(
        "expected 8-byte counter, got {}",
        self.counter.len()
      )));
    }

    if config.include_challenge {
      let minimum = config.challenge.min_len();
      if self.challenge.len() < minimum {
        return Err(OtpError::InvalidInputField(format!(
          "challenge too short: expected at least {minimum} bytes, got {}",
          self.challenge.len()
        )));
      }
      if self.challenge.len() > MAX_CHALLENGE_LEN {
        return Err(OtpError::InvalidInputField(format!(
          "challenge too long: must not exceed {MAX_CHALLENGE_LEN} bytes, got {}",
          self.challenge.len()
        )));
      }
    }

    if config.include_password {
      if self.password.is_empty() {
        return Err(OtpError::InvalidInputField("password required but not provided".into()));
      }
      let expected = config.password_hash.digest_len();
      if config.password_hash != PasswordHashAlgorithm::None && self.password.len() != expected {
        return Err(OtpError::InvalidInputField(format!(
          "password must be {expected} bytes for the suite's hash, got {}",
          self.password.len()
        )));
      }
    }

    if config.include_session && self.session_info.len() > MAX_SESSION_LEN {
      return Err(OtpError::InvalidInputField(format!(
        "session info too long: max {MAX_SESSION_LEN} bytes, got {}",
        self.session_info.len()
      )));
    }

    if config.include_timestamp && self.timestamp.len() != 8 {
      return Err(OtpError::InvalidInputField(format!(
        "expected 8-byte timestamp, got {}",
        self.timestamp.len()
      )));
    }

    Ok(())
  }

  /// Builds an input from hex-encoded fields; empty strings stay absent.
  ///
  /// # Errors
  ///
  /// [`OtpError::InvalidInputField`] naming the field that failed to decode.
  pub fn from_hex(
    counter: &str,
    challenge: &str,
    password: &str,
    session_info: &str,
    timestamp: &str,
  ) -> OtpResult<OcraInput> {
    fn decode(field: &str, value: &str) -> OtpResult<Vec<u8>> {
      if value.is_empty() {
        return Ok(Vec::new());
      }
      hex::decode(value)
        .map_err(|e| OtpError::InvalidInputField(format!("failed to decode {field}: {e}")))
    }

    Ok(OcraInput {
      counter: decode("counter", counter)?,
      challenge: decode("challenge", challenge)?,
      password: decode("password", password)?,
      session_info: decode("session info", session_info)?,
      timestamp: decode("timestamp", timestamp)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ocra::suite::{ChallengeFormat, Suite};

  fn config(raw: &str) -> SuiteConfig {
    Suite::new(raw).unwrap().config().clone()
  }

  #[test]
  fn challenge_only_suite() {
    let cfg = config("OCRA-1:HOTP-SHA1-6:QN08");
    let ok = OcraInput { challenge: b"12345678".to_vec(), ..OcraInput::default() };
    assert!(ok.validate(&cfg).is_ok());

    let short = OcraInput { challenge: b"short".to_vec(), ..OcraInput::default() };
    assert!(matches!(short.validate(&cfg), Err(OtpError::InvalidInputField(_))));

    let long = OcraInput { challenge: vec![b'1'; 129], ..OcraInput::default() };
    assert!(matches!(long.validate(&cfg), Err(OtpError::InvalidInputField(_))));
  }

  #[test]
  fn ten_byte_minimum_for_10_formats() {
    let cfg = SuiteConfig {
      include_challenge: true,
      challenge: ChallengeFormat::Numeric10,
      digits: 6,
      ..SuiteConfig::default()
    };
    let nine = OcraInput { challenge: vec![b'1'; 9], ..OcraInput::default() };
    assert!(nine.validate(&cfg).is_err());
    let ten = OcraInput { challenge: vec![b'1'; 10], ..OcraInput::default() };
    assert!(ten.validate(&cfg).is_ok());
  }

  #[test]
  fn counter_must_be_exactly_8_bytes() {
    let cfg = config("OCRA-1:HOTP-SHA1-6:C-QN08");
    let input = OcraInput {
      counter: vec![0u8; 7],
      challenge: b"12345678".to_vec(),
      ..OcraInput::default()
    };
    assert!(matches!(input.validate(&cfg), Err(OtpError::InvalidInputField(_))));
  }

  #[test]
  fn password_length_follows_suite_hash() {
    let cfg = config("OCRA-1:HOTP-SHA1-6:QN08-PSHA1");

    let missing = OcraInput { challenge: b"12345678".to_vec(), ..OcraInput::default() };
    assert!(matches!(missing.validate(&cfg), Err(OtpError::InvalidInputField(_))));

    let wrong = OcraInput {
      challenge: b"12345678".to_vec(),
      password: vec![0u8; 32],
      ..OcraInput::default()
    };
    assert!(wrong.validate(&cfg).is_err());

    let right = OcraInput {
      challenge: b"12345678".to_vec(),
      password: vec![0u8; 20],
      ..OcraInput::default()
    };
    assert!(right.validate(&cfg).is_ok());
  }

  #[test]
  fn session_info_capped_at_128_bytes() {
    let cfg = SuiteConfig { include_session: true, digits: 6, ..SuiteConfig::default() };
    let long = OcraInput { session_info: vec![0u8; 129], ..OcraInput::default() };
    assert!(long.validate(&cfg).is_err());
    let ok = OcraInput { session_info: vec![0u8; 128], ..OcraInput::default() };
    assert!(ok.validate(&cfg).is_ok());
  }

  #[test]
  fn from_hex_decodes_present_fields() {
    let input = OcraInput::from_hex("0000000000000001", "a1b2", "", "", "").unwrap();
    assert_eq!(input.counter, vec![0, 0, 0, 0, 0, 0, 0, 1]);
    assert_eq!(input.challenge, vec![0xa1, 0xb2]);
    assert!(input.password.is_empty());
  }

  #[test]
  fn from_hex_names_the_bad_field() {
    let err = OcraInput::from_hex("zz", "", "", "", "").unwrap_err();
    assert!(err.to_string().contains("counter"));
  }
}
