//! Formatting helpers for OCRA input fields.
//!
//! RFC 6287 expects the challenge, counter and timestamp in specific binary
//! layouts; these helpers convert the textual forms callers usually hold
//! (decimal counters, hex timestamps, numeric questions) into those layouts.

use std::time::SystemTime;

use crate::{
  error::{OtpError, OtpResult},
  otp::time_counter,
};

/// Converts a decimal string to an 8-byte big-endian value, for counters and
/// time-step values.
///
/// # Errors
///
/// [`OtpError::InvalidInputField`] when the string is not an unsigned decimal
/// number that fits in 64 bits.
pub fn decimal_to_be8(s: &str) -> OtpResult<[u8; 8]> {
  let value: u64 =
    s.parse().map_err(|_| OtpError::InvalidInputField(format!("invalid decimal value: {s:?}")))?;

  Ok(value.to_be_bytes())
}

/// Decodes a hex timestamp, left-padding with zeros to 8 bytes first.
///
/// # Errors
///
/// [`OtpError::InvalidInputField`] when the string is not valid hex or longer
/// than 16 hex digits.
pub fn hex_timestamp(ts: &str) -> OtpResult<Vec<u8>> {
  if ts.len() > 16 {
    return Err(OtpError::InvalidInputField(format!("timestamp too long: {ts:?}")));
  }
  let padded = format!("{ts:0>16}");

  hex::decode(&padded)
    .map_err(|e| OtpError::InvalidInputField(format!("failed to decode timestamp: {e}")))
}

/// Converts a decimal challenge question to its RFC 6287 section 5.1 binary
/// form: the number rendered as uppercase hex, right-padded with zeros to
/// 128 bytes.
///
/// # Errors
///
/// [`OtpError::InvalidInputField`] when the string is not an unsigned decimal
/// number (values up to 38 digits are accepted, well past the 10-digit `QN10`
/// maximum).
pub fn decimal_challenge(s: &str) -> OtpResult<Vec<u8>> {
  let value: u128 = s
    .parse()
    .map_err(|_| OtpError::InvalidInputField(format!("invalid decimal challenge: {s:?}")))?;

  let mut hx = format!("{value:X}");
  while hx.len() < 256 {
    hx.push('0');
  }

  hex::decode(&hx)
    .map_err(|e| OtpError::InvalidInputField(format!("failed to encode challenge: {e}")))
}

/// Returns the OCRA time-step counter for a timestamp suite: Unix seconds
/// divided by the suite's `time_step`. Feed the big-endian bytes of the
/// result into [`OcraInput::timestamp`](crate::ocra::OcraInput::timestamp).
pub fn time_step_counter(t: SystemTime, time_step: u64) -> u64 {
  time_counter(t, time_step)
}
