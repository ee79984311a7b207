//! One-time password derivation and validation for the OATH family:
//! HOTP (RFC 4226), TOTP (RFC 6238) and OCRA (RFC 6287).
//!
//! All three algorithms share one primitive: an HMAC digest dynamically
//! truncated (RFC 4226 section 5.3) into a fixed-width, zero-padded decimal
//! code. HOTP hashes an 8-byte counter, TOTP derives that counter from the
//! clock, and OCRA hashes a suite-configurable message described by a
//! descriptor string such as `OCRA-1:HOTP-SHA1-6:QN08`.
//!
//! Counters, secrets and clocks are caller-owned state, passed in per call;
//! the library keeps no mutable state and is safe to use concurrently.
//!
//! ```rust
//! use oath_otp::{generate_hotp, otp::Param, validate_hotp};
//!
//! let secret = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ";
//! let code = generate_hotp(secret, 0, Param::HOTP_DEFAULT)?;
//! assert!(validate_hotp(secret, &code, 0, Param::HOTP_DEFAULT)?);
//! # Ok::<(), oath_otp::error::OtpError>(())
//! ```

pub mod error;
pub mod ocra;
pub mod otp;
pub mod secret;
pub mod utils;

mod engine;
mod hotp;
mod otpauth;
mod rng;
mod totp;
mod truncate;
mod validate;

pub use crate::{
  hotp::{generate_hotp, generate_hotp_url, validate_hotp},
  ocra::{generate_ocra, validate_ocra},
  otpauth::parse_otpauth_url,
  secret::{decode_secret, random_secret},
  totp::{generate_totp, generate_totp_url, validate_totp},
};
