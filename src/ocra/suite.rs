//! OCRA suite descriptors: the `OCRA-1:HOTP-<HASH>-<DIGITS>:<TOKENS>` grammar,
//! the parsed [`SuiteConfig`] model, and a registry of well-known suites.

use std::{collections::HashMap, fmt, str::FromStr, sync::LazyLock};

use serde::{Deserialize, Serialize};

use crate::{
  error::{OtpError, OtpResult},
  otp::Algorithm,
};

/// Challenge format tag of a suite (`QN08`, `QA10`, ...), tying the question
/// kind to its minimum length.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChallengeFormat {
  #[default]
  None,
  /// `QN08`: 8-digit numeric challenge.
  Numeric08,
  /// `QN10`: 10-digit numeric challenge.
  Numeric10,
  /// `QA08`: 8-character alphanumeric challenge.
  Alpha08,
  /// `QA10`: 10-character alphanumeric challenge.
  Alpha10,
  /// `QH08`: 8-hex-digit challenge.
  Hex08,
  /// `QH10`: 10-hex-digit challenge.
  Hex10,
}

impl ChallengeFormat {
  /// Minimum expected challenge length in bytes.
  pub const fn min_len(self) -> usize {
    match self {
      ChallengeFormat::None => 0,
      ChallengeFormat::Numeric08 | ChallengeFormat::Alpha08 | ChallengeFormat::Hex08 => 8,
      ChallengeFormat::Numeric10 | ChallengeFormat::Alpha10 | ChallengeFormat::Hex10 => 10,
    }
  }
}

/// PIN/password hash tag of a suite (`PSHA1`, ...), tying the hash family to
/// its digest length.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PasswordHashAlgorithm {
  #[default]
  None,
  Sha1,
  Sha256,
  Sha512,
}

impl PasswordHashAlgorithm {
  /// Expected password digest length in bytes.
  pub const fn digest_len(self) -> usize {
    match self {
      PasswordHashAlgorithm::None => 0,
      PasswordHashAlgorithm::Sha1 => 20,
      PasswordHashAlgorithm::Sha256 => 32,
      PasswordHashAlgorithm::Sha512 => 64,
    }
  }
}

/// Parsed OCRA suite configuration: which input fields participate in the
/// message and with what formats.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteConfig {
  /// Original suite string; also the leading bytes of every derived message.
  pub raw: String,

  /// HMAC hash family.
  pub hash: Algorithm,
  /// OTP digits, 4 through 10.
  pub digits: u8,

  /// Challenge format (`QN08`, `QA10`, ...).
  pub challenge: ChallengeFormat,

  /// `C`: an 8-byte counter participates in the message.
  pub include_counter: bool,
  /// `Q...`: a challenge participates in the message.
  pub include_challenge: bool,
  /// `PSHA...`: a hashed PIN/password participates in the message.
  pub include_password: bool,
  /// `S`: session information participates in the message.
  pub include_session: bool,
  /// `T...`: a time-step counter participates in the message.
  pub include_timestamp: bool,

  /// Hash family of the password digest when `include_password` is set.
  pub password_hash: PasswordHashAlgorithm,
  /// Time-step granularity in seconds when `include_timestamp` is set.
  pub time_step: u64,
}

impl SuiteConfig {
  /// Checks the structural invariants: digits in 4..=10, and every inclusion
  /// flag backed by its format/granularity.
  pub fn validate(&self) -> OtpResult<()> {
    if !(4..=10).contains(&self.digits) {
      return Err(OtpError::InvalidSuiteConfig(format!("invalid digit length: {}", self.digits)));
    }
    if self.include_password && self.password_hash == PasswordHashAlgorithm::None {
      return Err(OtpError::InvalidSuiteConfig(
        "password input enabled but no password hash specified".into(),
      ));
    }
    if self.include_timestamp && self.time_step == 0 {
      return Err(OtpError::InvalidSuiteConfig(
        "timestamp input enabled but no time step specified".into(),
      ));
    }
    if self.include_challenge && self.challenge == ChallengeFormat::None {
      return Err(OtpError::InvalidSuiteConfig(
        "challenge input required but no challenge format set".into(),
      ));
    }
    Ok(())
  }
}

impl fmt::Display for SuiteConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.raw)
  }
}

/// A validated OCRA suite, ready for derivation.
///
/// Built from a raw descriptor with [`Suite::new`] (registry lookup with a
/// parser fallback) or from a programmatic config with [`Suite::from_config`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SuiteConfig", into = "SuiteConfig")]
pub struct Suite {
  config: SuiteConfig,
}

impl Suite {
  /// Resolves a raw suite string. Known suites come straight from the
  /// registry; anything else goes through the grammar parser and the
  /// [`SuiteConfig::validate`] invariant checks.
  ///
  /// # Errors
  ///
  /// [`OtpError::InvalidSuiteGrammar`] for a malformed descriptor,
  /// [`OtpError::InvalidSuiteConfig`] for a structurally inconsistent one.
  ///
  /// # Example
  ///
  /// ```rust
  /// use oath_otp::ocra::Suite;
  ///
  /// let suite = Suite::new("OCRA-1:HOTP-SHA1-6:QN08")?;
  /// assert_eq!(suite.config().digits, 6);
  /// # Ok::<(), oath_otp::error::OtpError>(())
  /// ```
  pub fn new(raw: &str) -> OtpResult<Suite> {
    if let Some(config) = lookup_suite(raw) {
      return Ok(Suite { config });
    }

    log::debug!("ocra suite {raw:?} not in the registry, falling back to the parser");
    Ok(Suite { config: parse_raw_suite(raw)? })
  }

  /// Builds a suite from a programmatic config, running the same invariant
  /// checks as the parser. Round-trip guarantees (`raw` matching a registry
  /// entry) are the caller's contract, not enforced here.
  pub fn from_config(config: SuiteConfig) -> OtpResult<Suite> {
    config.validate()?;
    Ok(Suite { config })
  }

  /// Like [`Suite::new`] but panics on an invalid descriptor. Intended for
  /// trusted, hardcoded suite strings.
  ///
  /// # Panics
  ///
  /// Panics if `raw` is not a valid suite descriptor.
  pub fn must(raw: &str) -> Suite {
    Suite::new(raw).expect("invalid ocra suite literal")
  }

  pub fn config(&self) -> &SuiteConfig {
    &self.config
  }

  /// The raw descriptor string.
  pub fn as_str(&self) -> &str {
    &self.config.raw
  }
}

impl fmt::Display for Suite {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Suite {
  type Err = OtpError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Suite::new(s)
  }
}

// Deserialization runs the same invariant checks as the constructors.
impl TryFrom<SuiteConfig> for Suite {
  type Error = OtpError;

  fn try_from(config: SuiteConfig) -> Result<Self, Self::Error> {
    Suite::from_config(config)
  }
}

impl From<Suite> for SuiteConfig {
  fn from(suite: Suite) -> SuiteConfig {
    suite.config
  }
}

fn parse_raw_suite(raw: &str) -> OtpResult<SuiteConfig> {
  let parts: Vec<&str> = raw.split(':').collect();
  if parts.len() != 3 {
    return Err(OtpError::InvalidSuiteGrammar(format!("invalid suite format: {raw:?}")));
  }
  if !parts[0].eq_ignore_ascii_case("OCRA-1") {
    return Err(OtpError::InvalidSuiteGrammar(format!("unsupported version: {:?}", parts[0])));
  }

  let mut config = parse_crypto_function(parts[1])?;
  parse_data_input_tokens(&mut config, parts[2])?;

  config.raw = raw.to_string();
  config.validate()?;
  Ok(config)
}

/// Handles the `HOTP-SHA1-6` / `HOTP-SHA256-8` part.
fn parse_crypto_function(crypto: &str) -> OtpResult<SuiteConfig> {
  let pieces: Vec<&str> = crypto.split('-').collect();
  let [function, hash, digits] = pieces[..] else {
    return Err(OtpError::InvalidSuiteGrammar(format!("invalid crypto function: {crypto:?}")));
  };

  if !function.eq_ignore_ascii_case("HOTP") {
    return Err(OtpError::InvalidSuiteGrammar(format!("unsupported crypto function: {function:?}")));
  }

  let hash: Algorithm = hash
    .parse()
    .map_err(|_| OtpError::InvalidSuiteGrammar(format!("unsupported hash: {hash:?}")))?;
  let digits: u8 = digits
    .parse()
    .map_err(|_| OtpError::InvalidSuiteGrammar(format!("invalid digit spec: {digits:?}")))?;

  Ok(SuiteConfig { hash, digits, ..SuiteConfig::default() })
}

/// Processes the data-input half (`C-QN08-PSHA1`, `QN08-T1M`, ...), setting
/// the inclusion flags and formats.
fn parse_data_input_tokens(config: &mut SuiteConfig, input: &str) -> OtpResult<()> {
  for token in input.split('-') {
    let upper = token.to_ascii_uppercase();
    match upper.as_str() {
      "C" => config.include_counter = true,
      "S" => config.include_session = true,
      _ if upper.starts_with('Q') => {
        config.include_challenge = true;
        config.challenge = parse_challenge_token(&upper)
          .ok_or_else(|| OtpError::InvalidSuiteGrammar(format!("unsupported challenge spec: {token:?}")))?;
      },
      _ if upper.starts_with("PSHA") => {
        config.include_password = true;
        config.password_hash = match upper.as_str() {
          "PSHA1" => PasswordHashAlgorithm::Sha1,
          "PSHA256" => PasswordHashAlgorithm::Sha256,
          "PSHA512" => PasswordHashAlgorithm::Sha512,
          _ => {
            return Err(OtpError::InvalidSuiteGrammar(format!(
              "unknown password hash type: {token:?}"
            )));
          },
        };
      },
      _ if upper.starts_with('T') => {
        config.include_timestamp = true;
        config.time_step = parse_time_granularity(&upper[1..])
          .ok_or_else(|| OtpError::InvalidSuiteGrammar(format!("invalid time spec: {token:?}")))?;
      },
      _ => {
        return Err(OtpError::InvalidSuiteGrammar(format!("unknown data input token: {token:?}")));
      },
    }
  }
  Ok(())
}

fn parse_challenge_token(token: &str) -> Option<ChallengeFormat> {
  match token {
    "QN08" => Some(ChallengeFormat::Numeric08),
    "QN10" => Some(ChallengeFormat::Numeric10),
    "QA08" => Some(ChallengeFormat::Alpha08),
    "QA10" => Some(ChallengeFormat::Alpha10),
    "QH08" => Some(ChallengeFormat::Hex08),
    "QH10" => Some(ChallengeFormat::Hex10),
    _ => None,
  }
}

/// Converts `1M` to 60, `2H` to 7200, `30S` to 30.
fn parse_time_granularity(g: &str) -> Option<u64> {
  if g.len() < 2 {
    return None;
  }
  let (value, unit) = g.split_at(g.len() - 1);
  let value: u64 = value.parse().ok()?;
  match unit {
    "S" => Some(value),
    "M" => Some(value * 60),
    "H" => Some(value * 3600),
    _ => None,
  }
}

// Registered suites: the RFC 6287 Appendix B/C descriptors plus common
// variants across the three hash families.
const KNOWN_SUITE_STRINGS: &[&str] = &[
  // Q-only (challenge only)
  "OCRA-1:HOTP-SHA1-6:QN08",
  "OCRA-1:HOTP-SHA1-6:QA08",
  "OCRA-1:HOTP-SHA1-6:QH08",
  "OCRA-1:HOTP-SHA1-8:QN10",
  "OCRA-1:HOTP-SHA1-8:QA10",
  "OCRA-1:HOTP-SHA1-8:QH10",
  "OCRA-1:HOTP-SHA256-6:QN08",
  "OCRA-1:HOTP-SHA256-6:QA08",
  "OCRA-1:HOTP-SHA256-6:QH08",
  "OCRA-1:HOTP-SHA256-8:QN10",
  "OCRA-1:HOTP-SHA256-8:QA10",
  "OCRA-1:HOTP-SHA256-8:QH10",
  "OCRA-1:HOTP-SHA512-6:QN08",
  "OCRA-1:HOTP-SHA512-6:QA08",
  "OCRA-1:HOTP-SHA512-6:QH08",
  "OCRA-1:HOTP-SHA512-8:QN10",
  "OCRA-1:HOTP-SHA512-8:QA10",
  "OCRA-1:HOTP-SHA512-8:QH10",
  // C-Q (counter + challenge)
  "OCRA-1:HOTP-SHA1-6:C-QN08",
  "OCRA-1:HOTP-SHA1-8:C-QA10",
  "OCRA-1:HOTP-SHA256-6:C-QN08",
  "OCRA-1:HOTP-SHA256-8:C-QA10",
  "OCRA-1:HOTP-SHA512-6:C-QH08",
  "OCRA-1:HOTP-SHA512-8:C-QN08",
  "OCRA-1:HOTP-SHA512-8:C-QH10",
  // Q-P (challenge + password)
  "OCRA-1:HOTP-SHA1-6:QN08-PSHA1",
  "OCRA-1:HOTP-SHA1-8:QA10-PSHA1",
  "OCRA-1:HOTP-SHA256-6:QN08-PSHA256",
  "OCRA-1:HOTP-SHA256-8:QN08-PSHA1",
  "OCRA-1:HOTP-SHA256-8:C-QN08-PSHA1",
  "OCRA-1:HOTP-SHA256-8:QA10-PSHA256",
  "OCRA-1:HOTP-SHA512-6:QH08-PSHA512",
  "OCRA-1:HOTP-SHA512-8:QH10-PSHA512",
  // C-Q-P-S-T (all fields)
  "OCRA-1:HOTP-SHA1-6:C-QN08-PSHA1-S-T1S",
  "OCRA-1:HOTP-SHA1-8:C-QA10-PSHA1-S-T1S",
  "OCRA-1:HOTP-SHA256-6:C-QN08-PSHA256-S-T1S",
  "OCRA-1:HOTP-SHA256-8:C-QA10-PSHA256-S-T1S",
  "OCRA-1:HOTP-SHA512-6:C-QH08-PSHA512-S-T1S",
  "OCRA-1:HOTP-SHA512-8:C-QH10-PSHA512-S-T1S",
  // Q-S-T (session & timestamp, no counter)
  "OCRA-1:HOTP-SHA1-6:QN08-S-T1S",
  "OCRA-1:HOTP-SHA1-8:QA10-S-T1S",
  "OCRA-1:HOTP-SHA256-6:QN08-S-T1S",
  "OCRA-1:HOTP-SHA256-8:QA10-S-T1S",
  "OCRA-1:HOTP-SHA512-6:QH08-S-T1S",
  "OCRA-1:HOTP-SHA512-8:QH10-S-T1S",
  // Q-T (challenge + timestamp)
  "OCRA-1:HOTP-SHA512-8:QN08-T1M",
  // C only
  "OCRA-1:HOTP-SHA1-6:C",
  "OCRA-1:HOTP-SHA256-6:C",
  "OCRA-1:HOTP-SHA512-6:C",
];

// The registry entries are grammar-valid by construction; parsing them once
// at first use keeps lookup and parser behavior bit-identical.
static KNOWN_SUITES: LazyLock<HashMap<&'static str, SuiteConfig>> = LazyLock::new(|| {
  KNOWN_SUITE_STRINGS
    .iter()
    .map(|raw| (*raw, parse_raw_suite(raw).expect("registered suites are grammar-valid")))
    .collect()
});

/// Returns all registered OCRA suite strings, for introspection, CLI display
/// or API discovery.
pub fn list_suites() -> Vec<&'static str> {
  KNOWN_SUITES.keys().copied().collect()
}

/// Reports whether the raw suite string is registered, legacy `T1` spellings
/// included.
pub fn is_known_suite(raw: &str) -> bool {
  lookup_suite(raw).is_some()
}

/// Registry lookup. Deployed token configurations spell the one-second
/// timestamp token as a bare `T1`, which the grammar cannot parse; those
/// spellings resolve to the registered `T1S` config, keeping the raw string
/// (and so the derived message) exactly as given.
fn lookup_suite(raw: &str) -> Option<SuiteConfig> {
  if let Some(config) = KNOWN_SUITES.get(raw) {
    return Some(config.clone());
  }

  let stripped = raw.strip_suffix("-T1")?;
  let mut config = KNOWN_SUITES.get(format!("{stripped}-T1S").as_str())?.clone();
  config.raw = raw.to_string();
  Some(config)
}
