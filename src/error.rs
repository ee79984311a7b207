use thiserror::Error;

pub type OtpResult<T> = Result<T, OtpError>;

#[derive(Error, Debug)]
pub enum OtpError {
  #[error("unsupported algorithm")]
  UnsupportedAlgorithm,

  #[error("invalid secret: {0}")]
  InvalidSecret(#[from] data_encoding::DecodeError),

  #[error("invalid digits: {0}, must be between 4 and 10")]
  InvalidDigits(String),

  #[error("invalid code length")]
  InvalidCodeLength,

  #[error("invalid otp code")]
  InvalidCode,

  #[error("invalid skew, a larger skew increases the chance of a brute-force hit")]
  InvalidSkew,

  #[error("issuer is required")]
  IssuerRequired,

  #[error("account name is required")]
  AccountNameRequired,

  #[error("secret is required")]
  SecretRequired,

  #[error("invalid otpauth url: {0}")]
  InvalidUrl(String),

  #[error("invalid ocra suite: {0}")]
  InvalidSuiteGrammar(String),

  #[error("inconsistent ocra suite config: {0}")]
  InvalidSuiteConfig(String),

  #[error("invalid ocra input: {0}")]
  InvalidInputField(String),

  #[error("random source failure: {0}")]
  RandomSource(#[from] rand::Error),
}
