//! Provisioning-URL codec for the `otpauth://` scheme.
//!
//! Builds and parses the URL representation understood by authenticator apps:
//! `otpauth://{totp|hotp}/Issuer:AccountName?secret=...&issuer=...&algorithm=...&digits=...`
//! plus `period` (TOTP) or `counter` (HOTP). Parameter semantics live in the
//! derivation modules; this module only moves them in and out of URL form.

use percent_encoding::percent_decode_str;
use url::Url;

use crate::{
  error::{OtpError, OtpResult},
  otp::{OtpKind, UrlParam},
};

pub(crate) fn build_otp_url(
  kind: OtpKind,
  param: &UrlParam,
  extra: &[(&str, String)],
) -> OtpResult<Url> {
  if param.issuer.is_empty() {
    return Err(OtpError::IssuerRequired);
  }
  if param.account_name.is_empty() {
    return Err(OtpError::AccountNameRequired);
  }
  if param.secret.is_empty() {
    return Err(OtpError::SecretRequired);
  }

  let mut url = Url::parse(&format!("otpauth://{kind}/"))
    .map_err(|e| OtpError::InvalidUrl(e.to_string()))?;

  let label = format!("{}:{}", param.issuer, param.account_name);
  url
    .path_segments_mut()
    .map_err(|()| OtpError::InvalidUrl("cannot be a base url".into()))?
    .pop_if_empty()
    .push(&label);

  url
    .query_pairs_mut()
    .append_pair("secret", &param.secret)
    .append_pair("issuer", &param.issuer)
    .append_pair("algorithm", &param.algorithm.to_string())
    .append_pair("digits", &param.digits.to_string());

  for (key, value) in extra {
    url.query_pairs_mut().append_pair(key, value);
  }

  Ok(url)
}

/// Parses an `otpauth://` URL (TOTP or HOTP) into its kind and parameters.
///
/// The scheme must be `otpauth`, the host `totp` or `hotp`, and the path of
/// the form `Issuer:AccountName`. Query parameters are optional: digits
/// default to 6, the algorithm to SHA1 and the period to 30 seconds.
///
/// # Errors
///
/// - [`OtpError::InvalidUrl`] for a bad scheme, host, label or period.
/// - [`OtpError::UnsupportedAlgorithm`] for an unknown `algorithm` value.
/// - [`OtpError::InvalidDigits`] for a `digits` value outside 4..=10.
pub fn parse_otpauth_url(raw: &str) -> OtpResult<(OtpKind, UrlParam)> {
  let url = Url::parse(raw).map_err(|e| OtpError::InvalidUrl(e.to_string()))?;

  if url.scheme() != "otpauth" {
    return Err(OtpError::InvalidUrl(format!("invalid scheme: {}", url.scheme())));
  }

  let kind: OtpKind = url
    .host_str()
    .ok_or_else(|| OtpError::InvalidUrl("missing otp type".into()))?
    .to_ascii_lowercase()
    .parse()?;

  let label = percent_decode_str(url.path().trim_start_matches('/'))
    .decode_utf8()
    .map_err(|e| OtpError::InvalidUrl(format!("invalid label encoding: {e}")))?;
  let (issuer, account_name) = label
    .split_once(':')
    .ok_or_else(|| OtpError::InvalidUrl("invalid label format, expected Issuer:AccountName".into()))?;

  let mut param = UrlParam {
    issuer: issuer.to_string(),
    account_name: account_name.to_string(),
    period: 30,
    ..UrlParam::default()
  };

  for (key, value) in url.query_pairs() {
    match key.as_ref() {
      "secret" => param.secret = value.into_owned(),
      "issuer" => param.issuer = value.into_owned(),
      "digits" => param.digits = value.parse()?,
      "algorithm" => param.algorithm = value.parse()?,
      "period" => {
        param.period =
          value.parse().map_err(|_| OtpError::InvalidUrl(format!("invalid period value: {value}")))?;
      },
      // Unknown parameters (counter included) are carried by the URL but not
      // by UrlParam; callers re-supply the counter per call.
      _ => {},
    }
  }

  Ok((kind, param))
}
