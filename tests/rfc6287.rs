//! OCRA conformance against the RFC 6287 Appendix C test vectors, plus the
//! suite registry and input-validation behavior end to end.

use data_encoding::BASE32_NOPAD;
use oath_otp::{
  error::OtpError,
  generate_ocra,
  ocra::{OcraInput, Suite, is_known_suite, list_suites},
  utils::{decimal_challenge, decimal_to_be8, hex_timestamp},
  validate_ocra,
};

// RFC 6287 Appendix C standard keys: the ASCII string "12345678901234567890"
// repeated/truncated to 20, 32 and 64 bytes.
const KEY20_HEX: &str = "3132333435363738393031323334353637383930";
const KEY32_HEX: &str = "3132333435363738393031323334353637383930313233343536373839303132";
const KEY64_HEX: &str = "31323334353637383930313233343536373839303132333435363738393031323334353637383930313233343536373839303132333435363738393031323334";

// SHA-1 of the PIN "1234".
const PIN_SHA1_HEX: &str = "7110eda4d09e062aa5e4a390b0a572ac0d2c0220";

fn base32_key(hex_key: &str) -> String {
  BASE32_NOPAD.encode(&hex::decode(hex_key).unwrap())
}

fn repeated_digit_challenge(digit: u64) -> Vec<u8> {
  // "00000000", "11111111", ... "99999999"
  decimal_challenge(&digit.to_string().repeat(8)).unwrap()
}

#[test]
fn appendix_c_one_way_challenge_response_sha1() {
  let secret = base32_key(KEY20_HEX);
  let suite = Suite::must("OCRA-1:HOTP-SHA1-6:QN08");
  let expected = [
    "237653", "243178", "653583", "740991", "608993", "388898", "816933", "224598", "750600",
    "294470",
  ];

  for (digit, want) in expected.iter().enumerate() {
    let input = OcraInput {
      challenge: repeated_digit_challenge(digit as u64),
      ..OcraInput::default()
    };
    let code = generate_ocra(&secret, &suite, &input).unwrap();
    assert_eq!(&code, want, "challenge digit {digit}");
    assert!(validate_ocra(&secret, &code, &suite, &input).unwrap());
  }
}

#[test]
fn appendix_c_counter_challenge_pin_sha256() {
  let secret = base32_key(KEY32_HEX);
  let suite = Suite::must("OCRA-1:HOTP-SHA256-8:C-QN08-PSHA1");
  let expected = [
    "65347737", "86775851", "78192410", "71565254", "10104329", "65983500", "70069104",
    "91771096", "75011558", "08522129",
  ];

  for (counter, want) in expected.iter().enumerate() {
    let input = OcraInput {
      counter: decimal_to_be8(&counter.to_string()).unwrap().to_vec(),
      challenge: decimal_challenge("12345678").unwrap(),
      password: hex::decode(PIN_SHA1_HEX).unwrap(),
      ..OcraInput::default()
    };
    let code = generate_ocra(&secret, &suite, &input).unwrap();
    assert_eq!(&code, want, "counter {counter}");
  }
}

#[test]
fn appendix_c_challenge_pin_sha256() {
  let secret = base32_key(KEY32_HEX);
  let suite = Suite::must("OCRA-1:HOTP-SHA256-8:QN08-PSHA1");
  let expected = ["83238735", "01501458", "17957585", "86776967", "86807031"];

  for (digit, want) in expected.iter().enumerate() {
    let input = OcraInput {
      challenge: repeated_digit_challenge(digit as u64),
      password: hex::decode(PIN_SHA1_HEX).unwrap(),
      ..OcraInput::default()
    };
    let code = generate_ocra(&secret, &suite, &input).unwrap();
    assert_eq!(&code, want, "challenge digit {digit}");
  }
}

#[test]
fn appendix_c_counter_challenge_sha512() {
  let secret = base32_key(KEY64_HEX);
  let suite = Suite::must("OCRA-1:HOTP-SHA512-8:C-QN08");
  let expected = [
    "07016083", "63947962", "70123924", "25341727", "33203315", "34205738", "44343969",
    "51946085", "20403879", "31409299",
  ];

  for (counter, want) in expected.iter().enumerate() {
    let input = OcraInput {
      counter: decimal_to_be8(&counter.to_string()).unwrap().to_vec(),
      challenge: repeated_digit_challenge(counter as u64),
      ..OcraInput::default()
    };
    let code = generate_ocra(&secret, &suite, &input).unwrap();
    assert_eq!(&code, want, "counter {counter}");
  }
}

#[test]
fn appendix_c_challenge_timestamp_sha512() {
  let secret = base32_key(KEY64_HEX);
  let suite = Suite::must("OCRA-1:HOTP-SHA512-8:QN08-T1M");
  let expected = ["95209754", "55907591", "22048402", "24218844", "36209546"];

  for (digit, want) in expected.iter().enumerate() {
    let input = OcraInput {
      challenge: repeated_digit_challenge(digit as u64),
      timestamp: hex_timestamp("0132D0B6").unwrap(),
      ..OcraInput::default()
    };
    let code = generate_ocra(&secret, &suite, &input).unwrap();
    assert_eq!(&code, want, "challenge digit {digit}");
  }
}

#[test]
fn registry_suites_round_trip_through_the_parser() {
  for raw in list_suites() {
    assert!(is_known_suite(raw));
    let suite = Suite::new(raw).unwrap();
    assert_eq!(suite.as_str(), raw);
    assert_eq!(raw.parse::<Suite>().unwrap(), suite);
  }
}

#[test]
fn unknown_but_well_formed_suite_still_parses() {
  let raw = "OCRA-1:HOTP-SHA256-7:C-QA10-PSHA256-S-T30S";
  assert!(!is_known_suite(raw));

  let suite = Suite::new(raw).unwrap();
  let config = suite.config();
  assert_eq!(config.digits, 7);
  assert!(config.include_counter && config.include_session && config.include_timestamp);
  assert_eq!(config.time_step, 30);
}

#[test]
fn missing_required_fields_are_rejected() {
  let secret = base32_key(KEY20_HEX);

  // Suite wants a counter, none provided.
  let suite = Suite::must("OCRA-1:HOTP-SHA1-6:C-QN08");
  let input = OcraInput { challenge: decimal_challenge("12345678").unwrap(), ..OcraInput::default() };
  assert!(matches!(generate_ocra(&secret, &suite, &input), Err(OtpError::InvalidInputField(_))));

  // Suite wants a PIN hash, none provided.
  let suite = Suite::must("OCRA-1:HOTP-SHA1-6:QN08-PSHA1");
  assert!(matches!(generate_ocra(&secret, &suite, &input), Err(OtpError::InvalidInputField(_))));

  // Challenge below the QN10 minimum.
  let suite = Suite::must("OCRA-1:HOTP-SHA1-6:QN10");
  let short = OcraInput { challenge: vec![b'1'; 9], ..OcraInput::default() };
  assert!(matches!(generate_ocra(&secret, &suite, &short), Err(OtpError::InvalidInputField(_))));
}

#[test]
fn malformed_descriptors_fail_to_parse() {
  for raw in [
    "OCRA-2:HOTP-SHA1-6:QN08",
    "OCRA-1:TOTP-SHA1-6:QN08",
    "OCRA-1:HOTP-MD5-6:QN08",
    "OCRA-1:HOTP-SHA1-6",
    "OCRA-1:HOTP-SHA1-6:QX08",
    "OCRA-1:HOTP-SHA1-6:QN08-T1X",
  ] {
    assert!(Suite::new(raw).is_err(), "{raw} should not parse");
  }
}
