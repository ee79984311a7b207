//! Keyed-hash engine shared by the HOTP, TOTP and OCRA derivations.

use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Sha256, Sha512};

use crate::otp::Algorithm;

/// Computes the HMAC digest of `message` under `key` for the selected
/// algorithm. A MAC context is keyed at construction, so a fresh one is built
/// per call; contexts are never shared across invocations.
pub(crate) fn hmac_digest(algo: Algorithm, key: &[u8], message: &[u8]) -> Vec<u8> {
  match algo {
    Algorithm::Sha1 => {
      let mut mac = Hmac::<Sha1>::new_from_slice(key).expect("hmac accepts any key length");
      mac.update(message);
      mac.finalize().into_bytes().to_vec()
    },
    Algorithm::Sha256 => {
      let mut mac = Hmac::<Sha256>::new_from_slice(key).expect("hmac accepts any key length");
      mac.update(message);
      mac.finalize().into_bytes().to_vec()
    },
    Algorithm::Sha512 => {
      let mut mac = Hmac::<Sha512>::new_from_slice(key).expect("hmac accepts any key length");
      mac.update(message);
      mac.finalize().into_bytes().to_vec()
    },
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn digest_lengths_match_algorithm() {
    let key = b"12345678901234567890";
    assert_eq!(hmac_digest(Algorithm::Sha1, key, b"msg").len(), 20);
    assert_eq!(hmac_digest(Algorithm::Sha256, key, b"msg").len(), 32);
    assert_eq!(hmac_digest(Algorithm::Sha512, key, b"msg").len(), 64);
  }

  #[test]
  fn rfc4226_intermediate_hmac() {
    // RFC 4226 section 5.4 example: HMAC-SHA-1 of counter=0 under the ASCII
    // key "12345678901234567890".
    let digest = hmac_digest(Algorithm::Sha1, b"12345678901234567890", &0u64.to_be_bytes());
    assert_eq!(hex::encode(digest), "cc93cf18508d94934c64b65d8ba7667fb7cde4b0");
  }
}
