//! RFC 4226 dynamic truncation and decimal formatting.

const MASK_OFFSET: u8 = 0x0F;

// Moduli 10^0 through 10^10. RFC 6287 permits ten-digit codes and 10^10 does
// not fit in 32 bits, so the table and the reduction are 64-bit.
pub(crate) const MOD10: [u64; 11] = [
  1,
  10,
  100,
  1_000,
  10_000,
  100_000,
  1_000_000,
  10_000_000,
  100_000_000,
  1_000_000_000,
  10_000_000_000,
];

/// Dynamic truncation per RFC 4226 section 5.3: the low nibble of the final
/// digest byte selects a 4-byte big-endian window, the sign bit is cleared,
/// and the result is reduced modulo 10^digits.
pub(crate) fn truncate(digest: &[u8], digits: usize) -> u32 {
  let offset = (digest[digest.len() - 1] & MASK_OFFSET) as usize;
  let bin = (u32::from(digest[offset] & 0x7F) << 24)
    | (u32::from(digest[offset + 1]) << 16)
    | (u32::from(digest[offset + 2]) << 8)
    | u32::from(digest[offset + 3]);

  (u64::from(bin) % MOD10[digits]) as u32
}

/// Renders `code` as exactly `digits` decimal characters, left-padded with
/// zeros. The caller guarantees `code < 10^digits`.
pub(crate) fn format_decimal(code: u32, digits: usize) -> String {
  format!("{code:0digits$}")
}

/// Zero-right-pads `input` to `len` bytes, truncating if it is longer.
pub(crate) fn pad_bytes(input: &[u8], len: usize) -> Vec<u8> {
  let mut out = vec![0u8; len];
  let n = input.len().min(len);
  out[..n].copy_from_slice(&input[..n]);
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn truncate_rfc4226_example() {
    // RFC 4226 section 5.4: this digest truncates to 0x50ef7f19, giving
    // 872921 at six digits.
    let digest = hex::decode("1f8698690e02ca16618550ef7f19da8e945b555a").unwrap();
    assert_eq!(truncate(&digest, 6), 872_921);
    assert_eq!(u64::from(truncate(&digest, 10)), 0x50ef_7f19u64 % 10_000_000_000);
  }

  #[test]
  fn format_pads_left() {
    assert_eq!(format_decimal(123_456, 6), "123456");
    assert_eq!(format_decimal(42, 6), "000042");
    assert_eq!(format_decimal(0, 8), "00000000");
    assert_eq!(format_decimal(99_999_999, 8), "99999999");
    assert_eq!(format_decimal(1_073_741_824, 10), "1073741824");
  }

  #[test]
  fn mod10_covers_ten_digits() {
    assert_eq!(MOD10[9], 1_000_000_000);
    assert_eq!(MOD10[10], 10_000_000_000);
  }

  #[test]
  fn pad_bytes_cases() {
    assert_eq!(pad_bytes(b"abc", 5), b"abc\x00\x00");
    assert_eq!(pad_bytes(b"abcdef", 3), b"abc");
    assert_eq!(pad_bytes(b"", 4), vec![0u8; 4]);
    assert_eq!(pad_bytes(b"xyz", 3), b"xyz");
  }
}
