//! OS-backed entropy for secret generation.

use rand::{RngCore, rngs::OsRng};

pub(crate) fn try_fill_bytes(dst: &mut [u8]) -> Result<(), rand::Error> {
  OsRng.try_fill_bytes(dst)
}
