//! Random key material generation.

use rand::rngs::OsRng;
use rand::RngCore;

/// The standard Initialisation Vector (IV) length (96 bits).
pub const IV_BIT_LENGTH: usize = 96;
/// The standard authentication tag length (128 bits).
pub const AUTH_TAG_BIT_LENGTH: usize = 128;
/// The standard content-encryption key length (256 bits).
pub const KEY_BIT_LENGTH: usize = 256;

/// Generates `bit_length / 8` cryptographically secure random bytes.
///
/// Draws from the operating system CSPRNG, which is thread-safe and never
/// repeats output across calls. An unavailable entropy source aborts the
/// process; it is not a recoverable condition.
#[must_use]
pub fn generate(bit_length: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; bit_length / 8];
    OsRng.fill_bytes(&mut bytes);
    bytes
}
