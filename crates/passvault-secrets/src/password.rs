//! Password generation policy.
//!
//! Lengths are silently clamped into `[MIN_LENGTH, MAX_LENGTH]`; a missing
//! length is drawn uniformly from that range. Characters are sampled with
//! replacement from [`ALPHABET`] using the OS CSPRNG.

use passvault_core::SecretString;
use rand::rngs::OsRng;
use rand::{CryptoRng, Rng};
use tracing::info;

/// Shortest password ever produced.
pub const MIN_LENGTH: usize = 12;

/// Longest password ever produced.
pub const MAX_LENGTH: usize = 30;

/// ASCII letters, digits, and printable punctuation.
pub const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz\
ABCDEFGHIJKLMNOPQRSTUVWXYZ\
0123456789\
!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Resolve the effective length for a request.
pub fn resolve_length<R: Rng>(requested: Option<i64>, rng: &mut R) -> usize {
    match requested {
        Some(len) => len.clamp(MIN_LENGTH as i64, MAX_LENGTH as i64) as usize,
        None => rng.gen_range(MIN_LENGTH..=MAX_LENGTH),
    }
}

/// Generate a password using the OS random source.
pub fn generate_password(requested: Option<i64>) -> SecretString {
    generate_password_with(requested, &mut OsRng)
}

/// Generate a password from a caller-supplied cryptographically secure RNG.
pub fn generate_password_with<R: Rng + CryptoRng>(
    requested: Option<i64>,
    rng: &mut R,
) -> SecretString {
    let length = resolve_length(requested, rng);
    let password: String = (0..length)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();

    info!(length, "generated password");
    SecretString::new(password)
}
