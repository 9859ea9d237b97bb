//! Short code generation.
//!
//! Codes are drawn uniformly from a 62-character alphanumeric alphabet using the
//! operating system's cryptographically secure random source. Generation makes no
//! uniqueness promise; [`crate::application::services::LinkService`] checks codes
//! against storage before use.

use rand::TryRngCore;
use rand::rngs::OsRng;

/// Characters a short code may contain.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Largest multiple of the alphabet size that fits in a byte.
///
/// Bytes at or above this value are rejected so that `byte % 62` stays uniform.
const ACCEPT_BELOW: u8 = (u8::MAX / ALPHABET.len() as u8) * ALPHABET.len() as u8;

/// Errors produced by short code generation.
#[derive(Debug, thiserror::Error)]
pub enum CodeGenError {
    #[error("Short code length must be greater than zero, got {0}")]
    InvalidLength(usize),

    #[error("Random source failure: {0}")]
    RandomSource(String),
}

/// Generates a random short code of `length` characters from [`ALPHABET`].
///
/// # Errors
///
/// Returns [`CodeGenError::InvalidLength`] if `length` is zero.
/// Returns [`CodeGenError::RandomSource`] if the OS entropy source fails; the
/// failure is propagated and never retried here.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(6)?;
/// assert_eq!(code.len(), 6);
/// assert!(code.bytes().all(|b| ALPHABET.contains(&b)));
/// ```
pub fn generate_code(length: usize) -> Result<String, CodeGenError> {
    generate_code_with(&mut OsRng, length)
}

/// Generates a short code using the given random source.
pub fn generate_code_with<R>(rng: &mut R, length: usize) -> Result<String, CodeGenError>
where
    R: TryRngCore + ?Sized,
{
    if length == 0 {
        return Err(CodeGenError::InvalidLength(length));
    }

    let mut code = String::with_capacity(length);
    // Slightly oversized so a single fill usually covers rejected bytes.
    let mut buffer = vec![0u8; length + length / 2 + 1];

    while code.len() < length {
        rng.try_fill_bytes(&mut buffer)
            .map_err(|e| CodeGenError::RandomSource(e.to_string()))?;

        for &byte in buffer.iter().filter(|&&b| b < ACCEPT_BELOW) {
            code.push(ALPHABET[(byte % ALPHABET.len() as u8) as usize] as char);
            if code.len() == length {
                break;
            }
        }
    }

    Ok(code)
}
