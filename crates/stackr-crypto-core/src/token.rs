//! Secure tokens, request signatures, and expiry checks.
//!
//! Tokens back email-verification and password-reset links in the hosting
//! application; uniqueness is probabilistic (256 bits of entropy), not
//! enforced by any registry. Signatures are HMAC-SHA256 — a strengthening
//! of the plain keyed digest the subsystem historically used, with the
//! same observable contract: deterministic for fixed `(data, secret)` and
//! unforgeable without the secret.

use data_encoding::HEXLOWER;
use rand::rngs::OsRng;
use rand::RngCore;
use ring::hmac;

use crate::compare::constant_time_eq;
use crate::error::CryptoError;

/// Entropy of a generated token in bytes (hex-encodes to 64 characters).
pub const TOKEN_LEN: usize = 32;

/// Generate a random token, lowercase hex-encoded.
///
/// # Errors
///
/// Returns `CryptoError::Entropy` if the OS CSPRNG fails.
pub fn generate_secure_token() -> Result<String, CryptoError> {
    let mut bytes = [0u8; TOKEN_LEN];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| CryptoError::Entropy(format!("CSPRNG fill failed: {e}")))?;
    Ok(HEXLOWER.encode(&bytes))
}

/// Compute the HMAC-SHA256 signature of `data` under `secret`,
/// lowercase hex-encoded.
#[must_use]
pub fn create_signature(data: &[u8], secret: &[u8]) -> String {
    let key = hmac::Key::new(hmac::HMAC_SHA256, secret);
    HEXLOWER.encode(hmac::sign(&key, data).as_ref())
}

/// Verify a signature produced by [`create_signature`].
///
/// Recomputes and compares in constant time. Any mismatch — including a
/// wrong length or non-hex garbage — returns `false`; this function never
/// fails.
#[must_use]
pub fn verify_signature(data: &[u8], signature: &str, secret: &[u8]) -> bool {
    let expected = create_signature(data, secret);
    constant_time_eq(expected.as_bytes(), signature.as_bytes())
}

/// `true` once `now` is strictly past `expires_at` (both unix seconds).
#[must_use]
pub const fn is_token_expired(expires_at: u64, now: u64) -> bool {
    now > expires_at
}
