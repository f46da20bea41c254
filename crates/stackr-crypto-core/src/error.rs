//! Error types for `stackr-crypto-core`.

use thiserror::Error;

/// Errors produced by cryptographic primitives.
///
/// Verification of untrusted input (codes, signatures) never surfaces as an
/// error — those paths return `false`. Errors here signal misuse (empty
/// secret, zero period) or an unavailable primitive (CSPRNG, scrypt).
#[derive(Debug, Error)]
pub enum CryptoError {
    /// scrypt key derivation failed (invalid cost parameters or allocation).
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    /// HOTP/TOTP generation or validation error.
    #[error("OTP error: {0}")]
    Otp(String),

    /// The operating system CSPRNG could not produce random bytes.
    #[error("entropy error: {0}")]
    Entropy(String),
}
