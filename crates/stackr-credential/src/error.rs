//! Error types for `stackr-credential`.

use stackr_crypto_core::CryptoError;
use thiserror::Error;

/// Errors produced by credential and two-factor flows.
///
/// Verification of untrusted input never lands here — wrong passwords,
/// wrong codes, and malformed stored material all come back as `false` or
/// an invalid outcome. These variants cover misuse (illegal state
/// transitions) and failures to produce material (enrollment).
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Cryptographic primitive failed (delegated from the core crate).
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// Two-factor state transition not allowed from the current state.
    #[error("invalid two-factor transition: {0}")]
    InvalidTransition(String),

    /// Enrollment material could not be produced.
    #[error("enrollment error: {0}")]
    Enrollment(String),
}
