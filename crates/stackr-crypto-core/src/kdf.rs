//! scrypt key derivation for password storage.
//!
//! This module provides:
//! - [`derive_key`] — derive a 512-bit key from a password + salt
//! - [`ScryptParams`] — serializable cost parameter set
//!
//! Cost policy belongs to the caller: parameters are an explicit argument
//! so the hosting application can tune derivation latency against
//! denial-of-service exposure. [`ScryptParams::recommended`] targets an
//! interactive login (tens of milliseconds on commodity hardware).

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::error::CryptoError;

/// Output length of the derived key in bytes (512 bits).
pub const DERIVED_KEY_LEN: usize = 64;

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// scrypt cost parameter set.
///
/// Stored hashes do not encode their parameters, so verification must be
/// given the same set that produced the hash. Callers that change
/// parameters over time need to rehash on successful login.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScryptParams {
    /// log2 of the CPU/memory cost N (the `scrypt` crate convention).
    pub log_n: u8,
    /// Block size.
    pub r: u32,
    /// Parallelization degree.
    pub p: u32,
}

impl ScryptParams {
    /// Interactive-login cost: N=2^15, r=8, p=1.
    #[must_use]
    pub const fn recommended() -> Self {
        Self {
            log_n: 15,
            r: 8,
            p: 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// Derive a [`DERIVED_KEY_LEN`]-byte key from a password and salt.
///
/// The output is wrapped in [`Zeroizing`] so the key material is erased
/// when dropped. Salt length policy is owned by the caller — the password
/// layer always generates 16-byte salts, while verification must accept
/// whatever salt the stored record carries.
///
/// # Errors
///
/// Returns `CryptoError::KeyDerivation` if the parameters are rejected by
/// the `scrypt` crate or the derivation itself fails.
pub fn derive_key(
    password: &[u8],
    salt: &[u8],
    params: &ScryptParams,
) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    let scrypt_params = scrypt::Params::new(params.log_n, params.r, params.p, DERIVED_KEY_LEN)
        .map_err(|e| CryptoError::KeyDerivation(format!("invalid scrypt params: {e}")))?;

    let mut output = Zeroizing::new(vec![0u8; DERIVED_KEY_LEN]);
    scrypt::scrypt(password, salt, &scrypt_params, &mut output)
        .map_err(|e| CryptoError::KeyDerivation(format!("scrypt derivation failed: {e}")))?;
    Ok(output)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
