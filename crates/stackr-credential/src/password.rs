//! Password hashing and verification with stored-format dispatch.
//!
//! Three stored shapes coexist in user records:
//! - `hex(key).hex(salt)` with a 64-byte scrypt-derived key — the format
//!   this module writes
//! - `hex(digest).hex(salt)` with a 32-byte keyed SHA-256 digest — the
//!   degraded fallback written only when scrypt itself fails
//! - self-describing bcrypt strings (`$2a$`/`$2b$`/`$2y$`) — imported
//!   accounts, verified by delegation and never written here
//!
//! [`PasswordRecord::parse`] infers the algorithm from the string shape;
//! verification dispatches on the parsed variant. Anything unparseable
//! verifies as `false` — stored-hash corruption is an authentication
//! failure, not a crash.

use data_encoding::{HEXLOWER, HEXLOWER_PERMISSIVE};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use stackr_crypto_core::{constant_time_eq, derive_key, ScryptParams, DERIVED_KEY_LEN};

/// Salt length for newly created hashes.
const SALT_LEN: usize = 16;

/// Keyed SHA-256 digest length (the fallback format).
const LEGACY_DIGEST_LEN: usize = 32;

// ---------------------------------------------------------------------------
// Stored-hash parsing
// ---------------------------------------------------------------------------

/// Parsed form of a stored password hash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PasswordRecord {
    /// scrypt-derived key + salt.
    Scrypt {
        /// 64-byte derived key.
        key: Vec<u8>,
        /// Salt the key was derived with.
        salt: Vec<u8>,
    },
    /// Keyed SHA-256 digest + salt (degraded fallback format).
    LegacySha256 {
        /// 32-byte digest of `plaintext || salt`.
        digest: Vec<u8>,
        /// Salt the digest was keyed with.
        salt: Vec<u8>,
    },
    /// Self-describing bcrypt hash string.
    Bcrypt(String),
}

impl PasswordRecord {
    /// Infer the algorithm from a stored string's shape.
    ///
    /// Returns `None` for anything that is not a recognizable stored hash:
    /// missing delimiter, non-hex content, empty salt, or a key length
    /// matching no known algorithm.
    #[must_use]
    pub fn parse(stored: &str) -> Option<Self> {
        if stored.starts_with("$2a$") || stored.starts_with("$2b$") || stored.starts_with("$2y$") {
            return Some(Self::Bcrypt(stored.to_owned()));
        }

        let (key_hex, salt_hex) = stored.split_once('.')?;
        let key = HEXLOWER_PERMISSIVE.decode(key_hex.as_bytes()).ok()?;
        let salt = HEXLOWER_PERMISSIVE.decode(salt_hex.as_bytes()).ok()?;
        if salt.is_empty() {
            return None;
        }

        match key.len() {
            DERIVED_KEY_LEN => Some(Self::Scrypt { key, salt }),
            LEGACY_DIGEST_LEN => Some(Self::LegacySha256 { digest: key, salt }),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Hashing / verification
// ---------------------------------------------------------------------------

/// Hash a password for storage: fresh 16-byte salt, scrypt-derived key,
/// serialized as `hex(key).hex(salt)`.
///
/// This function does not fail. If scrypt itself errors (parameter
/// rejection, allocation failure), it degrades to the keyed SHA-256
/// legacy format and emits a `tracing` warning — availability is favored
/// over a hard failure, and the downgrade is visible in logs rather than
/// silent.
#[must_use]
pub fn hash_password(plaintext: &str, params: &ScryptParams) -> String {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);

    match derive_key(plaintext.as_bytes(), &salt, params) {
        Ok(key) => format!("{}.{}", HEXLOWER.encode(&key), HEXLOWER.encode(&salt)),
        Err(e) => {
            tracing::warn!(
                error = %e,
                "scrypt derivation failed; storing keyed SHA-256 digest instead"
            );
            let digest = legacy_digest(plaintext.as_bytes(), &salt);
            format!("{}.{}", HEXLOWER.encode(&digest), HEXLOWER.encode(&salt))
        }
    }
}

/// Verify a password against a stored hash.
///
/// Dispatches on the parsed record: bcrypt strings are delegated to the
/// `bcrypt` crate's verifier, the two delimited formats are recomputed
/// and compared in constant time. Empty inputs and unparseable stored
/// hashes return `false`; this function never fails.
#[must_use]
pub fn verify_password(plaintext: &str, stored: &str, params: &ScryptParams) -> bool {
    if plaintext.is_empty() || stored.is_empty() {
        return false;
    }

    match PasswordRecord::parse(stored) {
        Some(PasswordRecord::Bcrypt(hash)) => bcrypt::verify(plaintext, &hash).unwrap_or(false),
        Some(PasswordRecord::Scrypt { key, salt }) => {
            derive_key(plaintext.as_bytes(), &salt, params)
                .map(|derived| constant_time_eq(&derived, &key))
                .unwrap_or(false)
        }
        Some(PasswordRecord::LegacySha256 { digest, salt }) => {
            let recomputed = legacy_digest(plaintext.as_bytes(), &salt);
            constant_time_eq(&recomputed, &digest)
        }
        None => false,
    }
}

/// Keyed digest over `plaintext || salt` — the fallback format.
fn legacy_digest(plaintext: &[u8], salt: &[u8]) -> [u8; LEGACY_DIGEST_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(plaintext);
    hasher.update(salt);
    hasher.finalize().into()
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
