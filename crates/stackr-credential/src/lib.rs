//! `stackr-credential` — credential and two-factor verification flows for
//! Stackr.
//!
//! This crate is the boundary the web-application layer calls: password
//! hashing/verification with stored-format dispatch, secure tokens and
//! request signatures, two-factor enrollment (secret + `otpauth://` URI +
//! QR code), the two-factor lifecycle state machine, and one-time backup
//! codes. It performs no storage I/O — every value it returns (stored
//! hashes, enrollment secrets, reduced backup-code lists, lifecycle
//! states) must be persisted by the caller, and the caller must serialize
//! per-user read-verify-persist sequences for backup codes.
//!
//! Cryptographic primitives live in [`stackr_crypto_core`]; this crate
//! adds the clock, `tracing` diagnostics, and the flow-level types.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

mod clock;

pub mod backup;
pub mod enroll;
pub mod error;
pub mod password;
pub mod tokens;
pub mod twofactor;

pub use backup::{generate_backup_codes, verify_backup_code, BackupCodeOutcome, BACKUP_CODE_COUNT};
pub use enroll::{generate_secret, TwoFactorEnrollment, SECRET_LEN};
pub use error::CredentialError;
pub use password::{hash_password, verify_password, PasswordRecord};
pub use tokens::{create_signature, generate_secure_token, is_token_expired, verify_signature};
pub use twofactor::{
    enable_two_factor, verify_token, verify_token_at, TwoFactorConfig, TwoFactorEnablement,
    TwoFactorState,
};

pub use stackr_crypto_core::{CryptoError, ScryptParams};
