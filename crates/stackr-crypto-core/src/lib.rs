//! `stackr-crypto-core` — pure cryptographic primitives for Stackr's
//! credential subsystem.
//!
//! Audit-target crate: zero I/O, zero clock access, zero logging. Time
//! enters every time-dependent function as an explicit unix-seconds
//! parameter; randomness comes only from the OS CSPRNG. The flow-level
//! crate (`stackr-credential`) layers stored-format dispatch, enrollment,
//! and the two-factor state machine on top of these primitives.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod compare;
pub mod error;
pub mod kdf;
pub mod otp;
pub mod token;

pub use compare::constant_time_eq;
pub use error::CryptoError;
pub use kdf::{derive_key, ScryptParams, DERIVED_KEY_LEN};
pub use otp::{
    check_totp, hotp, totp_at, OtpAlgorithm, OtpDigits, TotpParams, DEFAULT_PERIOD, DEFAULT_SKEW,
};
pub use token::{
    create_signature, generate_secure_token, is_token_expired, verify_signature, TOKEN_LEN,
};
