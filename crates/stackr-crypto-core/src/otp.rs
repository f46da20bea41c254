//! One-time password engine: HOTP (RFC 4226) and TOTP (RFC 6238).
//!
//! HMAC is computed with `ring::hmac`. All functions take time as an
//! explicit unix-seconds parameter — this crate never reads the clock, so
//! every code path is reproducible in tests.
//!
//! Validation accepts a symmetric window of time steps around the
//! verifier's step to tolerate clock drift between server and
//! authenticator. Nothing here tracks which steps were already accepted;
//! a code remains valid for every call inside its window, and callers who
//! need one-time semantics must record the last accepted step themselves.

use ring::hmac;
use serde::{Deserialize, Serialize};

use crate::compare::constant_time_eq;
use crate::error::CryptoError;

// ── Constants ───────────────────────────────────────────────────────

/// Conventional TOTP period for authenticator-app compatibility, in seconds.
pub const DEFAULT_PERIOD: u32 = 30;

/// Default validation window: one step on each side of the current one.
pub const DEFAULT_SKEW: u32 = 1;

// ── Types ───────────────────────────────────────────────────────────

/// HMAC algorithm used to compute the code.
///
/// SHA-1 is the interoperability default; most authenticator apps ignore
/// the `algorithm` URI parameter and assume it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OtpAlgorithm {
    /// HMAC-SHA1 (authenticator-app default).
    Sha1,
    /// HMAC-SHA256.
    Sha256,
    /// HMAC-SHA512.
    Sha512,
}

impl OtpAlgorithm {
    fn hmac_algorithm(self) -> hmac::Algorithm {
        match self {
            Self::Sha1 => hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY,
            Self::Sha256 => hmac::HMAC_SHA256,
            Self::Sha512 => hmac::HMAC_SHA512,
        }
    }

    /// Name used for the `algorithm` parameter of `otpauth://` URIs.
    #[must_use]
    pub const fn uri_name(self) -> &'static str {
        match self {
            Self::Sha1 => "SHA1",
            Self::Sha256 => "SHA256",
            Self::Sha512 => "SHA512",
        }
    }
}

/// Number of digits in a code. Only the two RFC-sanctioned widths exist,
/// which keeps the truncation modulus total.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OtpDigits {
    /// 6-digit code (standard).
    Six,
    /// 8-digit code.
    Eight,
}

impl OtpDigits {
    /// Numeric digit count.
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::Six => 6,
            Self::Eight => 8,
        }
    }

    /// Truncation modulus, 10^digits.
    const fn modulus(self) -> u32 {
        match self {
            Self::Six => 1_000_000,
            Self::Eight => 100_000_000,
        }
    }
}

/// Code parameters shared between prover and verifier.
///
/// Both sides must agree on every field; a mismatch simply produces codes
/// that never match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotpParams {
    /// Output width.
    pub digits: OtpDigits,
    /// Time step in seconds.
    pub period: u32,
    /// HMAC algorithm.
    pub algorithm: OtpAlgorithm,
}

impl Default for TotpParams {
    fn default() -> Self {
        Self {
            digits: OtpDigits::Six,
            period: DEFAULT_PERIOD,
            algorithm: OtpAlgorithm::Sha1,
        }
    }
}

// ── HOTP ────────────────────────────────────────────────────────────

/// Compute an HOTP code for a counter value (RFC 4226).
///
/// # Errors
///
/// Returns `CryptoError::Otp` if `secret` is empty.
#[must_use = "the generated code should be used or discarded explicitly"]
pub fn hotp(
    secret: &[u8],
    counter: u64,
    digits: OtpDigits,
    algorithm: OtpAlgorithm,
) -> Result<String, CryptoError> {
    if secret.is_empty() {
        return Err(CryptoError::Otp("secret must not be empty".to_owned()));
    }

    let key = hmac::Key::new(algorithm.hmac_algorithm(), secret);
    let mac = hmac::sign(&key, &counter.to_be_bytes());
    let mac_bytes = mac.as_ref();

    // Dynamic truncation (RFC 4226 §5.3): the low nibble of the final MAC
    // byte selects a 4-byte window; the window's high bit is masked off.
    let offset = usize::from(mac_bytes.last().copied().unwrap_or(0) & 0x0f);
    let window: [u8; 4] = mac_bytes
        .get(offset..offset.saturating_add(4))
        .and_then(|w| w.try_into().ok())
        .ok_or_else(|| CryptoError::Otp("truncation window out of range".to_owned()))?;
    let value = u32::from_be_bytes(window) & 0x7fff_ffff;

    // modulus() is 10^6 or 10^8, never zero.
    #[allow(clippy::arithmetic_side_effects)]
    let code = value % digits.modulus();
    Ok(format!("{code:0>width$}", width = usize::from(digits.value())))
}

// ── TOTP ────────────────────────────────────────────────────────────

/// Compute the TOTP code for a unix timestamp (RFC 6238).
///
/// # Errors
///
/// Returns `CryptoError::Otp` if `secret` is empty or `params.period` is 0.
#[must_use = "the generated code should be used or discarded explicitly"]
pub fn totp_at(secret: &[u8], time: u64, params: &TotpParams) -> Result<String, CryptoError> {
    hotp(secret, time_step(time, params.period)?, params.digits, params.algorithm)
}

/// Check a submitted code against the steps in `[T-skew, T+skew]`.
///
/// Every candidate step is evaluated — no early exit on match — and each
/// comparison is constant-time. A wrong-length or non-numeric submission
/// compares unequal everywhere and yields `false`.
///
/// # Errors
///
/// Returns `CryptoError::Otp` if `secret` is empty or `params.period` is 0.
pub fn check_totp(
    secret: &[u8],
    time: u64,
    candidate: &str,
    params: &TotpParams,
    skew: u32,
) -> Result<bool, CryptoError> {
    let current = time_step(time, params.period)?;
    let lo = current.saturating_sub(u64::from(skew));
    let hi = current.saturating_add(u64::from(skew));

    let mut matched = false;
    for step in lo..=hi {
        let expected = hotp(secret, step, params.digits, params.algorithm)?;
        matched |= constant_time_eq(expected.as_bytes(), candidate.as_bytes());
    }
    Ok(matched)
}

/// T = floor(time / period), per RFC 6238 §4.
fn time_step(time: u64, period: u32) -> Result<u64, CryptoError> {
    if period == 0 {
        return Err(CryptoError::Otp("period must be > 0".to_owned()));
    }
    // period is validated non-zero above.
    #[allow(clippy::arithmetic_side_effects)]
    let step = time / u64::from(period);
    Ok(step)
}

// ── Tests ───────────────────────────────────────────────────────────
