//! Two-factor lifecycle state machine and TOTP verification.
//!
//! The state machine is a value type: every transition returns the next
//! state (plus any generated material) and the caller persists it. The
//! legal edges are enrollment (any state → `PendingVerification`), enable
//! (`PendingVerification` → `Enabled`), and disable (any state →
//! `Disabled`).

use data_encoding::BASE32_NOPAD;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use stackr_crypto_core::otp::{check_totp, TotpParams, DEFAULT_SKEW};

use crate::backup::generate_backup_codes;
use crate::clock::unix_now;
use crate::error::CredentialError;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Two-factor configuration, passed in by the hosting application.
///
/// The issuer has no compiled-in default — it names the service inside
/// authenticator apps and must be an explicit deployment decision. The
/// remaining fields default to the conventional interoperable values
/// (SHA-1, 6 digits, 30-second period, ±1 step).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwoFactorConfig {
    /// Issuer shown in authenticator apps.
    pub issuer: String,
    /// Code parameters (algorithm, digits, period).
    pub params: TotpParams,
    /// Accepted clock-drift window, in time steps on each side.
    pub skew: u32,
}

impl TwoFactorConfig {
    /// Conventional configuration for the given issuer.
    pub fn new(issuer: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            params: TotpParams::default(),
            skew: DEFAULT_SKEW,
        }
    }
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

/// Two-factor lifecycle state persisted on the account record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TwoFactorState {
    /// No second factor configured.
    #[default]
    Disabled,
    /// A secret has been issued but not yet confirmed by the user.
    PendingVerification,
    /// Two-factor checks are enforced at login.
    Enabled,
}

impl TwoFactorState {
    /// Restart enrollment. Allowed from any state; the caller must issue
    /// a fresh secret (see [`crate::enroll::generate_secret`]) — an old
    /// secret never survives re-enrollment.
    #[must_use]
    pub const fn begin_enrollment(self) -> Self {
        Self::PendingVerification
    }

    /// Turn the second factor off. Allowed from any state. The caller
    /// must discard the stored secret and any remaining backup codes.
    #[must_use]
    pub const fn disable(self) -> Self {
        Self::Disabled
    }
}

/// Result of enabling two-factor: the new state plus the one-time backup
/// codes.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TwoFactorEnablement {
    /// Always [`TwoFactorState::Enabled`]; returned so the caller
    /// persists state and codes from one value.
    pub state: TwoFactorState,
    /// Shown to the user exactly once — this module cannot re-derive
    /// them afterwards.
    pub backup_codes: Vec<String>,
}

/// Commit a pending enrollment: `PendingVerification` → `Enabled`.
///
/// `secret` is the candidate the caller is about to persist; it must be
/// non-empty, decodable base32. A fresh backup-code set is generated as
/// part of the transition.
///
/// # Errors
///
/// `CredentialError::InvalidTransition` from any state other than
/// `PendingVerification`; `CredentialError::Enrollment` if the secret is
/// empty or not base32.
pub fn enable_two_factor(
    current: TwoFactorState,
    secret: &str,
) -> Result<TwoFactorEnablement, CredentialError> {
    if current != TwoFactorState::PendingVerification {
        return Err(CredentialError::InvalidTransition(format!(
            "cannot enable from {current:?}"
        )));
    }
    if decode_secret(secret).is_none() {
        return Err(CredentialError::Enrollment(
            "stored secret is empty or not valid base32".to_owned(),
        ));
    }

    Ok(TwoFactorEnablement {
        state: TwoFactorState::Enabled,
        backup_codes: generate_backup_codes(),
    })
}

// ---------------------------------------------------------------------------
// TOTP verification
// ---------------------------------------------------------------------------

/// Verify a submitted code against the stored base32 secret at the
/// current system time, with the configured drift window.
///
/// Absent/empty/undecodable secrets and malformed submissions return
/// `false`. Stateless: a code stays valid for every call inside its
/// window. There is no "last accepted step" tracking, so a captured code
/// can be replayed for up to ~90 seconds — callers needing one-time
/// semantics must track the last accepted step themselves.
#[must_use]
pub fn verify_token(config: &TwoFactorConfig, stored_secret: &str, submitted_code: &str) -> bool {
    verify_token_at(config, stored_secret, submitted_code, unix_now())
}

/// [`verify_token`] with an explicit unix timestamp, for deterministic
/// tests and clock injection.
#[must_use]
pub fn verify_token_at(
    config: &TwoFactorConfig,
    stored_secret: &str,
    submitted_code: &str,
    now: u64,
) -> bool {
    let Some(mut secret) = decode_secret(stored_secret) else {
        return false;
    };
    let code = submitted_code.trim();
    let ok = !code.is_empty()
        && check_totp(&secret, now, code, &config.params, config.skew).unwrap_or(false);
    secret.zeroize();
    ok
}

/// Decode a stored base32 secret, tolerating lowercase input, surrounding
/// whitespace, and trailing `=` padding.
fn decode_secret(stored: &str) -> Option<Vec<u8>> {
    let normalized = stored.trim().trim_end_matches('=').to_ascii_uppercase();
    if normalized.is_empty() {
        return None;
    }
    BASE32_NOPAD.decode(normalized.as_bytes()).ok()
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
