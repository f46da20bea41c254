//! One-time backup codes for two-factor recovery.
//!
//! A code substitutes for a TOTP code when the user loses their
//! authenticator. Verification is pure: it returns a *new* list with the
//! consumed code removed and never mutates caller-owned state. The caller
//! MUST persist `remaining_codes` after a successful match, and must
//! serialize the fetch → verify → persist sequence per user (a lock or a
//! transactional update) — two concurrent submissions of the same code
//! both succeed if neither removal has been persisted yet.

use data_encoding::HEXUPPER;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use stackr_crypto_core::constant_time_eq;

/// Number of codes in a freshly generated set.
pub const BACKUP_CODE_COUNT: usize = 10;

/// Raw entropy per code in bytes; encodes to 8 uppercase hex characters.
const CODE_ENTROPY_LEN: usize = 4;

/// Generate a fresh set of [`BACKUP_CODE_COUNT`] unique codes.
///
/// The 32-bit code space makes an intra-batch collision unlikely but not
/// impossible; duplicates are regenerated rather than handed out.
#[must_use]
pub fn generate_backup_codes() -> Vec<String> {
    let mut codes: Vec<String> = Vec::with_capacity(BACKUP_CODE_COUNT);
    while codes.len() < BACKUP_CODE_COUNT {
        let mut raw = [0u8; CODE_ENTROPY_LEN];
        OsRng.fill_bytes(&mut raw);
        let code = HEXUPPER.encode(&raw);
        if !codes.contains(&code) {
            codes.push(code);
        }
    }
    codes
}

/// Outcome of a backup-code verification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupCodeOutcome {
    /// Whether the submitted code matched.
    pub valid: bool,
    /// The list to persist: on a match, the input minus the consumed
    /// code; otherwise the input unchanged.
    pub remaining_codes: Vec<String>,
}

/// Check a submitted code against the stored list (case-sensitive).
///
/// The whole list is scanned even after a match, and each candidate is
/// compared in constant time, so timing reveals neither the matched
/// position nor near-misses.
#[must_use]
pub fn verify_backup_code(existing_codes: &[String], submitted: &str) -> BackupCodeOutcome {
    let mut matched: Option<usize> = None;
    for (idx, code) in existing_codes.iter().enumerate() {
        if constant_time_eq(code.as_bytes(), submitted.as_bytes()) && matched.is_none() {
            matched = Some(idx);
        }
    }

    matched.map_or_else(
        || BackupCodeOutcome {
            valid: false,
            remaining_codes: existing_codes.to_vec(),
        },
        |consumed| BackupCodeOutcome {
            valid: true,
            remaining_codes: existing_codes
                .iter()
                .enumerate()
                .filter(|(idx, _)| *idx != consumed)
                .map(|(_, code)| code.clone())
                .collect(),
        },
    )
}
