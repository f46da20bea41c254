#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

//! Property-based tests for backup-code consumption.

use proptest::prelude::*;
use stackr_credential::verify_backup_code;

fn code_strategy() -> impl Strategy<Value = String> {
    "[0-9A-F]{8}"
}

proptest! {
    /// A present code is consumed exactly once; an absent one changes
    /// nothing.
    #[test]
    fn consumption_invariants(
        codes in proptest::collection::vec(code_strategy(), 0..12),
        pick in any::<prop::sample::Index>(),
        absent in "[g-z]{8}",
    ) {
        // Absent submissions leave the list unchanged.
        let miss = verify_backup_code(&codes, &absent);
        prop_assert!(!miss.valid);
        prop_assert_eq!(&miss.remaining_codes, &codes);

        if !codes.is_empty() {
            let submitted = codes[pick.index(codes.len())].clone();
            let hit = verify_backup_code(&codes, &submitted);
            prop_assert!(hit.valid);
            prop_assert_eq!(hit.remaining_codes.len(), codes.len() - 1);

            // Duplicates aside, the consumed code is gone from the
            // remainder; every other code survives.
            let consumed_count =
                codes.iter().filter(|c| **c == submitted).count();
            let remaining_count =
                hit.remaining_codes.iter().filter(|c| **c == submitted).count();
            prop_assert_eq!(remaining_count, consumed_count - 1);
        }
    }
}
