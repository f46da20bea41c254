#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

//! Property-based tests for the OTP engine.

use proptest::prelude::*;
use stackr_crypto_core::otp::{
    check_totp, hotp, totp_at, OtpAlgorithm, OtpDigits, TotpParams, DEFAULT_SKEW,
};

fn digits_strategy() -> impl Strategy<Value = OtpDigits> {
    prop_oneof![Just(OtpDigits::Six), Just(OtpDigits::Eight)]
}

fn algorithm_strategy() -> impl Strategy<Value = OtpAlgorithm> {
    prop_oneof![
        Just(OtpAlgorithm::Sha1),
        Just(OtpAlgorithm::Sha256),
        Just(OtpAlgorithm::Sha512),
    ]
}

proptest! {
    /// The code is always exactly `digits` ASCII digits.
    #[test]
    fn code_shape_is_invariant(
        secret in proptest::collection::vec(any::<u8>(), 1..64),
        counter in any::<u64>(),
        digits in digits_strategy(),
        algorithm in algorithm_strategy(),
    ) {
        let code = hotp(&secret, counter, digits, algorithm).unwrap();
        prop_assert_eq!(code.len(), usize::from(digits.value()));
        prop_assert!(code.chars().all(|c| c.is_ascii_digit()));
    }

    /// Generation is deterministic for fixed inputs.
    #[test]
    fn generation_is_deterministic(
        secret in proptest::collection::vec(any::<u8>(), 1..64),
        counter in any::<u64>(),
        digits in digits_strategy(),
        algorithm in algorithm_strategy(),
    ) {
        let a = hotp(&secret, counter, digits, algorithm).unwrap();
        let b = hotp(&secret, counter, digits, algorithm).unwrap();
        prop_assert_eq!(a, b);
    }

    /// A freshly generated code always validates at its own timestamp and
    /// at the adjacent steps covered by the default window.
    #[test]
    fn generated_code_validates_within_window(
        secret in proptest::collection::vec(any::<u8>(), 1..64),
        time in 0u64..=4_000_000_000,
        digits in digits_strategy(),
        algorithm in algorithm_strategy(),
    ) {
        let params = TotpParams { digits, period: 30, algorithm };
        let code = totp_at(&secret, time, &params).unwrap();

        prop_assert!(check_totp(&secret, time, &code, &params, DEFAULT_SKEW).unwrap());
        prop_assert!(check_totp(&secret, time + 30, &code, &params, DEFAULT_SKEW).unwrap());
        prop_assert!(
            check_totp(&secret, time.saturating_sub(30), &code, &params, DEFAULT_SKEW).unwrap()
        );
    }

    /// Candidates of the wrong length never validate.
    #[test]
    fn wrong_length_candidate_never_validates(
        secret in proptest::collection::vec(any::<u8>(), 1..64),
        time in any::<u64>(),
        candidate in "[0-9]{1,5}",
    ) {
        let params = TotpParams::default();
        prop_assert!(!check_totp(&secret, time, &candidate, &params, DEFAULT_SKEW).unwrap());
    }
}
