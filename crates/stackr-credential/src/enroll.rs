//! Two-factor enrollment material: shared secret, `otpauth://` URI, QR code.
//!
//! Nothing here is persisted by this crate. The caller holds the secret
//! server-side pending confirmation (see
//! [`crate::twofactor::enable_two_factor`]) and renders the URI/QR to the
//! user once; the QR image is a pure transform of the URI and carries no
//! extra secret material.

use core::fmt;

use data_encoding::{BASE32_NOPAD, BASE64};
use qrcode::render::svg;
use qrcode::QrCode;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::Serialize;
use zeroize::Zeroize;

use crate::error::CredentialError;
use crate::twofactor::TwoFactorConfig;

/// Shared-secret entropy in bytes (160 bits → 32 base32 characters).
pub const SECRET_LEN: usize = 20;

/// Rendered QR edge length in pixels.
const QR_MIN_DIMENSIONS: u32 = 200;

/// Enrollment material returned to the caller.
///
/// Only `secret` outlives the enrollment screen; the URI and QR image are
/// display-only.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TwoFactorEnrollment {
    /// Base32 shared secret (RFC 4648, no padding).
    pub secret: String,
    /// `otpauth://totp/...` URI for authenticator apps.
    pub otpauth_uri: String,
    /// The URI rendered as an SVG data URI.
    pub qr_code_data_uri: String,
}

impl fmt::Debug for TwoFactorEnrollment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TwoFactorEnrollment(***)")
    }
}

/// Generate fresh enrollment material for an account.
///
/// `account_label` identifies the account inside the authenticator app
/// (typically the user's email address).
///
/// # Errors
///
/// `CredentialError::Enrollment` if the label is blank or the URI cannot
/// be rendered as a QR code.
pub fn generate_secret(
    config: &TwoFactorConfig,
    account_label: &str,
) -> Result<TwoFactorEnrollment, CredentialError> {
    if account_label.trim().is_empty() {
        return Err(CredentialError::Enrollment(
            "account label must not be empty".to_owned(),
        ));
    }

    let mut raw = [0u8; SECRET_LEN];
    OsRng.fill_bytes(&mut raw);
    let secret = BASE32_NOPAD.encode(&raw);
    raw.zeroize();

    let otpauth_uri = build_otpauth_uri(config, account_label, &secret);
    let qr_code_data_uri = render_qr_data_uri(&otpauth_uri)?;

    Ok(TwoFactorEnrollment {
        secret,
        otpauth_uri,
        qr_code_data_uri,
    })
}

/// Build the `otpauth://totp/` URI per the Key Uri format, with the
/// issuer both in the label prefix and as an explicit parameter (some
/// apps only read one of the two).
fn build_otpauth_uri(config: &TwoFactorConfig, account_label: &str, secret: &str) -> String {
    let issuer = urlencoding::encode(&config.issuer);
    let label = urlencoding::encode(account_label);
    format!(
        "otpauth://totp/{issuer}:{label}?secret={secret}&issuer={issuer}\
         &algorithm={algorithm}&digits={digits}&period={period}",
        algorithm = config.params.algorithm.uri_name(),
        digits = config.params.digits.value(),
        period = config.params.period,
    )
}

/// Render a string as a QR code, packaged as an SVG data URI.
fn render_qr_data_uri(contents: &str) -> Result<String, CredentialError> {
    let code = QrCode::new(contents.as_bytes()).map_err(|e| {
        tracing::warn!(error = %e, "QR encoding failed during enrollment");
        CredentialError::Enrollment(format!("QR encoding failed: {e}"))
    })?;
    let image = code
        .render::<svg::Color<'_>>()
        .min_dimensions(QR_MIN_DIMENSIONS, QR_MIN_DIMENSIONS)
        .build();
    Ok(format!(
        "data:image/svg+xml;base64,{}",
        BASE64.encode(image.as_bytes())
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TwoFactorConfig {
        TwoFactorConfig::new("Stackr Finance")
    }

    #[test]
    fn secret_is_32_base32_chars() {
        let enrollment = generate_secret(&config(), "alice@example.com").expect("enroll");
        assert_eq!(enrollment.secret.len(), 32);
        assert!(BASE32_NOPAD
            .decode(enrollment.secret.as_bytes())
            .is_ok());
    }

    #[test]
    fn secrets_do_not_repeat() {
        let a = generate_secret(&config(), "alice@example.com").expect("enroll");
        let b = generate_secret(&config(), "alice@example.com").expect("enroll");
        assert_ne!(a.secret, b.secret);
    }

    #[test]
    fn uri_has_expected_shape() {
        let enrollment = generate_secret(&config(), "alice@example.com").expect("enroll");
        let uri = &enrollment.otpauth_uri;
        assert!(uri.starts_with("otpauth://totp/"));
        assert!(uri.contains(&format!("secret={}", enrollment.secret)));
        assert!(uri.contains("issuer=Stackr%20Finance"));
        assert!(uri.contains("algorithm=SHA1"));
        assert!(uri.contains("digits=6"));
        assert!(uri.contains("period=30"));
    }

    #[test]
    fn label_is_percent_encoded() {
        let enrollment = generate_secret(&config(), "alice liddell@example.com").expect("enroll");
        assert!(enrollment
            .otpauth_uri
            .contains("alice%20liddell%40example.com"));
    }

    #[test]
    fn qr_is_an_svg_data_uri() {
        let enrollment = generate_secret(&config(), "alice@example.com").expect("enroll");
        assert!(enrollment
            .qr_code_data_uri
            .starts_with("data:image/svg+xml;base64,"));
        let payload = enrollment
            .qr_code_data_uri
            .trim_start_matches("data:image/svg+xml;base64,");
        let decoded = BASE64.decode(payload.as_bytes()).expect("base64");
        let svg_text = String::from_utf8(decoded).expect("utf8");
        assert!(svg_text.contains("<svg"));
    }

    #[test]
    fn blank_label_is_rejected() {
        for label in ["", "   "] {
            assert!(matches!(
                generate_secret(&config(), label),
                Err(CredentialError::Enrollment(_))
            ));
        }
    }

    #[test]
    fn debug_output_masks_the_secret() {
        let enrollment = generate_secret(&config(), "alice@example.com").expect("enroll");
        let debug = format!("{enrollment:?}");
        assert_eq!(debug, "TwoFactorEnrollment(***)");
        assert!(!debug.contains(&enrollment.secret));
    }

    #[test]
    fn enrollment_serializes_camel_case() {
        let enrollment = generate_secret(&config(), "alice@example.com").expect("enroll");
        let json = serde_json::to_string(&enrollment).expect("serialize");
        assert!(json.contains("otpauthUri"));
        assert!(json.contains("qrCodeDataUri"));
    }
}
