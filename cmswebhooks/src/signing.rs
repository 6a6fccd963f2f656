//! HMAC-SHA256 signing and verification of webhook payloads.
//!
//! The platform signs each webhook as follows:
//! - the raw JSON body has its line breaks canonicalized to `\r\n`
//!   (see [`crate::canonical`])
//! - the signature is the base64-encoded HMAC-SHA256 of that text, keyed with
//!   the UTF-8 bytes of the webhook secret
//! - the result is sent in a signature header alongside the body
//!
//! Verification owns the canonicalization step: callers pass the body exactly
//! as received.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64_STANDARD};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::canonical::normalize_line_breaks;

type HmacSha256 = Hmac<Sha256>;

/// Compute the base64 HMAC-SHA256 digest of `payload` keyed by `secret`.
///
/// The payload is hashed as given; use [`sign_payload`] to get the signature
/// the platform would send for a raw body.
///
/// Returns `None` only if the MAC cannot be keyed, which HMAC never refuses.
pub fn compute_digest(payload: &str, secret: &str) -> Option<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(payload.as_bytes());
    let digest = mac.finalize().into_bytes();

    Some(BASE64_STANDARD.encode(digest))
}

/// Sign a raw webhook body the same way the platform does: canonicalize line
/// breaks, then digest.
pub fn sign_payload(payload: &str, secret: &str) -> Option<String> {
    compute_digest(&normalize_line_breaks(payload), secret)
}

/// Verify a webhook signature.
///
/// # Arguments
///
/// * `payload` - The raw request body, not pre-normalized
/// * `secret` - The webhook secret shared with the platform
/// * `signature` - The signature header value (base64)
///
/// # Returns
///
/// `true` if the signature matches, `false` otherwise. Never panics.
pub fn is_signature_valid(payload: &str, secret: &str, signature: &str) -> bool {
    let Some(expected) = sign_payload(payload, secret) else {
        return false;
    };

    // Digest length is fixed for a given algorithm, so this leaks nothing.
    if expected.len() != signature.len() {
        return false;
    }

    expected.as_bytes().ct_eq(signature.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SECRET: &str = "hx3snVrI9E2Lgpi1LaL+WfiPWCh88OjI7Bv/3ihq+Qo=";

    #[test]
    fn test_compute_digest_known_vector() {
        // HMAC-SHA256("key", "The quick brown fox jumps over the lazy dog")
        let digest = compute_digest("The quick brown fox jumps over the lazy dog", "key").expect("should sign");
        assert_eq!(digest, "97yD9DBThCSxMpjmqm+xQ+9NWaFJRhdZl0edvC0aPNg=");
    }

    #[test]
    fn test_compute_digest_is_deterministic() {
        let a = compute_digest(r#"{"test":"data"}"#, SECRET);
        let b = compute_digest(r#"{"test":"data"}"#, SECRET);
        assert_eq!(a, b);
        assert_eq!(a.expect("should sign").len(), 44);
    }

    #[test]
    fn test_sign_and_verify() {
        let payload = r#"{"notifications":[]}"#;
        let signature = sign_payload(payload, SECRET).expect("should sign");

        assert!(is_signature_valid(payload, SECRET, &signature));

        // Wrong payload should fail
        assert!(!is_signature_valid(r#"{"notifications":[{}]}"#, SECRET, &signature));

        // Wrong secret should fail
        assert!(!is_signature_valid(payload, "wrong_secret_key_here", &signature));
    }

    #[test]
    fn test_verify_rejects_malformed_signatures() {
        let payload = r#"{"notifications":[]}"#;
        assert!(!is_signature_valid(payload, SECRET, "invalid_signature"));
        assert!(!is_signature_valid(payload, SECRET, ""));

        // Same length as a real digest but different content
        let forged = "A".repeat(43) + "=";
        assert!(!is_signature_valid(payload, SECRET, &forged));
    }

    #[test]
    fn test_trailing_whitespace_changes_signature() {
        let plain = sign_payload(r#"{"test":"data"}"#, SECRET).expect("should sign");
        let trailing = sign_payload(r#"{"test":"data"} "#, SECRET).expect("should sign");

        assert_ne!(plain, trailing);
        assert!(!is_signature_valid(r#"{"test":"data"} "#, SECRET, &plain));
    }

    #[test]
    fn test_lf_and_crlf_bodies_verify_against_the_same_signature() {
        let lf = "{\"test\":\n\"data\"}";
        let crlf = "{\"test\":\r\n\"data\"}";

        let signature = compute_digest(&normalize_line_breaks(lf), SECRET).expect("should sign");

        assert!(is_signature_valid(lf, SECRET, &signature));
        assert!(is_signature_valid(crlf, SECRET, &signature));
    }

    #[test]
    fn test_digest_of_unnormalized_body_does_not_verify() {
        let lf = "{\"test\":\n\"data\"}";
        let raw_signature = compute_digest(lf, SECRET).expect("should sign");

        assert!(!is_signature_valid(lf, SECRET, &raw_signature));
    }

    proptest! {
        #[test]
        fn prop_signed_payload_verifies(payload in "\\PC{0,128}", secret in "[ -~]{1,48}") {
            let signature = compute_digest(&normalize_line_breaks(&payload), &secret).expect("should sign");
            prop_assert!(is_signature_valid(&payload, &secret, &signature));
        }

        #[test]
        fn prop_single_bit_flip_invalidates(
            payload in "[a-zA-Z0-9{}\":,]{1,128}",
            index in any::<prop::sample::Index>(),
            bit in 0u8..7,
        ) {
            let signature = sign_payload(&payload, SECRET).expect("should sign");

            // Restricting to ASCII and bits 0..7 keeps the mutation valid UTF-8
            // and away from the line-break characters.
            let mut bytes = payload.clone().into_bytes();
            let i = index.index(bytes.len());
            bytes[i] ^= 1 << bit;
            let mutated = String::from_utf8(bytes).expect("ascii stays utf-8");
            prop_assume!(!mutated.contains(['\r', '\n']));

            prop_assert!(!is_signature_valid(&mutated, SECRET, &signature));
        }
    }
}
