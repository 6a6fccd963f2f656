//! Signed webhook handling: verify, decode, classify.
//!
//! [`parse_signed_webhook_response`] is the single entry point for a raw
//! request body. [`WebhookVerifier`] wraps it for callers that hold on to a
//! configured secret.

use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::config::Config;
use crate::errors::{Error, Result};
use crate::models::WebhookResponse;
use crate::parse::parse_webhook_response;
use crate::secret::WebhookSecret;
use crate::signing;

/// Verify and parse a signed webhook body.
///
/// The signature is checked first; a body with a bad signature is never
/// decoded. JSON syntax errors and a wrong top-level shape are reported as
/// distinct errors, while notifications of unrecognized shape come back as
/// [`crate::models::WebhookNotification::Unknown`].
#[instrument(skip_all, fields(payload_len = payload.len()))]
pub fn parse_signed_webhook_response(payload: &str, secret: &str, signature: &str) -> Result<WebhookResponse> {
    if !signing::is_signature_valid(payload, secret, signature) {
        warn!("Rejected webhook with invalid signature");
        return Err(Error::SignatureInvalid);
    }

    let value: Value = serde_json::from_str(payload)?;
    let response = parse_webhook_response(value)?;

    debug!(
        notifications = response.len(),
        unknown = response.unknown_count(),
        "Accepted signed webhook"
    );

    Ok(response)
}

/// Holds a webhook secret and checks incoming bodies against it.
#[derive(Debug, Clone)]
pub struct WebhookVerifier {
    secret: WebhookSecret,
}

impl WebhookVerifier {
    pub fn new(secret: impl Into<WebhookSecret>) -> Self {
        Self { secret: secret.into() }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.secret.clone())
    }

    /// Signature the platform would send for `payload`.
    pub fn sign(&self, payload: &str) -> Option<String> {
        signing::sign_payload(payload, self.secret.expose())
    }

    pub fn verify(&self, payload: &str, signature: &str) -> bool {
        signing::is_signature_valid(payload, self.secret.expose(), signature)
    }

    pub fn parse(&self, payload: &str, signature: &str) -> Result<WebhookResponse> {
        parse_signed_webhook_response(payload, self.secret.expose(), signature)
    }
}

impl From<&Config> for WebhookVerifier {
    fn from(config: &Config) -> Self {
        Self::from_config(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContentItemAction, WebhookNotification};
    use crate::test_utils::{asset_envelope, content_item_envelope};
    use serde_json::json;

    const SECRET: &str = "BHPyfqwSy1iJjcscOB+GSkDf9THrBlfcKkwtADJdbP4=";

    fn signed(body: &Value) -> (String, String) {
        let payload = serde_json::to_string_pretty(body).unwrap();
        let signature = signing::sign_payload(&payload, SECRET).unwrap();
        (payload, signature)
    }

    #[test_log::test]
    fn test_valid_signature_parses() {
        let (payload, signature) = signed(&json!({
            "notifications": [content_item_envelope("published", "published"), asset_envelope("created")]
        }));

        let response = parse_signed_webhook_response(&payload, SECRET, &signature).unwrap();

        assert_eq!(response.len(), 2);
        let WebhookNotification::ContentItem(item) = &response.notifications[0] else {
            panic!("expected a content item");
        };
        assert_eq!(item.message.action(), ContentItemAction::Published);
    }

    #[test_log::test]
    fn test_invalid_signature_is_rejected_before_parsing() {
        // Not JSON at all: a signature failure must win over a parse failure.
        let err = parse_signed_webhook_response("{{{", SECRET, "AAAA").unwrap_err();

        assert!(matches!(err, Error::SignatureInvalid));
        assert_eq!(err.to_string(), "Webhook signature validation failed");
        assert_eq!(err.status_code(), http::StatusCode::UNAUTHORIZED);
    }

    #[test_log::test]
    fn test_wrong_secret_is_rejected() {
        let (payload, signature) = signed(&json!({ "notifications": [] }));
        let err = parse_signed_webhook_response(&payload, "another-secret", &signature).unwrap_err();
        assert!(matches!(err, Error::SignatureInvalid));
    }

    #[test_log::test]
    fn test_malformed_json_with_valid_signature() {
        let payload = r#"{"notifications": ["#;
        let signature = signing::sign_payload(payload, SECRET).unwrap();

        let err = parse_signed_webhook_response(payload, SECRET, &signature).unwrap_err();

        assert!(matches!(err, Error::MalformedJson { .. }));
        assert_eq!(err.status_code(), http::StatusCode::BAD_REQUEST);
    }

    #[test_log::test]
    fn test_schema_error_with_valid_signature() {
        let (payload, signature) = signed(&json!({ "invalid": "data" }));

        let err = parse_signed_webhook_response(&payload, SECRET, &signature).unwrap_err();

        let Error::SchemaInvalid(validation) = &err else {
            panic!("expected a schema error, got {err:?}");
        };
        assert_eq!(validation.issues[0].path, "notifications");
        assert_eq!(err.status_code(), http::StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test_log::test]
    fn test_crlf_body_verifies_against_lf_signature() {
        let (payload, signature) = signed(&json!({ "notifications": [] }));
        let crlf = payload.replace('\n', "\r\n");

        assert!(parse_signed_webhook_response(&crlf, SECRET, &signature).is_ok());
    }

    #[test_log::test]
    fn test_verifier_round_trip() {
        let verifier = WebhookVerifier::new(SECRET);
        let payload = r#"{"notifications":[]}"#;

        let signature = verifier.sign(payload).unwrap();
        assert!(verifier.verify(payload, &signature));
        assert!(!verifier.verify(payload, "AAAA"));
        assert!(verifier.parse(payload, &signature).unwrap().is_empty());
    }

    #[test]
    fn test_verifier_from_config() {
        let config = Config {
            secret: WebhookSecret::new(SECRET),
            ..Default::default()
        };
        let verifier = WebhookVerifier::from(&config);

        assert_eq!(verifier.sign("body"), signing::sign_payload("body", SECRET));
        assert!(!format!("{verifier:?}").contains(SECRET));
    }
}
