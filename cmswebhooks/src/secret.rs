use std::fmt;

use serde::Deserialize;

/// Shared webhook secret. Never shown by `Debug`.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct WebhookSecret(String);

impl WebhookSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for WebhookSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WebhookSecret").field(&"<redacted>").finish()
    }
}

impl From<String> for WebhookSecret {
    fn from(secret: String) -> Self {
        Self(secret)
    }
}

impl From<&str> for WebhookSecret {
    fn from(secret: &str) -> Self {
        Self(secret.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_is_redacted() {
        let secret = WebhookSecret::from("hx3snVrI9E2Lgpi1LaL+WfiPWCh88OjI7Bv/3ihq+Qo=");
        let debug = format!("{secret:?}");

        assert_eq!(debug, r#"WebhookSecret("<redacted>")"#);
        assert!(!debug.contains("hx3sn"));
        assert_eq!(secret.expose(), "hx3snVrI9E2Lgpi1LaL+WfiPWCh88OjI7Bv/3ihq+Qo=");
    }

    #[test]
    fn test_deserializes_from_plain_string() {
        let secret: WebhookSecret = serde_json::from_str(r#""s3cr3t""#).unwrap();
        assert_eq!(secret, WebhookSecret::new("s3cr3t"));
        assert!(!secret.is_empty());
    }
}
