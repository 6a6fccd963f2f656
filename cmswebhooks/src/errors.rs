use http::StatusCode;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
    /// Signature header does not match the body and secret
    #[error("Webhook signature validation failed")]
    SignatureInvalid,

    /// Body is not valid JSON
    #[error("Failed to parse payload: {source}")]
    MalformedJson {
        #[source]
        source: serde_json::Error,
    },

    /// Body is JSON but not a webhook response
    #[error("Invalid webhook payload: {0}")]
    SchemaInvalid(#[from] ValidationError),

    /// Configuration rejected by [`crate::config::Config::validate`]
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl Error {
    /// Status a receiving endpoint should answer with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::SignatureInvalid => StatusCode::UNAUTHORIZED,
            Error::MalformedJson { .. } => StatusCode::BAD_REQUEST,
            Error::SchemaInvalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::InvalidConfig { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns a message safe to send back to the caller, without parser
    /// internals or configuration details.
    pub fn user_message(&self) -> String {
        match self {
            Error::SignatureInvalid => "Webhook signature validation failed".to_string(),
            Error::MalformedJson { .. } => "Failed to parse payload".to_string(),
            Error::SchemaInvalid(err) => format!("Invalid webhook payload: {err}"),
            Error::InvalidConfig { .. } => "Internal server error".to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Error::MalformedJson { source }
    }
}

/// One structural problem with a webhook body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Dotted path to the offending member, empty for the document root
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// The top-level shape of a webhook body is wrong.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("{}", join_issues(.issues))]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            issues: vec![ValidationIssue {
                path: path.into(),
                message: message.into(),
            }],
        }
    }
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

/// Type alias for webhook operation results
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::SignatureInvalid.status_code(), StatusCode::UNAUTHORIZED);

        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        assert_eq!(Error::from(json_err).status_code(), StatusCode::BAD_REQUEST);

        let schema_err = Error::from(ValidationError::new("notifications", "required"));
        assert_eq!(schema_err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError {
            issues: vec![
                ValidationIssue {
                    path: String::new(),
                    message: "expected object, received array".to_string(),
                },
                ValidationIssue {
                    path: "notifications".to_string(),
                    message: "required".to_string(),
                },
            ],
        };

        assert_eq!(err.to_string(), "(root): expected object, received array; notifications: required");
        assert_eq!(
            Error::from(err).to_string(),
            "Invalid webhook payload: (root): expected object, received array; notifications: required"
        );
    }

    #[test]
    fn test_user_message_hides_parser_details() {
        let json_err = serde_json::from_str::<serde_json::Value>("{\"a\": }").unwrap_err();
        let err = Error::from(json_err);

        assert!(err.to_string().starts_with("Failed to parse payload: "));
        assert_eq!(err.user_message(), "Failed to parse payload");
    }
}
