//! Classification of webhook bodies into typed notifications.
//!
//! Only the top-level shape can fail a parse: the body must be an object with
//! a `notifications` array. Each element is then classified on its own by
//! trying the known shapes in a fixed order (asset, content item, content
//! type, language, taxonomy) and taking the first that matches both
//! `data.system` and `message`. An element that matches none becomes
//! [`WebhookNotification::Unknown`] holding the element exactly as received,
//! so new event types never break a batch.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::errors::ValidationError;
use crate::models::{
    AssetNotification, ContentItemNotification, ContentTypeNotification, LanguageNotification, ObjectType, TaxonomyNotification,
    UnknownNotification, WebhookNotification, WebhookResponse,
};

const NOTIFICATIONS: &str = "notifications";

type Attempt = fn(&Value) -> Result<WebhookNotification, serde_json::Error>;

const ATTEMPTS: [(ObjectType, Attempt); 5] = [
    (ObjectType::Asset, |value: &Value| {
        AssetNotification::deserialize(value).map(WebhookNotification::Asset)
    }),
    (ObjectType::ContentItem, |value: &Value| {
        ContentItemNotification::deserialize(value).map(WebhookNotification::ContentItem)
    }),
    (ObjectType::ContentType, |value: &Value| {
        ContentTypeNotification::deserialize(value).map(WebhookNotification::ContentType)
    }),
    (ObjectType::Language, |value: &Value| {
        LanguageNotification::deserialize(value).map(WebhookNotification::Language)
    }),
    (ObjectType::Taxonomy, |value: &Value| {
        TaxonomyNotification::deserialize(value).map(WebhookNotification::Taxonomy)
    }),
];

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn root_mismatch(value: &Value) -> ValidationError {
    ValidationError::new("", format!("expected object, received {}", json_kind(value)))
}

fn notifications_mismatch(member: Option<&Value>) -> ValidationError {
    match member {
        None => ValidationError::new(NOTIFICATIONS, "required"),
        Some(other) => ValidationError::new(NOTIFICATIONS, format!("expected array, received {}", json_kind(other))),
    }
}

/// Borrow the `notifications` array, or describe why the body has none.
fn notifications_of(value: &Value) -> Result<&Vec<Value>, ValidationError> {
    let object = value.as_object().ok_or_else(|| root_mismatch(value))?;

    match object.get(NOTIFICATIONS) {
        Some(Value::Array(notifications)) => Ok(notifications),
        member => Err(notifications_mismatch(member)),
    }
}

fn try_known_shapes(value: &Value) -> Result<WebhookNotification, Vec<(ObjectType, serde_json::Error)>> {
    let mut mismatches = Vec::with_capacity(ATTEMPTS.len());

    for (object_type, attempt) in ATTEMPTS {
        match attempt(value) {
            Ok(notification) => return Ok(notification),
            Err(e) => mismatches.push((object_type, e)),
        }
    }

    Err(mismatches)
}

fn log_unknown(mismatches: &[(ObjectType, serde_json::Error)]) {
    let reasons = mismatches
        .iter()
        .map(|(object_type, e)| format!("{object_type}: {e}"))
        .collect::<Vec<_>>()
        .join("; ");
    debug!(%reasons, "Notification did not match any known shape, keeping it as unknown");
}

/// Classify a single notification envelope.
///
/// Never fails: anything that doesn't match a known shape is returned as
/// [`WebhookNotification::Unknown`] with the value untouched.
pub fn classify_notification(value: Value) -> WebhookNotification {
    match try_known_shapes(&value) {
        Ok(notification) => notification,
        Err(mismatches) => {
            log_unknown(&mismatches);
            WebhookNotification::Unknown(UnknownNotification {
                original_notification: value,
            })
        }
    }
}

/// Borrowing variant of [`classify_notification`]; clones only what it keeps.
pub fn classify_notification_ref(value: &Value) -> WebhookNotification {
    match try_known_shapes(value) {
        Ok(notification) => notification,
        Err(mismatches) => {
            log_unknown(&mismatches);
            WebhookNotification::Unknown(UnknownNotification {
                original_notification: value.clone(),
            })
        }
    }
}

fn summarize(response: &WebhookResponse) {
    debug!(
        notifications = response.len(),
        unknown = response.unknown_count(),
        "Parsed webhook response"
    );
}

/// Parse a decoded webhook body, taking ownership of it.
///
/// Fails only when the body is not an object with a `notifications` array;
/// individual notifications never fail the parse.
pub fn parse_webhook_response(value: Value) -> Result<WebhookResponse, ValidationError> {
    let notifications = match value {
        Value::Object(mut object) => match object.remove(NOTIFICATIONS) {
            Some(Value::Array(notifications)) => notifications,
            member => return Err(notifications_mismatch(member.as_ref())),
        },
        other => return Err(root_mismatch(&other)),
    };

    let response = WebhookResponse {
        notifications: notifications.into_iter().map(classify_notification).collect(),
    };
    summarize(&response);

    Ok(response)
}

/// Parse a decoded webhook body without consuming it.
///
/// Same rules as [`parse_webhook_response`]; never panics.
pub fn parse_webhook_response_safe(value: &Value) -> Result<WebhookResponse, ValidationError> {
    let notifications = notifications_of(value)?;

    let response = WebhookResponse {
        notifications: notifications.iter().map(classify_notification_ref).collect(),
    };
    summarize(&response);

    Ok(response)
}
