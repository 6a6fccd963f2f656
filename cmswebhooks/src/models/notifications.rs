//! Notification variants and the top-level webhook response.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::events::ObjectType;
use super::messages::{AssetMessage, ContentItemMessage, ContentTypeMessage, LanguageMessage, TaxonomyMessage, WebhookMessage};
use super::system::{ItemObjectData, NotificationData, ObjectData};
use crate::parse::classify_notification;

/// One `{data, message}` envelope of a known shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification<S, M> {
    pub data: NotificationData<S>,
    pub message: M,
}

impl<S, M> Notification<S, M> {
    pub fn system(&self) -> &S {
        &self.data.system
    }
}

pub type AssetNotification = Notification<ObjectData, AssetMessage>;
pub type ContentItemNotification = Notification<ItemObjectData, ContentItemMessage>;
pub type ContentTypeNotification = Notification<ObjectData, ContentTypeMessage>;
pub type LanguageNotification = Notification<ObjectData, LanguageMessage>;
pub type TaxonomyNotification = Notification<ObjectData, TaxonomyMessage>;

/// A notification that matched none of the known shapes, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnknownNotification {
    pub original_notification: Value,
}

/// A single notification, discriminated by `object_type`.
///
/// Serializes with an `object_type` member next to `data` and `message`
/// (`"unknown"` with `original_notification` for the fallback). Deserializing
/// unwraps that unknown form and runs the classifier on anything else, so
/// this crate's own output reads back as an equal value. Platform bodies go
/// through [`crate::parse`], which never unwraps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "object_type", rename_all = "snake_case")]
pub enum WebhookNotification {
    Asset(AssetNotification),
    ContentItem(ContentItemNotification),
    ContentType(ContentTypeNotification),
    Language(LanguageNotification),
    Taxonomy(TaxonomyNotification),
    Unknown(UnknownNotification),
}

/// This crate's own serialized form of an unknown notification.
fn serialized_unknown(value: &mut Value) -> Option<Value> {
    let object = value.as_object_mut()?;
    if object.get("object_type")?.as_str()? != "unknown" {
        return None;
    }
    object.remove("original_notification")
}

impl<'de> Deserialize<'de> for WebhookNotification {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut value = Value::deserialize(deserializer)?;

        if let Some(original_notification) = serialized_unknown(&mut value) {
            return Ok(Self::Unknown(UnknownNotification { original_notification }));
        }

        Ok(classify_notification(value))
    }
}

impl WebhookNotification {
    /// `None` for [`WebhookNotification::Unknown`].
    pub fn object_type(&self) -> Option<ObjectType> {
        self.message().map(|message| message.object_type())
    }

    pub fn message(&self) -> Option<WebhookMessage<'_>> {
        match self {
            Self::Asset(n) => Some(WebhookMessage::Asset(&n.message)),
            Self::ContentItem(n) => Some(WebhookMessage::ContentItem(&n.message)),
            Self::ContentType(n) => Some(WebhookMessage::ContentType(&n.message)),
            Self::Language(n) => Some(WebhookMessage::Language(&n.message)),
            Self::Taxonomy(n) => Some(WebhookMessage::Taxonomy(&n.message)),
            Self::Unknown(_) => None,
        }
    }

    /// Object-level system fields; for content items, the embedded subset.
    pub fn system(&self) -> Option<&ObjectData> {
        match self {
            Self::Asset(n) => Some(n.system()),
            Self::ContentItem(n) => Some(&n.system().object),
            Self::ContentType(n) => Some(n.system()),
            Self::Language(n) => Some(n.system()),
            Self::Taxonomy(n) => Some(n.system()),
            Self::Unknown(_) => None,
        }
    }

    /// A content item notification, carrying item-level system fields.
    pub fn is_item_notification(&self) -> bool {
        matches!(self, Self::ContentItem(_))
    }

    /// A notification about an asset, content type, language or taxonomy.
    pub fn is_object_notification(&self) -> bool {
        matches!(self, Self::Asset(_) | Self::ContentType(_) | Self::Language(_) | Self::Taxonomy(_))
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }
}

/// Body of a webhook request: an ordered batch of notifications.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookResponse {
    pub notifications: Vec<WebhookNotification>,
}

impl WebhookResponse {
    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WebhookNotification> {
        self.notifications.iter()
    }

    /// Notifications that matched a known shape, in order.
    pub fn known(&self) -> impl Iterator<Item = &WebhookNotification> {
        self.notifications.iter().filter(|n| !n.is_unknown())
    }

    pub fn unknown_count(&self) -> usize {
        self.notifications.iter().filter(|n| n.is_unknown()).count()
    }
}

impl<'a> IntoIterator for &'a WebhookResponse {
    type Item = &'a WebhookNotification;
    type IntoIter = std::slice::Iter<'a, WebhookNotification>;

    fn into_iter(self) -> Self::IntoIter {
        self.notifications.iter()
    }
}

impl IntoIterator for WebhookResponse {
    type Item = WebhookNotification;
    type IntoIter = std::vec::IntoIter<WebhookNotification>;

    fn into_iter(self) -> Self::IntoIter {
        self.notifications.into_iter()
    }
}
