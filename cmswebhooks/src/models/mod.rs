//! Typed webhook notifications.
//!
//! - [`events`]: object types, delivery slots and per-object actions
//! - [`system`]: `data.system` records
//! - [`messages`]: `message` records, including the content item refinements
//! - [`notifications`]: the [`WebhookNotification`] sum type and [`WebhookResponse`]

pub mod events;
pub mod messages;
pub mod notifications;
pub mod system;
mod wire;

pub use events::{
    AssetAction, ContentItemAction, ContentItemPreviewAction, ContentItemPublishedAction, ContentTypeAction, DeliverySlot,
    LanguageAction, ObjectType, TaxonomyAction, UnknownVariant,
};
pub use messages::{
    ActionContext, AssetMessage, ContentItemMessage, ContentItemPreviewMessage, ContentItemPublishedMessage,
    ContentItemWorkflowChangedPreviewMessage, ContentTypeMessage, LanguageMessage, MessageAction, ObjectMessage, ShapeMismatch,
    TaxonomyMessage, WebhookMessage,
};
pub use notifications::{
    AssetNotification, ContentItemNotification, ContentTypeNotification, LanguageNotification, Notification, TaxonomyNotification,
    UnknownNotification, WebhookNotification, WebhookResponse,
};
pub use system::{ItemObjectData, NotificationData, ObjectData};
