//! `message` records describing the event that triggered a notification.
//!
//! Messages for assets, content types, languages and taxonomies share one
//! shape and differ only in `object_type` and the allowed actions, so they are
//! a single generic [`ObjectMessage`]. Content item messages are split by
//! delivery slot and action into three shapes, collected in
//! [`ContentItemMessage`]. A slot/action combination that none of the three
//! accepts is not a content item message at all.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::events::{
    AssetAction, ContentItemAction, ContentItemPreviewAction, ContentItemPublishedAction, ContentTypeAction, DeliverySlot,
    LanguageAction, ObjectType, TaxonomyAction, UnknownVariant,
};
use super::wire::MessageWire;

const WORKFLOW_STEP_CHANGED: &str = "workflow_step_changed";

/// Why a `message` record does not have a particular shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeMismatch {
    #[error("expected object_type `{expected}`, found `{found}`")]
    ObjectType { expected: ObjectType, found: String },

    #[error("expected delivery_slot `{expected}`, found `{found}`")]
    DeliverySlot { expected: DeliverySlot, found: String },

    #[error(transparent)]
    UnknownVariant(#[from] UnknownVariant),

    #[error("invalid action_context: {0}")]
    ActionContext(String),

    #[error("no content item shape matched (preview: {preview}; workflow step change: {workflow_changed}; published: {published})")]
    ContentItem {
        preview: Box<ShapeMismatch>,
        workflow_changed: Box<ShapeMismatch>,
        published: Box<ShapeMismatch>,
    },
}

fn expect_object_type(wire: &MessageWire, expected: ObjectType) -> Result<(), ShapeMismatch> {
    if wire.object_type == expected.as_str() {
        Ok(())
    } else {
        Err(ShapeMismatch::ObjectType {
            expected,
            found: wire.object_type.clone(),
        })
    }
}

fn expect_delivery_slot(wire: &MessageWire, expected: DeliverySlot) -> Result<(), ShapeMismatch> {
    if wire.delivery_slot == expected.as_str() {
        Ok(())
    } else {
        Err(ShapeMismatch::DeliverySlot {
            expected,
            found: wire.delivery_slot.clone(),
        })
    }
}

/// Conversion between a typed message and its wire form.
trait WireShape: Sized {
    fn from_wire(wire: &MessageWire) -> Result<Self, ShapeMismatch>;
    fn to_wire(&self) -> MessageWire;
}

macro_rules! wire_conversions {
    ($ty:ty) => {
        impl TryFrom<MessageWire> for $ty {
            type Error = ShapeMismatch;

            fn try_from(wire: MessageWire) -> Result<Self, Self::Error> {
                <$ty as WireShape>::from_wire(&wire)
            }
        }

        impl From<$ty> for MessageWire {
            fn from(message: $ty) -> Self {
                message.to_wire()
            }
        }
    };
}

/// Action enum of a non-item object type, tied to that type's `object_type`.
pub trait MessageAction: Copy + Eq + Display + FromStr<Err = UnknownVariant> {
    const OBJECT_TYPE: ObjectType;
}

impl MessageAction for AssetAction {
    const OBJECT_TYPE: ObjectType = ObjectType::Asset;
}

impl MessageAction for ContentTypeAction {
    const OBJECT_TYPE: ObjectType = ObjectType::ContentType;
}

impl MessageAction for LanguageAction {
    const OBJECT_TYPE: ObjectType = ObjectType::Language;
}

impl MessageAction for TaxonomyAction {
    const OBJECT_TYPE: ObjectType = ObjectType::Taxonomy;
}

/// Message about an asset, content type, language or taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MessageWire", into = "MessageWire", bound = "A: MessageAction")]
pub struct ObjectMessage<A> {
    pub environment_id: String,
    pub delivery_slot: DeliverySlot,
    pub action: A,
}

pub type AssetMessage = ObjectMessage<AssetAction>;
pub type ContentTypeMessage = ObjectMessage<ContentTypeAction>;
pub type LanguageMessage = ObjectMessage<LanguageAction>;
pub type TaxonomyMessage = ObjectMessage<TaxonomyAction>;

impl<A: MessageAction> ObjectMessage<A> {
    pub fn object_type(&self) -> ObjectType {
        A::OBJECT_TYPE
    }
}

impl<A: MessageAction> TryFrom<MessageWire> for ObjectMessage<A> {
    type Error = ShapeMismatch;

    fn try_from(wire: MessageWire) -> Result<Self, Self::Error> {
        expect_object_type(&wire, A::OBJECT_TYPE)?;
        let delivery_slot = wire.delivery_slot.parse()?;
        let action = wire.action.parse()?;

        Ok(Self {
            environment_id: wire.environment_id,
            delivery_slot,
            action,
        })
    }
}

impl<A: MessageAction> From<ObjectMessage<A>> for MessageWire {
    fn from(message: ObjectMessage<A>) -> Self {
        MessageWire {
            environment_id: message.environment_id,
            object_type: A::OBJECT_TYPE.to_string(),
            action: message.action.to_string(),
            delivery_slot: message.delivery_slot.to_string(),
            action_context: None,
        }
    }
}

/// Where a content item sat in its workflow before a workflow step change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionContext {
    pub previous_workflow: String,
    pub previous_workflow_step: String,
}

/// Content item created, deleted or changed on the preview slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MessageWire", into = "MessageWire")]
pub struct ContentItemPreviewMessage {
    pub environment_id: String,
    pub action: ContentItemPreviewAction,
}

impl WireShape for ContentItemPreviewMessage {
    fn from_wire(wire: &MessageWire) -> Result<Self, ShapeMismatch> {
        expect_object_type(wire, ObjectType::ContentItem)?;
        expect_delivery_slot(wire, DeliverySlot::Preview)?;

        Ok(Self {
            environment_id: wire.environment_id.clone(),
            action: wire.action.parse()?,
        })
    }

    fn to_wire(&self) -> MessageWire {
        MessageWire {
            environment_id: self.environment_id.clone(),
            object_type: ObjectType::ContentItem.to_string(),
            action: self.action.to_string(),
            delivery_slot: DeliverySlot::Preview.to_string(),
            action_context: None,
        }
    }
}

wire_conversions!(ContentItemPreviewMessage);

/// Content item moved to another workflow step (preview slot only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MessageWire", into = "MessageWire")]
pub struct ContentItemWorkflowChangedPreviewMessage {
    pub environment_id: String,
    pub action_context: ActionContext,
}

impl WireShape for ContentItemWorkflowChangedPreviewMessage {
    fn from_wire(wire: &MessageWire) -> Result<Self, ShapeMismatch> {
        expect_object_type(wire, ObjectType::ContentItem)?;
        expect_delivery_slot(wire, DeliverySlot::Preview)?;

        if wire.action != WORKFLOW_STEP_CHANGED {
            return Err(UnknownVariant {
                kind: "content item workflow action",
                value: wire.action.clone(),
            }
            .into());
        }

        let context = wire
            .action_context
            .as_ref()
            .ok_or_else(|| ShapeMismatch::ActionContext("missing".to_string()))?;
        let action_context = ActionContext::deserialize(context).map_err(|e| ShapeMismatch::ActionContext(e.to_string()))?;

        Ok(Self {
            environment_id: wire.environment_id.clone(),
            action_context,
        })
    }

    fn to_wire(&self) -> MessageWire {
        let context = json!({
            "previous_workflow": self.action_context.previous_workflow,
            "previous_workflow_step": self.action_context.previous_workflow_step,
        });

        MessageWire {
            environment_id: self.environment_id.clone(),
            object_type: ObjectType::ContentItem.to_string(),
            action: WORKFLOW_STEP_CHANGED.to_string(),
            delivery_slot: DeliverySlot::Preview.to_string(),
            action_context: Some(context),
        }
    }
}

wire_conversions!(ContentItemWorkflowChangedPreviewMessage);

/// Content item published, unpublished or changed on the published slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MessageWire", into = "MessageWire")]
pub struct ContentItemPublishedMessage {
    pub environment_id: String,
    pub action: ContentItemPublishedAction,
}

impl WireShape for ContentItemPublishedMessage {
    fn from_wire(wire: &MessageWire) -> Result<Self, ShapeMismatch> {
        expect_object_type(wire, ObjectType::ContentItem)?;
        expect_delivery_slot(wire, DeliverySlot::Published)?;

        Ok(Self {
            environment_id: wire.environment_id.clone(),
            action: wire.action.parse()?,
        })
    }

    fn to_wire(&self) -> MessageWire {
        MessageWire {
            environment_id: self.environment_id.clone(),
            object_type: ObjectType::ContentItem.to_string(),
            action: self.action.to_string(),
            delivery_slot: DeliverySlot::Published.to_string(),
            action_context: None,
        }
    }
}

wire_conversions!(ContentItemPublishedMessage);

/// Message about a content item, refined by delivery slot and action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MessageWire", into = "MessageWire")]
pub enum ContentItemMessage {
    Preview(ContentItemPreviewMessage),
    WorkflowChangedPreview(ContentItemWorkflowChangedPreviewMessage),
    Published(ContentItemPublishedMessage),
}

impl WireShape for ContentItemMessage {
    // Shapes are tried in a fixed order and the first match wins.
    fn from_wire(wire: &MessageWire) -> Result<Self, ShapeMismatch> {
        let preview = match ContentItemPreviewMessage::from_wire(wire) {
            Ok(message) => return Ok(Self::Preview(message)),
            Err(e) => e,
        };
        let workflow_changed = match ContentItemWorkflowChangedPreviewMessage::from_wire(wire) {
            Ok(message) => return Ok(Self::WorkflowChangedPreview(message)),
            Err(e) => e,
        };
        let published = match ContentItemPublishedMessage::from_wire(wire) {
            Ok(message) => return Ok(Self::Published(message)),
            Err(e) => e,
        };

        // All three fail the same way when the object type is wrong.
        if let ShapeMismatch::ObjectType { .. } = preview {
            return Err(preview);
        }

        Err(ShapeMismatch::ContentItem {
            preview: Box::new(preview),
            workflow_changed: Box::new(workflow_changed),
            published: Box::new(published),
        })
    }

    fn to_wire(&self) -> MessageWire {
        match self {
            Self::Preview(message) => message.to_wire(),
            Self::WorkflowChangedPreview(message) => message.to_wire(),
            Self::Published(message) => message.to_wire(),
        }
    }
}

wire_conversions!(ContentItemMessage);

impl ContentItemMessage {
    pub fn environment_id(&self) -> &str {
        match self {
            Self::Preview(message) => &message.environment_id,
            Self::WorkflowChangedPreview(message) => &message.environment_id,
            Self::Published(message) => &message.environment_id,
        }
    }

    pub fn delivery_slot(&self) -> DeliverySlot {
        match self {
            Self::Preview(_) | Self::WorkflowChangedPreview(_) => DeliverySlot::Preview,
            Self::Published(_) => DeliverySlot::Published,
        }
    }

    pub fn action(&self) -> ContentItemAction {
        match self {
            Self::Preview(message) => message.action.into(),
            Self::WorkflowChangedPreview(_) => ContentItemAction::WorkflowStepChanged,
            Self::Published(message) => message.action.into(),
        }
    }

    /// Previous workflow position, present only for workflow step changes.
    pub fn action_context(&self) -> Option<&ActionContext> {
        match self {
            Self::WorkflowChangedPreview(message) => Some(&message.action_context),
            Self::Preview(_) | Self::Published(_) => None,
        }
    }

    /// Preview-slot event other than a workflow step change.
    pub fn is_preview(&self) -> bool {
        matches!(self, Self::Preview(_))
    }

    pub fn is_workflow_step_changed(&self) -> bool {
        matches!(self, Self::WorkflowChangedPreview(_))
    }

    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published(_))
    }
}

/// Borrowed view over the message of any known notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookMessage<'a> {
    Asset(&'a AssetMessage),
    ContentItem(&'a ContentItemMessage),
    ContentType(&'a ContentTypeMessage),
    Language(&'a LanguageMessage),
    Taxonomy(&'a TaxonomyMessage),
}

impl WebhookMessage<'_> {
    pub fn object_type(&self) -> ObjectType {
        match self {
            Self::Asset(_) => ObjectType::Asset,
            Self::ContentItem(_) => ObjectType::ContentItem,
            Self::ContentType(_) => ObjectType::ContentType,
            Self::Language(_) => ObjectType::Language,
            Self::Taxonomy(_) => ObjectType::Taxonomy,
        }
    }

    pub fn environment_id(&self) -> &str {
        match self {
            Self::Asset(message) => &message.environment_id,
            Self::ContentItem(message) => message.environment_id(),
            Self::ContentType(message) => &message.environment_id,
            Self::Language(message) => &message.environment_id,
            Self::Taxonomy(message) => &message.environment_id,
        }
    }

    pub fn delivery_slot(&self) -> DeliverySlot {
        match self {
            Self::Asset(message) => message.delivery_slot,
            Self::ContentItem(message) => message.delivery_slot(),
            Self::ContentType(message) => message.delivery_slot,
            Self::Language(message) => message.delivery_slot,
            Self::Taxonomy(message) => message.delivery_slot,
        }
    }

    /// The action as it appears on the wire.
    pub fn action(&self) -> &'static str {
        match self {
            Self::Asset(message) => message.action.as_str(),
            Self::ContentItem(message) => message.action().as_str(),
            Self::ContentType(message) => message.action.as_str(),
            Self::Language(message) => message.action.as_str(),
            Self::Taxonomy(message) => message.action.as_str(),
        }
    }

    pub fn is_asset(&self) -> bool {
        matches!(self, Self::Asset(_))
    }

    pub fn is_content_item(&self) -> bool {
        matches!(self, Self::ContentItem(_))
    }

    pub fn is_content_type(&self) -> bool {
        matches!(self, Self::ContentType(_))
    }

    pub fn is_language(&self) -> bool {
        matches!(self, Self::Language(_))
    }

    pub fn is_taxonomy(&self) -> bool {
        matches!(self, Self::Taxonomy(_))
    }
}
