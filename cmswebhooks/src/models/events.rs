//! Wire-level enums: object types, delivery slots and the actions each kind of
//! object can report.
//!
//! Every enum serializes to, and parses from, the exact string the platform
//! puts on the wire.

use serde::{Deserialize, Serialize};

/// A string that is not one of the values allowed for a wire enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} `{value}`")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident as $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:tt ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant ),+
        }

        impl $name {
            /// Every value accepted on the wire, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $wire ),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $wire => Ok($name::$variant), )+
                    _ => Err(UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

wire_enum! {
    /// Kind of content object a notification is about (`message.object_type`).
    pub enum ObjectType as "object_type" {
        Asset => "asset",
        ContentItem => "content_item",
        ContentType => "content_type",
        Language => "language",
        Taxonomy => "taxonomy",
    }
}

wire_enum! {
    /// Which rendition of the content the event pertains to.
    pub enum DeliverySlot as "delivery_slot" {
        Published => "published",
        Preview => "preview",
    }
}

wire_enum! {
    pub enum AssetAction as "asset action" {
        Created => "created",
        Deleted => "deleted",
        MetadataChanged => "metadata_changed",
    }
}

wire_enum! {
    /// Every action a content item can report, across both delivery slots.
    pub enum ContentItemAction as "content item action" {
        Created => "created",
        Deleted => "deleted",
        MetadataChanged => "metadata_changed",
        WorkflowStepChanged => "workflow_step_changed",
        Published => "published",
        Unpublished => "unpublished",
    }
}

wire_enum! {
    /// Content item actions reported on the preview slot, except workflow step
    /// changes which carry an extra `action_context`.
    pub enum ContentItemPreviewAction as "content item preview action" {
        Created => "created",
        Deleted => "deleted",
        MetadataChanged => "metadata_changed",
    }
}

wire_enum! {
    /// Content item actions reported on the published slot.
    pub enum ContentItemPublishedAction as "content item published action" {
        Published => "published",
        Unpublished => "unpublished",
        MetadataChanged => "metadata_changed",
    }
}

wire_enum! {
    pub enum ContentTypeAction as "content type action" {
        Created => "created",
        Deleted => "deleted",
        Changed => "changed",
    }
}

wire_enum! {
    pub enum LanguageAction as "language action" {
        Created => "created",
        Deleted => "deleted",
        Changed => "changed",
    }
}

wire_enum! {
    pub enum TaxonomyAction as "taxonomy action" {
        Created => "created",
        Deleted => "deleted",
        MetadataChanged => "metadata_changed",
        TermCreated => "term_created",
        TermChanged => "term_changed",
        TermDeleted => "term_deleted",
        TermsMoved => "terms_moved",
    }
}

impl From<ContentItemPreviewAction> for ContentItemAction {
    fn from(action: ContentItemPreviewAction) -> Self {
        match action {
            ContentItemPreviewAction::Created => Self::Created,
            ContentItemPreviewAction::Deleted => Self::Deleted,
            ContentItemPreviewAction::MetadataChanged => Self::MetadataChanged,
        }
    }
}

impl From<ContentItemPublishedAction> for ContentItemAction {
    fn from(action: ContentItemPublishedAction) -> Self {
        match action {
            ContentItemPublishedAction::Published => Self::Published,
            ContentItemPublishedAction::Unpublished => Self::Unpublished,
            ContentItemPublishedAction::MetadataChanged => Self::MetadataChanged,
        }
    }
}
