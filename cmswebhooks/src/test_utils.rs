//! Notification envelopes for unit tests.

use serde_json::{Value, json};

pub const ENVIRONMENT_ID: &str = "0f5b6cb2-ea82-014e-ac74-f71e7e8b6aee";
pub const LAST_MODIFIED: &str = "2024-11-18T08:29:47.056373500Z";

/// Object-level `data.system` record.
pub fn object_system(codename: &str) -> Value {
    json!({
        "id": "aa7f127f-8c1a-4e0a-b5f5-0a3d7f2b6e11",
        "name": "Sample object",
        "codename": codename,
        "last_modified": LAST_MODIFIED,
    })
}

/// Item-level `data.system` record.
pub fn item_system() -> Value {
    json!({
        "id": "aa7f127f-8c1a-4e0a-b5f5-0a3d7f2b6e11",
        "name": "This changes everything!",
        "codename": "this_changes_everything",
        "last_modified": LAST_MODIFIED,
        "collection": "marketing",
        "workflow": "default",
        "workflow_step": "published",
        "language": "en-US",
        "type": "product_update",
    })
}

/// A notification envelope for any object-level type.
pub fn object_envelope(object_type: &str, action: &str) -> Value {
    json!({
        "data": { "system": object_system(object_type) },
        "message": {
            "environment_id": ENVIRONMENT_ID,
            "object_type": object_type,
            "action": action,
            "delivery_slot": "published",
        },
    })
}

pub fn asset_envelope(action: &str) -> Value {
    object_envelope("asset", action)
}

pub fn content_item_envelope(delivery_slot: &str, action: &str) -> Value {
    json!({
        "data": { "system": item_system() },
        "message": {
            "environment_id": ENVIRONMENT_ID,
            "object_type": "content_item",
            "action": action,
            "delivery_slot": delivery_slot,
        },
    })
}

/// Preview `workflow_step_changed` with its action context.
pub fn workflow_changed_envelope() -> Value {
    let mut envelope = content_item_envelope("preview", "workflow_step_changed");
    envelope["data"]["system"]["workflow_step"] = json!("review");
    envelope["message"]["action_context"] = json!({
        "previous_workflow": "default",
        "previous_workflow_step": "draft",
    });
    envelope
}
