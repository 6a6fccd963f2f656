//! Loosely-typed form of a `message` record.
//!
//! Every message shape is read through this struct first and then narrowed by
//! the `TryFrom` impls in [`super::messages`], which check the literal
//! discriminators. Unknown members are ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageWire {
    pub environment_id: String,
    pub object_type: String,
    pub action: String,
    pub delivery_slot: String,
    // Only validated for workflow step changes; other shapes ignore it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_context: Option<Value>,
}
