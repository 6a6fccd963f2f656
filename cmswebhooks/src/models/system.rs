//! `data.system` records describing the object a notification is about.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The `data` member of a notification envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationData<S> {
    pub system: S,
}

/// System fields shared by every kind of object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectData {
    pub id: String,
    pub name: String,
    pub codename: String,
    /// Kept as sent; see [`ObjectData::last_modified_at`] for a parsed value.
    pub last_modified: String,
}

impl ObjectData {
    /// `last_modified` as a UTC timestamp, or `None` if the platform sent
    /// something that isn't RFC 3339.
    pub fn last_modified_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.last_modified)
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
    }
}

/// System fields of a content item (a language variant of an item).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemObjectData {
    #[serde(flatten)]
    pub object: ObjectData,
    pub collection: String,
    pub workflow: String,
    pub workflow_step: String,
    pub language: String,
    /// Codename of the item's content type (`type` on the wire).
    #[serde(rename = "type")]
    pub content_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    #[test]
    fn test_last_modified_with_seven_fraction_digits() {
        let data = ObjectData {
            id: "bb8f127f-1920-4454-a89a-0609aba8ea6f".to_string(),
            name: "My Asset".to_string(),
            codename: "my_asset".to_string(),
            last_modified: "2024-03-25T07:55:57.0563735Z".to_string(),
        };

        let ts = data.last_modified_at().expect("should parse");
        assert_eq!((ts.year(), ts.month(), ts.day()), (2024, 3, 25));
        assert_eq!((ts.hour(), ts.minute(), ts.second()), (7, 55, 57));
        assert_eq!(ts.nanosecond(), 56_373_500);
    }

    #[test]
    fn test_last_modified_garbage_is_none() {
        let data = ObjectData {
            id: "x".to_string(),
            name: "x".to_string(),
            codename: "x".to_string(),
            last_modified: "yesterday".to_string(),
        };
        assert!(data.last_modified_at().is_none());
    }

    #[test]
    fn test_item_data_reads_type_field() {
        let system: ItemObjectData = serde_json::from_value(json!({
            "id": "aa7f127f-1920-4454-a89a-0609aba8ea6f",
            "name": "Preview item",
            "codename": "preview_item",
            "collection": "default",
            "workflow": "default",
            "workflow_step": "draft",
            "language": "default",
            "type": "article",
            "last_modified": "2024-03-25T07:55:57.0563735Z",
            "unexpected": true
        }))
        .unwrap();

        assert_eq!(system.content_type, "article");
        assert_eq!(system.object.codename, "preview_item");
    }

    #[test]
    fn test_item_data_requires_item_fields() {
        let result = serde_json::from_value::<ItemObjectData>(json!({
            "id": "bb8f127f-1920-4454-a89a-0609aba8ea6f",
            "name": "My Asset",
            "codename": "my_asset",
            "last_modified": "2024-03-25T07:55:57.0563735Z"
        }));
        assert!(result.is_err());
    }
}
