use serde::{Deserialize, Serialize};

use crate::model::common::deserialize_slug;

/// A single named change in a build's release notes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Typically an ID from a work tracking system.
    #[serde(default)]
    pub id: String,
    /// Short title of the change (plaintext).
    #[serde(default)]
    pub title: String,
    /// Longer description of the change (plaintext).
    #[serde(default)]
    pub description: String,
    /// Optional HTML body for "user guide" style explanations of a change.
    #[serde(default)]
    pub supporting_html: String,
    /// Single word categorising the change, e.g. "bug", "feature",
    /// "change-request". Normalized to slug form on the way in.
    #[serde(rename = "type", default, deserialize_with = "deserialize_slug")]
    pub note_type: String,
    /// Whether to highlight this note when rendering the release notes.
    #[serde(default)]
    pub highlight: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_type_is_slug_normalized() {
        let note: Note =
            serde_json::from_str(r#"{"id": "402", "type": "Change Request"}"#).unwrap();
        assert_eq!(note.note_type, "change-request");
    }

    #[test]
    fn note_type_serializes_under_the_type_key() {
        let note = Note {
            id: "192".to_string(),
            note_type: "bug".to_string(),
            ..Note::default()
        };

        let value = serde_json::to_value(&note).unwrap();
        assert_eq!(value["type"], "bug");
        assert_eq!(value["supportingHtml"], "");
    }
}
