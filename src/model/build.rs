use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::common::{slugify, Id};
use crate::model::note::Note;

/// A product build and the release notes that shipped with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Build {
    /// The version of the build. Unique for any given product.
    pub version: String,
    /// When the build completed (UTC).
    pub build_date_utc: DateTime<Utc>,
    /// Release notes associated with this build.
    #[serde(default)]
    pub changes: Vec<Note>,
}

impl Build {
    /// Composite identifier combining product and version, e.g.
    /// "my-product-1.2.3". Useful where a build must be named outside the
    /// context of its product.
    pub fn composite_id(&self, product_id: &str) -> Id {
        format!("{}-{}", slugify(product_id), slugify(&self.version))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn composite_id_slugs_both_halves() {
        let build = Build {
            version: "1.2.3".to_string(),
            build_date_utc: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            changes: vec![],
        };

        assert_eq!(build.composite_id("My Product"), "my-product-1-2-3");
    }

    #[test]
    fn build_round_trips_with_camel_case_keys() {
        let json = r#"{
            "version": "1.3.2",
            "buildDateUtc": "2024-03-01T12:00:00Z",
            "changes": [{"id": "402", "type": "feature", "title": "First feature"}]
        }"#;

        let build: Build = serde_json::from_str(json).unwrap();
        assert_eq!(build.version, "1.3.2");
        assert_eq!(build.changes.len(), 1);

        let value = serde_json::to_value(&build).unwrap();
        assert!(value.get("buildDateUtc").is_some());
        assert!(value.get("build_date_utc").is_none());
    }
}
