use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::build::Build;
use crate::model::catalog::{Environment, Product};
use crate::model::common::{deserialize_slug, Id};

/// An approval, typically to deploy to a specific environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Approval {
    /// A short note to accompany the approval (plaintext).
    #[serde(default)]
    pub note: String,
    /// Whether the approval was automated.
    #[serde(default = "default_automated")]
    pub automated: bool,
    /// When the approval was made (UTC).
    #[serde(default = "Utc::now")]
    pub approval_date: DateTime<Utc>,
}

fn default_automated() -> bool {
    true
}

impl Default for Approval {
    fn default() -> Self {
        Self {
            note: String::new(),
            automated: true,
            approval_date: Utc::now(),
        }
    }
}

/// The act of deploying a build into an environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    /// When the build was deployed (UTC).
    pub deploy_date: DateTime<Utc>,
    /// The approval associated with the deployment.
    #[serde(default)]
    pub approval: Approval,
}

/// A release snapshots every associated resource at the point of deployment,
/// giving a stable archive/audit record. Written once, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    /// The environment being released to.
    #[serde(deserialize_with = "deserialize_slug")]
    pub environment_id: Id,
    /// The product this release relates to.
    pub product: Product,
    /// The complete list of environments on this release's pathway.
    #[serde(default)]
    pub environments: Vec<Environment>,
    /// The builds included in this release.
    #[serde(default)]
    pub builds: Vec<Build>,
    /// The deployment this release records.
    pub deployment: Deployment,
}

impl Release {
    /// The build with the latest completion time, used to name storage
    /// paths for the release. Ties between equal timestamps are broken
    /// arbitrarily. `None` when the release holds no builds.
    pub fn representative_build(&self) -> Option<&Build> {
        self.builds.iter().max_by_key(|b| b.build_date_utc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn build(version: &str, hour: u32) -> Build {
        Build {
            version: version.to_string(),
            build_date_utc: Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap(),
            changes: vec![],
        }
    }

    fn release(builds: Vec<Build>) -> Release {
        Release {
            environment_id: "test".to_string(),
            product: Product {
                id: "site".to_string(),
                family: String::new(),
                name: "Site".to_string(),
                description: String::new(),
                roles: vec![],
            },
            environments: vec![],
            builds,
            deployment: Deployment {
                deploy_date: Utc.with_ymd_and_hms(2024, 3, 2, 9, 30, 0).unwrap(),
                approval: Approval::default(),
            },
        }
    }

    #[test]
    fn representative_build_is_the_latest_by_completion_time() {
        let release = release(vec![build("1.25.1", 8), build("1.100.3", 14), build("1.99.0", 11)]);
        assert_eq!(release.representative_build().unwrap().version, "1.100.3");
    }

    #[test]
    fn representative_build_of_empty_release_is_none() {
        assert!(release(vec![]).representative_build().is_none());
    }

    #[test]
    fn minimal_deployment_body_gets_approval_defaults() {
        let deployment: Deployment =
            serde_json::from_str(r#"{"deployDate": "2024-03-02T09:30:00Z"}"#).unwrap();
        assert!(deployment.approval.automated);
        assert!(deployment.approval.note.is_empty());
    }
}
