// Application model types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::RecordId;
use super::lenient;
use super::status::ApplicationStatus;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Application {
    pub id: RecordId,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub name: String,
    pub description: Option<String>,
    pub status: ApplicationStatus,
    pub repository_url: Option<String>,
    pub default_branch: Option<String>,
    pub region_id: Option<RecordId>,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub instance_count: u32,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `POST /applications` and `PUT /applications/{id}`
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NewApplication {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_id: Option<i64>,
}

/// Body of `POST /applications/{id}/deploy`
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DeployApplication {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
}
