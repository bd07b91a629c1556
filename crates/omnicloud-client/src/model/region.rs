// Region model types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::RecordId;
use super::lenient;
use super::status::RegionStatus;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Region {
    pub id: RecordId,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub code: String,
    pub provider_id: Option<RecordId>,
    pub provider_name: Option<String>,
    pub location: Option<String>,
    pub status: RegionStatus,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `POST /regions` and `PUT /regions/{id}`
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NewRegion {
    pub name: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}
