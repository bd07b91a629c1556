// Build model types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::RecordId;
use super::lenient;
use super::status::BuildStatus;

/// CI build of an application
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Build {
    pub id: RecordId,
    pub application_id: Option<RecordId>,
    pub application_name: Option<String>,
    pub branch: Option<String>,
    pub commit_sha: Option<String>,
    pub commit_message: Option<String>,
    pub status: BuildStatus,
    pub triggered_by: Option<String>,
    pub duration_seconds: Option<u64>,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub artifacts: Vec<String>,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Output of `GET /builds/{id}/logs`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildLogs {
    pub build_id: RecordId,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub logs: String,
}

impl BuildLogs {
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.logs.lines()
    }
}
