// Audit log model types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::RecordId;
use super::lenient;
use super::status::AuditSeverity;

/// One recorded user or system action
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditLog {
    pub id: RecordId,
    pub user_id: Option<RecordId>,
    pub user_email: Option<String>,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub action: String,
    pub resource_type: Option<String>,
    pub resource_id: Option<String>,
    pub severity: AuditSeverity,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub details: serde_json::Value,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}
