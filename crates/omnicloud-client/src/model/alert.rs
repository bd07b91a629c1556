// Alert model types

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::RecordId;
use super::lenient;
use super::status::{AlertSeverity, AlertStatus};

/// Monitoring alert raised against a platform resource
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Alert {
    pub id: RecordId,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub message: String,
    pub severity: AlertSeverity,
    pub status: AlertStatus,
    pub service: Option<String>,
    pub resource_type: Option<String>,
    pub resource_id: Option<String>,
    pub region: Option<String>,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub acknowledged_at: Option<DateTime<Utc>>,
    pub acknowledged_by: Option<String>,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub resolved_at: Option<DateTime<Utc>>,
    pub resolved_by: Option<String>,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub metadata: HashMap<String, serde_json::Value>,
}

/// Body of `POST /alerts/{id}/acknowledge`
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AcknowledgeAlert {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acknowledged_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Body of `POST /alerts/{id}/resolve`
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ResolveAlert {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution_note: Option<String>,
}

/// Body of `POST /alerts/{id}/escalate`
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EscalateAlert {
    pub escalated_to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}
