// Compute instance model types

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::RecordId;
use super::lenient;
use super::status::InstanceStatus;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Instance {
    pub id: RecordId,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub name: String,
    pub application_id: Option<RecordId>,
    pub region_id: Option<RecordId>,
    pub instance_type: Option<String>,
    pub status: InstanceStatus,
    pub public_ip: Option<String>,
    pub private_ip: Option<String>,
    /// Percent, 0-100
    pub cpu_usage: Option<f64>,
    /// Percent, 0-100
    pub memory_usage: Option<f64>,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub metadata: HashMap<String, serde_json::Value>,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `POST /instances`
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NewInstance {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<String>,
}
