// Cloud provider model types

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::RecordId;
use super::lenient;
use super::status::ProviderStatus;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Provider {
    pub id: RecordId,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub name: String,
    #[serde(rename = "type", deserialize_with = "lenient::null_as_default")]
    pub provider_type: String,
    pub status: ProviderStatus,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub region_count: u32,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub config: HashMap<String, serde_json::Value>,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `POST /providers` and `PUT /providers/{id}`
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NewProvider {
    pub name: String,
    #[serde(rename = "type")]
    pub provider_type: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub config: HashMap<String, serde_json::Value>,
}
