// Deployment model types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::RecordId;
use super::lenient;
use super::status::DeploymentStatus;

/// Rollout of an application build to an environment
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Deployment {
    pub id: RecordId,
    pub application_id: Option<RecordId>,
    pub application_name: Option<String>,
    pub build_id: Option<RecordId>,
    pub version: Option<String>,
    pub environment: Option<String>,
    pub status: DeploymentStatus,
    pub strategy: Option<String>,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub target_instances: u32,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub healthy_instances: u32,
    pub deployed_by: Option<String>,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Body of `POST /deployments`
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NewDeployment {
    pub application_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
}

/// Body of `POST /deployments/{id}/rollback`
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RollbackDeployment {
    /// Deployment to roll back to; the backend picks the previous one when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_deployment_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}
