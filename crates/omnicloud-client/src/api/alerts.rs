// Alert actions

use std::fmt::Display;

use crate::error::Result;
use crate::model::{AcknowledgeAlert, Alert, EscalateAlert, ResolveAlert};
use crate::resource::{Resource, ResourceClient};

impl Resource for Alert {
    const PATH: &'static str = "alerts";
    const COLLECTION_KEY: &'static str = "alerts";
}

pub type AlertsApi = ResourceClient<Alert>;

impl ResourceClient<Alert> {
    /// Mark an alert as acknowledged
    pub async fn acknowledge(&self, id: impl Display, request: &AcknowledgeAlert) -> Result<Alert> {
        self.action(id, "acknowledge", Some(request)).await
    }

    /// Mark an alert as resolved
    pub async fn resolve(&self, id: impl Display, request: &ResolveAlert) -> Result<Alert> {
        self.action(id, "resolve", Some(request)).await
    }

    pub async fn escalate(&self, id: impl Display, request: &EscalateAlert) -> Result<Alert> {
        self.action(id, "escalate", Some(request)).await
    }
}
