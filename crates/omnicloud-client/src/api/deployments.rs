// Deployment actions

use std::fmt::Display;

use crate::error::Result;
use crate::model::{Deployment, RollbackDeployment};
use crate::resource::{Resource, ResourceClient};

impl Resource for Deployment {
    const PATH: &'static str = "deployments";
    const COLLECTION_KEY: &'static str = "deployments";
}

pub type DeploymentsApi = ResourceClient<Deployment>;

impl ResourceClient<Deployment> {
    pub async fn rollback(&self, id: impl Display, request: &RollbackDeployment) -> Result<Deployment> {
        self.action(id, "rollback", Some(request)).await
    }

    pub async fn cancel(&self, id: impl Display) -> Result<Deployment> {
        self.action::<serde_json::Value>(id, "cancel", None).await
    }
}
