// Instance power actions

use std::fmt::Display;

use crate::error::Result;
use crate::model::Instance;
use crate::resource::{Resource, ResourceClient};

impl Resource for Instance {
    const PATH: &'static str = "instances";
    const COLLECTION_KEY: &'static str = "instances";
}

pub type InstancesApi = ResourceClient<Instance>;

impl ResourceClient<Instance> {
    pub async fn start(&self, id: impl Display) -> Result<Instance> {
        self.action::<serde_json::Value>(id, "start", None).await
    }

    pub async fn stop(&self, id: impl Display) -> Result<Instance> {
        self.action::<serde_json::Value>(id, "stop", None).await
    }

    pub async fn restart(&self, id: impl Display) -> Result<Instance> {
        self.action::<serde_json::Value>(id, "restart", None).await
    }

    /// Terminate an instance. Unlike `delete`, the record stays listed as terminated.
    pub async fn terminate(&self, id: impl Display) -> Result<Instance> {
        self.action::<serde_json::Value>(id, "terminate", None).await
    }
}
