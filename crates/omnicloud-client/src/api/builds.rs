// Build actions

use std::fmt::Display;

use crate::error::Result;
use crate::model::{Build, BuildLogs};
use crate::resource::{Resource, ResourceClient};

impl Resource for Build {
    const PATH: &'static str = "builds";
    const COLLECTION_KEY: &'static str = "builds";
}

pub type BuildsApi = ResourceClient<Build>;

impl ResourceClient<Build> {
    /// Cancel a queued or running build
    pub async fn cancel(&self, id: impl Display) -> Result<Build> {
        self.action::<serde_json::Value>(id, "cancel", None).await
    }

    /// Start a new build from the same commit
    pub async fn retry(&self, id: impl Display) -> Result<Build> {
        self.action::<serde_json::Value>(id, "retry", None).await
    }

    pub async fn logs(&self, id: impl Display) -> Result<BuildLogs> {
        self.get_sub(id, "logs").await
    }
}
