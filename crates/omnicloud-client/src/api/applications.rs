// Application actions

use std::fmt::Display;

use crate::error::Result;
use crate::model::{Application, DeployApplication, Deployment};
use crate::resource::{Resource, ResourceClient};

impl Resource for Application {
    const PATH: &'static str = "applications";
    const COLLECTION_KEY: &'static str = "applications";
}

pub type ApplicationsApi = ResourceClient<Application>;

impl ResourceClient<Application> {
    /// Trigger a deployment of the application; returns the new deployment
    pub async fn deploy(&self, id: impl Display, request: &DeployApplication) -> Result<Deployment> {
        let path = format!("{}/{}/deploy", Application::PATH, id);
        self.http()
            .post_json(self.platform_id(), &path, request)
            .await
    }
}
