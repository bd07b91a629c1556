//! Per-resource API clients
//!
//! Each resource is a [`ResourceClient`] instantiation; the files here add the
//! resource path and any actions beyond CRUD. [`OmniCloudClient`] is the
//! facade handing out clients bound to a platform.

pub mod alerts;
pub mod applications;
pub mod audit;
pub mod builds;
pub mod deployments;
pub mod instances;
pub mod platforms;
pub mod providers;

use std::sync::Arc;

pub use alerts::AlertsApi;
pub use applications::ApplicationsApi;
pub use audit::AuditLogsApi;
pub use builds::BuildsApi;
pub use deployments::DeploymentsApi;
pub use instances::InstancesApi;
pub use platforms::PlatformsApi;
pub use providers::{ProvidersApi, RegionsApi};

use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::PlatformHttpClient;
use crate::model::PlatformId;
use crate::resource::{Resource, ResourceClient};
use crate::storage::LocalStore;

/// Facade over the HTTP helper and local store
#[derive(Clone)]
pub struct OmniCloudClient {
    http: PlatformHttpClient,
    store: Arc<dyn LocalStore>,
}

impl OmniCloudClient {
    pub fn new(config: ClientConfig, store: Arc<dyn LocalStore>) -> Result<Self> {
        Ok(Self {
            http: PlatformHttpClient::new(config)?,
            store,
        })
    }

    pub fn from_parts(http: PlatformHttpClient, store: Arc<dyn LocalStore>) -> Self {
        Self { http, store }
    }

    pub fn http(&self) -> &PlatformHttpClient {
        &self.http
    }

    pub fn store(&self) -> Arc<dyn LocalStore> {
        self.store.clone()
    }

    pub fn platforms(&self) -> PlatformsApi {
        PlatformsApi::new(self.http.clone(), self.store.clone())
    }

    /// Client for any resource type bound to `platform_id`
    pub fn resource<R: Resource>(&self, platform_id: impl Into<PlatformId>) -> ResourceClient<R> {
        ResourceClient::new(self.http.clone(), platform_id)
    }

    pub fn alerts(&self, platform_id: impl Into<PlatformId>) -> AlertsApi {
        self.resource(platform_id)
    }

    pub fn applications(&self, platform_id: impl Into<PlatformId>) -> ApplicationsApi {
        self.resource(platform_id)
    }

    pub fn audit_logs(&self, platform_id: impl Into<PlatformId>) -> AuditLogsApi {
        self.resource(platform_id)
    }

    pub fn builds(&self, platform_id: impl Into<PlatformId>) -> BuildsApi {
        self.resource(platform_id)
    }

    pub fn deployments(&self, platform_id: impl Into<PlatformId>) -> DeploymentsApi {
        self.resource(platform_id)
    }

    pub fn instances(&self, platform_id: impl Into<PlatformId>) -> InstancesApi {
        self.resource(platform_id)
    }

    pub fn providers(&self, platform_id: impl Into<PlatformId>) -> ProvidersApi {
        self.resource(platform_id)
    }

    pub fn regions(&self, platform_id: impl Into<PlatformId>) -> RegionsApi {
        self.resource(platform_id)
    }
}
