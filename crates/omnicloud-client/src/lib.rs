//! OmniCloud Client - Rust SDK for the OmniCloud platform API
//!
//! This crate provides:
//! - A platform-scoped HTTP helper (`/platform/{id}/...`) speaking JSON
//! - A generic resource client with list/get/create/update/delete
//! - Typed clients and actions for alerts, builds, deployments, providers,
//!   regions, audit logs, applications and instances
//! - The platform list client and a local key-value store for the token and
//!   selected platform

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod model;
pub mod resource;
pub mod storage;

pub use api::{
    AlertsApi, ApplicationsApi, AuditLogsApi, BuildsApi, DeploymentsApi, InstancesApi,
    OmniCloudClient, PlatformsApi, ProvidersApi, RegionsApi,
};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{ClientError, Result};
pub use http::{Method, PlatformHttpClient, RequestOptions, platform_api_url};
pub use model::*;
pub use resource::{Resource, ResourceClient, normalize_list};
pub use storage::{FileStore, LocalStore, MemoryStore, SELECTED_PLATFORM_KEY, TOKEN_KEY};
