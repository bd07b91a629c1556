//! Command handlers

pub mod actions;
pub mod platforms;
pub mod resources;
pub mod watch;

use std::sync::Arc;

use anyhow::Context;
use omnicloud_client::{LocalStore, OmniCloudClient, PlatformId};
use omnicloud_dashboard::PlatformContext;
use serde::Serialize;
use tracing::debug;

/// Client, platform context and the `--platform` override for one invocation
pub struct Session {
    pub client: OmniCloudClient,
    pub context: PlatformContext,
    platform_override: Option<PlatformId>,
}

impl Session {
    pub fn new(
        client: OmniCloudClient,
        store: Arc<dyn LocalStore>,
        platform_override: Option<PlatformId>,
    ) -> Self {
        let context = PlatformContext::new(Arc::new(client.platforms()), store);
        Self {
            client,
            context,
            platform_override,
        }
    }

    /// Platform for scoped commands: the flag, then the persisted selection,
    /// then the default picked by loading the platform list.
    pub async fn platform_id(&self) -> anyhow::Result<PlatformId> {
        if let Some(id) = &self.platform_override {
            return Ok(id.clone());
        }
        if let Some(id) = self.context.selected_platform_id() {
            return Ok(id);
        }

        debug!("No platform selected, loading platform list");
        self.context
            .load()
            .await
            .context("failed to load platforms")?;
        Ok(self.context.require_platform_id()?)
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
