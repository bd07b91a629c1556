// Platform list, the only unscoped endpoint

use std::fmt::Display;
use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::http::PlatformHttpClient;
use crate::model::{DEFAULT_PER_PAGE, Platform};
use crate::resource::normalize_list;
use crate::storage::{LocalStore, TOKEN_KEY};

/// Client for `{BASE}/platforms`.
///
/// The bearer token is read from the local store on every call, so a token
/// written after construction is picked up.
#[derive(Clone)]
pub struct PlatformsApi {
    http: PlatformHttpClient,
    store: Arc<dyn LocalStore>,
}

impl PlatformsApi {
    pub fn new(http: PlatformHttpClient, store: Arc<dyn LocalStore>) -> Self {
        Self { http, store }
    }

    /// All platforms visible to the current token
    pub async fn list(&self) -> Result<Vec<Platform>> {
        let token = self.store.get(TOKEN_KEY);
        let value: serde_json::Value = self.http.get_unscoped("platforms", token.as_deref()).await?;
        let page = normalize_list::<Platform>(value, "platforms", DEFAULT_PER_PAGE)?;
        debug!(count = page.data.len(), "fetched platforms");
        Ok(page.data)
    }

    pub async fn get(&self, id: impl Display) -> Result<Platform> {
        let token = self.store.get(TOKEN_KEY);
        self.http
            .get_unscoped(&format!("platforms/{}", id), token.as_deref())
            .await
    }
}
