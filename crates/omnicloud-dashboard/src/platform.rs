//! Platform context
//!
//! Holds the list of platforms, the selected platform id and load status.
//! A [`PlatformContext`] is a cheap, cloneable handle; every clone shares the
//! same state. It is passed explicitly, or made available to a task tree with
//! [`provide`] and read back with [`PlatformContext::current`].

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use omnicloud_client::{
    ClientError, LocalStore, Platform, PlatformId, PlatformsApi, SELECTED_PLATFORM_KEY,
};
use parking_lot::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{DashboardError, Result};

tokio::task_local! {
    static CURRENT_PLATFORM: PlatformContext;
}

/// Where the platform list comes from
#[async_trait]
pub trait PlatformSource: Send + Sync {
    async fn list_platforms(&self) -> std::result::Result<Vec<Platform>, ClientError>;
}

#[async_trait]
impl PlatformSource for PlatformsApi {
    async fn list_platforms(&self) -> std::result::Result<Vec<Platform>, ClientError> {
        self.list().await
    }
}

/// Identity of the platform scope a request was issued under.
///
/// Every selection change bumps the epoch, so a tag taken before a switch
/// never matches afterwards, even when switching back to the same id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScopeTag {
    pub platform_id: Option<PlatformId>,
    pub epoch: u64,
}

/// Point-in-time copy of the context state
#[derive(Clone, Debug, Default)]
pub struct PlatformSnapshot {
    pub platforms: Vec<Platform>,
    pub selected: Option<PlatformId>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Default)]
struct PlatformState {
    platforms: Vec<Platform>,
    selected: Option<PlatformId>,
    loading: bool,
    error: Option<String>,
    epoch: u64,
}

struct Inner {
    state: RwLock<PlatformState>,
    source: Arc<dyn PlatformSource>,
    store: Arc<dyn LocalStore>,
}

#[derive(Clone)]
pub struct PlatformContext {
    inner: Arc<Inner>,
}

impl PlatformContext {
    /// Create a context, applying any persisted selection right away.
    ///
    /// The persisted id is not checked against the platform list.
    pub fn new(source: Arc<dyn PlatformSource>, store: Arc<dyn LocalStore>) -> Self {
        let selected = store
            .get(SELECTED_PLATFORM_KEY)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PlatformId::from);

        if let Some(id) = &selected {
            debug!(platform_id = %id, "restored persisted platform selection");
        }

        Self {
            inner: Arc::new(Inner {
                state: RwLock::new(PlatformState {
                    selected,
                    ..Default::default()
                }),
                source,
                store,
            }),
        }
    }

    /// Spawn [`load`](Self::load) on the current tokio runtime.
    ///
    /// A panic inside the load is reported through the handle as an error
    /// and recorded on the context like any other load failure.
    pub fn initialize(&self) -> JoinHandle<Result<()>> {
        let context = self.clone();
        tokio::spawn(async move {
            let loader = context.clone();
            match tokio::spawn(async move { loader.load().await }).await {
                Ok(result) => result,
                Err(e) => {
                    let err = if e.is_panic() {
                        ClientError::normalize(e.into_panic())
                    } else {
                        ClientError::Message(e.to_string())
                    };
                    warn!(error = %err, "platform load did not complete");
                    context.fail_load(&err);
                    Err(err.into())
                }
            }
        })
    }

    /// Fetch the platform list.
    ///
    /// When nothing is selected once the list arrives, the platform with the
    /// lowest id is selected and persisted.
    pub async fn load(&self) -> Result<()> {
        {
            let mut state = self.inner.state.write();
            state.loading = true;
            state.error = None;
        }

        let platforms = match self.inner.source.list_platforms().await {
            Ok(platforms) => platforms,
            Err(err) => {
                warn!(error = %err, "failed to load platforms");
                self.fail_load(&err);
                return Err(err.into());
            }
        };

        let default_selection = {
            let mut state = self.inner.state.write();
            state.loading = false;
            let lowest = platforms.iter().map(|p| p.id).min();
            state.platforms = platforms;

            match lowest {
                Some(id) if state.selected.is_none() => {
                    let id = PlatformId::from(id);
                    state.selected = Some(id.clone());
                    state.epoch += 1;
                    Some(id)
                }
                _ => None,
            }
        };

        if let Some(id) = default_selection {
            info!(platform_id = %id, "selected default platform");
            if let Err(err) = self.inner.store.set(SELECTED_PLATFORM_KEY, id.as_str()) {
                warn!(error = %err, "failed to persist platform selection");
            }
        }
        Ok(())
    }

    fn fail_load(&self, err: &ClientError) {
        let mut state = self.inner.state.write();
        state.loading = false;
        state.error = Some(err.to_string());
    }

    /// Select a platform and persist the choice. Membership in the loaded
    /// list is not checked.
    pub fn select_platform(&self, id: impl Into<PlatformId>) -> Result<()> {
        let id = id.into();
        {
            let mut state = self.inner.state.write();
            state.selected = Some(id.clone());
            state.epoch += 1;
        }
        debug!(platform_id = %id, "platform selected");
        self.inner.store.set(SELECTED_PLATFORM_KEY, id.as_str())?;
        Ok(())
    }

    pub fn selected_platform_id(&self) -> Option<PlatformId> {
        self.inner.state.read().selected.clone()
    }

    /// The selected platform's record, if it is in the loaded list
    pub fn selected_platform(&self) -> Option<Platform> {
        let state = self.inner.state.read();
        let selected = state.selected.as_ref()?;
        state
            .platforms
            .iter()
            .find(|p| Some(p.id) == selected.as_number())
            .cloned()
    }

    /// The selected id, or a validation error when nothing is selected
    pub fn require_platform_id(&self) -> std::result::Result<PlatformId, ClientError> {
        self.selected_platform_id()
            .ok_or_else(|| ClientError::Validation("no platform selected".to_string()))
    }

    pub fn platforms(&self) -> Vec<Platform> {
        self.inner.state.read().platforms.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.read().loading
    }

    pub fn error(&self) -> Option<String> {
        self.inner.state.read().error.clone()
    }

    pub fn snapshot(&self) -> PlatformSnapshot {
        let state = self.inner.state.read();
        PlatformSnapshot {
            platforms: state.platforms.clone(),
            selected: state.selected.clone(),
            loading: state.loading,
            error: state.error.clone(),
        }
    }

    pub fn scope_tag(&self) -> ScopeTag {
        let state = self.inner.state.read();
        ScopeTag {
            platform_id: state.selected.clone(),
            epoch: state.epoch,
        }
    }

    /// Whether results tagged with `tag` may still be applied
    pub fn is_current(&self, tag: &ScopeTag) -> bool {
        self.inner.state.read().epoch == tag.epoch
    }

    /// The context provided to the running task.
    ///
    /// Fails with [`DashboardError::MissingProvider`] outside of [`provide`];
    /// that is a wiring bug, not a runtime condition to recover from.
    pub fn current() -> Result<PlatformContext> {
        CURRENT_PLATFORM
            .try_with(PlatformContext::clone)
            .map_err(|_| DashboardError::MissingProvider)
    }
}

/// Run `future` with `context` available through [`PlatformContext::current`]
pub async fn provide<F: Future>(context: PlatformContext, future: F) -> F::Output {
    CURRENT_PLATFORM.scope(context, future).await
}
