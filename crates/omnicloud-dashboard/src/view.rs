//! Scoped list views
//!
//! A [`ListView`] ties a resource client to a [`DashboardState`] and the
//! items of the last applied fetch. Each fetch is tagged with the platform
//! scope and a sequence number at issue time; when it resolves, the result
//! is applied only if no newer fetch was issued and the platform scope is
//! unchanged. Failures are stored as the state's error message.

use std::sync::Arc;

use omnicloud_client::{
    ClientError, PaginationInfo, PlatformHttpClient, PlatformId, Resource, ResourceClient,
};
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::error::Result;
use crate::platform::{PlatformContext, ScopeTag};
use crate::state::DashboardState;

/// What happened to a fetch result
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Items were stored; carries the item count
    Applied(usize),
    /// A newer fetch or a platform switch superseded this one
    Stale,
}

enum Binding<R> {
    /// Always the same platform
    Fixed(ResourceClient<R>),
    /// Follows the platform context's selection
    Scoped {
        http: PlatformHttpClient,
        context: PlatformContext,
    },
}

struct Inner<R, T> {
    state: DashboardState<T>,
    items: Vec<R>,
    pagination: PaginationInfo,
    latest_request: u64,
}

/// List state for one resource page. Clones share state.
pub struct ListView<R, T = String> {
    binding: Arc<Binding<R>>,
    inner: Arc<Mutex<Inner<R, T>>>,
}

impl<R, T> Clone for ListView<R, T> {
    fn clone(&self) -> Self {
        Self {
            binding: self.binding.clone(),
            inner: self.inner.clone(),
        }
    }
}

impl<R: Resource, T: Clone + PartialEq> ListView<R, T> {
    /// View that follows the selected platform of `context`
    pub fn scoped(http: PlatformHttpClient, context: PlatformContext, state: DashboardState<T>) -> Self {
        Self::from_binding(Binding::Scoped { http, context }, state)
    }

    /// View bound to the context provided to the current task
    pub fn for_current_platform(http: PlatformHttpClient, state: DashboardState<T>) -> Result<Self> {
        let context = PlatformContext::current()?;
        Ok(Self::scoped(http, context, state))
    }

    /// View over a client with a fixed platform
    pub fn fixed(client: ResourceClient<R>, state: DashboardState<T>) -> Self {
        Self::from_binding(Binding::Fixed(client), state)
    }

    fn from_binding(binding: Binding<R>, state: DashboardState<T>) -> Self {
        Self {
            binding: Arc::new(binding),
            inner: Arc::new(Mutex::new(Inner {
                state,
                items: Vec::new(),
                pagination: PaginationInfo::default(),
                latest_request: 0,
            })),
        }
    }

    /// Fetch the page described by the current state
    pub async fn fetch(&self) -> Result<FetchOutcome> {
        self.run(false).await
    }

    /// Re-fetch while keeping the current items visible
    pub async fn refresh(&self) -> Result<FetchOutcome> {
        self.run(true).await
    }

    async fn run(&self, refresh: bool) -> Result<FetchOutcome> {
        let (client, tag, seq, params) = {
            let mut inner = self.inner.lock();
            let (client, tag) = match self.bind() {
                Ok(bound) => bound,
                Err(err) => {
                    inner.state.set_error_message(err.to_string());
                    return Err(err.into());
                }
            };
            if refresh {
                inner.state.start_refresh();
            } else {
                inner.state.start_loading();
            }
            inner.latest_request += 1;
            (client, tag, inner.latest_request, inner.state.list_params())
        };

        let result = client.list(&params).await;

        let mut inner = self.inner.lock();
        let superseded = seq != inner.latest_request;
        if superseded || !self.is_current(tag.as_ref()) {
            debug!(
                resource = R::PATH,
                platform_id = %client.platform_id(),
                superseded,
                "discarding stale list response"
            );
            if !superseded {
                inner.state.finish_loading();
            }
            return Ok(FetchOutcome::Stale);
        }

        match result {
            Ok(page) => {
                let count = page.data.len();
                inner.state.apply_pagination(&page.pagination);
                inner.pagination = page.pagination;
                inner.items = page.data;
                inner.state.finish_loading();
                Ok(FetchOutcome::Applied(count))
            }
            Err(err) => {
                warn!(resource = R::PATH, error = %err, "list fetch failed");
                inner.state.set_error_message(err.to_string());
                Err(err.into())
            }
        }
    }

    fn bind(&self) -> std::result::Result<(ResourceClient<R>, Option<ScopeTag>), ClientError> {
        match self.binding.as_ref() {
            Binding::Fixed(client) => Ok((client.clone(), None)),
            Binding::Scoped { http, context } => {
                let tag = context.scope_tag();
                let platform_id = tag
                    .platform_id
                    .clone()
                    .ok_or_else(|| ClientError::Validation("no platform selected".to_string()))?;
                Ok((ResourceClient::new(http.clone(), platform_id), Some(tag)))
            }
        }
    }

    fn is_current(&self, tag: Option<&ScopeTag>) -> bool {
        match (self.binding.as_ref(), tag) {
            (Binding::Scoped { context, .. }, Some(tag)) => context.is_current(tag),
            _ => true,
        }
    }

    /// Platform the next fetch will target
    pub fn platform_id(&self) -> Option<PlatformId> {
        match self.binding.as_ref() {
            Binding::Fixed(client) => Some(client.platform_id().clone()),
            Binding::Scoped { context, .. } => context.selected_platform_id(),
        }
    }

    /// Read or change the dashboard state
    pub fn with_state<O>(&self, f: impl FnOnce(&mut DashboardState<T>) -> O) -> O {
        f(&mut self.inner.lock().state)
    }

    pub fn state(&self) -> DashboardState<T> {
        self.inner.lock().state.clone()
    }

    pub fn with_items<O>(&self, f: impl FnOnce(&[R]) -> O) -> O {
        f(&self.inner.lock().items)
    }

    /// Pagination block of the last applied response
    pub fn pagination(&self) -> PaginationInfo {
        self.inner.lock().pagination.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().items.is_empty()
    }

    /// Replace a locally held record with the server's representation after a mutation
    pub fn replace_item(&self, matches: impl Fn(&R) -> bool, item: R) -> bool {
        let mut inner = self.inner.lock();
        match inner.items.iter_mut().find(|existing| matches(existing)) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }
}

impl<R: Resource + Clone, T: Clone + PartialEq> ListView<R, T> {
    pub fn items(&self) -> Vec<R> {
        self.inner.lock().items.clone()
    }
}
