//! OmniCloud Dashboard - state and data plumbing for dashboard front ends
//!
//! This crate provides:
//! - `DashboardState`: tab, filters, pagination, sort, selection and loading
//!   flags for one dashboard page
//! - `PlatformContext`: the platform list and the persisted selection, shared
//!   by every platform-scoped call
//! - `ListView`: a resource list bound to a platform scope that ignores
//!   responses from superseded requests
//! - `Poller` and `InstanceMonitor` for interval refreshes

pub mod error;
pub mod platform;
pub mod poll;
pub mod state;
pub mod view;

pub use error::{DashboardError, Result};
pub use platform::{PlatformContext, PlatformSnapshot, PlatformSource, ScopeTag, provide};
pub use poll::{InstanceMonitor, Poller};
pub use state::{
    DashboardOptions, DashboardState, FILTER_ALL, FilterField, FilterParams, FilterState,
    LoadPhase, PaginationState, SortOrder, SortState, is_truthy,
};
pub use view::{FetchOutcome, ListView};
