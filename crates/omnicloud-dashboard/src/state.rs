//! Dashboard state aggregator
//!
//! [`DashboardState`] bundles the five state groups every list page needs:
//! active tab, search/filters, pagination, sort and selection, plus the
//! loading/error/refreshing flags. The reset rules are part of the contract:
//!
//! | Operation | Page | Selection | Tab |
//! |-----------|------|-----------|-----|
//! | `set_search_query` / `set_filter` / custom filters | reset to 0 | kept | kept |
//! | `set_active_tab` | reset to 0 | single selection cleared | changed |
//! | `clear_filters` | reset to 0 | kept | kept |

use std::collections::{BTreeMap, BTreeSet};

use omnicloud_client::{DEFAULT_PER_PAGE, ListParams, PaginationInfo, total_pages};
use serde::Serialize;
use serde_json::Value;

/// Filter value meaning "no filter"
pub const FILTER_ALL: &str = "all";

/// Named filter fields shared by the dashboard pages
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterField {
    Status,
    Category,
    Type,
    Severity,
    Region,
}

impl FilterField {
    pub const ALL: [FilterField; 5] = [
        FilterField::Status,
        FilterField::Category,
        FilterField::Type,
        FilterField::Severity,
        FilterField::Region,
    ];

    /// Parameter name used in [`FilterParams`]
    pub fn key(&self) -> &'static str {
        match self {
            FilterField::Status => "status",
            FilterField::Category => "category",
            FilterField::Type => "type",
            FilterField::Severity => "severity",
            FilterField::Region => "region",
        }
    }
}

/// `true` unless the value is null, false, zero or an empty string
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn is_noop_filter(value: &str) -> bool {
    value.is_empty() || value == FILTER_ALL
}

/// Whether a filter value survives into the request parameters
fn is_forwarded(value: &Value) -> bool {
    is_truthy(value)
        && match value {
            Value::String(s) => !is_noop_filter(s),
            other => !is_noop_filter(&other.to_string()),
        }
}

/// Search text, named filters and free-form custom filters
#[derive(Clone, Debug, PartialEq)]
pub struct FilterState {
    pub search: String,
    named: BTreeMap<FilterField, String>,
    pub custom: BTreeMap<String, Value>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search: String::new(),
            named: FilterField::ALL
                .iter()
                .map(|f| (*f, FILTER_ALL.to_string()))
                .collect(),
            custom: BTreeMap::new(),
        }
    }
}

impl FilterState {
    pub fn get(&self, field: FilterField) -> &str {
        self.named
            .get(&field)
            .map(String::as_str)
            .unwrap_or(FILTER_ALL)
    }

    pub fn set(&mut self, field: FilterField, value: impl Into<String>) {
        self.named.insert(field, value.into());
    }

    /// Whether any filter narrows the result set
    pub fn is_active(&self) -> bool {
        !self.search.is_empty()
            || self.named.values().any(|v| !is_noop_filter(v))
            || self.custom.values().any(is_forwarded)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SortState {
    pub sort_by: Option<String>,
    pub order: SortOrder,
}

/// Client-side page window
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaginationState {
    /// 0-based
    pub page: u64,
    pub page_size: u64,
    pub total_count: u64,
    pub total_pages: u64,
}

impl PaginationState {
    fn new(page_size: u64) -> Self {
        Self {
            page: 0,
            page_size,
            total_count: 0,
            total_pages: 0,
        }
    }

    fn clamp(&mut self) {
        if self.total_pages > 0 && self.page >= self.total_pages {
            self.page = self.total_pages - 1;
        }
    }
}

/// Loading lifecycle: `Idle -> Loading -> (Idle | Error)`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Error(String),
}

/// Flattened parameters for a list call
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FilterParams(BTreeMap<String, Value>);

impl FilterParams {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn into_inner(self) -> BTreeMap<String, Value> {
        self.0
    }

    /// Convert into [`ListParams`]. `page`/`pageSize` become the page window;
    /// no-op values (empty, `"all"`, falsy custom entries) are dropped.
    pub fn to_list_params(&self) -> ListParams {
        let page = self.0.get("page").and_then(Value::as_u64).unwrap_or(0);
        let per_page = self
            .0
            .get("pageSize")
            .and_then(Value::as_u64)
            .unwrap_or(DEFAULT_PER_PAGE);

        let mut params = ListParams::new(page, per_page);
        for (key, value) in &self.0 {
            if key == "page" || key == "pageSize" || !is_forwarded(value) {
                continue;
            }
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            params = params.with_param(key, value);
        }
        params
    }
}

/// Options fixed when a page assembles its state
#[derive(Clone, Debug)]
pub struct DashboardOptions<T> {
    pub initial_tab: T,
    pub page_size: u64,
    pub sort_by: Option<String>,
    pub sort_order: SortOrder,
}

impl<T> DashboardOptions<T> {
    pub fn new(initial_tab: T) -> Self {
        Self {
            initial_tab,
            page_size: DEFAULT_PER_PAGE,
            sort_by: None,
            sort_order: SortOrder::default(),
        }
    }

    pub fn with_page_size(mut self, page_size: u64) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_sort(mut self, sort_by: &str, order: SortOrder) -> Self {
        self.sort_by = Some(sort_by.to_string());
        self.sort_order = order;
        self
    }
}

/// Tab, filter, pagination, sort, selection and loading state of one page
#[derive(Clone, Debug)]
pub struct DashboardState<T = String> {
    active_tab: T,
    filters: FilterState,
    pagination: PaginationState,
    sort: SortState,
    selected_item: Option<String>,
    selected_items: BTreeSet<String>,
    phase: LoadPhase,
    refreshing: bool,
}

impl<T: Clone + PartialEq> DashboardState<T> {
    pub fn new(initial_tab: T) -> Self {
        Self::with_options(DashboardOptions::new(initial_tab))
    }

    pub fn with_options(options: DashboardOptions<T>) -> Self {
        Self {
            active_tab: options.initial_tab,
            filters: FilterState::default(),
            pagination: PaginationState::new(options.page_size.max(1)),
            sort: SortState {
                sort_by: options.sort_by,
                order: options.sort_order,
            },
            selected_item: None,
            selected_items: BTreeSet::new(),
            phase: LoadPhase::Idle,
            refreshing: false,
        }
    }

    // ============== Tab ==============

    pub fn active_tab(&self) -> &T {
        &self.active_tab
    }

    /// Switch tabs. Each tab is an independent result set, so the page window
    /// and the single selection are reset.
    pub fn set_active_tab(&mut self, tab: T) {
        self.active_tab = tab;
        self.pagination.page = 0;
        self.selected_item = None;
    }

    // ============== Filters ==============

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn search_query(&self) -> &str {
        &self.filters.search
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.filters.search = query.into();
        self.pagination.page = 0;
    }

    pub fn set_filter(&mut self, field: FilterField, value: impl Into<String>) {
        self.filters.set(field, value);
        self.pagination.page = 0;
    }

    pub fn set_custom_filter(&mut self, key: &str, value: impl Into<Value>) {
        self.filters.custom.insert(key.to_string(), value.into());
        self.pagination.page = 0;
    }

    pub fn remove_custom_filter(&mut self, key: &str) {
        self.filters.custom.remove(key);
        self.pagination.page = 0;
    }

    /// Restore every filter to its default. Selection and tab are untouched.
    pub fn clear_filters(&mut self) {
        self.filters = FilterState::default();
        self.pagination.page = 0;
    }

    /// Derived from the current filters on every call
    pub fn has_filters(&self) -> bool {
        self.filters.is_active()
    }

    /// Flattened parameters for the next list call
    pub fn filter_params(&self) -> FilterParams {
        let mut params = BTreeMap::new();
        params.insert(
            "search".to_string(),
            Value::String(self.filters.search.clone()),
        );
        for field in FilterField::ALL {
            params.insert(
                field.key().to_string(),
                Value::String(self.filters.get(field).to_string()),
            );
        }
        params.insert("page".to_string(), Value::from(self.pagination.page));
        params.insert(
            "pageSize".to_string(),
            Value::from(self.pagination.page_size),
        );
        params.insert(
            "sortBy".to_string(),
            self.sort
                .sort_by
                .clone()
                .map(Value::String)
                .unwrap_or(Value::Null),
        );
        params.insert(
            "sortOrder".to_string(),
            Value::String(self.sort.order.as_str().to_string()),
        );
        for (key, value) in &self.filters.custom {
            params.insert(key.clone(), value.clone());
        }
        FilterParams(params)
    }

    pub fn list_params(&self) -> ListParams {
        self.filter_params().to_list_params()
    }

    // ============== Pagination ==============

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn page(&self) -> u64 {
        self.pagination.page
    }

    /// Jump to a page, clamped to the known window
    pub fn set_page(&mut self, page: u64) {
        self.pagination.page = page;
        self.pagination.clamp();
    }

    pub fn next_page(&mut self) {
        if self.pagination.page + 1 < self.pagination.total_pages {
            self.pagination.page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        self.pagination.page = self.pagination.page.saturating_sub(1);
    }

    /// Change the page size; the current window no longer applies so the page resets
    pub fn set_page_size(&mut self, page_size: u64) {
        self.pagination.page_size = page_size.max(1);
        self.pagination.total_pages =
            total_pages(self.pagination.total_count, self.pagination.page_size);
        self.pagination.page = 0;
    }

    /// Record the totals from a list response
    pub fn apply_pagination(&mut self, info: &PaginationInfo) {
        self.pagination.total_count = info.total_count;
        self.pagination.total_pages = if info.total_pages > 0 {
            info.total_pages
        } else {
            total_pages(info.total_count, self.pagination.page_size)
        };
        self.pagination.clamp();
    }

    // ============== Sort ==============

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn set_sort(&mut self, sort_by: &str, order: SortOrder) {
        self.sort.sort_by = Some(sort_by.to_string());
        self.sort.order = order;
    }

    /// Sort by `field`, flipping the order when it is already the sort field
    pub fn toggle_sort(&mut self, field: &str) {
        if self.sort.sort_by.as_deref() == Some(field) {
            self.sort.order = self.sort.order.toggled();
        } else {
            self.sort.sort_by = Some(field.to_string());
            self.sort.order = SortOrder::Asc;
        }
    }

    // ============== Selection ==============

    pub fn selected_item(&self) -> Option<&str> {
        self.selected_item.as_deref()
    }

    pub fn select_item(&mut self, id: impl Into<String>) {
        self.selected_item = Some(id.into());
    }

    pub fn clear_selection(&mut self) {
        self.selected_item = None;
    }

    pub fn selected_items(&self) -> &BTreeSet<String> {
        &self.selected_items
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_items.contains(id)
    }

    /// Add or remove `id` from the multi-selection
    pub fn toggle_item(&mut self, id: &str) {
        if !self.selected_items.remove(id) {
            self.selected_items.insert(id.to_string());
        }
    }

    pub fn select_all<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_items = ids.into_iter().map(Into::into).collect();
    }

    pub fn clear_selected_items(&mut self) {
        self.selected_items.clear();
    }

    // ============== Loading ==============

    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            LoadPhase::Error(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn start_loading(&mut self) {
        self.phase = LoadPhase::Loading;
    }

    /// Begin a refresh-triggered fetch; the previous data stays visible
    pub fn start_refresh(&mut self) {
        self.phase = LoadPhase::Loading;
        self.refreshing = true;
    }

    pub fn finish_loading(&mut self) {
        self.phase = LoadPhase::Idle;
        self.refreshing = false;
    }

    /// Record a failure. Terminates both loading and refreshing.
    pub fn set_error_message(&mut self, message: impl Into<String>) {
        self.phase = LoadPhase::Error(message.into());
        self.refreshing = false;
    }

    pub fn clear_error(&mut self) {
        if matches!(self.phase, LoadPhase::Error(_)) {
            self.phase = LoadPhase::Idle;
        }
    }
}
