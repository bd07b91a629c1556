//! Generic platform-scoped resource client
//!
//! [`ResourceClient`] implements the list/get/create/update/delete pattern
//! shared by every resource. Resource-specific actions live in inherent
//! `impl ResourceClient<T>` blocks under [`crate::api`].

use std::fmt::{self, Display};
use std::marker::PhantomData;

use serde::de::Error as _;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::http::PlatformHttpClient;
use crate::model::{ListParams, PaginatedResponse, PaginationInfo, PlatformId};

/// A backend resource reachable under `/platform/{id}/{PATH}`
pub trait Resource: DeserializeOwned + Send + 'static {
    /// Path segment, e.g. `audit-logs`
    const PATH: &'static str;
    /// Key of the item array in list responses, e.g. `audit_logs`
    const COLLECTION_KEY: &'static str;
}

/// Client for one resource type, bound to one platform
pub struct ResourceClient<R> {
    http: PlatformHttpClient,
    platform_id: PlatformId,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            platform_id: self.platform_id.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R> fmt::Debug for ResourceClient<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceClient")
            .field("resource", &std::any::type_name::<R>())
            .field("platform_id", &self.platform_id)
            .finish()
    }
}

impl<R: Resource> ResourceClient<R> {
    pub fn new(http: PlatformHttpClient, platform_id: impl Into<PlatformId>) -> Self {
        Self {
            http,
            platform_id: platform_id.into(),
            _resource: PhantomData,
        }
    }

    pub fn platform_id(&self) -> &PlatformId {
        &self.platform_id
    }

    /// Rebind to another platform. Requests already in flight keep the old id.
    pub fn set_platform_id(&mut self, platform_id: impl Into<PlatformId>) {
        self.platform_id = platform_id.into();
    }

    pub fn http(&self) -> &PlatformHttpClient {
        &self.http
    }

    /// List one page, normalized into [`PaginatedResponse`]
    pub async fn list(&self, params: &ListParams) -> Result<PaginatedResponse<R>> {
        let value: Value = self
            .http
            .get_with_query(&self.platform_id, R::PATH, params.to_query())
            .await?;
        let page = normalize_list(value, R::COLLECTION_KEY, params.per_page)?;
        debug!(
            resource = R::PATH,
            platform_id = %self.platform_id,
            page = page.pagination.page,
            count = page.data.len(),
            "listed resources"
        );
        Ok(page)
    }

    pub async fn get(&self, id: impl Display) -> Result<R> {
        self.http
            .get(&self.platform_id, &self.item_path(&id))
            .await
    }

    pub async fn create<B: Serialize + ?Sized>(&self, body: &B) -> Result<R> {
        self.http.post_json(&self.platform_id, R::PATH, body).await
    }

    /// Replace a record (`PUT`)
    pub async fn update<B: Serialize + ?Sized>(&self, id: impl Display, body: &B) -> Result<R> {
        self.http
            .put_json(&self.platform_id, &self.item_path(&id), body)
            .await
    }

    /// Partially update a record (`PATCH`)
    pub async fn patch<B: Serialize + ?Sized>(&self, id: impl Display, body: &B) -> Result<R> {
        self.http
            .patch_json(&self.platform_id, &self.item_path(&id), body)
            .await
    }

    /// Delete a record and return the server's representation of it.
    /// A `204` or empty body yields `None`.
    pub async fn delete(&self, id: impl Display) -> Result<Option<R>> {
        let value: Value = self
            .http
            .delete(&self.platform_id, &self.item_path(&id))
            .await?;
        match value {
            Value::Null => Ok(None),
            value => Ok(Some(serde_json::from_value(value)?)),
        }
    }

    /// `POST /{PATH}/{id}/{action}` returning the updated record
    pub async fn action<B: Serialize + ?Sized>(
        &self,
        id: impl Display,
        action: &str,
        body: Option<&B>,
    ) -> Result<R> {
        let path = format!("{}/{}", self.item_path(&id), action);
        match body {
            Some(body) => self.http.post_json(&self.platform_id, &path, body).await,
            None => {
                self.http
                    .post_json(&self.platform_id, &path, &serde_json::json!({}))
                    .await
            }
        }
    }

    /// `GET /{PATH}/{id}/{sub}` decoded as `T`
    pub async fn get_sub<T: DeserializeOwned>(&self, id: impl Display, sub: &str) -> Result<T> {
        let path = format!("{}/{}", self.item_path(&id), sub);
        self.http.get(&self.platform_id, &path).await
    }

    fn item_path(&self, id: &dyn Display) -> String {
        format!("{}/{}", R::PATH, id)
    }
}

/// Normalize a list response into `{ data, pagination }`.
///
/// Accepts `{ <collection_key>: [...], pagination: {...} }`, the same object
/// with the items under `data`/`items`, a bare array, or `null`. A missing or
/// `null` pagination block is replaced by a single page holding every item.
pub fn normalize_list<T: DeserializeOwned>(
    value: Value,
    collection_key: &str,
    per_page: u64,
) -> Result<PaginatedResponse<T>> {
    let (items, pagination) = match value {
        Value::Array(items) => (items, None),
        Value::Null => (Vec::new(), None),
        Value::Object(mut map) => {
            let items = match [collection_key, "data", "items"]
                .iter()
                .find_map(|key| map.remove(*key))
            {
                Some(Value::Array(items)) => items,
                Some(Value::Null) | None => Vec::new(),
                Some(other) => {
                    return Err(ClientError::Decode(serde_json::Error::custom(format!(
                        "expected array under '{}', got {}",
                        collection_key,
                        json_kind(&other)
                    ))));
                }
            };
            let pagination = match map.remove("pagination") {
                Some(Value::Null) | None => None,
                Some(block) => Some(serde_json::from_value::<PaginationInfo>(block)?),
            };
            (items, pagination)
        }
        other => {
            return Err(ClientError::Decode(serde_json::Error::custom(format!(
                "unexpected list response: {}",
                json_kind(&other)
            ))));
        }
    };

    let data = items
        .into_iter()
        .map(serde_json::from_value)
        .collect::<std::result::Result<Vec<T>, _>>()?;
    let pagination = pagination.unwrap_or_else(|| PaginationInfo::fallback(per_page, data.len()));

    Ok(PaginatedResponse { data, pagination })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
