//! Platform-scoped HTTP helper
//!
//! Every resource request goes through [`PlatformHttpClient`], which prefixes
//! the path with `/platform/{id}` and speaks JSON in both directions. The
//! helper performs exactly one network call per request: it does not retry,
//! cache or log.

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use serde::{Serialize, de::DeserializeOwned};

pub use reqwest::Method;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::model::PlatformId;

const JSON: &str = "application/json";

/// Build `{base}/platform/{id}/{path}` with exactly one slash between the id
/// and the path, regardless of a leading slash on `path`.
pub fn platform_api_url(base_url: &str, platform_id: &PlatformId, path: &str) -> String {
    format!(
        "{}/platform/{}/{}",
        base_url.trim_end_matches('/'),
        platform_id,
        path.trim_start_matches('/')
    )
}

/// Per-request overrides
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
    /// Extra headers, applied after the JSON defaults
    pub headers: Vec<(String, String)>,
    /// Replaces the method passed to [`PlatformHttpClient::request`]
    pub method: Option<Method>,
    /// JSON request body
    pub body: Option<serde_json::Value>,
    pub query: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Serialize `body` as the JSON request body
    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn with_query<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }
}

/// Low-level HTTP helper shared by all resource clients
#[derive(Clone, Debug)]
pub struct PlatformHttpClient {
    client: Client,
    base_url: String,
}

impl PlatformHttpClient {
    /// Create a new HTTP helper
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(ms) = config.connect_timeout_ms {
            builder = builder.connect_timeout(Duration::from_millis(ms));
        }
        if let Some(ms) = config.request_timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.normalized_base_url().to_string(),
        })
    }

    /// Create a helper for `OMNICLOUD_API_URL` or the default API root
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for a platform-scoped path
    pub fn platform_url(&self, platform_id: &PlatformId, path: &str) -> String {
        platform_api_url(&self.base_url, platform_id, path)
    }

    /// Issue a platform-scoped request and decode the JSON response
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        platform_id: &PlatformId,
        path: &str,
        options: RequestOptions,
    ) -> Result<T> {
        let url = self.platform_url(platform_id, path);
        let method = options.method.clone().unwrap_or(method);
        let builder = self.apply_options(self.client.request(method, url), options);
        self.send(builder).await
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, platform_id: &PlatformId, path: &str) -> Result<T> {
        self.request(Method::GET, platform_id, path, RequestOptions::default())
            .await
    }

    /// Make a GET request with query parameters
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        platform_id: &PlatformId,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<T> {
        let options = RequestOptions {
            query,
            ..Default::default()
        };
        self.request(Method::GET, platform_id, path, options).await
    }

    /// Make a POST request with JSON body
    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        platform_id: &PlatformId,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let options = RequestOptions::new().with_json(body)?;
        self.request(Method::POST, platform_id, path, options).await
    }

    /// Make a PUT request with JSON body
    pub async fn put_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        platform_id: &PlatformId,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let options = RequestOptions::new().with_json(body)?;
        self.request(Method::PUT, platform_id, path, options).await
    }

    /// Make a PATCH request with JSON body
    pub async fn patch_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        platform_id: &PlatformId,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let options = RequestOptions::new().with_json(body)?;
        self.request(Method::PATCH, platform_id, path, options).await
    }

    /// Make a DELETE request
    pub async fn delete<T: DeserializeOwned>(
        &self,
        platform_id: &PlatformId,
        path: &str,
    ) -> Result<T> {
        self.request(Method::DELETE, platform_id, path, RequestOptions::default())
            .await
    }

    /// GET a path outside any platform scope, e.g. `/platforms`.
    ///
    /// `bearer_token` is sent as `Authorization: Bearer {token}` when present.
    pub async fn get_unscoped<T: DeserializeOwned>(
        &self,
        path: &str,
        bearer_token: Option<&str>,
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut options = RequestOptions::default();
        if let Some(token) = bearer_token.filter(|t| !t.is_empty()) {
            options = options.with_header(AUTHORIZATION.as_str(), &format!("Bearer {}", token));
        }
        let builder = self.apply_options(self.client.get(url), options);
        self.send(builder).await
    }

    fn apply_options(&self, builder: RequestBuilder, options: RequestOptions) -> RequestBuilder {
        let mut builder = builder.header(CONTENT_TYPE, JSON).header(ACCEPT, JSON);

        for (name, value) in &options.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }
        if let Some(body) = &options.body {
            builder = builder.body(body.to_string());
        }
        builder
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ClientError::Request {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::from_slice(b"null")?);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}
