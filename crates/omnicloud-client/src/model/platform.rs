// Platform (tenant/environment) model

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lenient;

/// Scoping key used in every platform-scoped API path.
///
/// Accepts numeric and string ids alike; the wire form is its `Display`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlatformId(String);

impl PlatformId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value, when the id is a string-encoded integer
    pub fn as_number(&self) -> Option<i64> {
        self.0.trim().parse().ok()
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlatformId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PlatformId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&PlatformId> for PlatformId {
    fn from(id: &PlatformId) -> Self {
        id.clone()
    }
}

macro_rules! platform_id_from_int {
    ($($t:ty),+) => {
        $(
            impl From<$t> for PlatformId {
                fn from(id: $t) -> Self {
                    Self(id.to_string())
                }
            }
        )+
    };
}

platform_id_from_int!(i32, i64, u32, u64);

/// A platform as returned by `GET /platforms`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Platform {
    pub id: i64,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub name: String,
    pub description: Option<String>,
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Platform {
    pub fn platform_id(&self) -> PlatformId {
        PlatformId::from(self.id)
    }
}
