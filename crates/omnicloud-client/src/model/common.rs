// Common model types

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier of a backend record.
///
/// The backend uses integer ids, but strings are accepted as-is. Numeric ids
/// serialize back as JSON numbers; `null` decodes as the empty id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_number(&self) -> Option<i64> {
        self.0.parse().ok()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl PartialEq<i64> for RecordId {
    fn eq(&self, other: &i64) -> bool {
        self.as_number() == Some(*other)
    }
}

impl PartialEq<&str> for RecordId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_number() {
            Some(n) => serializer.serialize_i64(n),
            None => serializer.serialize_str(&self.0),
        }
    }
}

struct RecordIdVisitor;

impl<'de> Visitor<'de> for RecordIdVisitor {
    type Value = RecordId;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an integer or string id")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<RecordId, E> {
        Ok(RecordId(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<RecordId, E> {
        Ok(RecordId(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<RecordId, E> {
        Ok(RecordId(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<RecordId, E> {
        Ok(RecordId(v.trim().to_string()))
    }

    fn visit_unit<E: de::Error>(self) -> Result<RecordId, E> {
        Ok(RecordId::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<RecordId, E> {
        Ok(RecordId::default())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<RecordId, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RecordIdVisitor)
    }
}

/// Page size used when a caller does not pick one
pub const DEFAULT_PER_PAGE: u64 = 10;

/// Page window over a resource collection
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationInfo {
    /// 0-based page index
    pub page: u64,
    pub per_page: u64,
    pub total_count: u64,
    pub total_pages: u64,
}

impl PaginationInfo {
    /// Build a window from totals, deriving `total_pages = ceil(total_count / per_page)`
    pub fn from_totals(page: u64, per_page: u64, total_count: u64) -> Self {
        Self {
            page,
            per_page,
            total_count,
            total_pages: total_pages(total_count, per_page),
        }
    }

    /// Window synthesized when the backend omits its pagination block
    pub fn fallback(per_page: u64, item_count: usize) -> Self {
        Self {
            page: 0,
            per_page,
            total_count: item_count as u64,
            total_pages: 1,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 0
    }
}

/// `ceil(total_count / per_page)`, with a zero page size yielding zero pages
pub fn total_pages(total_count: u64, per_page: u64) -> u64 {
    if per_page == 0 {
        0
    } else {
        total_count.div_ceil(per_page)
    }
}

/// Uniform list result
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationInfo,
}

impl<T> PaginatedResponse<T> {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Parameters for a list call
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListParams {
    pub page: u64,
    pub per_page: u64,
    /// Additional query parameters (filters, sort)
    pub extra: Vec<(String, String)>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: 0,
            per_page: DEFAULT_PER_PAGE,
            extra: Vec::new(),
        }
    }
}

impl ListParams {
    pub fn new(page: u64, per_page: u64) -> Self {
        Self {
            page,
            per_page,
            extra: Vec::new(),
        }
    }

    /// Add a query parameter; `page`/`per_page` keys are ignored since they are fields
    pub fn with_param(mut self, key: &str, value: impl Into<String>) -> Self {
        if key != "page" && key != "per_page" {
            self.extra.push((key.to_string(), value.into()));
        }
        self
    }

    /// Query pairs in request order: page, per_page, then extras
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::with_capacity(self.extra.len() + 2);
        query.push(("page".to_string(), self.page.to_string()));
        query.push(("per_page".to_string(), self.per_page.to_string()));
        query.extend(self.extra.iter().cloned());
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(5, 0), 0);
    }

    #[test]
    fn test_fallback_window() {
        let info = PaginationInfo::fallback(10, 3);
        assert_eq!(
            info,
            PaginationInfo {
                page: 0,
                per_page: 10,
                total_count: 3,
                total_pages: 1,
            }
        );
        assert!(!info.has_next());
        assert!(!info.has_prev());
    }

    #[test]
    fn test_pagination_deserialization_is_lenient() {
        let info: PaginationInfo =
            serde_json::from_str(r#"{"page":2,"per_page":25,"total_count":120}"#).unwrap();
        assert_eq!(info.page, 2);
        assert_eq!(info.per_page, 25);
        assert_eq!(info.total_pages, 0);
    }

    #[test]
    fn test_record_id_accepts_numbers_and_strings() {
        let ids: Vec<RecordId> = serde_json::from_str(r#"[7, "a1b2", " 9 ", null]"#).unwrap();
        assert_eq!(ids[0], 7);
        assert_eq!(ids[1], "a1b2");
        assert_eq!(ids[2], 9);
        assert!(ids[3].is_empty());

        assert_eq!(serde_json::to_value(&ids[0]).unwrap(), serde_json::json!(7));
        assert_eq!(serde_json::to_value(&ids[1]).unwrap(), serde_json::json!("a1b2"));
    }

    #[test]
    fn test_list_params_query() {
        let params = ListParams::new(1, 20)
            .with_param("status", "running")
            .with_param("page", "9");
        assert_eq!(
            params.to_query(),
            vec![
                ("page".to_string(), "1".to_string()),
                ("per_page".to_string(), "20".to_string()),
                ("status".to_string(), "running".to_string()),
            ]
        );
    }
}
