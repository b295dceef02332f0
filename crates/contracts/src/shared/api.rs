use serde::{Deserialize, Serialize};

/// Normalized response envelope of the admin REST service.
///
/// The service wraps most payloads as `{success, data, error, count, total}`,
/// but some legacy endpoints return the bare body. The client coerces both
/// shapes into this structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub total: Option<u64>,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            count: None,
            total: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            count: None,
            total: None,
        }
    }
}

/// Query parameters accepted by list endpoints (`?page=1&limit=50&search=...`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl ListQuery {
    pub fn page(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
            search: None,
        }
    }

    pub fn with_search(mut self, search: &str) -> Self {
        let trimmed = search.trim();
        self.search = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_accepts_partial_body() {
        let env: ApiEnvelope<Vec<u32>> =
            serde_json::from_str(r#"{"success":true,"data":[1,2],"total":2}"#).unwrap();
        assert!(env.success);
        assert_eq!(env.data, Some(vec![1, 2]));
        assert_eq!(env.total, Some(2));
        assert_eq!(env.count, None);
        assert_eq!(env.error, None);
    }

    #[test]
    fn blank_search_is_dropped() {
        let q = ListQuery::page(1, 20).with_search("   ");
        assert_eq!(q.search, None);
        let q = ListQuery::page(1, 20).with_search(" villa ");
        assert_eq!(q.search.as_deref(), Some("villa"));
    }
}
