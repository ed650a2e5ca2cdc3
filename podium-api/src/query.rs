//! Query parameter types for list endpoints.
//!
//! These are the exact shapes serialized into request query strings, so
//! every field is flat: one optional query parameter per filter, next to
//! the pagination and sort fields.

use crate::pagination::Cursor;
use podium_core::SortDirection;
use serde::{Deserialize, Serialize};

/// Query parameters for a cursor-paged list endpoint.
///
/// Exactly one of `{after + first}` or `{before + last}` may be populated;
/// a first-page request carries `first` alone. `validate` enforces this
/// before a request is sent and after parameters are decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorPageQuery {
    pub sort_by: String,
    pub sort_order: SortDirection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<Cursor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<Cursor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<u32>,
    /// Substring match on the display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Exact username.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Problem label, e.g. "A".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,
    /// Verdict name or short code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verdict: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Query parameters for an offset-paged list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OffsetPageQuery {
    /// Page number, 1-indexed.
    pub page: u32,
    /// Items per page.
    pub limit: u32,
    pub sort_by: String,
    pub sort_order: SortDirection,
    /// Substring match on the display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Exact username.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Problem label, e.g. "A".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,
    /// Verdict name or short code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verdict: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("cursor query populates both after and before")]
    ConflictingCursors,
    #[error("cursor query populates both first and last")]
    ConflictingCounts,
    #[error("cursor query pairs {0} with the wrong count field")]
    MismatchedWindow(&'static str),
    #[error("offset query page must be >= 1")]
    PageOutOfRange,
    #[error("page size must be > 0")]
    EmptyWindow,
}

impl CursorPageQuery {
    pub fn validate(&self) -> Result<(), QueryError> {
        if self.after.is_some() && self.before.is_some() {
            return Err(QueryError::ConflictingCursors);
        }
        if self.first.is_some() && self.last.is_some() {
            return Err(QueryError::ConflictingCounts);
        }
        if self.after.is_some() && self.first.is_none() {
            return Err(QueryError::MismatchedWindow("after"));
        }
        if self.before.is_some() && self.last.is_none() {
            return Err(QueryError::MismatchedWindow("before"));
        }
        if self.after.is_none() && self.before.is_none() && self.first.is_none() {
            return Err(QueryError::EmptyWindow);
        }
        if self.first == Some(0) || self.last == Some(0) {
            return Err(QueryError::EmptyWindow);
        }
        Ok(())
    }
}

impl OffsetPageQuery {
    pub fn validate(&self) -> Result<(), QueryError> {
        if self.page < 1 {
            return Err(QueryError::PageOutOfRange);
        }
        if self.limit == 0 {
            return Err(QueryError::EmptyWindow);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_page() -> CursorPageQuery {
        CursorPageQuery {
            sort_by: "score".to_string(),
            sort_order: SortDirection::Desc,
            after: None,
            before: None,
            first: Some(20),
            last: None,
            display_name: None,
            username: None,
            problem: None,
            verdict: None,
            language: None,
        }
    }

    #[test]
    fn first_page_query_is_valid() {
        assert!(first_page().validate().is_ok());
    }

    #[test]
    fn both_cursors_rejected() {
        let mut query = first_page();
        query.after = Some(Cursor::new("a"));
        query.before = Some(Cursor::new("b"));
        query.last = Some(20);
        assert_eq!(query.validate(), Err(QueryError::ConflictingCursors));
    }

    #[test]
    fn before_requires_last() {
        let mut query = first_page();
        query.first = None;
        query.before = Some(Cursor::new("b"));
        assert_eq!(query.validate(), Err(QueryError::MismatchedWindow("before")));
    }

    #[test]
    fn filters_serialize_as_flat_query_fields() {
        let mut query = first_page();
        query.username = Some("alice".to_string());
        query.display_name = Some("Ali".to_string());
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["username"], "alice");
        assert_eq!(json["displayName"], "Ali");
        assert_eq!(json["sortBy"], "score");
        assert_eq!(json["sortOrder"], "desc");
        assert_eq!(json["first"], 20);
        assert!(json.get("after").is_none());
        assert!(json.get("verdict").is_none());
    }

    #[test]
    fn query_serializes_to_a_url_query_string() {
        // The client passes these structs to reqwest's query serializer, so
        // they must urlencode without error.
        let mut query = first_page();
        query.username = Some("alice".to_string());
        let encoded = serde_urlencoded::to_string(&query).unwrap();
        assert!(encoded.contains("sortBy=score"));
        assert!(encoded.contains("sortOrder=desc"));
        assert!(encoded.contains("first=20"));
        assert!(encoded.contains("username=alice"));
        assert!(!encoded.contains("after="));
    }

    #[test]
    fn offset_query_rejects_page_zero() {
        let query = OffsetPageQuery {
            page: 0,
            limit: 20,
            sort_by: "submittedAt".to_string(),
            sort_order: SortDirection::Desc,
            display_name: None,
            username: None,
            problem: None,
            verdict: None,
            language: None,
        };
        assert_eq!(query.validate(), Err(QueryError::PageOutOfRange));
    }
}
