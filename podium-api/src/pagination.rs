//! Pagination types for list queries.
//!
//! Cursor-paged endpoints return Relay-style connections: a list of edges
//! (node + cursor pairs) plus page-info flags. Offset-paged endpoints return
//! a plain data page with a total count.

use serde::{Deserialize, Serialize};

/// Opaque, server-issued cursor marking a position in an ordered result set.
///
/// The value is implementation-specific and must be treated as an opaque
/// token by clients; it is only ever echoed back in `after`/`before`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Information about the current page in a cursor-paged result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Whether there are more items after this page.
    pub has_next_page: bool,
    /// Whether there are items before this page.
    pub has_previous_page: bool,
    /// Cursor of the first item in this page, absent when the page is empty.
    pub start_cursor: Option<Cursor>,
    /// Cursor of the last item in this page, absent when the page is empty.
    pub end_cursor: Option<Cursor>,
}

impl PageInfo {
    /// Page info for an empty result set: nothing before, nothing after.
    pub fn empty() -> Self {
        Self {
            has_next_page: false,
            has_previous_page: false,
            start_cursor: None,
            end_cursor: None,
        }
    }
}

/// A single item in a cursor-paged result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge<T> {
    /// The actual item.
    pub node: T,
    /// Cursor for this item.
    pub cursor: Cursor,
}

/// Cursor-paged result set with edges and page info.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection<T> {
    pub edges: Vec<Edge<T>>,
    #[serde(rename = "pageInfos")]
    pub page_infos: PageInfo,
}

impl<T> Connection<T> {
    /// Strip cursors and return the nodes in page order.
    pub fn into_nodes(self) -> Vec<T> {
        self.edges.into_iter().map(|edge| edge.node).collect()
    }
}

/// Offset-paged result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OffsetPage<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

/// Metadata accompanying an offset-paged result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Total number of items matching the query, before pagination.
    pub total: i64,
}
