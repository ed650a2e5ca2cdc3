//! Wire Types for the Podium API
//!
//! Request and response shapes exchanged with the Podium server, shared by
//! every client-side consumer. Two pagination protocols coexist: Relay-style
//! cursor paging (leaderboard, submission board) and linear offset paging
//! (submission feed).

pub mod error;
pub mod pagination;
pub mod query;
pub mod types;

pub use error::{ApiError, ErrorCode};
pub use pagination::{Connection, Cursor, Edge, OffsetPage, PageInfo, PageMeta};
pub use query::{CursorPageQuery, OffsetPageQuery, QueryError};
