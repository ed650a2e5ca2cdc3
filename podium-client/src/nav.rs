//! Page navigation over cursor-paged requests.
//!
//! Navigation derives the next request model from the current model plus
//! the page info of the last response. Navigating past either edge is a
//! no-op, not an error: callers invoke `advance`/`retreat` unconditionally
//! and issue a fetch only when a new model comes back.

use crate::request::{PageCursor, PageRequest};
use podium_api::pagination::PageInfo;

/// Request for the next page, or `None` when the current page is the last
/// one (or the response carried no end cursor).
pub fn advance(current: &PageRequest, info: &PageInfo, size: u32) -> Option<PageRequest> {
    if !info.has_next_page {
        return None;
    }
    let after = info.end_cursor.clone()?;
    Some(PageRequest {
        window: PageCursor::Forward { after, first: size },
        ..current.clone()
    })
}

/// Request for the previous page, or `None` at the first page.
pub fn retreat(current: &PageRequest, info: &PageInfo, size: u32) -> Option<PageRequest> {
    if !info.has_previous_page {
        return None;
    }
    let before = info.start_cursor.clone()?;
    Some(PageRequest {
        window: PageCursor::Backward { before, last: size },
        ..current.clone()
    })
}
