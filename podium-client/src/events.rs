//! Event types delivered to the host event loop.

use crate::fetch::FetchError;
use podium_api::pagination::{Connection, OffsetPage};
use podium_api::types::{LeaderboardRow, SubmissionBoardRow, SubmissionRow};

/// Completion of an issued fetch, tagged with the generation stamp of the
/// ticket that produced it.
#[derive(Debug, Clone)]
pub enum ClientEvent {
    LeaderboardPage {
        generation: u64,
        result: Result<Connection<LeaderboardRow>, FetchError>,
    },
    BoardPage {
        generation: u64,
        result: Result<Connection<SubmissionBoardRow>, FetchError>,
    },
    FeedPage {
        generation: u64,
        result: Result<OffsetPage<SubmissionRow>, FetchError>,
    },
}
