//! Dispatch layer: runs issued tickets against the API and feeds tagged
//! completions back into the host's event channel.
//!
//! A spawned fetch is never cancelled. If the controller has moved on by
//! the time it completes, the completion arrives with a stale generation
//! and the controller drops it.

use crate::api_client::ApiClient;
use crate::events::ClientEvent;
use crate::fetch::{FetchError, FetchTicket};
use podium_api::query::{CursorPageQuery, OffsetPageQuery};
use podium_core::ContestId;
use tokio::sync::mpsc;

pub fn spawn_leaderboard_fetch(
    api: ApiClient,
    contest_id: ContestId,
    ticket: FetchTicket<CursorPageQuery>,
    sender: mpsc::Sender<ClientEvent>,
) {
    tokio::spawn(async move {
        let result = api
            .leaderboard(contest_id, &ticket.query)
            .await
            .map_err(FetchError::from);
        if let Err(ref error) = result {
            tracing::warn!(%error, generation = ticket.generation, "leaderboard fetch failed");
        }
        let _ = sender
            .send(ClientEvent::LeaderboardPage {
                generation: ticket.generation,
                result,
            })
            .await;
    });
}

pub fn spawn_board_fetch(
    api: ApiClient,
    contest_id: ContestId,
    ticket: FetchTicket<CursorPageQuery>,
    sender: mpsc::Sender<ClientEvent>,
) {
    tokio::spawn(async move {
        let result = api
            .submission_board(contest_id, &ticket.query)
            .await
            .map_err(FetchError::from);
        if let Err(ref error) = result {
            tracing::warn!(%error, generation = ticket.generation, "submission board fetch failed");
        }
        let _ = sender
            .send(ClientEvent::BoardPage {
                generation: ticket.generation,
                result,
            })
            .await;
    });
}

pub fn spawn_feed_fetch(
    api: ApiClient,
    contest_id: ContestId,
    ticket: FetchTicket<OffsetPageQuery>,
    sender: mpsc::Sender<ClientEvent>,
) {
    tokio::spawn(async move {
        let result = api
            .submissions(contest_id, &ticket.query)
            .await
            .map_err(FetchError::from);
        if let Err(ref error) = result {
            tracing::warn!(%error, generation = ticket.generation, "submission feed fetch failed");
        }
        let _ = sender
            .send(ClientEvent::FeedPage {
                generation: ticket.generation,
                result,
            })
            .await;
    });
}
