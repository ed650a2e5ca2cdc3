//! View state and per-view controllers.
//!
//! Each view owns one controller. A controller holds the current immutable
//! request model, the fetch gate, and the externally observable view state.
//! Action methods never perform I/O: they return a [`FetchTicket`]
//! describing the wire call to issue (or `None` when the action is a no-op
//! or the fetch was suppressed), and the host later feeds the tagged
//! completion back through `complete`.

use crate::api_client::ApiClient;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::events::ClientEvent;
use crate::fetch::{FetchError, FetchGate, FetchTicket};
use crate::nav;
use crate::notifications::{NotificationLevel, Notifier};
use crate::request::{FeedRequest, FilterPatch, PageRequest, SortField, SortSpec};
use podium_api::pagination::{Connection, OffsetPage, PageInfo};
use podium_api::query::{CursorPageQuery, OffsetPageQuery};
use podium_api::types::{LeaderboardRow, SubmissionBoardRow, SubmissionRow};
use podium_core::{ContestId, EntityIdType, SortDirection};
use uuid::Uuid;

/// Rows that can be addressed by a stable ID, for selection tracking.
pub trait HasRowId {
    fn row_id(&self) -> Uuid;
}

impl HasRowId for LeaderboardRow {
    fn row_id(&self) -> Uuid {
        self.user_id.as_uuid()
    }
}

impl HasRowId for SubmissionBoardRow {
    fn row_id(&self) -> Uuid {
        self.user_id.as_uuid()
    }
}

impl HasRowId for SubmissionRow {
    fn row_id(&self) -> Uuid {
        self.submission_id.as_uuid()
    }
}

// ============================================================================
// VIEW STATE
// ============================================================================

/// State of a windowed (replace-policy) view: exactly one page of rows.
#[derive(Debug, Clone)]
pub struct WindowState<T> {
    pub rows: Vec<T>,
    pub page_info: PageInfo,
    pub loading: bool,
    pub error: Option<FetchError>,
    pub selected: Option<Uuid>,
}

impl<T> WindowState<T> {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            page_info: PageInfo::empty(),
            loading: false,
            error: None,
            selected: None,
        }
    }

    fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Failure leaves rows and page info untouched so the previous window
    /// stays visible.
    fn fail(&mut self, error: FetchError) {
        self.loading = false;
        self.error = Some(error);
    }
}

impl<T: HasRowId> WindowState<T> {
    /// Replace policy: the response becomes the whole visible window.
    /// Selection survives only if the selected row is still present.
    fn replace(&mut self, rows: Vec<T>, page_info: PageInfo) {
        self.rows = rows;
        self.page_info = page_info;
        self.loading = false;
        self.error = None;
        if let Some(id) = self.selected {
            if !self.rows.iter().any(|row| row.row_id() == id) {
                self.selected = None;
            }
        }
    }
}

impl<T> Default for WindowState<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// State of the append (infinite-scroll) view: an accumulated list.
#[derive(Debug, Clone)]
pub struct FeedState<T> {
    pub rows: Vec<T>,
    /// Whether another page is believed to exist. Inferred from the last
    /// page being full; a short page means exhaustion.
    pub has_more: bool,
    pub loading: bool,
    /// Set while a further page loads; the accumulated rows stay visible.
    pub loading_more: bool,
    pub error: Option<FetchError>,
    pub selected: Option<Uuid>,
    /// Server-reported total, informational only.
    pub total: Option<i64>,
}

impl<T> FeedState<T> {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            has_more: false,
            loading: false,
            loading_more: false,
            error: None,
            selected: None,
            total: None,
        }
    }

    fn begin_refresh(&mut self) {
        self.loading = true;
        self.loading_more = false;
    }

    fn begin_load_more(&mut self) {
        self.loading_more = true;
    }

    fn fail(&mut self, error: FetchError) {
        self.loading = false;
        self.loading_more = false;
        self.error = Some(error);
    }

    fn extend(&mut self, mut rows: Vec<T>, has_more: bool, total: i64) {
        self.rows.append(&mut rows);
        self.has_more = has_more;
        self.loading = false;
        self.loading_more = false;
        self.error = None;
        self.total = Some(total);
    }
}

impl<T: HasRowId> FeedState<T> {
    fn reset(&mut self, rows: Vec<T>, has_more: bool, total: i64) {
        self.rows = rows;
        self.has_more = has_more;
        self.loading = false;
        self.loading_more = false;
        self.error = None;
        self.total = Some(total);
        if let Some(id) = self.selected {
            if !self.rows.iter().any(|row| row.row_id() == id) {
                self.selected = None;
            }
        }
    }
}

impl<T> Default for FeedState<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// CURSOR-PAGED CONTROLLER (leaderboard, submission board)
// ============================================================================

/// Controller for a windowed, cursor-paged view.
#[derive(Debug, Clone)]
pub struct CursorPager<T> {
    request: PageRequest,
    gate: FetchGate<PageRequest>,
    pub state: WindowState<T>,
    page_size: u32,
}

pub type LeaderboardController = CursorPager<LeaderboardRow>;
pub type SubmissionBoardController = CursorPager<SubmissionBoardRow>;

impl<T: HasRowId> CursorPager<T> {
    pub fn new(contest_id: ContestId, sort: SortSpec, page_size: u32) -> Self {
        Self {
            request: PageRequest::new(contest_id, sort, page_size),
            gate: FetchGate::new(),
            state: WindowState::new(),
            page_size,
        }
    }

    pub fn request(&self) -> &PageRequest {
        &self.request
    }

    /// Issue the initial fetch. Suppressed if already started.
    pub fn start(&mut self) -> Option<FetchTicket<CursorPageQuery>> {
        self.issue(self.request.clone())
    }

    /// Merge a filter/sort patch and fetch the rewound first page.
    pub fn update_filters(&mut self, patch: &FilterPatch) -> Option<FetchTicket<CursorPageQuery>> {
        self.issue(self.request.apply_filters(patch))
    }

    /// Fetch the next page. No-op on the last page.
    pub fn advance(&mut self) -> Option<FetchTicket<CursorPageQuery>> {
        let next = nav::advance(&self.request, &self.state.page_info, self.page_size)?;
        self.issue(next)
    }

    /// Fetch the previous page. No-op on the first page.
    pub fn retreat(&mut self) -> Option<FetchTicket<CursorPageQuery>> {
        let previous = nav::retreat(&self.request, &self.state.page_info, self.page_size)?;
        self.issue(previous)
    }

    /// Re-fetch the current request, bypassing de-duplication.
    pub fn refresh(&mut self) -> FetchTicket<CursorPageQuery> {
        let generation = self.gate.force(&self.request);
        self.state.begin_load();
        tracing::debug!(generation, "forced page refetch");
        FetchTicket {
            generation,
            query: self.request.to_query(),
        }
    }

    /// Apply a tagged completion. Stale generations are discarded without
    /// touching view state. Returns whether the completion was applied.
    pub fn complete(
        &mut self,
        generation: u64,
        result: Result<Connection<T>, FetchError>,
    ) -> bool {
        if !self.gate.is_current(generation) {
            tracing::debug!(
                generation,
                current = self.gate.generation(),
                "discarding stale page response"
            );
            return false;
        }
        match result {
            Ok(connection) => {
                let page_info = connection.page_infos.clone();
                self.state.replace(connection.into_nodes(), page_info);
            }
            Err(error) => {
                tracing::warn!(%error, "page fetch failed");
                self.state.fail(error);
            }
        }
        true
    }

    pub fn select_next(&mut self) {
        select_next_id(&self.state.rows, &mut self.state.selected);
    }

    pub fn select_previous(&mut self) {
        select_prev_id(&self.state.rows, &mut self.state.selected);
    }

    fn issue(&mut self, next: PageRequest) -> Option<FetchTicket<CursorPageQuery>> {
        let generation = match self.gate.issue(&next) {
            Some(generation) => generation,
            None => {
                tracing::debug!("suppressing fetch for unchanged request");
                return None;
            }
        };
        self.request = next;
        self.state.begin_load();
        tracing::debug!(generation, "issuing page fetch");
        Some(FetchTicket {
            generation,
            query: self.request.to_query(),
        })
    }
}

// ============================================================================
// OFFSET-PAGED CONTROLLER (submission feed)
// ============================================================================

/// Controller for the append-policy, offset-paged submission feed.
#[derive(Debug, Clone)]
pub struct SubmissionFeedController {
    request: FeedRequest,
    gate: FetchGate<FeedRequest>,
    pub state: FeedState<SubmissionRow>,
}

impl SubmissionFeedController {
    pub fn new(contest_id: ContestId, limit: u32) -> Self {
        let sort = SortSpec::new(SortField::SubmittedAt, SortDirection::Desc);
        Self {
            request: FeedRequest::new(contest_id, sort, limit),
            gate: FetchGate::new(),
            state: FeedState::new(),
        }
    }

    pub fn request(&self) -> &FeedRequest {
        &self.request
    }

    /// Issue the initial fetch. Suppressed if already started.
    pub fn start(&mut self) -> Option<FetchTicket<OffsetPageQuery>> {
        let next = self.request.clone();
        let generation = self.gate.issue(&next)?;
        self.request = next;
        self.state.begin_refresh();
        tracing::debug!(generation, "issuing feed fetch");
        Some(FetchTicket {
            generation,
            query: self.request.to_query(),
        })
    }

    /// Merge a filter/sort patch and reload from page 1.
    pub fn update_filters(&mut self, patch: &FilterPatch) -> Option<FetchTicket<OffsetPageQuery>> {
        let next = self.request.apply_filters(patch);
        let generation = match self.gate.issue(&next) {
            Some(generation) => generation,
            None => {
                tracing::debug!("suppressing feed fetch for unchanged request");
                return None;
            }
        };
        self.request = next;
        self.state.begin_refresh();
        tracing::debug!(generation, "issuing feed fetch");
        Some(FetchTicket {
            generation,
            query: self.request.to_query(),
        })
    }

    /// Fetch the next page and append it. No-op when exhausted or while a
    /// load is already running.
    pub fn load_more(&mut self) -> Option<FetchTicket<OffsetPageQuery>> {
        if !self.state.has_more || self.state.loading || self.state.loading_more {
            return None;
        }
        let next = self.request.next_page();
        let generation = self.gate.issue(&next)?;
        self.request = next;
        self.state.begin_load_more();
        tracing::debug!(generation, page = self.request.page, "issuing feed page fetch");
        Some(FetchTicket {
            generation,
            query: self.request.to_query(),
        })
    }

    /// Reload from page 1 under the current filters, bypassing
    /// de-duplication.
    pub fn refresh(&mut self) -> FetchTicket<OffsetPageQuery> {
        self.request = self.request.first_page();
        let generation = self.gate.force(&self.request);
        self.state.begin_refresh();
        tracing::debug!(generation, "forced feed refetch");
        FetchTicket {
            generation,
            query: self.request.to_query(),
        }
    }

    /// Apply a tagged completion. Returns whether it was applied.
    pub fn complete(
        &mut self,
        generation: u64,
        result: Result<OffsetPage<SubmissionRow>, FetchError>,
    ) -> bool {
        if !self.gate.is_current(generation) {
            tracing::debug!(
                generation,
                current = self.gate.generation(),
                "discarding stale feed response"
            );
            return false;
        }
        match result {
            Ok(page) => {
                // The offset protocol carries no "has next" flag: a full
                // page implies continuation, a short page means exhaustion.
                let has_more = page.data.len() as u32 == self.request.limit;
                if self.request.page == 1 {
                    self.state.reset(page.data, has_more, page.meta.total);
                } else {
                    self.state.extend(page.data, has_more, page.meta.total);
                }
            }
            Err(error) => {
                tracing::warn!(%error, "feed fetch failed");
                self.state.fail(error);
            }
        }
        true
    }

    pub fn select_next(&mut self) {
        select_next_id(&self.state.rows, &mut self.state.selected);
    }

    pub fn select_previous(&mut self) {
        select_prev_id(&self.state.rows, &mut self.state.selected);
    }
}

// ============================================================================
// APP AGGREGATE
// ============================================================================

/// All controllers for one contest, plus the event routing glue.
pub struct App {
    pub config: ClientConfig,
    pub api: ApiClient,
    pub leaderboard: LeaderboardController,
    pub board: SubmissionBoardController,
    pub feed: SubmissionFeedController,
    notifier: Box<dyn Notifier>,
}

impl App {
    pub fn new(
        config: ClientConfig,
        api: ApiClient,
        contest_id: ContestId,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        let page_size = config.page_size;
        Self {
            leaderboard: CursorPager::new(
                contest_id,
                SortSpec::new(SortField::Score, SortDirection::Desc),
                page_size,
            ),
            board: CursorPager::new(
                contest_id,
                SortSpec::new(SortField::Username, SortDirection::Asc),
                page_size,
            ),
            feed: SubmissionFeedController::new(contest_id, page_size),
            config,
            api,
            notifier,
        }
    }

    /// Load config, build the API client, and assemble the controllers.
    pub fn bootstrap(contest_id: ContestId, notifier: Box<dyn Notifier>) -> Result<Self, ClientError> {
        let config = ClientConfig::load()?;
        let api = ApiClient::new(&config)?;
        Ok(Self::new(config, api, contest_id, notifier))
    }

    /// Route a completion to its controller and surface applied failures
    /// through the notifier. Stale completions are silent.
    pub fn handle_event(&mut self, event: ClientEvent) {
        match event {
            ClientEvent::LeaderboardPage { generation, result } => {
                let applied = self.leaderboard.complete(generation, result);
                if applied {
                    if let Some(error) = &self.leaderboard.state.error {
                        self.notifier.notify(
                            NotificationLevel::Error,
                            format!("Leaderboard load failed: {}", error),
                        );
                    }
                }
            }
            ClientEvent::BoardPage { generation, result } => {
                let applied = self.board.complete(generation, result);
                if applied {
                    if let Some(error) = &self.board.state.error {
                        self.notifier.notify(
                            NotificationLevel::Error,
                            format!("Submission board load failed: {}", error),
                        );
                    }
                }
            }
            ClientEvent::FeedPage { generation, result } => {
                let applied = self.feed.complete(generation, result);
                if applied {
                    if let Some(error) = &self.feed.state.error {
                        self.notifier.notify(
                            NotificationLevel::Error,
                            format!("Submission feed load failed: {}", error),
                        );
                    }
                }
            }
        }
    }
}

// ============================================================================
// SELECTION HELPERS
// ============================================================================

fn select_next_id<T: HasRowId>(items: &[T], selected: &mut Option<Uuid>) {
    if items.is_empty() {
        *selected = None;
        return;
    }
    let index = selected
        .and_then(|id| items.iter().position(|item| item.row_id() == id))
        .unwrap_or(usize::MAX);
    let next = if index == usize::MAX {
        0
    } else {
        (index + 1) % items.len()
    };
    *selected = Some(items[next].row_id());
}

fn select_prev_id<T: HasRowId>(items: &[T], selected: &mut Option<Uuid>) {
    if items.is_empty() {
        *selected = None;
        return;
    }
    let index = selected
        .and_then(|id| items.iter().position(|item| item.row_id() == id))
        .unwrap_or(0);
    let prev = if index == 0 { items.len() - 1 } else { index - 1 };
    *selected = Some(items[prev].row_id());
}

// ============================================================================
// TESTS
// ============================================================================
