//! Immutable request models for the paged views.
//!
//! A request model is the complete description of "what page, with what
//! filters and sort, in what direction". Models are value types: every
//! change produces a new model, and structural equality is what the fetch
//! orchestrator uses to suppress redundant requests.
//!
//! Any filter or sort change resets pagination to the first page, because
//! cursors are issued relative to one filtered/sorted order and mean
//! nothing in another.

use podium_api::pagination::Cursor;
use podium_api::query::{CursorPageQuery, OffsetPageQuery, QueryError};
use podium_core::{ContestId, SortDirection};
use std::collections::BTreeMap;

/// Filter keys understood by the list endpoints. Each maps to one named
/// query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterKey {
    /// Substring match on the display name.
    DisplayName,
    /// Exact username.
    Username,
    /// Problem label, e.g. "A".
    Problem,
    /// Verdict name or short code.
    Verdict,
    Language,
}

/// Fields a list may be sorted by. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Rank,
    Score,
    Penalty,
    Username,
    SubmittedAt,
    ExecTime,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Rank => "rank",
            SortField::Score => "score",
            SortField::Penalty => "penalty",
            SortField::Username => "username",
            SortField::SubmittedAt => "submittedAt",
            SortField::ExecTime => "execTime",
        }
    }

    pub fn parse(name: &str) -> Option<SortField> {
        match name {
            "rank" => Some(SortField::Rank),
            "score" => Some(SortField::Score),
            "penalty" => Some(SortField::Penalty),
            "username" => Some(SortField::Username),
            "submittedAt" => Some(SortField::SubmittedAt),
            "execTime" => Some(SortField::ExecTime),
            _ => None,
        }
    }
}

/// Active sort: field plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

/// Active filter constraints. Keys absent mean "no constraint"; empty
/// values are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet(BTreeMap<FilterKey, String>);

impl FilterSet {
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    pub fn get(&self, key: FilterKey) -> Option<&str> {
        self.0.get(&key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Builder-style constraint, for tests and defaults. Empty values are
    /// ignored.
    pub fn with(mut self, key: FilterKey, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.is_empty() {
            self.0.insert(key, value);
        }
        self
    }

    /// Apply a partial update: present entries overwrite, empty-valued
    /// entries clear, everything else is preserved.
    pub fn apply(&self, patch: &FilterPatch) -> FilterSet {
        let mut next = self.0.clone();
        for (key, value) in &patch.entries {
            if value.is_empty() {
                next.remove(key);
            } else {
                next.insert(*key, value.clone());
            }
        }
        FilterSet(next)
    }

    fn value(&self, key: FilterKey) -> Option<String> {
        self.0.get(&key).cloned()
    }

    /// Build from decoded query fields. Blank values count as absent, the
    /// same rule `apply` uses for patch entries.
    fn from_query_fields(entries: [(FilterKey, &Option<String>); 5]) -> FilterSet {
        let mut filters = BTreeMap::new();
        for (key, value) in entries {
            if let Some(value) = value {
                if !value.is_empty() {
                    filters.insert(key, value.clone());
                }
            }
        }
        FilterSet(filters)
    }
}

/// Partial filter/sort update. An entry with an empty value clears that
/// key — distinct from the key not appearing in the patch at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    entries: Vec<(FilterKey, String)>,
    sort: Option<SortSpec>,
}

impl FilterPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: FilterKey, value: impl Into<String>) -> Self {
        self.entries.push((key, value.into()));
        self
    }

    pub fn clear(mut self, key: FilterKey) -> Self {
        self.entries.push((key, String::new()));
        self
    }

    pub fn sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn sort_spec(&self) -> Option<SortSpec> {
        self.sort
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.sort.is_none()
    }
}

/// Pagination window of a cursor-paged request.
///
/// The variants make direction exclusivity structural: a window can point
/// forward from a cursor, backward from a cursor, or at the first page,
/// never a mixture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageCursor {
    Initial { first: u32 },
    Forward { after: Cursor, first: u32 },
    Backward { before: Cursor, last: u32 },
}

impl PageCursor {
    pub fn initial(first: u32) -> Self {
        PageCursor::Initial { first }
    }

    pub fn is_initial(&self) -> bool {
        matches!(self, PageCursor::Initial { .. })
    }

    /// Requested row count, regardless of direction.
    pub fn size(&self) -> u32 {
        match self {
            PageCursor::Initial { first } => *first,
            PageCursor::Forward { first, .. } => *first,
            PageCursor::Backward { last, .. } => *last,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("unknown sort field: {0}")]
    UnknownSortField(String),
    #[error(transparent)]
    Query(#[from] QueryError),
}

/// Request model for the cursor-paged views (leaderboard, submission
/// board).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub contest_id: ContestId,
    pub filters: FilterSet,
    pub sort: SortSpec,
    pub window: PageCursor,
}

impl PageRequest {
    /// First-page request with no filters.
    pub fn new(contest_id: ContestId, sort: SortSpec, page_size: u32) -> Self {
        Self {
            contest_id,
            filters: FilterSet::empty(),
            sort,
            window: PageCursor::initial(page_size),
        }
    }

    /// Merge a filter/sort patch. The result is always windowed back to the
    /// first page: outstanding cursors belong to the previous order.
    pub fn apply_filters(&self, patch: &FilterPatch) -> PageRequest {
        PageRequest {
            contest_id: self.contest_id,
            filters: self.filters.apply(patch),
            sort: patch.sort_spec().unwrap_or(self.sort),
            window: PageCursor::initial(self.window.size()),
        }
    }

    /// Encode to wire query parameters.
    pub fn to_query(&self) -> CursorPageQuery {
        let (after, before, first, last) = match &self.window {
            PageCursor::Initial { first } => (None, None, Some(*first), None),
            PageCursor::Forward { after, first } => {
                (Some(after.clone()), None, Some(*first), None)
            }
            PageCursor::Backward { before, last } => {
                (None, Some(before.clone()), None, Some(*last))
            }
        };
        CursorPageQuery {
            sort_by: self.sort.field.as_str().to_string(),
            sort_order: self.sort.direction,
            after,
            before,
            first,
            last,
            display_name: self.filters.value(FilterKey::DisplayName),
            username: self.filters.value(FilterKey::Username),
            problem: self.filters.value(FilterKey::Problem),
            verdict: self.filters.value(FilterKey::Verdict),
            language: self.filters.value(FilterKey::Language),
        }
    }

    /// Decode wire query parameters back into a model. Fails on conflicting
    /// cursor directions or unknown sort fields.
    pub fn from_query(
        contest_id: ContestId,
        query: &CursorPageQuery,
    ) -> Result<PageRequest, RequestError> {
        query.validate()?;
        let field = SortField::parse(&query.sort_by)
            .ok_or_else(|| RequestError::UnknownSortField(query.sort_by.clone()))?;
        let window = match (&query.after, &query.before) {
            (Some(after), None) => PageCursor::Forward {
                after: after.clone(),
                // validate() guarantees the pairing
                first: query.first.unwrap_or(0),
            },
            (None, Some(before)) => PageCursor::Backward {
                before: before.clone(),
                last: query.last.unwrap_or(0),
            },
            _ => PageCursor::Initial {
                first: query.first.unwrap_or(0),
            },
        };
        Ok(PageRequest {
            contest_id,
            filters: FilterSet::from_query_fields([
                (FilterKey::DisplayName, &query.display_name),
                (FilterKey::Username, &query.username),
                (FilterKey::Problem, &query.problem),
                (FilterKey::Verdict, &query.verdict),
                (FilterKey::Language, &query.language),
            ]),
            sort: SortSpec::new(field, query.sort_order),
            window,
        })
    }
}

/// Request model for the offset-paged submission feed. Forward-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRequest {
    pub contest_id: ContestId,
    pub filters: FilterSet,
    pub sort: SortSpec,
    /// 1-indexed page number.
    pub page: u32,
    pub limit: u32,
}

impl FeedRequest {
    pub fn new(contest_id: ContestId, sort: SortSpec, limit: u32) -> Self {
        Self {
            contest_id,
            filters: FilterSet::empty(),
            sort,
            page: 1,
            limit,
        }
    }

    /// Merge a filter/sort patch, resetting to page 1.
    pub fn apply_filters(&self, patch: &FilterPatch) -> FeedRequest {
        FeedRequest {
            contest_id: self.contest_id,
            filters: self.filters.apply(patch),
            sort: patch.sort_spec().unwrap_or(self.sort),
            page: 1,
            limit: self.limit,
        }
    }

    /// The next page under the same filters and sort.
    pub fn next_page(&self) -> FeedRequest {
        FeedRequest {
            page: self.page + 1,
            ..self.clone()
        }
    }

    /// Same request reset to page 1.
    pub fn first_page(&self) -> FeedRequest {
        FeedRequest {
            page: 1,
            ..self.clone()
        }
    }

    pub fn to_query(&self) -> OffsetPageQuery {
        OffsetPageQuery {
            page: self.page,
            limit: self.limit,
            sort_by: self.sort.field.as_str().to_string(),
            sort_order: self.sort.direction,
            display_name: self.filters.value(FilterKey::DisplayName),
            username: self.filters.value(FilterKey::Username),
            problem: self.filters.value(FilterKey::Problem),
            verdict: self.filters.value(FilterKey::Verdict),
            language: self.filters.value(FilterKey::Language),
        }
    }

    pub fn from_query(
        contest_id: ContestId,
        query: &OffsetPageQuery,
    ) -> Result<FeedRequest, RequestError> {
        query.validate()?;
        let field = SortField::parse(&query.sort_by)
            .ok_or_else(|| RequestError::UnknownSortField(query.sort_by.clone()))?;
        Ok(FeedRequest {
            contest_id,
            filters: FilterSet::from_query_fields([
                (FilterKey::DisplayName, &query.display_name),
                (FilterKey::Username, &query.username),
                (FilterKey::Problem, &query.problem),
                (FilterKey::Verdict, &query.verdict),
                (FilterKey::Language, &query.language),
            ]),
            sort: SortSpec::new(field, query.sort_order),
            page: query.page,
            limit: query.limit,
        })
    }
}
