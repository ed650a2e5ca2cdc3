//! API Response Row Types
//!
//! Node shapes returned by the list endpoints. Each view consumes exactly
//! one of these; there is no untyped record shape anywhere in the contract.

use podium_core::{ContestId, ProblemId, SubmissionId, Timestamp, UserId, Verdict};
use serde::{Deserialize, Serialize};

/// One ranked row of a contest leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    pub user_id: UserId,
    pub username: String,
    pub display_name: Option<String>,
    /// 1-based rank within the current filtered/sorted order.
    pub rank: u32,
    /// Number of problems solved.
    pub solved: u32,
    pub score: i64,
    /// Accumulated time penalty in seconds.
    pub penalty_s: i64,
}

/// Per-problem outcome cell in the submission board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemCell {
    pub problem_id: ProblemId,
    /// Display label, e.g. "A", "B".
    pub label: String,
    /// Best verdict so far, absent when the user never submitted.
    pub verdict: Option<Verdict>,
    pub attempts: u32,
    pub score: i64,
}

/// One row of the contest submission board: a user and their per-problem
/// outcome cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionBoardRow {
    pub user_id: UserId,
    pub username: String,
    pub display_name: Option<String>,
    pub cells: Vec<ProblemCell>,
}

/// One entry of the submission feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRow {
    pub submission_id: SubmissionId,
    pub contest_id: ContestId,
    pub problem_id: ProblemId,
    pub problem_label: String,
    pub user_id: UserId,
    pub username: String,
    pub verdict: Verdict,
    pub language: String,
    pub submitted_at: Timestamp,
    /// Execution time in milliseconds, absent until judging finishes.
    pub exec_time_ms: Option<u32>,
    /// Peak memory in kilobytes, absent until judging finishes.
    pub memory_kb: Option<u32>,
}
