//! Enum types for Podium entities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Judging outcome of a submission.
///
/// `Pending` and `Judging` are transient states; all other variants are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Pending,
    Judging,
    Accepted,
    WrongAnswer,
    TimeLimitExceeded,
    MemoryLimitExceeded,
    RuntimeError,
    CompileError,
}

impl Verdict {
    /// Whether judging has finished for this submission.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Verdict::Pending | Verdict::Judging)
    }
}

/// Ordering direction for sorted queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Verdict::Pending => "Pending",
            Verdict::Judging => "Judging",
            Verdict::Accepted => "Accepted",
            Verdict::WrongAnswer => "Wrong Answer",
            Verdict::TimeLimitExceeded => "Time Limit Exceeded",
            Verdict::MemoryLimitExceeded => "Memory Limit Exceeded",
            Verdict::RuntimeError => "Runtime Error",
            Verdict::CompileError => "Compile Error",
        };
        write!(f, "{}", value)
    }
}

impl FromStr for Verdict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "pending" => Ok(Verdict::Pending),
            "judging" | "running" => Ok(Verdict::Judging),
            "accepted" | "ac" => Ok(Verdict::Accepted),
            "wronganswer" | "wa" => Ok(Verdict::WrongAnswer),
            "timelimitexceeded" | "tle" => Ok(Verdict::TimeLimitExceeded),
            "memorylimitexceeded" | "mle" => Ok(Verdict::MemoryLimitExceeded),
            "runtimeerror" | "re" => Ok(Verdict::RuntimeError),
            "compileerror" | "ce" => Ok(Verdict::CompileError),
            _ => Err(format!("Invalid Verdict: {}", s)),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{}", value)
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            _ => Err(format!("Invalid SortDirection: {}", s)),
        }
    }
}

fn normalize_token(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_display_from_str_round_trip() {
        let all = [
            Verdict::Pending,
            Verdict::Judging,
            Verdict::Accepted,
            Verdict::WrongAnswer,
            Verdict::TimeLimitExceeded,
            Verdict::MemoryLimitExceeded,
            Verdict::RuntimeError,
            Verdict::CompileError,
        ];
        for verdict in all {
            let parsed: Verdict = verdict.to_string().parse().unwrap();
            assert_eq!(parsed, verdict);
        }
    }

    #[test]
    fn verdict_accepts_short_codes() {
        assert_eq!("AC".parse::<Verdict>().unwrap(), Verdict::Accepted);
        assert_eq!("wa".parse::<Verdict>().unwrap(), Verdict::WrongAnswer);
        assert_eq!("TLE".parse::<Verdict>().unwrap(), Verdict::TimeLimitExceeded);
    }

    #[test]
    fn verdict_terminal_states() {
        assert!(!Verdict::Pending.is_terminal());
        assert!(!Verdict::Judging.is_terminal());
        assert!(Verdict::Accepted.is_terminal());
        assert!(Verdict::WrongAnswer.is_terminal());
    }

    #[test]
    fn sort_direction_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&SortDirection::Asc).unwrap(), "\"asc\"");
        assert_eq!(serde_json::to_string(&SortDirection::Desc).unwrap(), "\"desc\"");
    }

    #[test]
    fn sort_direction_defaults_to_desc() {
        assert_eq!(SortDirection::default(), SortDirection::Desc);
    }
}
