//! Fetch orchestration primitives.
//!
//! Each controller owns a [`FetchGate`]: it suppresses fetches for a
//! request model that is structurally equal to the one already in flight
//! (or last completed), and stamps every issued fetch with a monotonically
//! increasing generation number. Completions carry the stamp back; only the
//! newest generation may touch view state, so overlapping in-flight
//! requests cannot resolve out of order into a stale window.
//!
//! Requests are never cancelled. A stale response completes normally and is
//! discarded by the generation check.

use crate::api_client::ApiClientError;
use podium_api::error::ErrorCode;

/// Typed failure reported into view state. Conversion never loses the
/// category: transport, shape mismatch, and server-reported failures stay
/// distinguishable for the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Transport failure: connection refused, timeout, TLS, etc.
    #[error("network error: {0}")]
    Network(String),
    /// Response arrived but does not match the expected shape.
    #[error("decode error: {0}")]
    Decode(String),
    /// Non-2xx response. `code` is present when the body carried the
    /// structured error payload.
    #[error("server error: {message}")]
    Server {
        code: Option<ErrorCode>,
        message: String,
    },
}

impl From<ApiClientError> for FetchError {
    fn from(err: ApiClientError) -> Self {
        match err {
            ApiClientError::Http(e) => FetchError::Network(e.to_string()),
            ApiClientError::Decode(e) => FetchError::Decode(e.to_string()),
            ApiClientError::Api(e) => FetchError::Server {
                code: Some(e.code),
                message: e.message,
            },
            ApiClientError::InvalidResponse(message) => FetchError::Server {
                code: None,
                message,
            },
            ApiClientError::Query(e) => FetchError::Decode(e.to_string()),
            ApiClientError::Config(message) => FetchError::Network(message),
        }
    }
}

/// A fetch the controller wants issued: the wire query plus the generation
/// stamp the completion must echo back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket<Q> {
    pub generation: u64,
    pub query: Q,
}

/// De-duplication and ordering gate for one controller.
#[derive(Debug, Clone)]
pub struct FetchGate<R> {
    last_issued: Option<R>,
    generation: u64,
}

impl<R: Clone + PartialEq> FetchGate<R> {
    pub fn new() -> Self {
        Self {
            last_issued: None,
            generation: 0,
        }
    }

    /// Issue a fetch for `request`, unless it is structurally equal to the
    /// last issued request. Equality is by value: models are rebuilt on
    /// every action, so identity means nothing here.
    pub fn issue(&mut self, request: &R) -> Option<u64> {
        if self.last_issued.as_ref() == Some(request) {
            return None;
        }
        Some(self.stamp(request))
    }

    /// Issue unconditionally, even for an unchanged request. This is the
    /// manual-refetch path.
    pub fn force(&mut self, request: &R) -> u64 {
        self.stamp(request)
    }

    fn stamp(&mut self, request: &R) -> u64 {
        self.generation += 1;
        self.last_issued = Some(request.clone());
        self.generation
    }

    /// Whether a completion with this stamp is the newest issue.
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn last_issued(&self) -> Option<&R> {
        self.last_issued.as_ref()
    }
}

impl<R: Clone + PartialEq> Default for FetchGate<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_issue_always_fires() {
        let mut gate = FetchGate::new();
        assert_eq!(gate.issue(&"req-a"), Some(1));
    }

    #[test]
    fn unchanged_request_is_suppressed() {
        let mut gate = FetchGate::new();
        assert_eq!(gate.issue(&"req-a"), Some(1));
        assert_eq!(gate.issue(&"req-a"), None);
    }

    #[test]
    fn changed_request_fires_with_higher_generation() {
        let mut gate = FetchGate::new();
        assert_eq!(gate.issue(&"req-a"), Some(1));
        assert_eq!(gate.issue(&"req-b"), Some(2));
    }

    #[test]
    fn force_bypasses_suppression() {
        let mut gate = FetchGate::new();
        assert_eq!(gate.issue(&"req-a"), Some(1));
        assert_eq!(gate.issue(&"req-a"), None);
        assert_eq!(gate.force(&"req-a"), 2);
    }

    #[test]
    fn only_newest_generation_is_current() {
        let mut gate = FetchGate::new();
        let first = gate.issue(&"req-a").unwrap();
        let second = gate.issue(&"req-b").unwrap();

        assert!(!gate.is_current(first));
        assert!(gate.is_current(second));
    }

    #[test]
    fn reissuing_an_old_request_still_advances_the_generation() {
        let mut gate = FetchGate::new();
        gate.issue(&"req-a");
        gate.issue(&"req-b");
        // Back to the first value: it differs from the last issued, so it
        // fires, and the generation keeps climbing.
        assert_eq!(gate.issue(&"req-a"), Some(3));
    }
}
