//! Identity types for Podium entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Common interface for strongly typed entity IDs.
///
/// Every ID wraps a UUIDv7 so IDs are naturally sortable by creation time.
pub trait EntityIdType: Sized {
    fn new(id: Uuid) -> Self;
    fn as_uuid(&self) -> Uuid;
    fn now_v7() -> Self {
        Self::new(Uuid::now_v7())
    }
}

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl EntityIdType for $name {
            fn new(id: Uuid) -> Self {
                Self(id)
            }

            fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

entity_id!(
    /// Identifier of a contest.
    ContestId
);
entity_id!(
    /// Identifier of a problem within a contest.
    ProblemId
);
entity_id!(
    /// Identifier of a submission.
    SubmissionId
);
entity_id!(
    /// Identifier of a registered user.
    UserId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_ids_are_timestamp_sortable() {
        let id1 = SubmissionId::now_v7();
        std::thread::sleep(std::time::Duration::from_millis(1));
        let id2 = SubmissionId::now_v7();
        assert!(id1.to_string() < id2.to_string());
    }

    #[test]
    fn entity_ids_round_trip_serde() {
        let id = ContestId::now_v7();
        let json = serde_json::to_string(&id).unwrap();
        let back: ContestId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }

    #[test]
    fn entity_ids_serialize_as_plain_uuid_strings() {
        let raw = Uuid::now_v7();
        let id = UserId::new(raw);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", raw));
    }
}
