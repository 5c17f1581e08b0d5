//! Message entity and interaction summaries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skyline_common::constants::ACTORS_PREVIEW_LIMIT;
use skyline_common::types::AccountId;

/// A message posted by an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Message identifier.
    pub id: i64,
    /// Account that owns the message.
    pub account_id: AccountId,
    /// Message text.
    pub body: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Creates a message stamped with the current time.
    #[must_use]
    pub fn new(id: i64, account_id: AccountId, body: impl Into<String>) -> Self {
        Self {
            id,
            account_id,
            body: body.into(),
            created_at: Utc::now(),
        }
    }
}

/// How accounts interacted with a message for one interaction kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionSummary {
    /// Whether the viewing account took part.
    pub is_interacted: bool,
    /// First few actors, in interaction order.
    pub actors_preview: Vec<AccountId>,
    /// Total number of actors.
    pub actors_count: usize,
}

impl InteractionSummary {
    /// Summarises `actors` from the point of view of `viewer`.
    #[must_use]
    pub fn from_actors(viewer: &AccountId, actors: &[AccountId]) -> Self {
        Self {
            is_interacted: actors.contains(viewer),
            actors_preview: actors.iter().take(ACTORS_PREVIEW_LIMIT).cloned().collect(),
            actors_count: actors.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<AccountId> {
        raw.iter().map(|s| AccountId::new(*s)).collect()
    }

    #[test]
    fn summary_truncates_preview_but_counts_everyone() {
        let actors = ids(&["a", "b", "c", "d", "e"]);
        let summary = InteractionSummary::from_actors(&AccountId::new("z"), &actors);
        assert_eq!(summary.actors_preview, ids(&["a", "b", "c"]));
        assert_eq!(summary.actors_count, 5);
        assert!(!summary.is_interacted);
    }

    #[test]
    fn summary_marks_viewer_participation() {
        let actors = ids(&["a", "viewer"]);
        let summary = InteractionSummary::from_actors(&AccountId::new("viewer"), &actors);
        assert!(summary.is_interacted);
    }

    #[test]
    fn message_serializes_camel_case() {
        let message = Message::new(7, AccountId::new("A1"), "hi");
        let json = serde_json::to_value(&message).unwrap_or_default();
        assert_eq!(json["accountId"], "A1");
        assert!(json.get("createdAt").is_some());
    }
}
