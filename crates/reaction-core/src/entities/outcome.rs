//! Results of reaction writes

use serde::Serialize;

use crate::value_objects::ReactionKind;

/// Result of reacting to a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReactOutcome {
    /// No prior reaction; a record was created
    Created,
    /// The existing record was flipped from the opposite kind
    Switched { from: ReactionKind },
    /// The user already held this kind
    Unchanged,
}

impl ReactOutcome {
    /// Whether any row changed
    #[inline]
    pub fn changed(self) -> bool {
        !matches!(self, Self::Unchanged)
    }

    /// Counter deltas `(kind, delta)` implied by this outcome for the new kind
    pub fn counter_deltas(self, kind: ReactionKind) -> Vec<(ReactionKind, i64)> {
        match self {
            Self::Created => vec![(kind, 1)],
            Self::Switched { from } => vec![(from, -1), (kind, 1)],
            Self::Unchanged => Vec::new(),
        }
    }
}

/// Result of toggling a reaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ToggleOutcome {
    Added,
    Switched { from: ReactionKind },
    Removed,
}

impl From<ReactOutcome> for Option<ToggleOutcome> {
    fn from(outcome: ReactOutcome) -> Self {
        match outcome {
            ReactOutcome::Created => Some(ToggleOutcome::Added),
            ReactOutcome::Switched { from } => Some(ToggleOutcome::Switched { from }),
            ReactOutcome::Unchanged => None,
        }
    }
}
