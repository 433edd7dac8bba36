//! Session states

use serde::Serialize;
use std::fmt;

/// Quote session state
///
/// ```text
/// Draft ──price()──▶ Priced ──confirm()──▶ Confirmed ──submit()──▶ Submitting
///   ▲                                          ▲                     │    │
///   │ draft edited / Rejected                  │ Unauthorized        │    ▼
///   └──────────────────────────────────────────┴──────── Failed ◀────┘  Submitted
///                                                 retry() ──▶ Submitting
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Draft being edited, no valid quote
    Draft,
    /// Quote computed and shown to the caller
    Priced,
    /// Caller accepted the quote
    Confirmed,
    /// A Parcel API call is in flight or backing off
    Submitting,
    /// Booking created (terminal)
    Submitted,
    /// Last attempt failed; the draft is frozen
    Failed,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Priced => "priced",
            Self::Confirmed => "confirmed",
            Self::Submitting => "submitting",
            Self::Submitted => "submitted",
            Self::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Submitted)
    }

    /// Whether the draft may still be edited
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft | Self::Priced | Self::Confirmed)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
