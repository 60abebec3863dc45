//! Status enums for schedules and tasks.
//!
//! Storage and wire strings are fixed by the public API: schedules use
//! `in-progress`, tasks mix `in-progress` with `not_completed`. Every variant
//! therefore carries an explicit serde rename instead of a blanket
//! `rename_all`, and `as_str()` is the single source of the SQL value.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A status string that does not name any variant of the target enum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} status '{value}' (expected one of: {expected})")]
pub struct ParseStatusError {
    pub kind: &'static str,
    pub value: String,
    pub expected: String,
}

// ---------------------------------------------------------------------------
// ScheduleStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of a scheduled visit.
///
/// ```text
/// upcoming → (start visit) → in-progress → (end visit) → completed
/// ```
///
/// `missed` is only reachable through the administrative status override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ScheduleStatus {
    #[serde(rename = "upcoming")]
    Upcoming,
    #[serde(rename = "in-progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
    #[serde(rename = "missed")]
    Missed,
}

impl ScheduleStatus {
    pub const ALL: [Self; 4] = [Self::Upcoming, Self::InProgress, Self::Completed, Self::Missed];

    /// States reachable through the guarded visit operations.
    #[must_use]
    #[allow(clippy::match_same_arms)]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Upcoming => &[Self::InProgress],
            Self::InProgress => &[Self::Completed],
            Self::Completed => &[],
            Self::Missed => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Missed => "missed",
        }
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScheduleStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseStatusError {
                kind: "schedule",
                value: s.to_string(),
                expected: join_names(&Self::ALL.map(Self::as_str)),
            })
    }
}

// ---------------------------------------------------------------------------
// TaskStatus
// ---------------------------------------------------------------------------

/// Status of a care task within a visit.
///
/// Any status may follow any other, except that a `completed` task cannot be
/// reopened as `pending`. `not_completed` must carry a reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum TaskStatus {
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "in-progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
    #[serde(rename = "not_completed")]
    NotCompleted,
    #[serde(rename = "cancelled")]
    Cancelled,
}

impl TaskStatus {
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::InProgress,
        Self::Completed,
        Self::NotCompleted,
        Self::Cancelled,
    ];

    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        !matches!((self, next), (Self::Completed, Self::Pending))
    }

    /// Whether moving into this status requires a free-text reason.
    #[must_use]
    pub const fn requires_reason(self) -> bool {
        matches!(self, Self::NotCompleted)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::NotCompleted => "not_completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseStatusError {
                kind: "task",
                value: s.to_string(),
                expected: join_names(&Self::ALL.map(Self::as_str)),
            })
    }
}

fn join_names(names: &[&str]) -> String {
    names.join(", ")
}
