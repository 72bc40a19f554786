//! Task status lifecycle and priority levels.

use super::{ParseTaskPriorityError, ParseTaskStatusError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has been created but work has not started.
    #[default]
    Todo,
    /// Task is being worked on.
    InProgress,
    /// Task is awaiting review.
    InReview,
    /// Task has been completed.
    Done,
    /// Task cannot progress until an impediment is removed.
    Blocked,
    /// Task has been abandoned.
    Cancelled,
}

impl TaskStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 6] = [
        Self::Todo,
        Self::InProgress,
        Self::InReview,
        Self::Done,
        Self::Blocked,
        Self::Cancelled,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::InReview => "in_review",
            Self::Done => "done",
            Self::Blocked => "blocked",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns the statuses directly reachable from this one.
    #[must_use]
    pub const fn successors(self) -> &'static [Self] {
        match self {
            Self::Todo => &[Self::InProgress, Self::Cancelled],
            Self::InProgress => &[Self::InReview, Self::Blocked, Self::Cancelled],
            Self::InReview => &[Self::Done, Self::InProgress],
            Self::Blocked => &[Self::InProgress, Self::Cancelled],
            Self::Done | Self::Cancelled => &[],
        }
    }

    /// Returns whether the lifecycle permits moving to `target`.
    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        self.successors().contains(&target)
    }

    /// Returns whether no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Cancelled)
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "todo" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "in_review" => Ok(Self::InReview),
            "done" => Ok(Self::Done),
            "blocked" => Ok(Self::Blocked),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relative importance of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Must be handled immediately.
    Critical,
    /// Important work.
    High,
    /// Regular work.
    #[default]
    Medium,
    /// Can wait.
    Low,
}

impl TaskPriority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskPriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "critical" => Ok(Self::Critical),
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(ParseTaskPriorityError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
