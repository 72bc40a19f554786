//! Error types for task domain validation, transitions, and parsing.

use super::{TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned by task domain operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The hour value is negative or not a finite number.
    #[error("invalid hours {0}, expected a finite non-negative number")]
    InvalidHours(f64),

    /// The requested status is not reachable from the current status.
    #[error("cannot transition task {task_id} from {from} to {to}")]
    InvalidStateTransition {
        /// Task whose transition was rejected.
        task_id: TaskId,
        /// Status at the time of the request.
        from: TaskStatus,
        /// Requested target status.
        to: TaskStatus,
    },
}

/// Error returned while parsing task statuses from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);
