//! Request and result shapes for task directory operations.

use crate::task::domain::{
    NewTaskData, ProjectId, Task, TaskPriority, TaskStatus, TaskTitle, UserId,
};
use chrono::TimeDelta;
use serde::Serialize;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTaskRequest {
    title: TaskTitle,
    description: Option<String>,
    priority: TaskPriority,
    assignee_id: Option<UserId>,
    project_id: Option<ProjectId>,
}

impl CreateTaskRequest {
    /// Creates a request with medium priority and no assignee or project.
    #[must_use]
    pub fn new(title: TaskTitle) -> Self {
        Self {
            title,
            description: None,
            priority: TaskPriority::default(),
            assignee_id: None,
            project_id: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the initial assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee_id: UserId) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    /// Sets the owning project.
    #[must_use]
    pub const fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    pub(crate) fn into_task_data(self) -> NewTaskData {
        NewTaskData {
            title: self.title,
            description: self.description,
            priority: self.priority,
            assignee_id: self.assignee_id,
            project_id: self.project_id,
        }
    }
}

/// Filters and pagination for listing tasks.
///
/// Filters combine with AND. Pagination applies to the filtered sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListTasksQuery {
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
    assignee_id: Option<UserId>,
    project_id: Option<ProjectId>,
    limit: Option<usize>,
    offset: usize,
}

impl ListTasksQuery {
    /// Creates a query matching every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps only tasks in `status`.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Keeps only tasks with `priority`.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Keeps only tasks assigned to `assignee_id`.
    #[must_use]
    pub const fn with_assignee(mut self, assignee_id: UserId) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    /// Keeps only tasks in `project_id`.
    #[must_use]
    pub const fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Returns at most `limit` tasks.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skips the first `offset` matching tasks.
    #[must_use]
    pub const fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Returns the explicit page size, if set.
    #[must_use]
    pub const fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Returns the number of matching tasks skipped.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns whether `task` passes every filter.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.status.is_none_or(|status| task.status() == status)
            && self.priority.is_none_or(|priority| task.priority() == priority)
            && self
                .assignee_id
                .is_none_or(|assignee_id| task.assignee_id() == Some(assignee_id))
            && self
                .project_id
                .is_none_or(|project_id| task.project_id() == Some(project_id))
    }
}

/// Task counts by status for a project or the whole directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskStats {
    /// Number of tasks considered.
    pub total: usize,
    /// Tasks in [`TaskStatus::Todo`].
    pub todo: usize,
    /// Tasks in [`TaskStatus::InProgress`].
    pub in_progress: usize,
    /// Tasks in [`TaskStatus::InReview`].
    pub in_review: usize,
    /// Tasks in [`TaskStatus::Done`].
    pub done: usize,
    /// Tasks in [`TaskStatus::Blocked`].
    pub blocked: usize,
    /// Tasks in [`TaskStatus::Cancelled`].
    pub cancelled: usize,
    /// Tasks past their due date.
    pub overdue: usize,
}

impl TaskStats {
    /// Returns the count for a single status.
    #[must_use]
    pub const fn count_for(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Todo => self.todo,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::InReview => self.in_review,
            TaskStatus::Done => self.done,
            TaskStatus::Blocked => self.blocked,
            TaskStatus::Cancelled => self.cancelled,
        }
    }

    pub(crate) const fn record(&mut self, status: TaskStatus, overdue: bool) {
        self.total += 1;
        let slot = match status {
            TaskStatus::Todo => &mut self.todo,
            TaskStatus::InProgress => &mut self.in_progress,
            TaskStatus::InReview => &mut self.in_review,
            TaskStatus::Done => &mut self.done,
            TaskStatus::Blocked => &mut self.blocked,
            TaskStatus::Cancelled => &mut self.cancelled,
        };
        *slot += 1;
        if overdue {
            self.overdue += 1;
        }
    }
}

/// Completion metrics for a set of tasks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaskMetrics {
    /// Number of tasks considered.
    pub total_tasks: usize,
    /// Number of those tasks that are done.
    pub completed_tasks: usize,
    /// Share of done tasks, as a percentage. Zero for an empty set.
    pub completion_rate: f64,
    /// Mean time from creation to completion over done tasks.
    pub average_completion_time: TimeDelta,
}
