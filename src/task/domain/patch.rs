//! Partial updates for the editable task fields.

use super::{Hours, TaskPriority, TaskTitle, UserId};
use chrono::{DateTime, Utc};

/// Set of field changes applied by [`crate::task::services::TaskDirectory::update_task`].
///
/// Only the title, description, priority, assignee, due date and estimate
/// can be edited this way. Nullable fields use a nested `Option`: the outer
/// layer says whether the field is touched, the inner one carries the new
/// value or `None` to clear it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub(crate) title: Option<TaskTitle>,
    pub(crate) description: Option<Option<String>>,
    pub(crate) priority: Option<TaskPriority>,
    pub(crate) assignee_id: Option<Option<UserId>>,
    pub(crate) due_date: Option<Option<DateTime<Utc>>>,
    pub(crate) estimated_hours: Option<Option<Hours>>,
}

impl TaskPatch {
    /// Creates a patch that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: TaskTitle) -> Self {
        self.title = Some(title);
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    /// Removes the description.
    #[must_use]
    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces the assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee_id: UserId) -> Self {
        self.assignee_id = Some(Some(assignee_id));
        self
    }

    /// Leaves the task unassigned.
    #[must_use]
    pub const fn clear_assignee(mut self) -> Self {
        self.assignee_id = Some(None);
        self
    }

    /// Replaces the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(Some(due_date));
        self
    }

    /// Removes the due date.
    #[must_use]
    pub const fn clear_due_date(mut self) -> Self {
        self.due_date = Some(None);
        self
    }

    /// Replaces the estimate.
    #[must_use]
    pub const fn with_estimated_hours(mut self, hours: Hours) -> Self {
        self.estimated_hours = Some(Some(hours));
        self
    }

    /// Removes the estimate.
    #[must_use]
    pub const fn clear_estimated_hours(mut self) -> Self {
        self.estimated_hours = Some(None);
        self
    }

    /// Returns whether the patch touches no field.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.assignee_id.is_none()
            && self.due_date.is_none()
            && self.estimated_hours.is_none()
    }
}
