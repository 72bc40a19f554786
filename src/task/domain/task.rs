//! Task entity and its lifecycle behaviour.

use super::{
    Hours, ProjectId, TaskDomainError, TaskId, TaskPatch, TaskPriority, TaskStatus, TaskTitle,
    UserId,
};
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;
const PROGRESS_CAP: f64 = 99.0;

/// Normalizes a tag for storage and comparison.
#[must_use]
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}

/// Parameter object for constructing a new task.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTaskData {
    /// Task title.
    pub title: TaskTitle,
    /// Optional long-form description.
    pub description: Option<String>,
    /// Initial priority.
    pub priority: TaskPriority,
    /// Initial assignee, if any.
    pub assignee_id: Option<UserId>,
    /// Owning project, if any.
    pub project_id: Option<ProjectId>,
}

/// A unit of trackable work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: Option<String>,
    status: TaskStatus,
    priority: TaskPriority,
    assignee_id: Option<UserId>,
    project_id: Option<ProjectId>,
    parent_task_id: Option<TaskId>,
    subtask_ids: BTreeSet<TaskId>,
    tags: BTreeSet<String>,
    due_date: Option<DateTime<Utc>>,
    estimated_hours: Option<Hours>,
    actual_hours: Option<Hours>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a `Todo` task with no tags, links, or time tracking.
    pub(crate) fn new(id: TaskId, data: NewTaskData, clock: &impl Clock) -> Self {
        Self {
            id,
            title: data.title,
            description: data.description,
            status: TaskStatus::Todo,
            priority: data.priority,
            assignee_id: data.assignee_id,
            project_id: data.project_id,
            parent_task_id: None,
            subtask_ids: BTreeSet::new(),
            tags: BTreeSet::new(),
            due_date: None,
            estimated_hours: None,
            actual_hours: None,
            created_at: clock.utc(),
            updated_at: None,
            completed_at: None,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assignee_id(&self) -> Option<UserId> {
        self.assignee_id
    }

    /// Returns the owning project, if any.
    #[must_use]
    pub const fn project_id(&self) -> Option<ProjectId> {
        self.project_id
    }

    /// Returns the parent task, if any.
    #[must_use]
    pub const fn parent_task_id(&self) -> Option<TaskId> {
        self.parent_task_id
    }

    /// Returns the subtask identifiers.
    #[must_use]
    pub const fn subtask_ids(&self) -> &BTreeSet<TaskId> {
        &self.subtask_ids
    }

    /// Returns the normalized tags.
    #[must_use]
    pub const fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Returns whether the task carries `tag` after normalization.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(&normalize_tag(tag))
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the estimate, if any.
    #[must_use]
    pub const fn estimated_hours(&self) -> Option<Hours> {
        self.estimated_hours
    }

    /// Returns the hours spent so far, if recorded.
    #[must_use]
    pub const fn actual_hours(&self) -> Option<Hours> {
        self.actual_hours
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the timestamp of the latest mutation.
    ///
    /// `None` until the first mutation after construction.
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Returns when the task reached `Done`, if it has.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns whether the lifecycle permits moving to `target`.
    #[must_use]
    pub fn can_transition_to(&self, target: TaskStatus) -> bool {
        self.status.can_transition_to(target)
    }

    /// Moves the task to `target`.
    ///
    /// Reaching [`TaskStatus::Done`] also records the completion time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] when the edge does
    /// not exist. The task is left unchanged.
    pub fn transition_to(
        &mut self,
        target: TaskStatus,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if !self.can_transition_to(target) {
            return Err(TaskDomainError::InvalidStateTransition {
                task_id: self.id,
                from: self.status,
                to: target,
            });
        }

        let now = clock.utc();
        self.status = target;
        self.updated_at = Some(now);
        if target == TaskStatus::Done {
            self.completed_at = Some(now);
        }
        Ok(())
    }

    /// Returns whether the due date has passed without the task being done.
    ///
    /// Cancelled tasks with a past due date count as overdue.
    #[must_use]
    pub fn is_overdue(&self, clock: &impl Clock) -> bool {
        self.due_date
            .is_some_and(|due| self.status != TaskStatus::Done && clock.utc() > due)
    }

    /// Returns whether the task is blocked.
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        self.status == TaskStatus::Blocked
    }

    /// Returns whether the task is done.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Done
    }

    /// Adds a normalized tag. Returns whether the tag set changed.
    pub fn add_tag(&mut self, tag: &str, clock: &impl Clock) -> bool {
        let normalized = normalize_tag(tag);
        if normalized.is_empty() || !self.tags.insert(normalized) {
            return false;
        }
        self.touch(clock);
        true
    }

    /// Removes a tag, matching after normalization. Returns whether the tag
    /// set changed.
    pub fn remove_tag(&mut self, tag: &str, clock: &impl Clock) -> bool {
        if !self.tags.remove(&normalize_tag(tag)) {
            return false;
        }
        self.touch(clock);
        true
    }

    /// Records `subtask_id` as a subtask. Returns whether the set changed.
    pub fn add_subtask(&mut self, subtask_id: TaskId, clock: &impl Clock) -> bool {
        if !self.subtask_ids.insert(subtask_id) {
            return false;
        }
        self.touch(clock);
        true
    }

    /// Forgets `subtask_id` as a subtask. Returns whether the set changed.
    pub fn remove_subtask(&mut self, subtask_id: TaskId, clock: &impl Clock) -> bool {
        if !self.subtask_ids.remove(&subtask_id) {
            return false;
        }
        self.touch(clock);
        true
    }

    /// Projects when the remaining estimated work would finish if started
    /// now.
    ///
    /// Returns `None` without an estimate, or when the projection does not
    /// fit in a timestamp.
    #[must_use]
    pub fn estimate_completion_date(&self, clock: &impl Clock) -> Option<DateTime<Utc>> {
        let estimated = self.estimated_hours?;
        let remaining = match self.actual_hours {
            None => estimated.value(),
            Some(actual) => remaining_hours(estimated, actual),
        };
        clock.utc().checked_add_signed(hours_to_delta(remaining)?)
    }

    /// Returns completion progress as a percentage in `0.0..=100.0`.
    ///
    /// Only `Done` reports 100; tracked hours are capped at 99.
    #[must_use]
    pub fn calculate_progress(&self) -> f64 {
        match self.status {
            TaskStatus::Done => 100.0,
            TaskStatus::Todo => 0.0,
            status => match (self.estimated_hours, self.actual_hours) {
                (Some(estimated), Some(actual)) if estimated.value() > 0.0 => {
                    tracked_progress(estimated, actual)
                }
                _ => status_progress(status),
            },
        }
    }

    pub(crate) fn apply_patch(&mut self, patch: TaskPatch, clock: &impl Clock) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(assignee_id) = patch.assignee_id {
            self.assignee_id = assignee_id;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(estimated_hours) = patch.estimated_hours {
            self.estimated_hours = estimated_hours;
        }
        self.touch(clock);
    }

    pub(crate) fn set_assignee(&mut self, assignee_id: Option<UserId>, clock: &impl Clock) {
        self.assignee_id = assignee_id;
        self.touch(clock);
    }

    pub(crate) fn set_project(&mut self, project_id: Option<ProjectId>, clock: &impl Clock) {
        self.project_id = project_id;
        self.touch(clock);
    }

    /// Points the task at a new parent. Returns the previous parent.
    ///
    /// `updated_at` moves only when the link actually changes.
    pub(crate) fn set_parent(
        &mut self,
        parent_task_id: Option<TaskId>,
        clock: &impl Clock,
    ) -> Option<TaskId> {
        let previous = self.parent_task_id;
        if previous != parent_task_id {
            self.parent_task_id = parent_task_id;
            self.touch(clock);
        }
        previous
    }

    pub(crate) fn set_actual_hours(&mut self, hours: Hours, clock: &impl Clock) {
        self.actual_hours = Some(hours);
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = Some(clock.utc());
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "remaining work is the non-negative difference of two hour counts"
)]
fn remaining_hours(estimated: Hours, actual: Hours) -> f64 {
    (estimated.value() - actual.value()).max(0.0)
}

#[expect(
    clippy::float_arithmetic,
    reason = "progress is a ratio of tracked hours"
)]
fn tracked_progress(estimated: Hours, actual: Hours) -> f64 {
    (actual.value() / estimated.value() * 100.0).min(PROGRESS_CAP)
}

const fn status_progress(status: TaskStatus) -> f64 {
    match status {
        TaskStatus::InProgress => 25.0,
        TaskStatus::InReview => 75.0,
        TaskStatus::Blocked => 50.0,
        TaskStatus::Done => 100.0,
        TaskStatus::Todo | TaskStatus::Cancelled => 0.0,
    }
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    reason = "hour values are rounded to whole milliseconds"
)]
fn hours_to_delta(hours: f64) -> Option<TimeDelta> {
    TimeDelta::try_milliseconds((hours * MILLIS_PER_HOUR).round() as i64)
}
