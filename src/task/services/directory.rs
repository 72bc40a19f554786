//! In-memory directory owning every task and its identifier sequence.

use super::{CreateTaskRequest, DirectoryConfig, ListTasksQuery};
use crate::task::domain::{
    Hours, ProjectId, Task, TaskDomainError, TaskId, TaskPatch, TaskStatus, UserId, normalize_tag,
};
use mockable::Clock;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Per-id outcome of a bulk operation.
pub type BulkOutcome = BTreeMap<TaskId, bool>;

/// Owner of the task collection.
///
/// Identifiers start at 1 and are never reused, even after deletion.
/// Lookups by id report a miss with `None` or `false` instead of an error;
/// the only error surfaced is a rejected single-task transition.
///
/// Mutating methods take `&mut self`. Callers sharing a directory across
/// threads must wrap it in their own lock.
pub struct TaskDirectory<C>
where
    C: Clock,
{
    pub(super) tasks: BTreeMap<TaskId, Task>,
    next_id: u64,
    pub(super) config: DirectoryConfig,
    pub(super) clock: Arc<C>,
}

impl<C> TaskDirectory<C>
where
    C: Clock,
{
    /// Creates an empty directory with the default configuration.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self::with_config(DirectoryConfig::default(), clock)
    }

    /// Creates an empty directory with an explicit configuration.
    #[must_use]
    pub const fn with_config(config: DirectoryConfig, clock: Arc<C>) -> Self {
        Self {
            tasks: BTreeMap::new(),
            next_id: 1,
            config,
            clock,
        }
    }

    /// Returns the directory configuration.
    #[must_use]
    pub const fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    /// Returns the number of stored tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns whether the directory holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Creates a `Todo` task under the next sequential identifier.
    pub fn create_task(&mut self, request: CreateTaskRequest) -> &Task {
        let id = TaskId::new(self.next_id);
        self.next_id += 1;
        let task = Task::new(id, request.into_task_data(), &*self.clock);
        info!(task_id = %id, title = %task.title(), "task created");
        self.tasks.entry(id).or_insert(task)
    }

    /// Retrieves a task by identifier.
    #[must_use]
    pub fn get_task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(&id)
    }

    /// Lists tasks matching `query`, in identifier order.
    ///
    /// The offset and limit slice the filtered sequence. Without an explicit
    /// limit the configured default page size applies.
    #[must_use]
    pub fn list_tasks(&self, query: &ListTasksQuery) -> Vec<&Task> {
        let limit = query.limit().unwrap_or(self.config.default_list_limit);
        let page: Vec<&Task> = self
            .tasks
            .values()
            .filter(|task| query.matches(task))
            .skip(query.offset())
            .take(limit)
            .collect();
        debug!(offset = query.offset(), limit, returned = page.len(), "tasks listed");
        page
    }

    /// Applies `patch` to a task.
    ///
    /// The update timestamp is refreshed even when the patch is empty.
    /// Returns `None` when the task does not exist.
    pub fn update_task(&mut self, id: TaskId, patch: TaskPatch) -> Option<&Task> {
        let task = self.tasks.get_mut(&id)?;
        if patch.is_empty() {
            debug!(task_id = %id, "empty patch applied");
        }
        task.apply_patch(patch, &*self.clock);
        Some(&*task)
    }

    /// Removes a task. Returns whether it existed.
    ///
    /// Links from other tasks are left untouched.
    pub fn delete_task(&mut self, id: TaskId) -> bool {
        let removed = self.tasks.remove(&id).is_some();
        if removed {
            info!(task_id = %id, "task deleted");
        } else {
            debug!(task_id = %id, "delete requested for unknown task");
        }
        removed
    }

    /// Assigns a task to `assignee_id`.
    pub fn assign_task(&mut self, id: TaskId, assignee_id: UserId) -> Option<&Task> {
        let task = self.tasks.get_mut(&id)?;
        task.set_assignee(Some(assignee_id), &*self.clock);
        info!(task_id = %id, assignee_id = %assignee_id, "task assigned");
        Some(&*task)
    }

    /// Leaves a task unassigned.
    pub fn unassign_task(&mut self, id: TaskId) -> Option<&Task> {
        let task = self.tasks.get_mut(&id)?;
        task.set_assignee(None, &*self.clock);
        info!(task_id = %id, "task unassigned");
        Some(&*task)
    }

    /// Moves a task to `target`.
    ///
    /// Unlike [`Self::bulk_transition`], an illegal transition is reported as
    /// an error rather than a `false` outcome.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] when the task's
    /// current status cannot reach `target`. `Ok(None)` means the task does
    /// not exist.
    pub fn transition_task(
        &mut self,
        id: TaskId,
        target: TaskStatus,
    ) -> Result<Option<&Task>, TaskDomainError> {
        let Some(task) = self.tasks.get_mut(&id) else {
            return Ok(None);
        };
        let from = task.status();
        if let Err(err) = task.transition_to(target, &*self.clock) {
            warn!(task_id = %id, from = %from, to = %target, "transition rejected");
            return Err(err);
        }
        info!(task_id = %id, from = %from, to = %target, "task transitioned");
        Ok(Some(&*task))
    }

    /// Returns every overdue task.
    #[must_use]
    pub fn overdue_tasks(&self) -> Vec<&Task> {
        self.tasks
            .values()
            .filter(|task| task.is_overdue(&*self.clock))
            .collect()
    }

    /// Returns every blocked task.
    #[must_use]
    pub fn blocked_tasks(&self) -> Vec<&Task> {
        self.tasks.values().filter(|task| task.is_blocked()).collect()
    }

    /// Returns every task carrying `tag`, compared after normalization.
    #[must_use]
    pub fn tasks_with_tag(&self, tag: &str) -> Vec<&Task> {
        let normalized = normalize_tag(tag);
        self.tasks
            .values()
            .filter(|task| task.tags().contains(&normalized))
            .collect()
    }

    /// Assigns each listed task to `assignee_id`.
    ///
    /// Missing ids map to `false`; the others are assigned regardless.
    pub fn bulk_assign(&mut self, ids: &[TaskId], assignee_id: UserId) -> BulkOutcome {
        let mut outcome = BulkOutcome::new();
        for &id in ids {
            let assigned = self.assign_task(id, assignee_id).is_some();
            outcome.insert(id, assigned);
        }
        outcome
    }

    /// Moves each listed task to `target` where the lifecycle allows it.
    ///
    /// Illegal transitions and missing ids map to `false` and leave the task
    /// unchanged; nothing is raised. See [`Self::transition_task`] for the
    /// single-task variant, which fails instead.
    pub fn bulk_transition(&mut self, ids: &[TaskId], target: TaskStatus) -> BulkOutcome {
        let mut outcome = BulkOutcome::new();
        for &id in ids {
            let transitioned = self
                .tasks
                .get_mut(&id)
                .filter(|task| task.can_transition_to(target))
                .is_some_and(|task| task.transition_to(target, &*self.clock).is_ok());
            outcome.insert(id, transitioned);
        }
        let moved = outcome.values().filter(|ok| **ok).count();
        info!(to = %target, requested = ids.len(), moved, "bulk transition applied");
        outcome
    }

    /// Adds a tag to a task.
    ///
    /// Returns whether the tag set changed, or `None` when the task does not
    /// exist.
    pub fn tag_task(&mut self, id: TaskId, tag: &str) -> Option<bool> {
        let task = self.tasks.get_mut(&id)?;
        Some(task.add_tag(tag, &*self.clock))
    }

    /// Removes a tag from a task.
    ///
    /// Returns whether the tag set changed, or `None` when the task does not
    /// exist.
    pub fn untag_task(&mut self, id: TaskId, tag: &str) -> Option<bool> {
        let task = self.tasks.get_mut(&id)?;
        Some(task.remove_tag(tag, &*self.clock))
    }

    /// Records `child` as a subtask of `parent` and points the child back at
    /// its parent.
    ///
    /// A child has at most one parent: re-linking it drops it from the
    /// previous parent's subtasks. Cycles are not detected.
    ///
    /// Returns `false` when either task is missing or both ids are equal.
    pub fn link_subtask(&mut self, parent: TaskId, child: TaskId) -> bool {
        if parent == child || !self.tasks.contains_key(&child) {
            return false;
        }
        let Some(parent_task) = self.tasks.get_mut(&parent) else {
            return false;
        };
        parent_task.add_subtask(child, &*self.clock);
        let previous = self
            .tasks
            .get_mut(&child)
            .and_then(|child_task| child_task.set_parent(Some(parent), &*self.clock))
            .filter(|previous| *previous != parent);
        if let Some(old_parent) = previous.and_then(|id| self.tasks.get_mut(&id)) {
            old_parent.remove_subtask(child, &*self.clock);
            debug!(parent_id = %old_parent.id(), child_id = %child, "subtask moved away");
        }
        debug!(parent_id = %parent, child_id = %child, "subtask linked");
        true
    }

    /// Removes `child` from the subtasks of `parent`.
    ///
    /// The child's parent link is cleared only when it points at `parent`.
    /// Returns whether the parent's subtask set changed.
    pub fn unlink_subtask(&mut self, parent: TaskId, child: TaskId) -> bool {
        let removed = self
            .tasks
            .get_mut(&parent)
            .is_some_and(|task| task.remove_subtask(child, &*self.clock));
        if let Some(child_task) = self
            .tasks
            .get_mut(&child)
            .filter(|task| task.parent_task_id() == Some(parent))
        {
            child_task.set_parent(None, &*self.clock);
        }
        removed
    }

    /// Records the hours spent on a task so far.
    pub fn record_actual_hours(&mut self, id: TaskId, hours: Hours) -> Option<&Task> {
        let task = self.tasks.get_mut(&id)?;
        task.set_actual_hours(hours, &*self.clock);
        Some(&*task)
    }

    /// Moves a task into a project, or out of any project with `None`.
    pub fn set_project(&mut self, id: TaskId, project_id: Option<ProjectId>) -> Option<&Task> {
        let task = self.tasks.get_mut(&id)?;
        task.set_project(project_id, &*self.clock);
        Some(&*task)
    }
}
