//! Workload analytics derived from a snapshot of tasks.
//!
//! The free functions work on any iterator of tasks; [`TaskDirectory`]
//! exposes them over its own collection.

use super::{TaskDirectory, TaskMetrics, TaskStats};
use crate::task::domain::{ProjectId, Task, TaskId, UserId};
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use std::collections::BTreeMap;
use tracing::{debug, info};

const DAYS_PER_WEEK: f64 = 7.0;

/// Counts tasks by status, plus how many are overdue, in a single pass.
#[must_use]
pub fn task_stats<'a>(tasks: impl IntoIterator<Item = &'a Task>, clock: &impl Clock) -> TaskStats {
    tasks.into_iter().fold(TaskStats::default(), |mut stats, task| {
        stats.record(task.status(), task.is_overdue(clock));
        stats
    })
}

/// Returns tasks completed per week over the `days` preceding `now`.
///
/// A zero-day window yields `0.0`.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "velocity is a rate of completed tasks per week"
)]
pub fn completed_per_week<'a>(
    tasks: impl IntoIterator<Item = &'a Task>,
    days: u32,
    now: DateTime<Utc>,
) -> f64 {
    if days == 0 {
        return 0.0;
    }
    let cutoff = TimeDelta::try_days(i64::from(days))
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    let completed = tasks
        .into_iter()
        .filter(|task| task.completed_at().is_some_and(|at| at > cutoff))
        .count();
    as_f64(completed) / (f64::from(days) / DAYS_PER_WEEK)
}

/// Counts open tasks per assignee.
///
/// Done and cancelled tasks are ignored, as are unassigned ones.
#[must_use]
pub fn workload_distribution<'a>(
    tasks: impl IntoIterator<Item = &'a Task>,
) -> BTreeMap<UserId, usize> {
    let mut distribution = BTreeMap::new();
    for task in tasks {
        if task.status().is_terminal() {
            continue;
        }
        if let Some(assignee_id) = task.assignee_id() {
            *distribution.entry(assignee_id).or_insert(0) += 1;
        }
    }
    distribution
}

/// Picks the candidate with the fewest open tasks.
///
/// Candidates absent from `workload` count as idle. Ties go to the earliest
/// candidate in the list.
#[must_use]
pub fn least_loaded(workload: &BTreeMap<UserId, usize>, candidates: &[UserId]) -> Option<UserId> {
    candidates
        .iter()
        .copied()
        .min_by_key(|candidate| workload.get(candidate).copied().unwrap_or(0))
}

/// Computes completion rate and mean time to completion.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "completion rate is a percentage"
)]
pub fn task_metrics<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> TaskMetrics {
    let mut total_tasks = 0_usize;
    let mut completed_tasks = 0_usize;
    let mut elapsed = TimeDelta::zero();
    let mut timed: i32 = 0;
    for task in tasks {
        total_tasks += 1;
        if !task.is_completed() {
            continue;
        }
        completed_tasks += 1;
        if let Some(total) = task
            .completed_at()
            .and_then(|at| elapsed.checked_add(&(at - task.created_at())))
        {
            elapsed = total;
            timed = timed.saturating_add(1);
        }
    }

    let completion_rate = if total_tasks == 0 {
        0.0
    } else {
        as_f64(completed_tasks) / as_f64(total_tasks) * 100.0
    };
    TaskMetrics {
        total_tasks,
        completed_tasks,
        completion_rate,
        average_completion_time: elapsed.checked_div(timed).unwrap_or_else(TimeDelta::zero),
    }
}

fn as_f64(count: usize) -> f64 {
    f64::from(u32::try_from(count).unwrap_or(u32::MAX))
}

impl<C> TaskDirectory<C>
where
    C: Clock,
{
    /// Returns status counts, optionally restricted to one project.
    ///
    /// The total, the per-status counts and the overdue count all use the
    /// same project filter.
    #[must_use]
    pub fn task_stats(&self, project_id: Option<ProjectId>) -> TaskStats {
        task_stats(self.project_tasks(project_id), &*self.clock)
    }

    /// Returns tasks completed per week over the trailing `days`.
    #[must_use]
    pub fn calculate_velocity(&self, days: u32) -> f64 {
        let velocity = completed_per_week(self.tasks.values(), days, self.clock.utc());
        debug!(days, velocity, "velocity calculated");
        velocity
    }

    /// Returns velocity over the configured default window.
    #[must_use]
    pub fn calculate_default_velocity(&self) -> f64 {
        self.calculate_velocity(self.config.default_velocity_window_days)
    }

    /// Returns the number of open tasks per assignee.
    #[must_use]
    pub fn workload_distribution(&self) -> BTreeMap<UserId, usize> {
        workload_distribution(self.tasks.values())
    }

    /// Assigns a task to the least loaded of `candidates`.
    ///
    /// Returns `None` when `candidates` is empty or the task does not exist.
    pub fn auto_assign_task(&mut self, id: TaskId, candidates: &[UserId]) -> Option<&Task> {
        if !self.tasks.contains_key(&id) {
            return None;
        }
        let workload = self.workload_distribution();
        let Some(assignee_id) = least_loaded(&workload, candidates) else {
            debug!(task_id = %id, "auto-assign skipped, no candidates");
            return None;
        };
        info!(
            task_id = %id,
            assignee_id = %assignee_id,
            load = workload.get(&assignee_id).copied().unwrap_or(0),
            "task auto-assigned"
        );
        self.assign_task(id, assignee_id)
    }

    /// Returns completion metrics, optionally restricted to one project.
    #[must_use]
    pub fn task_metrics(&self, project_id: Option<ProjectId>) -> TaskMetrics {
        task_metrics(self.project_tasks(project_id))
    }

    fn project_tasks(&self, project_id: Option<ProjectId>) -> impl Iterator<Item = &Task> {
        self.tasks
            .values()
            .filter(move |task| project_id.is_none_or(|id| task.project_id() == Some(id)))
    }
}
