//! Shared clock and directory helpers for integration tests.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use taskboard::task::{
    domain::{TaskId, TaskStatus, TaskTitle},
    services::{CreateTaskRequest, TaskDirectory},
};

/// Directory type driven by the test clock.
pub type TestDirectory = TaskDirectory<TestClock>;

/// Clock frozen at a chosen instant until explicitly advanced.
#[derive(Debug)]
pub struct TestClock {
    now: Mutex<DateTime<Utc>>,
}

impl TestClock {
    /// Creates a clock frozen at `now`.
    #[must_use]
    pub const fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Creates a clock frozen at 2025-01-06 08:30 UTC, a Monday.
    #[must_use]
    pub fn fixed() -> Self {
        Self::at(
            Utc.with_ymd_and_hms(2025, 1, 6, 8, 30, 0)
                .single()
                .unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        )
    }

    /// Moves the clock forward by `delta`.
    pub fn advance(&self, delta: TimeDelta) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += delta;
    }
}

impl Clock for TestClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Builds an empty directory sharing `clock`.
#[must_use]
pub fn directory_with(clock: &Arc<TestClock>) -> TestDirectory {
    TaskDirectory::new(Arc::clone(clock))
}

/// Builds a creation request for `title`.
///
/// # Errors
///
/// Returns an error if `title` is blank.
pub fn titled(title: &str) -> eyre::Result<CreateTaskRequest> {
    Ok(CreateTaskRequest::new(TaskTitle::new(title)?))
}

/// Moves a task through each status in `path`.
///
/// # Errors
///
/// Returns an error if a step is illegal or the task does not exist.
pub fn walk(directory: &mut TestDirectory, id: TaskId, path: &[TaskStatus]) -> eyre::Result<()> {
    for step in path {
        directory
            .transition_task(id, *step)?
            .ok_or_else(|| eyre::eyre!("task {id} missing while moving to {step}"))?;
    }
    Ok(())
}
