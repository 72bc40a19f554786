//! Team-level figures computed over a populated directory.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::test_helpers::{TestClock, TestDirectory, directory_with, titled, walk};
use chrono::TimeDelta;
use eyre::ensure;
use rstest::{fixture, rstest};
use taskboard::task::{
    domain::{ProjectId, TaskId, TaskStatus, UserId},
    services::TaskStats,
};

const FINISH: [TaskStatus; 3] = [
    TaskStatus::InProgress,
    TaskStatus::InReview,
    TaskStatus::Done,
];

#[fixture]
fn clock() -> Arc<TestClock> {
    Arc::new(TestClock::fixed())
}

#[expect(clippy::float_arithmetic, reason = "rates are compared with a tolerance")]
fn close_to(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-9
}

fn sprint(clock: &Arc<TestClock>) -> eyre::Result<TestDirectory> {
    let mut directory = directory_with(clock);
    let platform = ProjectId::new(10);
    let mobile = ProjectId::new(20);
    for title in ["Auth service", "Rate limiter", "Audit log"] {
        directory.create_task(titled(title)?.with_project(platform));
    }
    for title in ["Offline mode", "Push tokens"] {
        directory.create_task(titled(title)?.with_project(mobile));
    }
    Ok(directory)
}

#[rstest]
fn project_stats_only_count_that_project(clock: Arc<TestClock>) -> eyre::Result<()> {
    let mut directory = sprint(&clock)?;
    walk(&mut directory, TaskId::new(1), &FINISH)?;
    walk(
        &mut directory,
        TaskId::new(2),
        &[TaskStatus::InProgress, TaskStatus::Blocked],
    )?;
    walk(&mut directory, TaskId::new(4), &[TaskStatus::Cancelled])?;

    let platform = directory.task_stats(Some(ProjectId::new(10)));
    ensure!(
        platform
            == TaskStats {
                total: 3,
                todo: 1,
                done: 1,
                blocked: 1,
                ..TaskStats::default()
            }
    );

    let mobile = directory.task_stats(Some(ProjectId::new(20)));
    ensure!(mobile.total == 2);
    ensure!(mobile.count_for(TaskStatus::Cancelled) == 1);
    ensure!(mobile.count_for(TaskStatus::Todo) == 1);

    ensure!(directory.task_stats(Some(ProjectId::new(99))) == TaskStats::default());
    ensure!(directory.task_stats(None).total == 5);
    Ok(())
}

#[rstest]
fn velocity_tracks_a_rolling_window(clock: Arc<TestClock>) -> eyre::Result<()> {
    let mut directory = sprint(&clock)?;
    walk(&mut directory, TaskId::new(1), &FINISH)?;
    clock.advance(TimeDelta::days(3));
    walk(&mut directory, TaskId::new(2), &FINISH)?;
    walk(&mut directory, TaskId::new(3), &FINISH)?;

    ensure!(close_to(directory.calculate_velocity(7), 3.0));
    ensure!(close_to(directory.calculate_default_velocity(), 1.5));

    clock.advance(TimeDelta::days(5));
    ensure!(close_to(directory.calculate_velocity(7), 2.0));
    ensure!(close_to(directory.calculate_velocity(0), 0.0));
    Ok(())
}

#[rstest]
fn auto_assign_spreads_work_across_the_team(clock: Arc<TestClock>) -> eyre::Result<()> {
    let mut directory = sprint(&clock)?;
    let team = [UserId::new(1), UserId::new(2), UserId::new(3)];

    for raw in 1..=5 {
        directory
            .auto_assign_task(TaskId::new(raw), &team)
            .ok_or_else(|| eyre::eyre!("task {raw} should be assigned"))?;
    }

    ensure!(
        directory.workload_distribution()
            == BTreeMap::from([(team[0], 2), (team[1], 2), (team[2], 1)])
    );

    walk(&mut directory, TaskId::new(1), &FINISH)?;
    ensure!(directory.workload_distribution().get(&team[0]) == Some(&1));
    Ok(())
}

#[rstest]
fn metrics_summarise_completion(clock: Arc<TestClock>) -> eyre::Result<()> {
    let mut directory = sprint(&clock)?;
    clock.advance(TimeDelta::hours(6));
    walk(&mut directory, TaskId::new(1), &FINISH)?;
    walk(&mut directory, TaskId::new(4), &FINISH)?;

    let overall = directory.task_metrics(None);
    ensure!(overall.total_tasks == 5);
    ensure!(overall.completed_tasks == 2);
    ensure!(close_to(overall.completion_rate, 40.0));
    ensure!(overall.average_completion_time == TimeDelta::hours(6));

    let mobile = directory.task_metrics(Some(ProjectId::new(20)));
    ensure!(close_to(mobile.completion_rate, 50.0));
    Ok(())
}
