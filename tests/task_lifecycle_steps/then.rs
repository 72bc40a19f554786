//! Then steps for task lifecycle BDD scenarios.

use super::world::{LifecycleWorld, parse_status};
use mockable::Clock;
use rstest_bdd_macros::then;
use taskboard::task::domain::{Task, TaskDomainError, TaskId, UserId};

fn task(world: &LifecycleWorld, id: TaskId) -> Result<&Task, eyre::Report> {
    world
        .directory
        .get_task(id)
        .ok_or_else(|| eyre::eyre!("task {id} missing from directory"))
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &LifecycleWorld, status: String) -> Result<(), eyre::Report> {
    let expected = parse_status(&status)?;
    let found = task(world, world.current_task()?)?.status();
    if found != expected {
        return Err(eyre::eyre!("expected status {expected}, found {found}"));
    }
    Ok(())
}

#[then("the move is rejected as an invalid transition")]
fn move_is_rejected(world: &LifecycleWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_move
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing move result"))?;
    if !matches!(result, Err(TaskDomainError::InvalidStateTransition { .. })) {
        return Err(eyre::eyre!(
            "expected InvalidStateTransition error, got {result:?}"
        ));
    }
    Ok(())
}

#[then("the task records its completion time")]
fn task_records_completion_time(world: &LifecycleWorld) -> Result<(), eyre::Report> {
    let completed_at = task(world, world.current_task()?)?.completed_at();
    eyre::ensure!(
        completed_at == Some(world.clock.utc()),
        "expected completion at {}, found {completed_at:?}",
        world.clock.utc()
    );
    Ok(())
}

#[then("the bulk move reports {moved:u64} of {requested:u64} tasks moved")]
fn bulk_move_reports(
    world: &LifecycleWorld,
    moved: u64,
    requested: u64,
) -> Result<(), eyre::Report> {
    let outcome = world
        .last_bulk
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing bulk outcome"))?;
    let succeeded = outcome.values().filter(|ok| **ok).count();
    eyre::ensure!(
        u64::try_from(outcome.len())? == requested,
        "expected {requested} outcomes, found {}",
        outcome.len()
    );
    eyre::ensure!(
        u64::try_from(succeeded)? == moved,
        "expected {moved} moved, found {succeeded}"
    );
    Ok(())
}

#[then(r#"the task titled "{title}" has status "{status}""#)]
fn titled_task_has_status(
    world: &LifecycleWorld,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    let expected = parse_status(&status)?;
    let id = world
        .tasks_by_title
        .get(&title)
        .copied()
        .ok_or_else(|| eyre::eyre!("no task titled {title}"))?;
    let found = task(world, id)?.status();
    eyre::ensure!(found == expected, "expected {expected}, found {found}");
    Ok(())
}

#[then("the task is assigned to user {user:u64}")]
fn task_is_assigned_to(world: &LifecycleWorld, user: u64) -> Result<(), eyre::Report> {
    let assignee = task(world, world.current_task()?)?.assignee_id();
    eyre::ensure!(
        assignee == Some(UserId::new(user)),
        "expected user {user}, found {assignee:?}"
    );
    Ok(())
}
