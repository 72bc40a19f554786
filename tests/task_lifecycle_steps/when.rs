//! When steps for task lifecycle BDD scenarios.

use super::world::{LifecycleWorld, parse_status};
use chrono::TimeDelta;
use rstest_bdd_macros::when;
use taskboard::task::domain::{TaskId, UserId};

#[when(r#"the task is moved to "{status}""#)]
fn task_is_moved(world: &mut LifecycleWorld, status: String) -> Result<(), eyre::Report> {
    let target = parse_status(&status)?;
    let id = world.current_task()?;
    let result = match world.directory.transition_task(id, target) {
        Ok(Some(_)) => Ok(()),
        Ok(None) => return Err(eyre::eyre!("task {id} vanished from the directory")),
        Err(err) => Err(err),
    };
    world.last_move = Some(result);
    Ok(())
}

#[when("the clock moves forward {hours:i64} hours")]
fn clock_moves_forward(world: &mut LifecycleWorld, hours: i64) {
    world.clock.advance(TimeDelta::hours(hours));
}

#[when(r#"every task is bulk moved to "{status}""#)]
fn every_task_bulk_moved(world: &mut LifecycleWorld, status: String) -> Result<(), eyre::Report> {
    let target = parse_status(&status)?;
    let ids: Vec<TaskId> = world.tasks_by_title.values().copied().collect();
    world.last_bulk = Some(world.directory.bulk_transition(&ids, target));
    Ok(())
}

#[when("the task is auto-assigned between users {first:u64} and {second:u64}")]
fn task_is_auto_assigned(
    world: &mut LifecycleWorld,
    first: u64,
    second: u64,
) -> Result<(), eyre::Report> {
    let id = world.current_task()?;
    world
        .directory
        .auto_assign_task(id, &[UserId::new(first), UserId::new(second)])
        .ok_or_else(|| eyre::eyre!("auto-assign returned no task"))?;
    Ok(())
}
