//! Given steps for task lifecycle BDD scenarios.

use super::world::{LifecycleWorld, parse_status};
use crate::test_helpers::{titled, walk};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::task::domain::UserId;

#[given(r#"a task titled "{title}""#)]
fn task_titled(world: &mut LifecycleWorld, title: String) -> Result<(), eyre::Report> {
    let id = world.directory.create_task(titled(&title)?).id();
    world.tasks_by_title.insert(title, id);
    world.current_task = Some(id);
    Ok(())
}

#[given(r#"the task has been moved to "{status}""#)]
fn task_has_been_moved(world: &mut LifecycleWorld, status: String) -> Result<(), eyre::Report> {
    let target = parse_status(&status)?;
    let id = world.current_task()?;
    walk(&mut world.directory, id, &[target]).wrap_err("move task in scenario setup")
}

#[given("user {user:u64} owns {count:u64} open tasks")]
fn user_owns_open_tasks(
    world: &mut LifecycleWorld,
    user: u64,
    count: u64,
) -> Result<(), eyre::Report> {
    for index in 0..count {
        let request = titled(&format!("Backlog item {index}"))?.with_assignee(UserId::new(user));
        world.directory.create_task(request);
    }
    Ok(())
}
