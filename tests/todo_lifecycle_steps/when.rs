//! When steps for todo lifecycle BDD scenarios.

use super::world::{TodoLifecycleWorld, apply_action};
use rstest_bdd_macros::when;

#[when("the todo is {action}")]
fn todo_is(world: &mut TodoLifecycleWorld, action: String) -> Result<(), eyre::Report> {
    world.published_before_command = world.publisher.names().len();
    let result = apply_action(world, &action)?;
    world.last_result = Some(result);
    Ok(())
}
