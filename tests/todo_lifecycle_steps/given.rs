//! Given steps for todo lifecycle BDD scenarios.

use super::world::{TodoLifecycleWorld, apply_action, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use tickbox::todo::services::AddTodoRequest;

#[given(r#"a todo titled "{title}""#)]
fn todo_titled(world: &mut TodoLifecycleWorld, title: String) -> Result<(), eyre::Report> {
    let created = run_async(world.commands.add(AddTodoRequest::new(title)))
        .wrap_err("add todo for lifecycle scenario")?;
    world.current = Some(created.id().clone());
    Ok(())
}

#[given("the todo has been {action}")]
fn todo_has_been(world: &mut TodoLifecycleWorld, action: String) -> Result<(), eyre::Report> {
    apply_action(world, &action)?.wrap_err_with(|| format!("scenario setup: todo {action}"))?;
    Ok(())
}
