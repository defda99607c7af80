use crate::cli::TaskAction;
use crate::context::CliContext;
use crate::output;
use taskboard_domain::BoardOperations;

pub async fn handle(ctx: &mut CliContext, action: TaskAction) -> anyhow::Result<()> {
    match action {
        TaskAction::Add { list, title } => match ctx.add_task(list, title).await? {
            Some(task) => output::output_success(&task),
            None => output::output_error("Task title must not be empty"),
        },
        TaskAction::Toggle(task) => {
            let task = ctx.toggle_task(task.list, task.id).await?;
            output::output_success(&task);
        }
        TaskAction::Edit { task, title } => {
            let task = ctx.edit_task(task.list, task.id, title).await?;
            output::output_success(&task);
        }
        TaskAction::Delete(task) => {
            let deleted = ctx.delete_task(task.list, task.id).await?;
            output::output_success(serde_json::json!({
                "deleted": deleted.id,
                "list_id": task.list,
            }));
        }
        TaskAction::Pin(task) => {
            let task = ctx.toggle_pin(task.list, task.id).await?;
            output::output_success(&task);
        }
    }
    Ok(())
}
