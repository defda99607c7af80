use crate::cli::ListAction;
use crate::context::CliContext;
use crate::handlers::view;
use crate::output;
use taskboard_domain::{BoardOperations, DeleteOutcome};

pub async fn handle(ctx: &mut CliContext, action: ListAction) -> anyhow::Result<()> {
    match action {
        ListAction::Create => match ctx.create_list().await? {
            Some(list) => output::output_success(&list),
            None => {
                let max_lists = ctx.state().settings().max_lists;
                output::output_error(&format!(
                    "The board already holds the maximum of {} lists",
                    max_lists
                ))
            }
        },
        ListAction::Ls => {
            output::output_list(ctx.lists());
        }
        ListAction::Get { id } => {
            let list = ctx.get_list(id)?;
            output::output_success(&list);
        }
        ListAction::Rename { id, title } => {
            let list = ctx.rename_list(id, title).await?;
            output::output_success(&list);
        }
        ListAction::Delete { id, confirm } => match ctx.request_delete_list(id).await? {
            DeleteOutcome::Deleted { list_id } => {
                output::output_success(serde_json::json!({ "deleted": list_id }));
            }
            DeleteOutcome::NeedsConfirmation { list_id, task_count } => {
                if !confirm {
                    ctx.cancel_delete_list();
                    output::output_error(&format!(
                        "List {} still holds {} task(s); pass --confirm to delete it",
                        list_id, task_count
                    ));
                }
                let deleted = ctx.confirm_delete_list().await?;
                output::output_success(serde_json::json!({ "deleted": deleted }));
            }
        },
        ListAction::View { id, view: args } => {
            let list_view = ctx.list_view(id, &args.search)?;
            view::output_views(vec![list_view], args.mark);
        }
    }
    Ok(())
}
