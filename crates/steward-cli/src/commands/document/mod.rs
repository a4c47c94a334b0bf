mod create;
mod list;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::DocumentCommands;
use crate::context::AppContext;

/// Handle `steward document`.
pub async fn handle(
    action: &DocumentCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        DocumentCommands::Create {
            subcontractor,
            document_type,
            expiry,
            storage_ref,
        } => {
            create::run(
                subcontractor,
                document_type,
                expiry.as_deref(),
                storage_ref,
                ctx,
                flags,
            )
            .await
        }
        DocumentCommands::List { subcontractor } => list::run(subcontractor, ctx, flags).await,
    }
}
