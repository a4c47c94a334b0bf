mod compliance;
mod create;
mod get;
mod list;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SubcontractorCommands;
use crate::context::AppContext;

/// Handle `steward subcontractor`.
pub async fn handle(
    action: &SubcontractorCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        SubcontractorCommands::Create { name, email, phone } => {
            create::run(name, email.as_deref(), phone.as_deref(), ctx, flags).await
        }
        SubcontractorCommands::List { limit } => list::run(*limit, ctx, flags).await,
        SubcontractorCommands::Get { id } => get::run(id, ctx, flags).await,
        SubcontractorCommands::Compliance { id } => compliance::run(id, ctx, flags).await,
    }
}
