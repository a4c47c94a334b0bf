mod assets;
mod assign;
mod compliance;
mod create;
mod list;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ProjectCommands;
use crate::context::AppContext;

/// Handle `steward project`.
pub async fn handle(
    action: &ProjectCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ProjectCommands::Create { name, location } => {
            create::run(name, location.as_deref(), ctx, flags).await
        }
        ProjectCommands::List { limit } => list::run(*limit, ctx, flags).await,
        ProjectCommands::Assign { id, subcontractor } => {
            assign::run(id, subcontractor, ctx, flags).await
        }
        ProjectCommands::Compliance { id } => compliance::run(id, ctx, flags).await,
        ProjectCommands::Assets { id } => assets::run(id, ctx, flags).await,
    }
}
