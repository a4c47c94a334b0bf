mod create;
mod get;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::UserCommands;
use crate::context::AppContext;

/// Handle `steward user`.
pub async fn handle(
    action: &UserCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        UserCommands::Create {
            username,
            role,
            credential_ref,
        } => create::run(username, role, credential_ref, ctx, flags).await,
        UserCommands::Get { id, username } => {
            get::run(id.as_deref(), username.as_deref(), ctx, flags).await
        }
    }
}
