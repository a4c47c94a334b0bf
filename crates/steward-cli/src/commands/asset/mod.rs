mod create;
mod export;
mod get;
mod history;
mod list;
mod move_asset;
mod verify;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AssetCommands;
use crate::context::AppContext;

/// Handle `steward asset`.
pub async fn handle(
    action: &AssetCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AssetCommands::Create { name, category } => create::run(name, category, ctx, flags).await,
        AssetCommands::List { limit } => list::run(*limit, ctx, flags).await,
        AssetCommands::Get { id } => get::run(id, ctx, flags).await,
        AssetCommands::Move {
            asset_id,
            project_id,
            by,
        } => move_asset::run(asset_id, project_id, by.as_deref(), ctx, flags).await,
        AssetCommands::History { id } => history::run(id, ctx, flags).await,
        AssetCommands::Verify { id } => verify::run(id, ctx, flags).await,
        AssetCommands::Export { id, dir } => export::run(id, dir.as_deref(), ctx, flags).await,
    }
}
