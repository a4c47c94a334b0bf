use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    asset_id: &str,
    project_id: &str,
    moved_by: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if moved_by.is_none() {
        tracing::warn!(asset_id, "moving asset without an operator; pass --by <user-id>");
    }
    let record = ctx.service.move_asset(asset_id, project_id, moved_by).await?;
    output(&record, flags.format)
}
