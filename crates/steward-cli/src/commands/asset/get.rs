use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let detail = ctx.service.get_asset_detail(id).await?;
    output(&detail, flags.format)
}
