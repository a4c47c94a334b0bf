use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    name: &str,
    category: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let asset = ctx.service.create_asset(name, category).await?;
    output(&asset, flags.format)
}
