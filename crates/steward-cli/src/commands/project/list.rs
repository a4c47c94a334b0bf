use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(limit: Option<u32>, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let limit = effective_limit(limit, flags.limit, &ctx.config.general);
    let projects = ctx.service.list_projects(limit).await?;
    output(&projects, flags.format)
}
