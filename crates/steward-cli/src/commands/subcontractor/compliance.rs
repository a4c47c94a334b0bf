use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let compliance = ctx.service.subcontractor_compliance(id).await?;
    output(&compliance, flags.format)
}
