use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    name: &str,
    email: Option<&str>,
    phone: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let subcontractor = ctx.service.create_subcontractor(name, email, phone).await?;
    output(&subcontractor, flags.format)
}
