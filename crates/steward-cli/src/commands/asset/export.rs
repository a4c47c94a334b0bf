use std::path::Path;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    id: &str,
    dir: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let dir = dir.unwrap_or(&ctx.config.custody.export_dir);
    let export = ctx.service.export_custody(id, Path::new(dir)).await?;
    output(&export, flags.format)
}
