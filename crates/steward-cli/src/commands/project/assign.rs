use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct AssignResponse<'a> {
    project_id: &'a str,
    subcontractor_id: &'a str,
    assigned: bool,
}

pub async fn run(
    project_id: &str,
    subcontractor_id: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    ctx.service
        .assign_subcontractor_to_project(project_id, subcontractor_id)
        .await?;
    output(
        &AssignResponse {
            project_id,
            subcontractor_id,
            assigned: true,
        },
        flags.format,
    )
}
