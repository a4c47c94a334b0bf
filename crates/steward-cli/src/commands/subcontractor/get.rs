use serde::Serialize;
use steward_core::entities::{Project, Subcontractor};

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct SubcontractorView {
    #[serde(flatten)]
    subcontractor: Subcontractor,
    projects: Vec<Project>,
}

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let subcontractor = ctx.service.get_subcontractor(id).await?;
    let projects = ctx.service.projects_for_subcontractor(id).await?;
    output(
        &SubcontractorView {
            subcontractor,
            projects,
        },
        flags.format,
    )
}
