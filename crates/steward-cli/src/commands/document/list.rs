use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(subcontractor_id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let documents = ctx
        .service
        .list_documents_for_subcontractor(subcontractor_id)
        .await?;
    output(&documents, flags.format)
}
