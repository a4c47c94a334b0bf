use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_date;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    subcontractor_id: &str,
    document_type: &str,
    expiry: Option<&str>,
    storage_ref: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let expiry_date = expiry
        .map(|raw| parse_date(raw, "expiry"))
        .transpose()?;
    let document = ctx
        .service
        .create_document(subcontractor_id, document_type, expiry_date, storage_ref)
        .await?;
    output(&document, flags.format)
}
