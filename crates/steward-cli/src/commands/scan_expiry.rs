use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `steward scan-expiry`.
///
/// Prints the report and succeeds even when notices are present; delivery is
/// left to whatever schedules the command.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let report = ctx.service.expiry_scan().await?;
    if report.requires_attention() && !flags.quiet {
        tracing::warn!(
            notices = report.notices.len(),
            total = report.total_documents,
            "documents need attention"
        );
    }
    output(&report, flags.format)
}
