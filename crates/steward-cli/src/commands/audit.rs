use steward_core::enums::{AuditAction, EntityType};
use steward_db::repos::audit::AuditFilter;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AuditArgs;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `steward audit`.
pub async fn handle(args: &AuditArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let filter = build_filter(args, effective_limit(None, flags.limit, &ctx.config.general))?;
    let entries = ctx.service.query_audit(&filter).await?;
    output(&entries, flags.format)
}

fn build_filter(args: &AuditArgs, limit: u32) -> anyhow::Result<AuditFilter> {
    Ok(AuditFilter {
        entity_type: args
            .entity_type
            .as_deref()
            .map(|value| parse_enum::<EntityType>(value, "entity-type"))
            .transpose()?,
        entity_id: args.entity_id.clone(),
        action: args
            .action
            .as_deref()
            .map(|value| parse_enum::<AuditAction>(value, "action"))
            .transpose()?,
        limit: Some(limit),
    })
}
