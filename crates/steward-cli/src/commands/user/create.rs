use steward_core::enums::UserRole;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    username: &str,
    role: &str,
    credential_ref: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let role: UserRole = parse_enum(role, "role")?;
    let user = ctx.service.create_user(username, role, credential_ref).await?;
    output(&user, flags.format)
}
