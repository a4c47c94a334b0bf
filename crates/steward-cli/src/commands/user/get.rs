use steward_core::enums::EntityType;
use steward_core::errors::CoreError;
use steward_db::error::DatabaseError;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    id: Option<&str>,
    username: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let user = match (id, username) {
        (Some(id), _) => ctx.service.get_user(id).await?,
        (None, Some(username)) => ctx
            .service
            .find_user_by_username(username)
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::User, username))?,
        (None, None) => {
            return Err(CoreError::Validation("pass a user ID or --username".into()).into());
        }
    };
    output(&user, flags.format)
}
