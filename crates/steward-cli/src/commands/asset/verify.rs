use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let check = ctx.service.verify_custody(id).await?;
    output(&check, flags.format)?;
    if !check.consistent {
        anyhow::bail!(
            "chain of custody for {id} replays to {} but the stored location is {}",
            check.replayed_location.as_deref().unwrap_or("no location"),
            check.stored_location.as_deref().unwrap_or("no location"),
        );
    }
    Ok(())
}
