use std::sync::Arc;

use anyhow::Context;
use steward_config::StewardConfig;
use steward_core::clock::SystemClock;
use steward_db::service::StewardService;

use crate::cli::GlobalFlags;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: StewardService,
    pub config: StewardConfig,
}

impl AppContext {
    /// Open the configured store. `--db` wins over `database.path`.
    pub async fn init(mut config: StewardConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        if let Some(path) = flags.db.as_deref() {
            config.database.path = path.to_string();
        }

        tracing::debug!(path = %config.database.path, "opening steward database");
        let service = StewardService::from_config(&config.database, Arc::new(SystemClock))
            .await
            .with_context(|| {
                format!(
                    "failed to open steward database at {}",
                    config.database.path
                )
            })?;

        Ok(Self { service, config })
    }
}
