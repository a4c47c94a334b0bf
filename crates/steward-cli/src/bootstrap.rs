/// Load `.env` and the layered configuration.
///
/// `--db` is applied later by the context so the rest of the config still
/// validates against the file and environment layers.
pub fn load_config() -> anyhow::Result<steward_config::StewardConfig> {
    if let Some(path) = steward_config::StewardConfig::global_config_path() {
        tracing::debug!(path = %path.display(), "global config location");
    }

    steward_config::StewardConfig::load_with_dotenv().map_err(anyhow::Error::from)
}
