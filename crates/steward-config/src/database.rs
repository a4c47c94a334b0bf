//! libSQL store configuration.

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    ".steward/steward.db".to_string()
}

/// Default wait for the SQLite write lock, in milliseconds.
const fn default_busy_timeout_ms() -> u64 {
    5_000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database file path, or `:memory:` for a throwaway store.
    #[serde(default = "default_path")]
    pub path: String,

    /// How long a writer waits for another writer's transaction to finish.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

impl DatabaseConfig {
    /// Whether the configured store lives only in memory.
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path == ":memory:"
    }

    /// Parent directory of the database file, if it has one.
    #[must_use]
    pub fn parent_dir(&self) -> Option<std::path::PathBuf> {
        if self.is_in_memory() {
            return None;
        }
        std::path::Path::new(&self.path)
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(std::path::Path::to_path_buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_project_store() {
        let config = DatabaseConfig::default();
        assert_eq!(config.path, ".steward/steward.db");
        assert_eq!(config.busy_timeout_ms, 5_000);
        assert!(!config.is_in_memory());
        assert_eq!(
            config.parent_dir(),
            Some(std::path::PathBuf::from(".steward"))
        );
    }

    #[test]
    fn memory_store_has_no_parent() {
        let config = DatabaseConfig {
            path: ":memory:".into(),
            ..Default::default()
        };
        assert!(config.is_in_memory());
        assert_eq!(config.parent_dir(), None);
    }

    #[test]
    fn bare_file_name_has_no_parent() {
        let config = DatabaseConfig {
            path: "steward.db".into(),
            ..Default::default()
        };
        assert_eq!(config.parent_dir(), None);
    }
}
