//! Chain-of-custody export configuration.

use serde::{Deserialize, Serialize};

fn default_export_dir() -> String {
    ".steward/custody".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CustodyConfig {
    /// Directory receiving `{asset_id}.jsonl` exports.
    #[serde(default = "default_export_dir")]
    pub export_dir: String,
}

impl Default for CustodyConfig {
    fn default() -> Self {
        Self {
            export_dir: default_export_dir(),
        }
    }
}
