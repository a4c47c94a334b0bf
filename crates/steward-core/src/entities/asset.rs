use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A tracked physical asset.
///
/// `project_id` is the single authoritative current location. It is `None`
/// until the first move and only ever changes together with a new
/// [`AssetMove`] record.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub category: String,
    pub project_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One immutable entry in an asset's chain of custody.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AssetMove {
    pub id: String,
    pub asset_id: String,
    /// Destination project.
    pub project_id: String,
    /// Actor that performed the move, as supplied by the authenticated caller.
    pub moved_by: Option<String>,
    pub moved_at: DateTime<Utc>,
}
