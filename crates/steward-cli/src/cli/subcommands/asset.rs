use clap::Subcommand;

/// Asset commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AssetCommands {
    /// Register an asset with no location.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        category: String,
    },
    /// List assets with their current project.
    List {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get an asset with its move history.
    Get { id: String },
    /// Move an asset to a project.
    Move {
        asset_id: String,
        project_id: String,
        /// User ID of the operator performing the move.
        #[arg(long)]
        by: Option<String>,
    },
    /// Show the move history, most recent first.
    History { id: String },
    /// Replay the history and compare it with the stored location.
    Verify { id: String },
    /// Write the chain of custody as JSON Lines.
    Export {
        id: String,
        /// Target directory (defaults to `custody.export_dir`).
        #[arg(long)]
        dir: Option<String>,
    },
}
