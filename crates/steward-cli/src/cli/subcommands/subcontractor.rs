use clap::Subcommand;

/// Subcontractor commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SubcontractorCommands {
    /// Register a subcontractor.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// List subcontractors.
    List {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get a subcontractor with its projects.
    Get { id: String },
    /// Aggregated RED/GREEN status with per-document breakdown.
    Compliance { id: String },
}
