use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    AssetCommands, DocumentCommands, ProjectCommands, SubcontractorCommands, UserCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Assets and their chain of custody.
    Asset {
        #[command(subcommand)]
        action: AssetCommands,
    },
    /// Projects, assignments, and project compliance.
    Project {
        #[command(subcommand)]
        action: ProjectCommands,
    },
    /// Subcontractors and their compliance status.
    Subcontractor {
        #[command(subcommand)]
        action: SubcontractorCommands,
    },
    /// Compliance documents.
    Document {
        #[command(subcommand)]
        action: DocumentCommands,
    },
    /// Operator accounts.
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// Query the audit trail.
    Audit(AuditArgs),
    /// Sweep every document and report the RED ones.
    #[command(name = "scan-expiry")]
    ScanExpiry,
}

/// Arguments for `steward audit`.
#[derive(Clone, Debug, Args)]
pub struct AuditArgs {
    #[arg(long)]
    pub entity_type: Option<String>,
    #[arg(long)]
    pub entity_id: Option<String>,
    #[arg(long)]
    pub action: Option<String>,
}
