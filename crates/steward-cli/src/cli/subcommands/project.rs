use clap::Subcommand;

/// Project commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ProjectCommands {
    /// Create a project.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        location: Option<String>,
    },
    /// List projects with asset and subcontractor counts.
    List {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Assign a subcontractor to a project.
    Assign {
        id: String,
        #[arg(long)]
        subcontractor: String,
    },
    /// RED/GREEN status of every subcontractor on the project.
    Compliance { id: String },
    /// Assets currently located at the project.
    Assets { id: String },
}
