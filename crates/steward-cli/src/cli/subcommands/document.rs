use clap::Subcommand;

/// Compliance document commands.
#[derive(Clone, Debug, Subcommand)]
pub enum DocumentCommands {
    /// Record an uploaded document. Renewals are new documents.
    Create {
        #[arg(long)]
        subcontractor: String,
        #[arg(long = "type")]
        document_type: String,
        /// Expiry date as YYYY-MM-DD. Omit when the document carries none.
        #[arg(long)]
        expiry: Option<String>,
        #[arg(long)]
        storage_ref: String,
    },
    /// List a subcontractor's documents.
    List {
        #[arg(long)]
        subcontractor: String,
    },
}
