use clap::Subcommand;

/// User commands.
#[derive(Clone, Debug, Subcommand)]
pub enum UserCommands {
    /// Create an operator account.
    Create {
        #[arg(long)]
        username: String,
        /// admin or foreman
        #[arg(long)]
        role: String,
        /// Opaque reference to the credential held by the auth collaborator.
        #[arg(long)]
        credential_ref: String,
    },
    /// Get a user by ID, or by username with `--username`.
    Get {
        id: Option<String>,
        #[arg(long, conflicts_with = "id")]
        username: Option<String>,
    },
}
