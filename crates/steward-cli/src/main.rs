#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

use anyhow::Context;
use clap::Parser;
use steward_core::errors::{CoreError, ErrorKind};
use steward_db::error::DatabaseError;

mod bootstrap;
mod cli;
mod commands;
mod context;
mod output;
mod ui;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("steward error: {error:#}");
        std::process::exit(exit_code(&error));
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    ui::init(&flags);

    let config = bootstrap::load_config()?;
    let ctx = context::AppContext::init(config, &flags)
        .await
        .context("failed to initialize steward application context")?;

    commands::dispatch::dispatch(cli.command, &ctx, &flags).await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("STEWARD_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

/// Process exit code for a failed command, keyed by the first classified error
/// in the chain.
fn exit_code(error: &anyhow::Error) -> i32 {
    let kind = error.chain().find_map(|cause| {
        cause
            .downcast_ref::<DatabaseError>()
            .map(DatabaseError::kind)
            .or_else(|| cause.downcast_ref::<CoreError>().map(CoreError::kind))
    });
    match kind {
        Some(ErrorKind::Validation) => 2,
        Some(ErrorKind::NotFound) => 3,
        Some(ErrorKind::Conflict) => 4,
        Some(ErrorKind::Storage) | None => 1,
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Context;
    use steward_core::enums::EntityType;
    use steward_db::error::DatabaseError;

    use super::exit_code;

    #[test]
    fn exit_codes_follow_error_kind() {
        let validation = anyhow::Error::from(DatabaseError::Validation("name is required".into()));
        assert_eq!(exit_code(&validation), 2);

        let missing = anyhow::Error::from(DatabaseError::not_found(EntityType::Asset, "ast-0"));
        assert_eq!(exit_code(&missing), 3);

        let conflict = anyhow::Error::from(DatabaseError::Conflict("moved".into()));
        assert_eq!(exit_code(&conflict), 4);

        assert_eq!(exit_code(&anyhow::anyhow!("boom")), 1);
    }

    #[test]
    fn cli_input_errors_are_validation() {
        let error = crate::commands::shared::parse::parse_date("2026-02-30", "expiry").unwrap_err();
        assert_eq!(exit_code(&error), 2);
    }

    #[test]
    fn exit_code_sees_through_context() {
        let result: Result<(), DatabaseError> =
            Err(DatabaseError::not_found(EntityType::Project, "prj-0"));
        let error = result.context("failed to move asset").unwrap_err();
        assert_eq!(exit_code(&error), 3);
    }
}
