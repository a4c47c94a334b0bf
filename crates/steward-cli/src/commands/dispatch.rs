use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Asset { action } => commands::asset::handle(&action, ctx, flags).await,
        Commands::Project { action } => commands::project::handle(&action, ctx, flags).await,
        Commands::Subcontractor { action } => {
            commands::subcontractor::handle(&action, ctx, flags).await
        }
        Commands::Document { action } => commands::document::handle(&action, ctx, flags).await,
        Commands::User { action } => commands::user::handle(&action, ctx, flags).await,
        Commands::Audit(args) => commands::audit::handle(&args, ctx, flags).await,
        Commands::ScanExpiry => commands::scan_expiry::handle(ctx, flags).await,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use steward_config::StewardConfig;
    use steward_core::clock::FixedClock;
    use steward_db::StewardDb;
    use steward_db::service::StewardService;

    use super::dispatch;
    use crate::cli::root_commands::Commands;
    use crate::cli::subcommands::{AssetCommands, DocumentCommands, ProjectCommands};
    use crate::cli::{GlobalFlags, OutputFormat};
    use crate::context::AppContext;

    async fn test_context(export_dir: &str) -> AppContext {
        let clock = FixedClock::at_date(chrono::NaiveDate::from_ymd_opt(2026, 6, 1).unwrap());
        let db = StewardDb::open_local(":memory:").await.unwrap();
        let mut config = StewardConfig::default();
        config.custody.export_dir = export_dir.to_string();
        AppContext {
            service: StewardService::from_db(db, Arc::new(clock)),
            config,
        }
    }

    fn flags() -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Raw,
            limit: None,
            quiet: true,
            verbose: false,
            db: None,
        }
    }

    #[tokio::test]
    async fn move_then_export_runs_through_the_service() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(&dir.path().display().to_string()).await;
        let asset = ctx.service.create_asset("Generator", "Power").await.unwrap();
        let project = ctx.service.create_project("Harbour Tower", None).await.unwrap();

        dispatch(
            Commands::Asset {
                action: AssetCommands::Move {
                    asset_id: asset.id.clone(),
                    project_id: project.id.clone(),
                    by: None,
                },
            },
            &ctx,
            &flags(),
        )
        .await
        .unwrap();

        let stored = ctx.service.get_asset(&asset.id).await.unwrap();
        assert_eq!(stored.project_id.as_deref(), Some(project.id.as_str()));

        dispatch(
            Commands::Asset {
                action: AssetCommands::Export {
                    id: asset.id.clone(),
                    dir: None,
                },
            },
            &ctx,
            &flags(),
        )
        .await
        .unwrap();
        assert!(dir.path().join(format!("{}.jsonl", asset.id)).exists());
    }

    #[tokio::test]
    async fn missing_project_maps_to_not_found_exit() {
        let ctx = test_context(".steward/custody").await;
        let error = dispatch(
            Commands::Project {
                action: ProjectCommands::Compliance {
                    id: "prj-00000000".into(),
                },
            },
            &ctx,
            &flags(),
        )
        .await
        .unwrap_err();
        assert_eq!(crate::exit_code(&error), 3);
    }

    #[tokio::test]
    async fn bad_expiry_date_is_rejected_before_storage() {
        let ctx = test_context(".steward/custody").await;
        let sub = ctx
            .service
            .create_subcontractor("Acme Scaffolding", None, None)
            .await
            .unwrap();

        let error = dispatch(
            Commands::Document {
                action: DocumentCommands::Create {
                    subcontractor: sub.id.clone(),
                    document_type: "Insurance".into(),
                    expiry: Some("2026-13-01".into()),
                    storage_ref: "uploads/compliance/cert.pdf".into(),
                },
            },
            &ctx,
            &flags(),
        )
        .await
        .unwrap_err();

        assert_eq!(crate::exit_code(&error), 2);
        let documents = ctx
            .service
            .list_documents_for_subcontractor(&sub.id)
            .await
            .unwrap();
        assert!(documents.is_empty());
    }
}
