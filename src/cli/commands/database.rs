use clap::Subcommand;
use serde_json::json;

use crate::cli::commands::dashboard::load_snapshot;
use crate::cli::context::ConsoleContext;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::models::SystemSettings;
use crate::services::{BackupService, SimulatedBackupService};
use crate::session::{ResourceKind, Role};

#[derive(Subcommand)]
pub enum DatabaseCommands {
    #[command(about = "Platform counts and database metrics")]
    Stats,

    #[command(about = "Request a database backup")]
    Backup,

    #[command(about = "Request a database restore")]
    Restore {
        #[arg(long, help = "Confirm the restore; it cannot be undone")]
        yes: bool,
    },

    #[command(about = "Show system settings")]
    Settings,
}

pub async fn handle(cmd: DatabaseCommands, ctx: &ConsoleContext, output_format: OutputFormat) -> anyhow::Result<()> {
    require_super_admin(ctx)?;
    let backups = SimulatedBackupService::new();

    match cmd {
        DatabaseCommands::Stats => {
            let snapshot = load_snapshot(ctx, None).await?;
            let stats = snapshot.collections.counts().database_stats(backups.metrics().await);
            match output_format {
                OutputFormat::Json => print_json(&stats),
                OutputFormat::Text => {
                    println!("Universities:       {}", stats.universities);
                    println!("Students:           {}", stats.students);
                    println!("Courses:            {}", stats.courses);
                    println!("Admins:             {}", stats.admins);
                    println!("Total users:        {}", stats.total_users);
                    println!("Active connections: {}", stats.active_connections);
                    println!("Last backup:        {}", stats.last_backup.format("%Y-%m-%d %H:%M"));
                    println!("Database size:      {}", stats.database_size);
                    Ok(())
                }
            }
        }

        DatabaseCommands::Backup => {
            let ack = backups.backup().await;
            output_success(output_format, &ack.message, Some(json!({ "requestedAt": ack.requested_at })))
        }

        DatabaseCommands::Restore { yes } => {
            if !yes {
                anyhow::bail!("restoring the database cannot be undone; pass --yes to confirm");
            }
            let ack = backups.restore().await;
            output_success(output_format, &ack.message, Some(json!({ "requestedAt": ack.requested_at })))
        }

        DatabaseCommands::Settings => {
            let settings = SystemSettings::default();
            match output_format {
                OutputFormat::Json => print_json(&settings),
                OutputFormat::Text => {
                    println!("Max universities:            {}", settings.max_universities);
                    println!("Max students per university: {}", settings.max_students_per_university);
                    println!("Max courses per university:  {}", settings.max_courses_per_university);
                    println!("Auto backup:                 {}", settings.enable_auto_backup);
                    println!("Backup frequency:            {:?}", settings.backup_frequency);
                    println!("Email notifications:         {}", settings.enable_email_notifications);
                    println!("Audit logs:                  {}", settings.enable_audit_logs);
                    println!("Session timeout:             {} min", settings.session_timeout);
                    println!("Max login attempts:          {}", settings.max_login_attempts);
                    Ok(())
                }
            }
        }
    }
}

/// Database settings are a super admin screen.
fn require_super_admin(ctx: &ConsoleContext) -> anyhow::Result<()> {
    let identity = ctx.require_view(ResourceKind::University)?;
    if identity.role != Role::SuperAdmin {
        anyhow::bail!("database settings are only available to super admins");
    }
    Ok(())
}
