pub mod commands;
pub mod context;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use context::ConsoleContext;

#[derive(Parser)]
#[command(name = "lms")]
#[command(about = "LMS console - role-scoped administration for the learning management backend")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Login, logout and session status")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "University records")]
    University {
        #[command(subcommand)]
        cmd: commands::entity::EntityCommands,
    },

    #[command(about = "Course records")]
    Course {
        #[command(subcommand)]
        cmd: commands::entity::EntityCommands,
    },

    #[command(about = "Student records")]
    Student {
        #[command(subcommand)]
        cmd: commands::entity::EntityCommands,
    },

    #[command(about = "University administrator records")]
    Admin {
        #[command(subcommand)]
        cmd: commands::entity::EntityCommands,
    },

    #[command(about = "Enrollment management")]
    Enrollment {
        #[command(subcommand)]
        cmd: commands::enrollment::EnrollmentCommands,
    },

    #[command(about = "Overview for the current role")]
    Dashboard {
        #[arg(long, help = "Seed for simulated enrollments")]
        seed: Option<u64>,
    },

    #[command(about = "Tenant directory (demo data)")]
    Tenant {
        #[command(subcommand)]
        cmd: commands::tenant::TenantCommands,
    },

    #[command(about = "Database statistics, backup and settings")]
    Database {
        #[command(subcommand)]
        cmd: commands::database::DatabaseCommands,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli, config: &AppConfig) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let ctx = ConsoleContext::open(config)?;

    match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, &ctx, output_format).await,
        Commands::University { cmd } => {
            commands::entity::handle::<crate::models::University>(cmd, &ctx, output_format).await
        }
        Commands::Course { cmd } => {
            commands::entity::handle::<crate::models::Course>(cmd, &ctx, output_format).await
        }
        Commands::Student { cmd } => {
            commands::entity::handle::<crate::models::Student>(cmd, &ctx, output_format).await
        }
        Commands::Admin { cmd } => {
            commands::entity::handle::<crate::models::Admin>(cmd, &ctx, output_format).await
        }
        Commands::Enrollment { cmd } => commands::enrollment::handle(cmd, &ctx, output_format).await,
        Commands::Dashboard { seed } => commands::dashboard::handle(seed, &ctx, output_format).await,
        Commands::Tenant { cmd } => commands::tenant::handle(cmd, &ctx, output_format).await,
        Commands::Database { cmd } => commands::database::handle(cmd, &ctx, output_format).await,
    }
}
