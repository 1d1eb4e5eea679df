use clap::Subcommand;
use serde_json::json;

use crate::cli::context::ConsoleContext;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::models::{NewTenant, Tenant, TenantPlan, TenantStatus};
use crate::services::{MockTenantDirectory, TenantDirectory};
use crate::session::ResourceKind;

#[derive(Subcommand)]
pub enum TenantCommands {
    #[command(about = "List tenants")]
    List {
        #[arg(long, help = "Match name, domain or subdomain")]
        search: Option<String>,
    },

    #[command(about = "Create new tenant")]
    Create {
        #[arg(help = "Tenant name")]
        name: String,
        #[arg(help = "Primary domain, e.g. stateuni.edu")]
        domain: String,
        #[arg(help = "Subdomain")]
        subdomain: String,
        #[arg(long, default_value = "basic", help = "basic, premium or enterprise")]
        plan: TenantPlan,
    },

    #[command(about = "Delete tenant")]
    Delete {
        #[arg(help = "Tenant ID")]
        id: String,
    },

    #[command(about = "Suspend tenant")]
    Suspend {
        #[arg(help = "Tenant ID")]
        id: String,
    },

    #[command(about = "Reactivate tenant")]
    Activate {
        #[arg(help = "Tenant ID")]
        id: String,
    },
}

pub async fn handle(cmd: TenantCommands, ctx: &ConsoleContext, output_format: OutputFormat) -> anyhow::Result<()> {
    // Demo directory, rebuilt for every invocation
    let directory = MockTenantDirectory::default();

    match cmd {
        TenantCommands::List { search } => {
            ctx.require_view(ResourceKind::Tenant)?;
            let tenants = match search {
                Some(term) => directory.search(&term).await,
                None => directory.list().await,
            };

            if tenants.is_empty() {
                return output_empty_collection(output_format, "tenants", "No tenants found");
            }

            match output_format {
                OutputFormat::Json => print_json(&json!({ "tenants": tenants })),
                OutputFormat::Text => {
                    let rows: Vec<Vec<String>> = tenants.iter().map(tenant_cells).collect();
                    print_table(
                        &["ID", "NAME", "DOMAIN", "STATUS", "PLAN", "UNIS", "STUDENTS", "STORAGE", "LAST ACTIVE"],
                        &rows,
                    );
                    Ok(())
                }
            }
        }

        TenantCommands::Create {
            name,
            domain,
            subdomain,
            plan,
        } => {
            ctx.require_manage(ResourceKind::Tenant)?;
            let tenant = directory
                .create(NewTenant {
                    name,
                    domain,
                    subdomain,
                    plan,
                })
                .await?;
            output_success(
                output_format,
                &format!("Tenant '{}' created ({} plan, {})", tenant.name, tenant.plan, tenant.storage_limit),
                Some(json!({ "tenant": tenant })),
            )
        }

        TenantCommands::Delete { id } => {
            ctx.require_manage(ResourceKind::Tenant)?;
            let tenant = directory.delete(&id).await?;
            output_success(output_format, &format!("Tenant '{}' deleted", tenant.name), None)
        }

        TenantCommands::Suspend { id } => {
            change_status(ctx, &directory, &id, TenantStatus::Suspended, output_format).await
        }

        TenantCommands::Activate { id } => {
            change_status(ctx, &directory, &id, TenantStatus::Active, output_format).await
        }
    }
}

async fn change_status(
    ctx: &ConsoleContext,
    directory: &dyn TenantDirectory,
    id: &str,
    status: TenantStatus,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    ctx.require_manage(ResourceKind::Tenant)?;
    let tenant = directory.set_status(id, status).await?;
    output_success(
        output_format,
        &format!("Tenant '{}' is now {}", tenant.name, tenant.status),
        Some(json!({ "tenant": tenant })),
    )
}

fn tenant_cells(tenant: &Tenant) -> Vec<String> {
    vec![
        tenant.id.clone(),
        tenant.name.clone(),
        tenant.domain.clone(),
        tenant.status.to_string(),
        tenant.plan.to_string(),
        tenant.universities.to_string(),
        tenant.students.to_string(),
        format!("{} / {}", tenant.storage_used, tenant.storage_limit),
        tenant.last_activity.format("%Y-%m-%d %H:%M").to_string(),
    ]
}
