use clap::Subcommand;
use serde_json::json;

use crate::cli::context::{rng, ConsoleContext};
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::session::two_factor::generate_code;
use crate::session::{LoginError, SessionView};

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login with email and password")]
    Login {
        #[arg(help = "Email")]
        email: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(name = "login-2fa", about = "Super admin login with a one-time code")]
    Login2fa {
        #[arg(help = "Code to submit (will prompt if not provided)")]
        code: Option<String>,
        #[arg(long, help = "Code to check against (generated and shown if not provided)")]
        expected: Option<String>,
    },

    #[command(about = "Logout and clear the stored session")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,

    #[command(about = "Show current user information")]
    Whoami,
}

pub async fn handle(cmd: AuthCommands, ctx: &ConsoleContext, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { email, password } => {
            let password = match password {
                Some(password) => password,
                None => prompt("Password: ")?,
            };

            match ctx.store.attempt_login(&email, &password).await {
                Ok(identity) => output_success(
                    output_format,
                    &format!("Logged in as {} ({})", identity.name, identity.role),
                    Some(json!({ "user": identity })),
                ),
                Err(e) => Err(anyhow::anyhow!(failure_message(&e, "Invalid email or password"))),
            }
        }

        AuthCommands::Login2fa { code, expected } => {
            let expected = match expected {
                Some(expected) => expected,
                None => {
                    let generated = generate_code(&mut rng(None));
                    eprintln!("Your verification code is: {}", generated);
                    generated
                }
            };
            let code = match code {
                Some(code) => code,
                None => prompt("Enter verification code: ")?,
            };

            match ctx.store.attempt_super_admin_login(&code, &expected).await {
                Ok(identity) => output_success(
                    output_format,
                    &format!("Logged in as {} ({})", identity.name, identity.role),
                    Some(json!({ "user": identity })),
                ),
                Err(e) => Err(anyhow::anyhow!(failure_message(&e, "Invalid verification code"))),
            }
        }

        AuthCommands::Logout => {
            ctx.store.logout_remote().await;
            output_success(output_format, "Logged out", None)
        }

        AuthCommands::Status => {
            let view = ctx.session.view();
            let identity = ctx.session.current();
            match output_format {
                OutputFormat::Json => print_json(&json!({
                    "authenticated": identity.is_some(),
                    "role": identity.as_ref().map(|i| i.role),
                    "email": identity.as_ref().map(|i| i.email.clone()),
                    "base_url": ctx.http.base_url().as_str(),
                })),
                OutputFormat::Text => {
                    match view {
                        SessionView::Authenticated(role) => {
                            let email = identity.map(|i| i.email).unwrap_or_default();
                            println!("Logged in as {} ({})", email, role);
                        }
                        SessionView::Anonymous | SessionView::Loading => println!("Not logged in"),
                    }
                    println!("Backend: {}", ctx.http.base_url());
                    Ok(())
                }
            }
        }

        AuthCommands::Whoami => {
            let identity = ctx.require_identity()?;
            match output_format {
                OutputFormat::Json => print_json(&identity),
                OutputFormat::Text => {
                    println!("Name:       {}", identity.name);
                    println!("Email:      {}", identity.email);
                    println!("Role:       {}", identity.role);
                    if let Some(university) = &identity.university_id {
                        println!("University: {}", university);
                    }
                    if let Some(student) = &identity.student_id {
                        println!("Student:    {}", student);
                    }
                    println!("Since:      {}", identity.created_at.format("%Y-%m-%d %H:%M"));
                    Ok(())
                }
            }
        }
    }
}

/// Refusals get a generic message; infrastructure failures keep their detail.
fn failure_message(e: &LoginError, rejected: &str) -> String {
    match e {
        LoginError::SecondFactorMismatch => "Invalid verification code".to_string(),
        LoginError::Rejected { .. } | LoginError::Malformed(_) => rejected.to_string(),
        LoginError::Connectivity(_) | LoginError::Transport(_) | LoginError::Storage(_) => e.to_string(),
    }
}
