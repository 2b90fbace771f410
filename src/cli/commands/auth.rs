use std::io::Write;

use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::output_success;
use crate::cli::{AppContext, OutputFormat};
use crate::session::{SessionController, SessionStatus};

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login to the webhook backend")]
    Login {
        #[arg(help = "Username")]
        username: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Logout and clear stored credentials")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,

    #[command(about = "Show current user information")]
    Whoami,
}

pub async fn handle(cmd: AuthCommands, ctx: &AppContext, output_format: OutputFormat) -> anyhow::Result<()> {
    let controller =
        SessionController::new(ctx.session.clone(), ctx.gateway.clone(), &ctx.config.session);

    match cmd {
        AuthCommands::Login { username, password } => {
            let password = match password {
                Some(password) => password,
                None => prompt_password()?,
            };

            let session = controller.login(&username, &password).await?;
            output_success(
                &output_format,
                &format!("Logged in as {}", session.user.username),
                Some(json!({ "user": session.user })),
            )
        }

        AuthCommands::Logout => {
            controller.logout();
            output_success(&output_format, "Logged out", None)
        }

        AuthCommands::Status => match ctx.session.status() {
            SessionStatus::Authenticated { user } => match output_format {
                OutputFormat::Json => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&json!({
                            "authenticated": true,
                            "user": user
                        }))?
                    );
                    Ok(())
                }
                OutputFormat::Text => {
                    println!("Logged in as {} ({})", user.username, user.email);
                    Ok(())
                }
            },
            SessionStatus::Unauthenticated => match output_format {
                OutputFormat::Json => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&json!({ "authenticated": false }))?
                    );
                    Ok(())
                }
                OutputFormat::Text => {
                    println!("Not logged in");
                    Ok(())
                }
            },
        },

        AuthCommands::Whoami => {
            ctx.require_auth()?;
            let Some(user) = ctx.session.user() else {
                anyhow::bail!("Not logged in");
            };
            output_success(
                &output_format,
                &format!("{} <{}>", user.username, user.email),
                Some(json!({ "user": user })),
            )
        }
    }
}

fn prompt_password() -> anyhow::Result<String> {
    eprint!("Password: ");
    std::io::stderr().flush()?;
    let mut password = String::new();
    std::io::stdin().read_line(&mut password)?;
    Ok(password.trim_end_matches(['\r', '\n']).to_string())
}
