pub mod commands;
pub mod utils;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config::{self, AppConfig};
use crate::gateway::GatewayClient;
use crate::session::{SessionHandle, SessionStore};

#[derive(Parser)]
#[command(name = "scout")]
#[command(about = "RedditScout CLI - operator console for the Reddit outreach workflow")]
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
    #[command(about = "Authentication and session management")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Product catalog management")]
    Products {
        #[command(subcommand)]
        cmd: commands::products::ProductCommands,
    },

    #[command(about = "Review AI-drafted Reddit comments")]
    Comments {
        #[command(subcommand)]
        cmd: commands::comments::CommentCommands,
    },

    #[command(about = "Fetch analytics metrics")]
    Analytics {
        #[command(subcommand)]
        cmd: commands::analytics::AnalyticsCommands,
    },

    #[command(about = "Automation settings")]
    Settings {
        #[command(subcommand)]
        cmd: commands::settings::SettingsCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
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

/// Everything a command handler needs, wired once per invocation. The
/// session handle is passed explicitly rather than living in a global.
pub struct AppContext {
    pub config: &'static AppConfig,
    pub session: SessionHandle,
    pub gateway: Arc<GatewayClient>,
}

impl AppContext {
    pub fn from_env() -> anyhow::Result<Self> {
        let config = config::config();
        let store = SessionStore::from_config(&config.session)?;
        let session = SessionHandle::new(store);
        let gateway = Arc::new(GatewayClient::new(&config.gateway, session.clone())?);
        Ok(Self { config, session, gateway })
    }

    /// Guard for commands that require an authenticated session; checked
    /// synchronously before any network work.
    pub fn require_auth(&self) -> anyhow::Result<()> {
        if !self.session.is_authenticated() {
            anyhow::bail!(
                "Not logged in. Run `scout auth login <username>` first (demo/demo123 in development)."
            );
        }
        Ok(())
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let ctx = AppContext::from_env()?;

    match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, &ctx, output_format).await,
        Commands::Products { cmd } => commands::products::handle(cmd, &ctx, output_format).await,
        Commands::Comments { cmd } => commands::comments::handle(cmd, &ctx, output_format).await,
        Commands::Analytics { cmd } => commands::analytics::handle(cmd, &ctx, output_format).await,
        Commands::Settings { cmd } => commands::settings::handle(cmd, &ctx, output_format).await,
    }
}
