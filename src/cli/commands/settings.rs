use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::output_success;
use crate::cli::{AppContext, OutputFormat};
use crate::services::SettingsService;

#[derive(Subcommand)]
pub enum SettingsCommands {
    #[command(about = "Show current automation settings")]
    Show,

    #[command(about = "Update automation settings (unset flags keep their current value)")]
    Update {
        #[arg(long = "subreddit", help = "Subreddit to scan (repeatable, replaces the list)")]
        subreddits: Vec<String>,
        #[arg(long, help = "Minimum opportunity score for drafting comments")]
        min_score: Option<u32>,
        #[arg(long, help = "Score at which comments are approved automatically")]
        auto_approve_threshold: Option<u32>,
        #[arg(long, help = "Maximum comments posted per day")]
        daily_limit: Option<u32>,
        #[arg(long, help = "Enable or disable notifications")]
        notifications: Option<bool>,
    },
}

pub async fn handle(cmd: SettingsCommands, ctx: &AppContext, output_format: OutputFormat) -> anyhow::Result<()> {
    ctx.require_auth()?;
    let service = SettingsService::new(ctx.gateway.clone());

    match cmd {
        SettingsCommands::Show => {
            let settings = service.fetch().await?;
            match output_format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&settings)?);
                }
                OutputFormat::Text => {
                    println!("Subreddits: {}", settings.scan_subreddits.join(", "));
                    println!("Minimum opportunity score: {}", settings.min_opportunity_score);
                    match settings.auto_approve_threshold {
                        Some(threshold) => println!("Auto-approve threshold: {}", threshold),
                        None => println!("Auto-approve: disabled"),
                    }
                    println!("Daily comment limit: {}", settings.daily_comment_limit);
                    println!(
                        "Notifications: {}",
                        if settings.notifications_enabled { "on" } else { "off" }
                    );
                }
            }
            Ok(())
        }

        SettingsCommands::Update { subreddits, min_score, auto_approve_threshold, daily_limit, notifications } => {
            // Fetch-merge-update; the backend owns the record
            let mut settings = service.fetch().await?;

            if !subreddits.is_empty() {
                settings.scan_subreddits = subreddits;
            }
            if let Some(min_score) = min_score {
                settings.min_opportunity_score = min_score;
            }
            if let Some(threshold) = auto_approve_threshold {
                settings.auto_approve_threshold = Some(threshold);
            }
            if let Some(daily_limit) = daily_limit {
                settings.daily_comment_limit = daily_limit;
            }
            if let Some(notifications) = notifications {
                settings.notifications_enabled = notifications;
            }

            service.update(settings.clone()).await?;
            output_success(
                &output_format,
                "Settings updated successfully",
                Some(json!({ "settings": settings })),
            )
        }
    }
}
