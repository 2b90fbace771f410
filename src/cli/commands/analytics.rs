use clap::Subcommand;
use serde_json::Value;

use crate::cli::{AppContext, OutputFormat};
use crate::services::AnalyticsService;
use crate::types::AnalyticsKind;

#[derive(Subcommand)]
pub enum AnalyticsCommands {
    #[command(about = "Comment engagement metrics")]
    Engagement {
        #[arg(long, default_value = "7d", help = "Date range, e.g. 7d, 30d, 90d")]
        range: String,
    },

    #[command(about = "Referral traffic metrics")]
    Traffic {
        #[arg(long, default_value = "7d", help = "Date range, e.g. 7d, 30d, 90d")]
        range: String,
    },

    #[command(about = "Conversion metrics")]
    Conversions {
        #[arg(long, default_value = "7d", help = "Date range, e.g. 7d, 30d, 90d")]
        range: String,
    },

    #[command(about = "Per-product performance metrics")]
    Performance {
        #[arg(long, default_value = "7d", help = "Date range, e.g. 7d, 30d, 90d")]
        range: String,
    },
}

pub async fn handle(cmd: AnalyticsCommands, ctx: &AppContext, output_format: OutputFormat) -> anyhow::Result<()> {
    ctx.require_auth()?;
    let service = AnalyticsService::new(ctx.gateway.clone());

    let (kind, range) = match cmd {
        AnalyticsCommands::Engagement { range } => (AnalyticsKind::Engagement, range),
        AnalyticsCommands::Traffic { range } => (AnalyticsKind::Traffic, range),
        AnalyticsCommands::Conversions { range } => (AnalyticsKind::Conversions, range),
        AnalyticsCommands::Performance { range } => (AnalyticsKind::Performance, range),
    };

    let metrics = service.fetch(kind, &range).await?;
    render(kind, &range, &metrics, &output_format)
}

fn render(kind: AnalyticsKind, range: &str, metrics: &Value, output_format: &OutputFormat) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(metrics)?);
        }
        OutputFormat::Text => {
            println!("{} ({})", kind.as_str(), range);
            // Metric payloads are backend-defined; print flat fields,
            // dump anything nested as JSON
            match metrics {
                Value::Object(map) => {
                    for (key, value) in map {
                        match value {
                            Value::Object(_) | Value::Array(_) => {
                                println!("  {}: {}", key, serde_json::to_string(value)?)
                            }
                            other => println!("  {}: {}", key, other),
                        }
                    }
                }
                Value::Null => println!("  (no data)"),
                other => println!("  {}", other),
            }
        }
    }
    Ok(())
}
