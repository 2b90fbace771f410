use clap::Subcommand;

use crate::cli::utils::{output_collection, output_empty_collection, output_success};
use crate::cli::{AppContext, OutputFormat};
use crate::services::CommentService;
use crate::types::{BulkOutcome, Comment, CommentFilters};

#[derive(Subcommand)]
pub enum CommentCommands {
    #[command(about = "List pending comments awaiting approval")]
    List {
        #[arg(long, help = "Filter by product name")]
        product: Option<String>,
        #[arg(long, help = "Filter by subreddit")]
        subreddit: Option<String>,
        #[arg(long, default_value_t = 0, help = "Minimum opportunity score (0-100)")]
        min_score: u32,
    },

    #[command(about = "Approve a comment, optionally overriding its text")]
    Approve {
        #[arg(help = "Comment id")]
        id: i64,
        #[arg(long, help = "Replacement text to post instead of the draft")]
        edit: Option<String>,
    },

    #[command(about = "Reject a comment")]
    Reject {
        #[arg(help = "Comment id")]
        id: i64,
        #[arg(long, help = "Rejection reason")]
        reason: Option<String>,
    },

    #[command(about = "Approve several comments at once")]
    ApproveAll {
        #[arg(required = true, help = "Comment ids")]
        ids: Vec<i64>,
    },

    #[command(about = "Reject several comments at once")]
    RejectAll {
        #[arg(required = true, help = "Comment ids")]
        ids: Vec<i64>,
    },
}

pub async fn handle(cmd: CommentCommands, ctx: &AppContext, output_format: OutputFormat) -> anyhow::Result<()> {
    ctx.require_auth()?;
    let service = CommentService::new(ctx.gateway.clone());

    match cmd {
        CommentCommands::List { product, subreddit, min_score } => {
            let comments = service.pending().await?;
            let filters = CommentFilters { product, subreddit, min_score };
            let visible: Vec<&Comment> = CommentService::filter(&comments, &filters);

            if visible.is_empty() {
                return output_empty_collection(&output_format, "comments", "No pending comments");
            }

            output_collection(&output_format, "comments", &visible, |c| {
                format!(
                    "#{} [{:>3}] r/{} {} - {}",
                    c.id, c.opportunity_score, c.subreddit, c.product_name, c.post_title
                )
            })
        }

        CommentCommands::Approve { id, edit } => {
            service.approve(id, edit).await?;
            output_success(&output_format, "Comment approved successfully", None)
        }

        CommentCommands::Reject { id, reason } => {
            service.reject(id, reason).await?;
            output_success(&output_format, "Comment rejected", None)
        }

        CommentCommands::ApproveAll { ids } => {
            let outcome = service.approve_all(&ids).await;
            report_bulk(outcome, "approved", &output_format)
        }

        CommentCommands::RejectAll { ids } => {
            let outcome = service.reject_all(&ids).await;
            report_bulk(outcome, "rejected", &output_format)
        }
    }
}

/// Aggregate-only reporting: one success line, or one failure that names
/// how many calls went through before it. Applied items stay applied.
fn report_bulk(outcome: BulkOutcome, verb: &str, output_format: &OutputFormat) -> anyhow::Result<()> {
    if outcome.is_success() {
        return output_success(
            output_format,
            &format!("{} comments {}", outcome.succeeded, verb),
            None,
        );
    }

    let detail = outcome
        .first_error
        .unwrap_or_else(|| "unknown error".to_string());
    anyhow::bail!(
        "{} of {} comments {} ({} failed): {}",
        outcome.succeeded,
        outcome.requested,
        verb,
        outcome.failed,
        detail
    )
}
