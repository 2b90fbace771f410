use std::sync::Arc;

use futures::future::join_all;

use crate::error::GatewayError;
use crate::gateway::{Action, GatewayClient};
use crate::types::{BulkOutcome, Comment, CommentFilters};

/// Typed façade over the comment-moderation actions.
pub struct CommentService {
    gateway: Arc<GatewayClient>,
}

impl CommentService {
    pub fn new(gateway: Arc<GatewayClient>) -> Self {
        Self { gateway }
    }

    pub async fn pending(&self) -> Result<Vec<Comment>, GatewayError> {
        let comments: Option<Vec<Comment>> =
            self.gateway.dispatch_data(&Action::GetPendingComments).await?;
        Ok(comments.unwrap_or_default())
    }

    /// Approve a drafted comment, optionally overriding its text.
    pub async fn approve(&self, id: i64, edited_comment: Option<String>) -> Result<(), GatewayError> {
        self.gateway
            .dispatch(&Action::ApproveComment { id, edited_comment })
            .await?;
        Ok(())
    }

    pub async fn reject(&self, id: i64, reason: Option<String>) -> Result<(), GatewayError> {
        self.gateway
            .dispatch(&Action::RejectComment { id, reason: reason.unwrap_or_default() })
            .await?;
        Ok(())
    }

    /// Approve a batch concurrently: one independent dispatch per id,
    /// resolving only after all of them settle.
    ///
    /// The outcome is aggregate-only. Ids that succeeded before a sibling
    /// failed have already been applied server-side and are not rolled
    /// back.
    pub async fn approve_all(&self, ids: &[i64]) -> BulkOutcome {
        let results = join_all(ids.iter().map(|&id| self.approve(id, None))).await;
        Self::fold_outcome("approve", ids, results)
    }

    /// Reject a batch concurrently; same settlement semantics as
    /// `approve_all`.
    pub async fn reject_all(&self, ids: &[i64]) -> BulkOutcome {
        let results = join_all(ids.iter().map(|&id| self.reject(id, None))).await;
        Self::fold_outcome("reject", ids, results)
    }

    fn fold_outcome(verb: &str, ids: &[i64], results: Vec<Result<(), GatewayError>>) -> BulkOutcome {
        let mut outcome = BulkOutcome { requested: ids.len(), ..BulkOutcome::default() };
        for (&id, result) in ids.iter().zip(results) {
            match result {
                Ok(()) => outcome.succeeded += 1,
                Err(e) => {
                    tracing::warn!(id, "bulk {} failed: {}", verb, e);
                    outcome.failed += 1;
                    if outcome.first_error.is_none() {
                        outcome.first_error = Some(e.to_string());
                    }
                }
            }
        }
        outcome
    }

    /// Apply the dashboard filters to the in-memory pending list.
    pub fn filter<'a>(comments: &'a [Comment], filters: &CommentFilters) -> Vec<&'a Comment> {
        comments.iter().filter(|c| filters.matches(c)).collect()
    }
}
