/// Shared domain types used across the codebase
///
/// Products and comments are owned by the backend; these models mirror the
/// wire shape (camelCase fields) and are lenient about missing fields so a
/// newer backend cannot break list rendering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Authenticated user profile as returned by the `login` action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// Token plus user profile, held for the process lifetime and persisted
/// across runs by the session store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub domain: String,
    pub description: String,
    pub detail: String,
    pub target_keywords: Vec<String>,
    pub price: f64,
    pub created_at: Option<DateTime<Utc>>,
}

/// Form payload for `createProduct` / `updateProduct`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductDraft {
    pub name: String,
    pub domain: String,
    pub description: String,
    pub detail: String,
    pub target_keywords: Vec<String>,
    pub price: Option<f64>,
}

impl ProductDraft {
    /// Trim the text fields and apply the form rules. Returns the cleaned
    /// draft ready to submit, or a field-level error map.
    pub fn validated(mut self) -> Result<ProductDraft, ValidationError> {
        self.name = self.name.trim().to_string();
        self.domain = self.domain.trim().to_string();
        self.description = self.description.trim().to_string();
        self.detail = self.detail.trim().to_string();

        let mut err = ValidationError::new("Please fix the form errors");

        if self.name.is_empty() {
            err = err.with_field("name", "Product name is required");
        }
        if self.domain.is_empty() {
            err = err.with_field("domain", "Domain is required");
        }
        if self.description.len() > 500 {
            err = err.with_field("description", "Description must be less than 500 characters");
        }
        if self.detail.len() > 1000 {
            err = err.with_field("detail", "Detail must be less than 1000 characters");
        }
        match self.price {
            None => err = err.with_field("price", "Price is required"),
            Some(p) if p < 0.0 => err = err.with_field("price", "Price must be a positive number"),
            Some(p) if p > 1_000_000.0 => err = err.with_field("price", "Price cannot exceed $1,000,000"),
            Some(_) => {}
        }

        if err.is_empty() { Ok(self) } else { Err(err) }
    }
}

/// AI-drafted Reddit comment awaiting moderation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Comment {
    pub id: i64,
    pub post_title: String,
    pub post_content: String,
    pub post_url: String,
    pub subreddit: String,
    pub generated_comment: String,
    pub opportunity_score: u32,
    pub product_name: String,
    pub ai_analysis: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Client-side filters applied to the in-memory pending list.
#[derive(Debug, Clone, Default)]
pub struct CommentFilters {
    pub product: Option<String>,
    pub subreddit: Option<String>,
    pub min_score: u32,
}

impl CommentFilters {
    pub fn matches(&self, comment: &Comment) -> bool {
        if let Some(product) = &self.product {
            if !comment.product_name.to_lowercase().contains(&product.to_lowercase()) {
                return false;
            }
        }
        if let Some(subreddit) = &self.subreddit {
            if !comment.subreddit.to_lowercase().contains(&subreddit.to_lowercase()) {
                return false;
            }
        }
        comment.opportunity_score >= self.min_score
    }
}

/// Metric families served by the `getAnalytics` action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AnalyticsKind {
    Engagement,
    Traffic,
    Conversions,
    Performance,
}

impl AnalyticsKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalyticsKind::Engagement => "engagement",
            AnalyticsKind::Traffic => "traffic",
            AnalyticsKind::Conversions => "conversions",
            AnalyticsKind::Performance => "performance",
        }
    }
}

/// Reddit automation preferences, forwarded verbatim to `updateSettings`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub scan_subreddits: Vec<String>,
    pub min_opportunity_score: u32,
    pub auto_approve_threshold: Option<u32>,
    pub daily_comment_limit: u32,
    pub notifications_enabled: bool,
}

/// Aggregate result of a bulk approve/reject fan-out.
///
/// Items that succeeded before a sibling failed have already been applied
/// server-side; there is no compensating rollback.
#[derive(Debug, Clone, Default)]
pub struct BulkOutcome {
    pub requested: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub first_error: Option<String>,
}

impl BulkOutcome {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ProductDraft {
        ProductDraft {
            name: "TaskMaster Pro".into(),
            domain: "taskmaster.com".into(),
            description: "Project management for small teams".into(),
            detail: String::new(),
            target_keywords: vec!["project management".into()],
            price: Some(29.99),
        }
    }

    #[test]
    fn valid_draft_passes_and_is_trimmed() {
        let mut d = draft();
        d.name = "  TaskMaster Pro  ".into();
        let cleaned = d.validated().expect("draft should validate");
        assert_eq!(cleaned.name, "TaskMaster Pro");
    }

    #[test]
    fn missing_name_domain_and_price_are_reported_together() {
        let d = ProductDraft::default();
        let err = d.validated().unwrap_err();
        assert!(err.field_errors.contains_key("name"));
        assert!(err.field_errors.contains_key("domain"));
        assert!(err.field_errors.contains_key("price"));
    }

    #[test]
    fn price_bounds_are_enforced() {
        let mut d = draft();
        d.price = Some(-1.0);
        assert!(d.clone().validated().is_err());
        d.price = Some(1_000_001.0);
        assert!(d.clone().validated().is_err());
        d.price = Some(1_000_000.0);
        assert!(d.validated().is_ok());
    }

    #[test]
    fn overlong_description_is_rejected() {
        let mut d = draft();
        d.description = "x".repeat(501);
        let err = d.validated().unwrap_err();
        assert!(err.field_errors.contains_key("description"));
    }

    #[test]
    fn filters_match_on_product_subreddit_and_score() {
        let comment = Comment {
            product_name: "TaskMaster Pro".into(),
            subreddit: "startups".into(),
            opportunity_score: 87,
            ..Comment::default()
        };

        let mut filters = CommentFilters::default();
        assert!(filters.matches(&comment));

        filters.product = Some("taskmaster".into());
        filters.subreddit = Some("start".into());
        filters.min_score = 80;
        assert!(filters.matches(&comment));

        filters.min_score = 90;
        assert!(!filters.matches(&comment));

        filters.min_score = 0;
        filters.product = Some("codereview".into());
        assert!(!filters.matches(&comment));
    }

    #[test]
    fn comment_deserializes_from_wire_shape() {
        let comment: Comment = serde_json::from_value(serde_json::json!({
            "id": 2,
            "postTitle": "Code reviews are taking forever in our team",
            "subreddit": "programming",
            "generatedComment": "We had the same issue...",
            "opportunityScore": 92,
            "productName": "CodeReview AI"
        }))
        .unwrap();
        assert_eq!(comment.id, 2);
        assert_eq!(comment.opportunity_score, 92);
        // Fields the backend omitted default to empty
        assert!(comment.ai_analysis.is_empty());
    }
}
