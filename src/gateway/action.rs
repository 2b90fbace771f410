use serde::Serialize;

use crate::types::{AnalyticsKind, ProductDraft, Settings};

/// Every operation the backend understands, as a closed set of variants.
///
/// The webhook multiplexes all behavior over one endpoint and selects it by
/// an `action` discriminator in the body. Serialization is the single
/// boundary between the typed surface and the wire envelope
/// `{ "action": "<name>", ...payload }`; adding a variant here is the only
/// way to reach a new backend action.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "action", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Action {
    Login {
        username: String,
        password: String,
    },
    GetProducts,
    CreateProduct {
        #[serde(flatten)]
        draft: ProductDraft,
    },
    UpdateProduct {
        id: i64,
        #[serde(flatten)]
        draft: ProductDraft,
    },
    DeleteProduct {
        id: i64,
    },
    GetPendingComments,
    ApproveComment {
        id: i64,
        /// Operator override of the drafted text; sent as `null` when the
        /// draft is approved verbatim.
        edited_comment: Option<String>,
    },
    RejectComment {
        id: i64,
        reason: String,
    },
    GetAnalytics {
        #[serde(rename = "type")]
        kind: AnalyticsKind,
        date_range: String,
    },
    GetSettings,
    UpdateSettings {
        #[serde(flatten)]
        settings: Settings,
    },
}

impl Action {
    /// Wire name of the action, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Login { .. } => "login",
            Action::GetProducts => "getProducts",
            Action::CreateProduct { .. } => "createProduct",
            Action::UpdateProduct { .. } => "updateProduct",
            Action::DeleteProduct { .. } => "deleteProduct",
            Action::GetPendingComments => "getPendingComments",
            Action::ApproveComment { .. } => "approveComment",
            Action::RejectComment { .. } => "rejectComment",
            Action::GetAnalytics { .. } => "getAnalytics",
            Action::GetSettings => "getSettings",
            Action::UpdateSettings { .. } => "updateSettings",
        }
    }
}
