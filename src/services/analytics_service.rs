use std::sync::Arc;

use serde_json::Value;

use crate::error::GatewayError;
use crate::gateway::{Action, GatewayClient};
use crate::types::AnalyticsKind;

/// Typed façade over `getAnalytics`. Metric payloads are computed entirely
/// by the backend and passed through untyped.
pub struct AnalyticsService {
    gateway: Arc<GatewayClient>,
}

impl AnalyticsService {
    pub fn new(gateway: Arc<GatewayClient>) -> Self {
        Self { gateway }
    }

    pub async fn fetch(&self, kind: AnalyticsKind, date_range: &str) -> Result<Value, GatewayError> {
        let data: Option<Value> = self
            .gateway
            .dispatch_data(&Action::GetAnalytics { kind, date_range: date_range.to_string() })
            .await?;
        Ok(data.unwrap_or(Value::Null))
    }
}
