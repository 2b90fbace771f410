use std::sync::Arc;

use crate::error::GatewayError;
use crate::gateway::{Action, GatewayClient};
use crate::types::Settings;

/// Typed façade over `getSettings` / `updateSettings`. Settings live
/// entirely on the backend; this only round-trips them.
pub struct SettingsService {
    gateway: Arc<GatewayClient>,
}

impl SettingsService {
    pub fn new(gateway: Arc<GatewayClient>) -> Self {
        Self { gateway }
    }

    pub async fn fetch(&self) -> Result<Settings, GatewayError> {
        let settings: Option<Settings> = self.gateway.dispatch_data(&Action::GetSettings).await?;
        Ok(settings.unwrap_or_default())
    }

    pub async fn update(&self, settings: Settings) -> Result<(), GatewayError> {
        self.gateway.dispatch(&Action::UpdateSettings { settings }).await?;
        Ok(())
    }
}
