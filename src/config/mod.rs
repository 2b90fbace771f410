use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub gateway: GatewayConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

/// Settings for the single webhook endpoint every action is multiplexed over.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub webhook_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
    pub retry_attempts: u32,
    pub retry_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Override for the session file directory (defaults to ~/.config/redditscout/cli).
    pub config_dir: Option<String>,
    /// Whether the demo/demo123 local bypass is honored. Off in production.
    pub allow_demo_login: bool,
}

impl GatewayConfig {
    /// Parse and validate the configured webhook endpoint.
    pub fn endpoint(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.webhook_url)
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("SCOUT_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Gateway overrides
        if let Ok(v) = env::var("SCOUT_WEBHOOK_URL") {
            self.gateway.webhook_url = v;
        }
        if let Ok(v) = env::var("SCOUT_API_KEY") {
            self.gateway.api_key = v;
        }
        if let Ok(v) = env::var("SCOUT_TIMEOUT_SECS") {
            self.gateway.timeout_secs = v.parse().unwrap_or(self.gateway.timeout_secs);
        }
        if let Ok(v) = env::var("SCOUT_RETRY_ATTEMPTS") {
            self.gateway.retry_attempts = v.parse().unwrap_or(self.gateway.retry_attempts);
        }
        if let Ok(v) = env::var("SCOUT_RETRY_DELAY_MS") {
            self.gateway.retry_delay_ms = v.parse().unwrap_or(self.gateway.retry_delay_ms);
        }

        // Session overrides
        if let Ok(v) = env::var("SCOUT_CONFIG_DIR") {
            self.session.config_dir = Some(v);
        }
        if let Ok(v) = env::var("SCOUT_ALLOW_DEMO_LOGIN") {
            self.session.allow_demo_login = v.parse().unwrap_or(self.session.allow_demo_login);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            gateway: GatewayConfig {
                webhook_url: "http://localhost:5678/webhook/redditscout".to_string(),
                api_key: String::new(),
                timeout_secs: 10,
                retry_attempts: 3,
                retry_delay_ms: 1000,
            },
            session: SessionConfig {
                config_dir: None,
                allow_demo_login: true,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            gateway: GatewayConfig {
                webhook_url: "https://staging.redditscout.example.com/webhook/redditscout".to_string(),
                api_key: String::new(),
                timeout_secs: 10,
                retry_attempts: 3,
                retry_delay_ms: 1000,
            },
            session: SessionConfig {
                config_dir: None,
                allow_demo_login: true,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            gateway: GatewayConfig {
                webhook_url: "https://redditscout.example.com/webhook/redditscout".to_string(),
                api_key: String::new(),
                timeout_secs: 10,
                retry_attempts: 3,
                retry_delay_ms: 1000,
            },
            session: SessionConfig {
                config_dir: None,
                allow_demo_login: false,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_allows_demo_login() {
        let config = AppConfig::development();
        assert!(config.session.allow_demo_login);
        assert_eq!(config.gateway.timeout_secs, 10);
        assert_eq!(config.gateway.retry_attempts, 3);
    }

    #[test]
    fn production_disables_demo_login() {
        let config = AppConfig::production();
        assert!(!config.session.allow_demo_login);
    }

    #[test]
    fn endpoint_parses_as_url() {
        let config = AppConfig::development();
        let url = config.gateway.endpoint().expect("default endpoint should parse");
        assert_eq!(url.scheme(), "http");
    }
}
