use std::fs;
use std::path::PathBuf;

use crate::config::SessionConfig;
use crate::types::{Session, User};

/// File names inside the config directory. `authToken` (bare, plain text)
/// is a legacy mirror of `authToken.json` kept for older tooling that reads
/// the raw token.
const TOKEN_FILE: &str = "authToken.json";
const USER_FILE: &str = "userData.json";
const LEGACY_TOKEN_FILE: &str = "authToken";

/// Durable key-value store for the session, backed by JSON files in the
/// config directory. Only the session handle writes to it.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Resolve the store directory from configuration, creating it if
    /// needed. `SCOUT_CONFIG_DIR` (via config) wins over the default
    /// `~/.config/redditscout/cli`.
    pub fn from_config(config: &SessionConfig) -> anyhow::Result<Self> {
        let dir = if let Some(custom) = &config.config_dir {
            PathBuf::from(custom)
        } else {
            let home = std::env::var("HOME")
                .map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
            PathBuf::from(home).join(".config").join("redditscout").join("cli")
        };

        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        Ok(Self::new(dir))
    }

    /// Load the persisted session, if any.
    ///
    /// A token without a user record (or the reverse) is treated as no
    /// session at all: the caller must see `None` rather than a half-open
    /// session.
    pub fn load(&self) -> anyhow::Result<Option<Session>> {
        let token = self.load_token()?;
        let user = self.load_user()?;

        match (token, user) {
            (Some(token), Some(user)) => Ok(Some(Session { token, user })),
            (None, None) => Ok(None),
            _ => {
                tracing::warn!("session store holds a partial session, treating as logged out");
                Ok(None)
            }
        }
    }

    fn load_token(&self) -> anyhow::Result<Option<String>> {
        let json_file = self.dir.join(TOKEN_FILE);
        if json_file.exists() {
            let content = fs::read_to_string(json_file)?;
            let token: String = serde_json::from_str(&content)?;
            return Ok(Some(token));
        }

        // Fall back to the legacy bare-token file
        let legacy_file = self.dir.join(LEGACY_TOKEN_FILE);
        if legacy_file.exists() {
            let token = fs::read_to_string(legacy_file)?.trim().to_string();
            if !token.is_empty() {
                return Ok(Some(token));
            }
        }

        Ok(None)
    }

    fn load_user(&self) -> anyhow::Result<Option<User>> {
        let user_file = self.dir.join(USER_FILE);
        if !user_file.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(user_file)?;
        let user: User = serde_json::from_str(&content)?;
        Ok(Some(user))
    }

    /// Persist the session under both key names plus the legacy mirror.
    pub fn save(&self, session: &Session) -> anyhow::Result<()> {
        fs::write(
            self.dir.join(TOKEN_FILE),
            serde_json::to_string_pretty(&session.token)?,
        )?;
        fs::write(
            self.dir.join(USER_FILE),
            serde_json::to_string_pretty(&session.user)?,
        )?;
        fs::write(self.dir.join(LEGACY_TOKEN_FILE), &session.token)?;
        Ok(())
    }

    /// Remove every persisted session key. Logout must never fail, so IO
    /// problems are logged and swallowed.
    pub fn clear(&self) {
        for name in [TOKEN_FILE, USER_FILE, LEGACY_TOKEN_FILE] {
            let path = self.dir.join(name);
            if let Err(e) = fs::remove_file(&path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("failed to remove {}: {}", path.display(), e);
                }
            }
        }
    }
}
