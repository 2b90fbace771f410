use std::sync::Arc;

use tokio::sync::watch;

use crate::config::SessionConfig;
use crate::error::GatewayError;
use crate::gateway::{Action, GatewayClient, GENERIC_ERROR_MESSAGE};
use crate::session::store::SessionStore;
use crate::types::{Session, User};

pub const DEMO_USERNAME: &str = "demo";
pub const DEMO_PASSWORD: &str = "demo123";

const LOGIN_HELP: &str =
    "Invalid credentials. For demo, use username: \"demo\" and password: \"demo123\"";

/// Authentication state as seen by command guards and subscribers.
///
/// There is no unknown state once a handle exists: `SessionHandle::new`
/// consults the durable store synchronously before handing the handle out.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionStatus {
    Authenticated { user: User },
    Unauthenticated,
}

struct SessionInner {
    store: SessionStore,
    // watch holds the current session and doubles as the subscription
    // channel; every write goes through this struct (single writer).
    tx: watch::Sender<Option<Session>>,
}

/// Shared session-state holder, passed explicitly to consumers instead of
/// living in a module global. Cloning is cheap; all clones observe the same
/// state.
#[derive(Clone)]
pub struct SessionHandle(Arc<SessionInner>);

impl SessionHandle {
    /// Consult the durable store once and start in the resulting state.
    pub fn new(store: SessionStore) -> Self {
        let session = store.load().unwrap_or_else(|e| {
            tracing::warn!("failed to read session store, starting logged out: {}", e);
            None
        });
        let (tx, _rx) = watch::channel(session);
        Self(Arc::new(SessionInner { store, tx }))
    }

    /// Synchronous state read for command guards.
    pub fn status(&self) -> SessionStatus {
        match self.0.tx.borrow().as_ref() {
            Some(session) => SessionStatus::Authenticated { user: session.user.clone() },
            None => SessionStatus::Unauthenticated,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.0.tx.borrow().is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.0.tx.borrow().as_ref().map(|s| s.token.clone())
    }

    pub fn user(&self) -> Option<User> {
        self.0.tx.borrow().as_ref().map(|s| s.user.clone())
    }

    /// Subscribe to session transitions (login, logout, forced expiry).
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.0.tx.subscribe()
    }

    /// Persist a freshly authenticated session and broadcast the transition.
    pub fn establish(&self, session: Session) -> anyhow::Result<()> {
        self.0.store.save(&session)?;
        self.0.tx.send_replace(Some(session));
        Ok(())
    }

    /// Drop the session unconditionally: clear every persisted key and
    /// broadcast `Unauthenticated`. Never fails.
    pub fn clear(&self) {
        self.0.store.clear();
        self.0.tx.send_replace(None);
    }

    /// Centralized reaction to a 401: same as `clear`, logged so a forced
    /// logout is visible in traces.
    pub fn expire(&self) {
        tracing::warn!("session expired, clearing stored credentials");
        self.clear();
    }
}

/// Owns the authenticate/deauthenticate transitions.
pub struct SessionController {
    session: SessionHandle,
    gateway: Arc<GatewayClient>,
    allow_demo_login: bool,
}

impl SessionController {
    pub fn new(session: SessionHandle, gateway: Arc<GatewayClient>, config: &SessionConfig) -> Self {
        Self { session, gateway, allow_demo_login: config.allow_demo_login }
    }

    /// Authenticate, preferring the local demo bypass when enabled, then
    /// falling back to the remote `login` action.
    pub async fn login(&self, username: &str, password: &str) -> anyhow::Result<Session> {
        if self.allow_demo_login && username == DEMO_USERNAME && password == DEMO_PASSWORD {
            let session = Self::demo_session();
            self.session.establish(session.clone())?;
            tracing::info!("authenticated via demo bypass");
            return Ok(session);
        }

        let action = Action::Login {
            username: username.to_string(),
            password: password.to_string(),
        };

        match self.gateway.dispatch_data::<Session>(&action).await {
            Ok(session) => {
                self.session.establish(session.clone())?;
                tracing::info!(user = %session.user.username, "authenticated");
                Ok(session)
            }
            // The gateway already cleared any stale session on 401; surface
            // the credential guidance instead of "session expired".
            Err(GatewayError::AuthExpired) => Err(anyhow::anyhow!(LOGIN_HELP)),
            Err(GatewayError::Client { message, .. }) => {
                if message == GENERIC_ERROR_MESSAGE {
                    Err(anyhow::anyhow!(LOGIN_HELP))
                } else {
                    Err(anyhow::anyhow!(message))
                }
            }
            Err(other) => Err(other.into()),
        }
    }

    /// Clears all persisted session keys. Never fails.
    pub fn logout(&self) {
        self.session.clear();
    }

    fn demo_session() -> Session {
        // Unique per call so repeated demo logins are distinguishable
        let token = format!("demo-jwt-token-{}", chrono::Utc::now().timestamp_millis());
        Session {
            token,
            user: User {
                id: 1,
                username: DEMO_USERNAME.to_string(),
                email: "demo@example.com".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_handle(tag: &str) -> SessionHandle {
        let dir = std::env::temp_dir()
            .join("redditscout-session-tests")
            .join(format!("{}-{}", tag, chrono::Utc::now().timestamp_nanos_opt().unwrap()));
        fs::create_dir_all(&dir).unwrap();
        SessionHandle::new(SessionStore::new(dir))
    }

    fn session(token: &str) -> Session {
        Session {
            token: token.into(),
            user: User { id: 1, username: "demo".into(), email: "demo@example.com".into() },
        }
    }

    #[test]
    fn starts_unauthenticated_with_empty_store() {
        let handle = temp_handle("fresh");
        assert_eq!(handle.status(), SessionStatus::Unauthenticated);
        assert!(handle.token().is_none());
    }

    #[test]
    fn establish_then_clear_transitions_state() {
        let handle = temp_handle("transitions");
        handle.establish(session("tok-1")).unwrap();
        assert!(handle.is_authenticated());
        assert_eq!(handle.token().as_deref(), Some("tok-1"));

        handle.clear();
        assert_eq!(handle.status(), SessionStatus::Unauthenticated);
    }

    #[test]
    fn subscribers_observe_transitions() {
        let handle = temp_handle("subscribe");
        let mut rx = handle.subscribe();
        assert!(rx.borrow_and_update().is_none());

        handle.establish(session("tok-2")).unwrap();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_some());

        handle.expire();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_none());
    }

    #[test]
    fn demo_sessions_are_unique_per_call() {
        let a = SessionController::demo_session();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = SessionController::demo_session();
        assert_ne!(a.token, b.token);
        assert_eq!(a.user, b.user);
        assert_eq!(a.user.id, 1);
        assert_eq!(a.user.email, "demo@example.com");
    }
}
