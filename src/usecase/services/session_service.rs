use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use crate::usecase::ports::identity::{AuthError, IdentityProvider, Session};
use crate::usecase::ports::session_store::SessionStore;

/// How long a persisted sign-in is honoured.
pub fn session_lifetime() -> Duration {
    Duration::days(1)
}

/// Explicit session lifecycle: restore at startup, sign in, sign out.
pub struct SessionService {
    provider: Arc<dyn IdentityProvider>,
    store: Arc<dyn SessionStore>,
}

impl SessionService {
    pub fn new(provider: Arc<dyn IdentityProvider>, store: Arc<dyn SessionStore>) -> Self {
        Self { provider, store }
    }

    /// A stored session still inside its lifetime, if any. Expired or
    /// unreadable sessions are removed and count as signed out.
    pub fn restore(&self, now: DateTime<Utc>) -> Option<Session> {
        match self.store.load() {
            Ok(Some(session)) if session.is_valid_at(now) => {
                info!("restored stored session");
                Some(session)
            }
            Ok(Some(_)) => {
                info!("stored session expired");
                self.clear_quietly();
                None
            }
            Ok(None) => None,
            Err(err) => {
                warn!(error = %err, "stored session unreadable");
                self.clear_quietly();
                None
            }
        }
    }

    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<Session, AuthError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let credential = self.provider.sign_in(email, password).await.map_err(|err| {
            warn!(error = %err, "sign-in rejected");
            err
        })?;
        let session = Session {
            email: credential.email,
            id_token: credential.id_token,
            expires_at: now + session_lifetime(),
        };

        if let Err(err) = self.store.save(&session) {
            warn!(error = %err, "failed to persist session");
        }
        info!("signed in");
        Ok(session)
    }

    pub fn sign_out(&self) -> Result<()> {
        self.store.clear()?;
        info!("signed out");
        Ok(())
    }

    fn clear_quietly(&self) {
        if let Err(err) = self.store.clear() {
            warn!(error = %err, "failed to clear stored session");
        }
    }
}
