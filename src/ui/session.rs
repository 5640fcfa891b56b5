use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use dioxus::prelude::*;

use crate::usecase::ports::identity::{AuthError, Session};
use crate::usecase::services::session_service::SessionService;

/// The signed-in session, handed to each component that needs it as a prop.
#[derive(Clone)]
pub struct SessionContext {
    session: Signal<Option<Session>>,
    service: Arc<SessionService>,
}

impl PartialEq for SessionContext {
    fn eq(&self, other: &Self) -> bool {
        self.session == other.session && Arc::ptr_eq(&self.service, &other.service)
    }
}

impl SessionContext {
    pub fn new(session: Signal<Option<Session>>, service: Arc<SessionService>) -> Self {
        Self { session, service }
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.read().is_some()
    }

    pub fn email(&self) -> Option<String> {
        self.session.read().as_ref().map(|session| session.email.clone())
    }

    pub async fn sign_in(&self, email: String, password: String) -> Result<(), AuthError> {
        let session = self.service.sign_in(&email, &password, Utc::now()).await?;
        let mut signal = self.session;
        signal.set(Some(session));
        Ok(())
    }

    /// Keeps the session when the stored copy cannot be removed, so the
    /// caller can report the failure while still signed in.
    pub fn sign_out(&self) -> Result<()> {
        self.service.sign_out()?;
        let mut signal = self.session;
        signal.set(None);
        Ok(())
    }
}
