use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What the identity provider hands back after a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub email: String,
    pub id_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    pub id_token: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.id_token.is_empty() && now < self.expires_at
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("email and password are required")]
    MissingFields,
    #[error("invalid email or password")]
    InvalidCredential,
    #[error("too many failed attempts")]
    TooManyRequests,
    #[error("identity provider error: {0}")]
    Provider(String),
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl AuthError {
    /// Message shown on the login form.
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::MissingFields => "Por favor, preencha todos os campos.",
            AuthError::InvalidCredential => {
                "Email ou senha incorretos. Verifique suas credenciais."
            }
            AuthError::TooManyRequests => "Muitas tentativas falhas. Tente novamente mais tarde.",
            AuthError::Provider(_) | AuthError::Transport(_) => {
                "Erro ao fazer login. Tente novamente."
            }
        }
    }
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Credential, AuthError>;
}
