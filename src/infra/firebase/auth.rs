use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::usecase::ports::identity::{AuthError, Credential, IdentityProvider};

pub const IDENTITY_TOOLKIT_BASE: &str = "https://identitytoolkit.googleapis.com/v1";

/// Email/password sign-in against Firebase Authentication's REST API.
pub struct FirebaseAuth {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    id_token: String,
    email: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl FirebaseAuth {
    pub fn new(http: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            base_url: IDENTITY_TOOLKIT_BASE.to_string(),
        }
    }

    pub fn sign_in_url(&self) -> String {
        format!("{}/accounts:signInWithPassword", self.base_url)
    }
}

/// Maps Identity Toolkit error messages ("TOO_MANY_ATTEMPTS_TRY_LATER : ...")
/// onto the errors the login form distinguishes.
pub fn classify_provider_error(message: &str) -> AuthError {
    let code = message
        .split(|c: char| c == ' ' || c == ':')
        .next()
        .unwrap_or_default();
    match code {
        "INVALID_LOGIN_CREDENTIALS" | "INVALID_PASSWORD" | "EMAIL_NOT_FOUND" | "INVALID_EMAIL" => {
            AuthError::InvalidCredential
        }
        "TOO_MANY_ATTEMPTS_TRY_LATER" => AuthError::TooManyRequests,
        _ => AuthError::Provider(message.to_string()),
    }
}

#[async_trait]
impl IdentityProvider for FirebaseAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Credential, AuthError> {
        let response = self
            .http
            .post(self.sign_in_url())
            .query(&[("key", self.api_key.as_str())])
            .json(&SignInRequest {
                email,
                password,
                return_secure_token: true,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "sign-in refused by provider");
            return Err(match serde_json::from_str::<ErrorEnvelope>(&body) {
                Ok(envelope) => classify_provider_error(&envelope.error.message),
                Err(_) => AuthError::Provider(format!("{status}: {body}")),
            });
        }

        let payload: SignInResponse = response
            .json()
            .await
            .map_err(|err| AuthError::Provider(format!("unexpected sign-in response: {err}")))?;
        Ok(Credential {
            email: payload.email,
            id_token: payload.id_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_codes_map_to_login_errors() {
        assert!(matches!(
            classify_provider_error("INVALID_LOGIN_CREDENTIALS"),
            AuthError::InvalidCredential
        ));
        assert!(matches!(
            classify_provider_error("EMAIL_NOT_FOUND"),
            AuthError::InvalidCredential
        ));
        assert!(matches!(
            classify_provider_error(
                "TOO_MANY_ATTEMPTS_TRY_LATER : Access to this account has been temporarily disabled"
            ),
            AuthError::TooManyRequests
        ));
        assert!(matches!(
            classify_provider_error("USER_DISABLED"),
            AuthError::Provider(_)
        ));
    }

    #[test]
    fn login_messages_match_form_copy() {
        assert_eq!(
            AuthError::InvalidCredential.user_message(),
            "Email ou senha incorretos. Verifique suas credenciais."
        );
        assert_eq!(
            AuthError::Provider("x".into()).user_message(),
            "Erro ao fazer login. Tente novamente."
        );
    }

    #[test]
    fn request_body_asks_for_secure_token() {
        let body = serde_json::to_value(SignInRequest {
            email: "a@b.com",
            password: "secret",
            return_secure_token: true,
        })
        .expect("body should serialize");

        assert_eq!(body["returnSecureToken"], true);
        assert_eq!(
            FirebaseAuth::new(reqwest::Client::new(), "k").sign_in_url(),
            "https://identitytoolkit.googleapis.com/v1/accounts:signInWithPassword"
        );
    }

    #[test]
    fn error_envelope_parses() {
        let envelope: ErrorEnvelope = serde_json::from_str(
            r#"{"error":{"code":400,"message":"INVALID_PASSWORD","errors":[]}}"#,
        )
        .expect("envelope should parse");

        assert_eq!(envelope.error.message, "INVALID_PASSWORD");
    }
}
