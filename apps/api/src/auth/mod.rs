//! Authentication — resolves the calling user's id from a session token.
//!
//! Handlers take an `AuthUser` argument; extraction fails with
//! `AppError::Unauthorized` when no token is present or it does not verify.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tracing::debug;

use crate::errors::AppError;
use crate::state::AppState;

/// Cookie Clerk sets for same-origin requests.
const SESSION_COOKIE: &str = "__session";

#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Returns the user id the token belongs to.
    async fn authenticate(&self, token: &str) -> Result<String, AppError>;
}

#[derive(Debug, Deserialize)]
struct SessionClaims {
    sub: String,
}

/// Verifies Clerk session JWTs locally with the instance's public key.
pub struct ClerkAuth {
    key: DecodingKey,
    validation: Validation,
}

impl ClerkAuth {
    /// `pem` is the RS256 public key from the Clerk dashboard.
    pub fn from_rsa_pem(pem: &str, issuer: Option<&str>) -> anyhow::Result<Self> {
        let key = DecodingKey::from_rsa_pem(pem.as_bytes())?;
        Ok(Self::new(key, Algorithm::RS256, issuer))
    }

    pub fn new(key: DecodingKey, algorithm: Algorithm, issuer: Option<&str>) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.validate_aud = false;
        if let Some(iss) = issuer {
            validation.set_issuer(&[iss]);
        }
        Self { key, validation }
    }
}

#[async_trait]
impl AuthProvider for ClerkAuth {
    async fn authenticate(&self, token: &str) -> Result<String, AppError> {
        let data = decode::<SessionClaims>(token, &self.key, &self.validation).map_err(|e| {
            debug!("Rejected session token: {e}");
            AppError::Unauthorized
        })?;

        if data.claims.sub.trim().is_empty() {
            return Err(AppError::Unauthorized);
        }
        Ok(data.claims.sub)
    }
}

/// The authenticated caller.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = session_token(parts).ok_or(AppError::Unauthorized)?;
        let user_id = state.auth.authenticate(&token).await?;
        Ok(AuthUser { user_id })
    }
}

/// Bearer header first, then the session cookie.
fn session_token(parts: &Parts) -> Option<String> {
    let bearer = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    parts
        .headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;

    const SECRET: &[u8] = b"test-secret";

    #[derive(Serialize)]
    struct TestClaims<'a> {
        sub: &'a str,
        iss: &'a str,
        exp: usize,
    }

    fn token(sub: &str, iss: &str, exp_offset: i64) -> String {
        let exp = (chrono::Utc::now().timestamp() + exp_offset) as usize;
        encode(
            &Header::new(Algorithm::HS256),
            &TestClaims { sub, iss, exp },
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap()
    }

    fn provider(issuer: Option<&str>) -> ClerkAuth {
        ClerkAuth::new(DecodingKey::from_secret(SECRET), Algorithm::HS256, issuer)
    }

    #[tokio::test]
    async fn test_valid_token_yields_subject() {
        let auth = provider(Some("https://clerk.example.com"));
        let user = auth
            .authenticate(&token("user_2abc", "https://clerk.example.com", 600))
            .await
            .unwrap();
        assert_eq!(user, "user_2abc");
    }

    #[tokio::test]
    async fn test_expired_token_rejected() {
        let auth = provider(None);
        let err = auth
            .authenticate(&token("user_2abc", "x", -3600))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[tokio::test]
    async fn test_wrong_issuer_rejected() {
        let auth = provider(Some("https://clerk.example.com"));
        let result = auth
            .authenticate(&token("user_2abc", "https://evil.example.com", 600))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_garbage_token_rejected() {
        assert!(provider(None).authenticate("not.a.jwt").await.is_err());
    }

    #[tokio::test]
    async fn test_empty_subject_rejected() {
        assert!(provider(None).authenticate(&token(" ", "x", 600)).await.is_err());
    }

    fn parts(headers: &[(&str, &str)]) -> Parts {
        let mut builder = Request::builder().uri("/");
        for (k, v) in headers {
            builder = builder.header(*k, *v);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_token_from_bearer_header() {
        let p = parts(&[("authorization", "Bearer abc.def")]);
        assert_eq!(session_token(&p).as_deref(), Some("abc.def"));
    }

    #[test]
    fn test_token_from_session_cookie() {
        let p = parts(&[("cookie", "theme=dark; __session=tok123; other=1")]);
        assert_eq!(session_token(&p).as_deref(), Some("tok123"));
    }

    #[test]
    fn test_no_token() {
        assert_eq!(session_token(&parts(&[])), None);
        assert_eq!(session_token(&parts(&[("authorization", "Basic xyz")])), None);
        assert_eq!(session_token(&parts(&[("cookie", "__session=")])), None);
    }
}
