use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use tracing::warn;

use super::jwt::{JwtKeys, TokenError};
use crate::{
    error::AppError,
    state::AppState,
    store::{CredentialStore, StoreError},
};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("authentication required")]
    MissingToken,
    #[error("invalid token: {0}")]
    InvalidToken(#[from] TokenError),
    #[error("token refers to an unknown user")]
    UnknownUser(i64),
    #[error(transparent)]
    Store(StoreError),
}

/// The caller behind a verified token, resolved against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
}

/// Accepts `Bearer <token>` (any scheme casing) or a bare `<token>`.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let raw = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
    let token = match raw.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        _ => raw,
    };
    (!token.is_empty()).then_some(token)
}

/// Runs the gate: extract, verify, resolve. Handlers only ever see the `Ok` side.
pub async fn authenticate(
    headers: &HeaderMap,
    keys: &JwtKeys,
    store: &dyn CredentialStore,
) -> Result<CurrentUser, AuthError> {
    let token = bearer_token(headers).ok_or(AuthError::MissingToken)?;

    let claims = keys.verify(token).map_err(|e| {
        warn!(error = %e, "rejected token");
        AuthError::InvalidToken(e)
    })?;

    let user = store
        .find_user_by_id(claims.sub)
        .await
        .map_err(AuthError::Store)?
        .ok_or_else(|| {
            warn!(user_id = claims.sub, "token for unknown user");
            AuthError::UnknownUser(claims.sub)
        })?;

    Ok(CurrentUser {
        id: user.id,
        username: user.username,
    })
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(authenticate(&parts.headers, &state.keys, state.store.as_ref()).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::AppConfig, store::MemoryStore};
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        h
    }

    async fn setup() -> (JwtKeys, MemoryStore, i64) {
        let keys = JwtKeys::new(&AppConfig::for_tests().jwt);
        let store = MemoryStore::new();
        let user = store.create_user("gatekeeper", "hash").await.unwrap();
        (keys, store, user.id)
    }

    #[test]
    fn bearer_token_parsing() {
        assert_eq!(bearer_token(&headers_with("Bearer abc")), Some("abc"));
        assert_eq!(bearer_token(&headers_with("bearer  abc ")), Some("abc"));
        assert_eq!(bearer_token(&headers_with("abc")), Some("abc"));
        assert_eq!(bearer_token(&headers_with("Bearer ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[tokio::test]
    async fn valid_token_resolves_user() {
        let (keys, store, id) = setup().await;
        let token = keys.issue(id).unwrap();

        let user = authenticate(&headers_with(&format!("Bearer {token}")), &keys, &store)
            .await
            .expect("authenticated");
        assert_eq!(user, CurrentUser { id, username: "gatekeeper".into() });

        let raw = authenticate(&headers_with(&token), &keys, &store).await.unwrap();
        assert_eq!(raw.id, id);
    }

    #[tokio::test]
    async fn missing_header_is_rejected() {
        let (keys, store, _) = setup().await;
        let err = authenticate(&HeaderMap::new(), &keys, &store).await.unwrap_err();
        assert!(matches!(err, AuthError::MissingToken));
    }

    #[tokio::test]
    async fn bad_token_is_rejected() {
        let (keys, store, _) = setup().await;
        let err = authenticate(&headers_with("Bearer nope"), &keys, &store)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(TokenError::Malformed)));
    }

    #[tokio::test]
    async fn token_for_missing_user_is_rejected() {
        let (keys, store, _) = setup().await;
        let token = keys.issue(999).unwrap();
        let err = authenticate(&headers_with(&token), &keys, &store)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UnknownUser(999)));
    }
}
