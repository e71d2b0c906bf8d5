use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::auth::{SessionClaims, SessionKeys};
use crate::database::AccountStore;
use crate::error::ApiError;

/// Authenticated user context, injected into request extensions by the guard
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionUser {
    pub id: i64,
    pub username: String,
}

impl TryFrom<SessionClaims> for SessionUser {
    type Error = String;

    fn try_from(claims: SessionClaims) -> Result<Self, Self::Error> {
        let id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| format!("non-numeric subject '{}'", claims.sub))?;
        Ok(Self {
            id,
            username: claims.username,
        })
    }
}

/// Session keys, the account table and where to send anonymous visitors
#[derive(Clone)]
pub struct SessionGuard {
    keys: SessionKeys,
    accounts: AccountStore,
    login_path: &'static str,
}

impl SessionGuard {
    pub fn new(keys: SessionKeys, accounts: AccountStore, login_path: &'static str) -> Self {
        Self {
            keys,
            accounts,
            login_path,
        }
    }

    /// Verify a session token and check its subject still has an account.
    /// Anything short of that counts as no session.
    async fn authenticate(&self, token: Option<String>) -> Result<Option<SessionUser>, ApiError> {
        let Some(token) = token else {
            return Ok(None);
        };
        let claims = match self.keys.verify(&token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!("Ignoring session cookie: {}", e);
                return Ok(None);
            }
        };
        let session = match SessionUser::try_from(claims) {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!("Rejecting session with {}", e);
                return Ok(None);
            }
        };

        match self.accounts.find_by_id(session.id).await? {
            Some(account) => Ok(Some(SessionUser {
                id: account.id,
                username: account.username,
            })),
            None => {
                tracing::warn!("Session for user {} outlived the account", session.id);
                Ok(None)
            }
        }
    }

    fn login_redirect(&self) -> Redirect {
        Redirect::to(&format!("{}?notice=login_required", self.login_path))
    }
}

/// Page guard: anonymous requests are redirected to the login page
pub async fn require_session(
    State(guard): State<SessionGuard>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = guard.keys.token_from_headers(request.headers());
    match guard.authenticate(token).await? {
        Some(user) => {
            request.extensions_mut().insert(user);
            Ok(next.run(request).await)
        }
        None => Ok(guard.login_redirect().into_response()),
    }
}

/// JSON guard: anonymous requests get `401 {error}`
pub async fn require_api_session(
    State(guard): State<SessionGuard>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = guard.keys.token_from_headers(request.headers());
    let user = guard
        .authenticate(token)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(sub: &str) -> SessionClaims {
        SessionClaims {
            sub: sub.to_string(),
            username: "alice".to_string(),
            aud: "studio".to_string(),
            exp: 0,
            iat: 0,
        }
    }

    #[test]
    fn converts_numeric_subject() {
        let user = SessionUser::try_from(claims("12")).unwrap();
        assert_eq!(user, SessionUser { id: 12, username: "alice".to_string() });
    }

    #[test]
    fn rejects_non_numeric_subject() {
        assert!(SessionUser::try_from(claims("abc")).is_err());
    }

    #[tokio::test]
    async fn session_of_removed_account_is_no_session() {
        use crate::database::manager::{memory_pool, DatabaseManager};

        let pool = memory_pool().await;
        DatabaseManager::migrate_studio(&pool).await.unwrap();
        let accounts = AccountStore::new(pool.clone());
        let alice = accounts.insert("alice", "h").await.unwrap();

        let keys = SessionKeys::new("secret", "studio", "studio_session", 1, false).unwrap();
        let guard = SessionGuard::new(keys.clone(), accounts, "/login");
        let token = keys.issue(&alice).unwrap();

        let user = guard.authenticate(Some(token.clone())).await.unwrap();
        assert_eq!(user.map(|u| u.id), Some(alice.id));

        sqlx::query("DELETE FROM users").execute(&pool).await.unwrap();
        assert!(guard.authenticate(Some(token)).await.unwrap().is_none());
        assert!(guard.authenticate(None).await.unwrap().is_none());
    }
}
