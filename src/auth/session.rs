use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::AuthError;
use crate::config::SecurityConfig;
use crate::database::User;

/// Claims carried by the signed session cookie
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User id
    pub sub: String,
    pub username: String,
    /// Application the session belongs to
    pub aud: String,
    pub exp: i64,
    pub iat: i64,
}

impl SessionClaims {
    pub fn new(user: &User, audience: &str, expiry_hours: u64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            sub: user.id.to_string(),
            username: user.username.clone(),
            aud: audience.to_string(),
            exp,
            iat: now.timestamp(),
        }
    }
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    audience: String,
    cookie_name: String,
    expiry_hours: u64,
    secure: bool,
}

/// Signs and verifies the session cookie of one application.
///
/// Both applications may run on the same host, and browsers share cookies
/// across ports, so each gets its own cookie name and token audience.
#[derive(Clone)]
pub struct SessionKeys {
    inner: Arc<Keys>,
}

impl SessionKeys {
    pub fn new(
        secret: &str,
        audience: &str,
        cookie_name: &str,
        expiry_hours: u64,
        secure: bool,
    ) -> Result<Self, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::Token("session secret not configured".to_string()));
        }

        Ok(Self {
            inner: Arc::new(Keys {
                encoding: EncodingKey::from_secret(secret.as_bytes()),
                decoding: DecodingKey::from_secret(secret.as_bytes()),
                audience: audience.to_string(),
                cookie_name: cookie_name.to_string(),
                expiry_hours,
                secure,
            }),
        })
    }

    pub fn from_config(config: &SecurityConfig, audience: &str, cookie_name: &str) -> Result<Self, AuthError> {
        Self::new(
            &config.session_secret,
            audience,
            cookie_name,
            config.session_expiry_hours,
            config.cookie_secure,
        )
    }

    pub fn cookie_name(&self) -> &str {
        &self.inner.cookie_name
    }

    /// Issue a session token for a freshly authenticated user
    pub fn issue(&self, user: &User) -> Result<String, AuthError> {
        let claims = SessionClaims::new(user, &self.inner.audience, self.inner.expiry_hours);
        self.sign(&claims)
    }

    fn sign(&self, claims: &SessionClaims) -> Result<String, AuthError> {
        encode(&Header::default(), claims, &self.inner.encoding)
            .map_err(|e| AuthError::Token(e.to_string()))
    }

    /// Verify signature, expiry and audience
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let mut validation = Validation::default();
        validation.leeway = 0;
        validation.set_audience(&[self.inner.audience.as_str()]);

        let token_data = decode::<SessionClaims>(token, &self.inner.decoding, &validation)
            .map_err(|e| AuthError::InvalidSession(e.to_string()))?;

        Ok(token_data.claims)
    }

    /// Cookie establishing the session
    pub fn login_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((self.inner.cookie_name.clone(), token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.inner.secure)
            .max_age(time::Duration::hours(self.inner.expiry_hours as i64))
            .build()
    }

    /// Expired, empty cookie replacing the session
    pub fn logout_cookie(&self) -> Cookie<'static> {
        Cookie::build((self.inner.cookie_name.clone(), ""))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(time::Duration::ZERO)
            .build()
    }

    /// This application's session token, if the jar carries a non-empty one
    pub fn token_from_jar(&self, jar: &CookieJar) -> Option<String> {
        jar.get(&self.inner.cookie_name)
            .map(|cookie| cookie.value().to_string())
            .filter(|token| !token.is_empty())
    }

    pub fn token_from_headers(&self, headers: &HeaderMap) -> Option<String> {
        self.token_from_jar(&CookieJar::from_headers(headers))
    }
}
