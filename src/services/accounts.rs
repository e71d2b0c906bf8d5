use tracing::{info, warn};

use crate::auth::{AuthError, CredentialScheme};
use crate::database::{AccountStore, User};

/// What a registration must satisfy beyond a free username
#[derive(Debug, Clone, Copy)]
pub struct RegistrationPolicy {
    pub min_password_length: Option<usize>,
    pub require_confirmation: bool,
}

impl RegistrationPolicy {
    /// Password generator: any non-empty password, no confirmation field
    pub fn generator() -> Self {
        Self {
            min_password_length: None,
            require_confirmation: false,
        }
    }

    /// Drawing studio: minimum length and a matching confirmation
    pub fn studio(min_password_length: usize) -> Self {
        Self {
            min_password_length: Some(min_password_length),
            require_confirmation: true,
        }
    }
}

/// Registration and login on top of the account store
#[derive(Clone)]
pub struct AccountService {
    store: AccountStore,
    scheme: CredentialScheme,
    policy: RegistrationPolicy,
}

impl AccountService {
    pub fn new(store: AccountStore, scheme: CredentialScheme, policy: RegistrationPolicy) -> Self {
        Self { store, scheme, policy }
    }

    /// Create a new account. Nothing is written unless every check passes.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        confirmation: Option<&str>,
    ) -> Result<User, AuthError> {
        if username.trim().is_empty() {
            return Err(AuthError::MissingField("username"));
        }
        if password.is_empty() {
            return Err(AuthError::MissingField("password"));
        }

        if self.store.find_by_username(username).await?.is_some() {
            return Err(AuthError::UsernameTaken);
        }

        if let Some(min) = self.policy.min_password_length {
            if password.chars().count() < min {
                return Err(AuthError::PasswordTooShort { min });
            }
        }

        if self.policy.require_confirmation && confirmation != Some(password) {
            return Err(AuthError::PasswordMismatch);
        }

        let sealed = self.scheme.seal(password)?;
        let user = match self.store.insert(username, &sealed).await {
            Ok(user) => user,
            // Lost a race with a concurrent registration of the same name
            Err(e) if e.is_unique_violation() => return Err(AuthError::UsernameTaken),
            Err(e) => return Err(e.into()),
        };

        info!("Registered user '{}' (id {})", user.username, user.id);
        Ok(user)
    }

    /// Check credentials. Unknown user and wrong password are indistinguishable.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let Some(user) = self.store.find_by_username(username).await? else {
            warn!("Failed login for '{}'", username);
            return Err(AuthError::InvalidCredentials);
        };

        if !self.scheme.verify(password, &user.password_hash)? {
            warn!("Failed login for '{}'", username);
            return Err(AuthError::InvalidCredentials);
        }

        info!("User '{}' logged in", user.username);
        Ok(user)
    }
}
