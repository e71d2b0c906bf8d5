//! Credential storage schemes.
//!
//! The studio keeps Argon2id PHC strings (`$argon2id$v=19$...`). The password
//! generator stores passwords verbatim unless
//! `GENERATOR_HASH_PASSWORDS` turns hashing on.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use super::AuthError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialScheme {
    /// Stored as typed, compared by equality.
    Plain,
    /// Salted Argon2id hash.
    Argon2,
}

impl CredentialScheme {
    /// Turn a submitted password into the value kept in `users.password_hash`.
    pub fn seal(&self, password: &str) -> Result<String, AuthError> {
        match self {
            CredentialScheme::Plain => Ok(password.to_string()),
            CredentialScheme::Argon2 => {
                let salt = SaltString::generate(&mut OsRng);
                let hash = Argon2::default()
                    .hash_password(password.as_bytes(), &salt)
                    .map_err(|e| AuthError::Hashing(e.to_string()))?;
                Ok(hash.to_string())
            }
        }
    }

    /// Check a submitted password against a stored value.
    ///
    /// `Ok(false)` on mismatch; `Err` only if the stored hash is malformed.
    pub fn verify(&self, password: &str, stored: &str) -> Result<bool, AuthError> {
        match self {
            CredentialScheme::Plain => Ok(password == stored),
            CredentialScheme::Argon2 => {
                let parsed = PasswordHash::new(stored)
                    .map_err(|e| AuthError::Hashing(format!("invalid hash format: {e}")))?;
                match Argon2::default().verify_password(password.as_bytes(), &parsed) {
                    Ok(()) => Ok(true),
                    Err(argon2::password_hash::Error::Password) => Ok(false),
                    Err(e) => Err(AuthError::Hashing(format!("verify error: {e}"))),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argon2_hash_is_salted_and_verifies() {
        let scheme = CredentialScheme::Argon2;
        let first = scheme.seal("hunter22").unwrap();
        let second = scheme.seal("hunter22").unwrap();

        assert!(first.starts_with("$argon2id$"));
        assert_ne!(first, second);
        assert!(scheme.verify("hunter22", &first).unwrap());
        assert!(!scheme.verify("hunter23", &first).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(CredentialScheme::Argon2.verify("pw", "not-a-hash").is_err());
    }

    #[test]
    fn plain_scheme_stores_verbatim() {
        let scheme = CredentialScheme::Plain;
        assert_eq!(scheme.seal("secret").unwrap(), "secret");
        assert!(scheme.verify("secret", "secret").unwrap());
        assert!(!scheme.verify("Secret", "secret").unwrap());
    }
}
