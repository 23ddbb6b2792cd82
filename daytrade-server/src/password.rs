//! Password hashing
//!
//! Stored passwords are Argon2id PHC strings with a random per-user salt.
//! Verification goes through `argon2`'s constant-time comparison.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::models::Password;

/// Well-formed hash with default Argon2 parameters that no password
/// matches. Verified against when the account does not exist, so unknown
/// usernames cost the same as known ones.
const DUMMY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$\
AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hash(password_hash::Error),
}

/// Hash a password into a PHC string suitable for `dt_users.password`.
pub fn hash_password(password: &Password) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.expose().as_bytes(), &salt)
        .map_err(PasswordError::Hash)?;
    Ok(hash.to_string())
}

/// Check a password against a stored PHC string.
///
/// A stored value that is not a PHC string never matches.
pub fn verify_password(password: &Password, stored: &str) -> Result<bool, PasswordError> {
    let parsed = match PasswordHash::new(stored) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!("stored password is not a valid hash: {}", e);
            return Ok(false);
        }
    };

    match Argon2::default().verify_password(password.expose().as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::Hash(e)),
    }
}

/// Check a login attempt against the stored hash, if the account exists.
pub fn verify_login(password: &Password, stored: Option<&str>) -> Result<bool, PasswordError> {
    match stored {
        Some(stored) => verify_password(password, stored),
        None => verify_password(password, DUMMY_HASH).map(|_| false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let password = Password::new("correct horse").unwrap();
        let stored = hash_password(&password).unwrap();

        assert!(stored.starts_with("$argon2id$"));
        assert!(verify_password(&password, &stored).unwrap());
    }

    #[test]
    fn wrong_password_does_not_verify() {
        let stored = hash_password(&Password::new("secret").unwrap()).unwrap();
        let attempt = Password::new("Secret").unwrap();
        assert!(!verify_password(&attempt, &stored).unwrap());
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let password = Password::new("secret").unwrap();
        let a = hash_password(&password).unwrap();
        let b = hash_password(&password).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn cleartext_stored_value_never_matches() {
        let password = Password::new("secret").unwrap();
        assert!(!verify_password(&password, "secret").unwrap());
    }

    #[test]
    fn missing_account_never_verifies() {
        let password = Password::new("secret").unwrap();
        assert!(!verify_login(&password, None).unwrap());

        let stored = hash_password(&password).unwrap();
        assert!(verify_login(&password, Some(&stored)).unwrap());
    }

    #[test]
    fn dummy_hash_costs_the_same_as_a_real_one() {
        let dummy = PasswordHash::new(DUMMY_HASH).unwrap();
        let real_hash = hash_password(&Password::new("secret").unwrap()).unwrap();
        let real = PasswordHash::new(&real_hash).unwrap();

        assert_eq!(dummy.algorithm, real.algorithm);
        let dummy = argon2::Params::try_from(&dummy).unwrap();
        let real = argon2::Params::try_from(&real).unwrap();
        assert_eq!(dummy.m_cost(), real.m_cost());
        assert_eq!(dummy.t_cost(), real.t_cost());
        assert_eq!(dummy.p_cost(), real.p_cost());
        assert_eq!(dummy.output_len(), real.output_len());
    }
}
