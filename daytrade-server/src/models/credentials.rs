//! Account credentials validated at construction

use std::fmt;

use super::ValidationError;

/// Matches `dt_users.username VARCHAR(50)`
const MAX_USERNAME_LEN: usize = 50;

const MIN_PASSWORD_LEN: usize = 4;

/// Validated username (1..=50 characters)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Create a username, rejecting empty or over-long values.
    ///
    /// # Example
    /// ```
    /// use daytrade_server::models::Username;
    ///
    /// assert!(Username::new("trader").is_ok());
    /// assert!(Username::new("").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "username" });
        }

        if s.chars().count() > MAX_USERNAME_LEN {
            return Err(ValidationError::TooLong {
                field: "username",
                max: MAX_USERNAME_LEN,
            });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Cleartext password as received from the client.
///
/// Only ever hashed or verified; `Debug` never prints the value.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    /// Accept any non-empty password, used for login.
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "password" });
        }
        Ok(Self(s.to_owned()))
    }

    /// Password for a new account: at least 4 characters.
    pub fn new_for_registration(s: &str) -> Result<Self, ValidationError> {
        let password = Self::new(s)?;
        if s.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::TooShort {
                field: "password",
                min: MIN_PASSWORD_LEN,
            });
        }
        Ok(password)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}
