//! Database connection settings from the environment
//!
//! `DATABASE_URL` wins when present. Otherwise the connection is assembled
//! from `DB_HOST`, `DB_PORT`, `DB_NAME`, `DB_USER` and `DB_PASSWORD`, with
//! TLS disabled.

use std::fmt;
use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgSslMode};

const DEFAULT_DB_PORT: u16 = 5432;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no database configured: set DATABASE_URL or DB_HOST/DB_NAME/DB_USER/DB_PASSWORD")]
    MissingDatabase,

    #[error("invalid DB_PORT '{0}'")]
    InvalidPort(String),

    #[error("invalid database url: {0}")]
    InvalidUrl(#[source] sqlx::Error),
}

/// Where to find PostgreSQL
#[derive(Clone, PartialEq, Eq)]
pub enum DatabaseSettings {
    Url(String),
    Parts {
        host: String,
        port: u16,
        database: Option<String>,
        username: Option<String>,
        password: Option<String>,
    },
}

impl DatabaseSettings {
    /// Read settings from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty("DATABASE_URL") {
            return Ok(Self::Url(url));
        }

        let host = non_empty("DB_HOST").ok_or(ConfigError::MissingDatabase)?;
        let port: u16 = match non_empty("DB_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_DB_PORT,
        };

        Ok(Self::Parts {
            host,
            port,
            database: non_empty("DB_NAME"),
            username: non_empty("DB_USER"),
            password: lookup("DB_PASSWORD"),
        })
    }

    /// Build sqlx connect options.
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        match self {
            Self::Url(url) => PgConnectOptions::from_str(url).map_err(ConfigError::InvalidUrl),
            Self::Parts {
                host,
                port,
                database,
                username,
                password,
            } => {
                let mut options = PgConnectOptions::new()
                    .host(host)
                    .port(*port)
                    .ssl_mode(PgSslMode::Disable);
                if let Some(database) = database {
                    options = options.database(database);
                }
                if let Some(username) = username {
                    options = options.username(username);
                }
                if let Some(password) = password {
                    options = options.password(password);
                }
                Ok(options)
            }
        }
    }
}

impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(_) => f.write_str("DatabaseSettings::Url(***)"),
            Self::Parts {
                host,
                port,
                database,
                username,
                ..
            } => f
                .debug_struct("DatabaseSettings::Parts")
                .field("host", host)
                .field("port", port)
                .field("database", database)
                .field("username", username)
                .finish_non_exhaustive(),
        }
    }
}

impl fmt::Display for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(_) => f.write_str("DATABASE_URL"),
            Self::Parts {
                host,
                port,
                database,
                ..
            } => write!(
                f,
                "{}:{}/{}",
                host,
                port,
                database.as_deref().unwrap_or_default()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn database_url_takes_precedence() {
        let settings = DatabaseSettings::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://u:p@db/journal"),
            ("DB_HOST", "ignored"),
        ]))
        .unwrap();
        assert_eq!(
            settings,
            DatabaseSettings::Url("postgres://u:p@db/journal".into())
        );
    }

    #[test]
    fn parts_with_default_port() {
        let settings = DatabaseSettings::from_lookup(lookup(&[
            ("DB_HOST", "localhost"),
            ("DB_NAME", "daytrade"),
            ("DB_USER", "trader"),
            ("DB_PASSWORD", "pw"),
        ]))
        .unwrap();

        match &settings {
            DatabaseSettings::Parts {
                host,
                port,
                database,
                ..
            } => {
                assert_eq!(host, "localhost");
                assert_eq!(*port, 5432);
                assert_eq!(database.as_deref(), Some("daytrade"));
            }
            other => panic!("unexpected settings: {:?}", other),
        }
        assert_eq!(settings.to_string(), "localhost:5432/daytrade");
        assert!(settings.connect_options().is_ok());
    }

    #[test]
    fn empty_url_falls_back_to_parts() {
        let settings = DatabaseSettings::from_lookup(lookup(&[
            ("DATABASE_URL", "  "),
            ("DB_HOST", "db"),
            ("DB_PORT", "6543"),
        ]))
        .unwrap();
        assert!(matches!(
            settings,
            DatabaseSettings::Parts { port: 6543, .. }
        ));
    }

    #[test]
    fn missing_everything_is_an_error() {
        let err = DatabaseSettings::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingDatabase));
    }

    #[test]
    fn bad_port_is_an_error() {
        let err = DatabaseSettings::from_lookup(lookup(&[
            ("DB_HOST", "db"),
            ("DB_PORT", "five"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(p) if p == "five"));
    }

    #[test]
    fn debug_hides_credentials() {
        let settings = DatabaseSettings::Url("postgres://u:secret@db/journal".into());
        assert!(!format!("{:?}", settings).contains("secret"));

        let settings = DatabaseSettings::from_lookup(lookup(&[
            ("DB_HOST", "db"),
            ("DB_PASSWORD", "secret"),
        ]))
        .unwrap();
        assert!(!format!("{:?}", settings).contains("secret"));
    }
}
