use chrono::Duration;
use thiserror::Error;

use super::password::PasswordScheme;

/// Default token lifetime in seconds (one hour)
pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 3600;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// Process-wide secrets and lifetimes used by the credential engine.
///
/// Fixed for the lifetime of the process; build a new service to rotate.
#[derive(Clone)]
pub struct CredentialConfig {
    salt: String,
    signing_key: String,
    pub token_ttl: Duration,
    pub password_scheme: PasswordScheme,
}

impl CredentialConfig {
    pub fn new(salt: impl Into<String>, signing_key: impl Into<String>, token_ttl: Duration) -> Self {
        Self {
            salt: salt.into(),
            signing_key: signing_key.into(),
            token_ttl,
            password_scheme: PasswordScheme::default(),
        }
    }

    /// Reads the configuration from the environment.
    ///
    /// Unset variables fall back to development values; set but invalid ones are an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token_ttl_seconds = match lookup("TOKEN_TTL_SECONDS") {
            Some(raw) => {
                let seconds: i64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    key: "TOKEN_TTL_SECONDS",
                    reason: format!("not an integer: {:?}", raw),
                })?;
                if seconds <= 0 {
                    return Err(ConfigError::InvalidValue {
                        key: "TOKEN_TTL_SECONDS",
                        reason: format!("must be positive, got {}", seconds),
                    });
                }
                seconds
            }
            None => DEFAULT_TOKEN_TTL_SECONDS,
        };

        let password_scheme = match lookup("PASSWORD_SCHEME") {
            Some(raw) => raw
                .parse::<PasswordScheme>()
                .map_err(|reason| ConfigError::InvalidValue {
                    key: "PASSWORD_SCHEME",
                    reason,
                })?,
            None => PasswordScheme::default(),
        };

        Ok(Self {
            salt: lookup("PASSWORD_SALT")
                .unwrap_or_else(|| "dev-salt-change-in-production".to_string()),
            signing_key: lookup("JWT_SECRET")
                .unwrap_or_else(|| "your-secret-key-change-in-production".to_string()),
            token_ttl: Duration::seconds(token_ttl_seconds),
            password_scheme,
        })
    }

    pub fn with_password_scheme(mut self, scheme: PasswordScheme) -> Self {
        self.password_scheme = scheme;
        self
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }

    pub fn signing_key(&self) -> &[u8] {
        self.signing_key.as_bytes()
    }
}

impl std::fmt::Debug for CredentialConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialConfig")
            .field("salt", &"<redacted>")
            .field("signing_key", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("password_scheme", &self.password_scheme)
            .finish()
    }
}
