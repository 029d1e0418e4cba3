use thiserror::Error;

/// Failures a credential store may report
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// The store's uniqueness constraint rejected the write
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                StoreError::UniqueViolation(db.message().to_string())
            }
            _ => StoreError::Database(err.to_string()),
        }
    }
}

/// The outcomes the credential engine hands back to its callers
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CredentialError {
    #[error("Identity already in use")]
    Conflict,

    #[error("Invalid credentials")]
    Unauthorized,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for CredentialError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation(_) => CredentialError::Conflict,
            StoreError::Database(msg) => CredentialError::Internal(msg),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for CredentialError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        CredentialError::InvalidToken(err.to_string())
    }
}
