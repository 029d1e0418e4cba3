use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, instrument, warn};

use super::{
    error::StoreError,
    models::{Account, AccountKind, Identity, NewAccount},
};

/// Persistence operations the credential engine relies on.
///
/// Identity matching is "same email OR same phone", considering only the
/// fields present on the probe. Implementations should enforce identity
/// uniqueness per kind inside `insert` and report a clash as
/// [`StoreError::UniqueViolation`].
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_identity(
        &self,
        kind: AccountKind,
        identity: &Identity,
    ) -> Result<Option<Account>, StoreError>;

    async fn find_by_identity_and_digest(
        &self,
        kind: AccountKind,
        identity: &Identity,
        password_hash: &str,
    ) -> Result<Option<Account>, StoreError>;

    /// Persists the account and returns the id assigned by the backend
    async fn insert(&self, account: &NewAccount) -> Result<i64, StoreError>;
}

/// In-memory implementation of CredentialStore for development and testing
///
/// Data is stored in memory and will be lost when the application restarts.
pub struct InMemoryCredentialStore {
    accounts: Mutex<HashMap<AccountKind, Vec<Account>>>,
}

impl Default for InMemoryCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<AccountKind, Vec<Account>>>, StoreError> {
        self.accounts
            .lock()
            .map_err(|_| StoreError::Database("credential store lock poisoned".to_string()))
    }

    /// Returns the number of stored accounts of `kind`
    pub fn account_count(&self, kind: AccountKind) -> usize {
        self.lock()
            .map(|accounts| accounts.get(&kind).map_or(0, Vec::len))
            .unwrap_or(0)
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    #[instrument(skip(self, identity))]
    async fn find_by_identity(
        &self,
        kind: AccountKind,
        identity: &Identity,
    ) -> Result<Option<Account>, StoreError> {
        let accounts = self.lock()?;
        let found = accounts
            .get(&kind)
            .and_then(|list| list.iter().find(|a| a.identity.overlaps(identity)))
            .cloned();

        debug!(found = found.is_some(), "Looked up account by identity in memory");
        Ok(found)
    }

    #[instrument(skip(self, identity, password_hash))]
    async fn find_by_identity_and_digest(
        &self,
        kind: AccountKind,
        identity: &Identity,
        password_hash: &str,
    ) -> Result<Option<Account>, StoreError> {
        let accounts = self.lock()?;
        let found = accounts
            .get(&kind)
            .and_then(|list| {
                list.iter()
                    .find(|a| a.identity.overlaps(identity) && a.password_hash == password_hash)
            })
            .cloned();

        debug!(found = found.is_some(), "Looked up account by credentials in memory");
        Ok(found)
    }

    #[instrument(skip(self, account), fields(kind = %account.kind))]
    async fn insert(&self, account: &NewAccount) -> Result<i64, StoreError> {
        let mut accounts = self.lock()?;
        let list = accounts.entry(account.kind).or_default();

        if list.iter().any(|a| a.identity.overlaps(&account.identity)) {
            warn!("Account with the same identity already exists in memory");
            return Err(StoreError::UniqueViolation(format!(
                "{} identity already exists",
                account.kind
            )));
        }

        let id = list.len() as i64 + 1;
        list.push(account.clone().into_account(id));

        debug!(account_id = id, "Account created successfully in memory");
        Ok(id)
    }
}

/// PostgreSQL implementation of the credential store.
///
/// Relies on the UNIQUE constraints on `email` and `phone` created by the
/// bundled migrations to reject concurrent duplicate registrations.
pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies the bundled schema migrations
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn account_from_row(kind: AccountKind, row: &PgRow) -> Result<Account, StoreError> {
        let identity = Identity::new(row.try_get("email")?, row.try_get("phone")?)
            .ok_or_else(|| StoreError::Database("account row has neither email nor phone".to_string()))?;

        Ok(Account {
            id: row.try_get("id")?,
            kind,
            identity,
            full_name: row.try_get("full_name")?,
            password_hash: row.try_get("password_hash")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    #[instrument(skip(self, identity))]
    async fn find_by_identity(
        &self,
        kind: AccountKind,
        identity: &Identity,
    ) -> Result<Option<Account>, StoreError> {
        let query = format!(
            "SELECT id, email, phone, full_name, password_hash, created_at FROM {} \
             WHERE email = $1 OR phone = $2 LIMIT 1",
            kind.table()
        );

        let row = sqlx::query(&query)
            .bind(identity.email_address())
            .bind(identity.phone_number())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to fetch account by identity");
                StoreError::from(e)
            })?;

        debug!(found = row.is_some(), "Looked up account by identity in database");
        row.map(|row| Self::account_from_row(kind, &row)).transpose()
    }

    #[instrument(skip(self, identity, password_hash))]
    async fn find_by_identity_and_digest(
        &self,
        kind: AccountKind,
        identity: &Identity,
        password_hash: &str,
    ) -> Result<Option<Account>, StoreError> {
        let query = format!(
            "SELECT id, email, phone, full_name, password_hash, created_at FROM {} \
             WHERE (email = $1 OR phone = $2) AND password_hash = $3 LIMIT 1",
            kind.table()
        );

        let row = sqlx::query(&query)
            .bind(identity.email_address())
            .bind(identity.phone_number())
            .bind(password_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to fetch account by credentials");
                StoreError::from(e)
            })?;

        debug!(found = row.is_some(), "Looked up account by credentials in database");
        row.map(|row| Self::account_from_row(kind, &row)).transpose()
    }

    #[instrument(skip(self, account), fields(kind = %account.kind))]
    async fn insert(&self, account: &NewAccount) -> Result<i64, StoreError> {
        let query = format!(
            "INSERT INTO {} (email, phone, full_name, password_hash) VALUES ($1, $2, $3, $4) RETURNING id",
            account.kind.table()
        );

        let id: i64 = sqlx::query(&query)
            .bind(account.identity.email_address())
            .bind(account.identity.phone_number())
            .bind(&account.full_name)
            .bind(&account.password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to insert account");
                StoreError::from(e)
            })?
            .try_get("id")?;

        debug!(account_id = id, "Account created successfully in database");
        Ok(id)
    }
}
