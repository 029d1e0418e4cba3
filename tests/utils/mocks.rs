use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use vetauth::{
    credentials::models::NewAccount, Account, AccountKind, CredentialStore, Identity,
    InMemoryCredentialStore, StoreError,
};

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// In-memory store that counts how often each operation is called
#[derive(Default)]
pub struct CountingCredentialStore {
    inner: InMemoryCredentialStore,
    lookups: AtomicUsize,
    inserts: AtomicUsize,
}

#[allow(dead_code)]
impl CountingCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_calls(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn lookup_calls(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn account_count(&self, kind: AccountKind) -> usize {
        self.inner.account_count(kind)
    }
}

#[async_trait]
impl CredentialStore for CountingCredentialStore {
    async fn find_by_identity(
        &self,
        kind: AccountKind,
        identity: &Identity,
    ) -> Result<Option<Account>, StoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_identity(kind, identity).await
    }

    async fn find_by_identity_and_digest(
        &self,
        kind: AccountKind,
        identity: &Identity,
        password_hash: &str,
    ) -> Result<Option<Account>, StoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner
            .find_by_identity_and_digest(kind, identity, password_hash)
            .await
    }

    async fn insert(&self, account: &NewAccount) -> Result<i64, StoreError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.inner.insert(account).await
    }
}

/// Store whose pre-check never sees existing rows, as when a concurrent
/// registration commits between the check and the insert
#[derive(Default)]
pub struct StalePrecheckStore {
    inner: InMemoryCredentialStore,
}

#[allow(dead_code)]
impl StalePrecheckStore {
    pub fn account_count(&self, kind: AccountKind) -> usize {
        self.inner.account_count(kind)
    }
}

#[async_trait]
impl CredentialStore for StalePrecheckStore {
    async fn find_by_identity(
        &self,
        _kind: AccountKind,
        _identity: &Identity,
    ) -> Result<Option<Account>, StoreError> {
        Ok(None)
    }

    async fn find_by_identity_and_digest(
        &self,
        kind: AccountKind,
        identity: &Identity,
        password_hash: &str,
    ) -> Result<Option<Account>, StoreError> {
        self.inner
            .find_by_identity_and_digest(kind, identity, password_hash)
            .await
    }

    async fn insert(&self, account: &NewAccount) -> Result<i64, StoreError> {
        self.inner.insert(account).await
    }
}

/// Store that is unreachable
pub struct FailingCredentialStore;

#[async_trait]
impl CredentialStore for FailingCredentialStore {
    async fn find_by_identity(
        &self,
        _kind: AccountKind,
        _identity: &Identity,
    ) -> Result<Option<Account>, StoreError> {
        Err(StoreError::Database("connection refused".to_string()))
    }

    async fn find_by_identity_and_digest(
        &self,
        _kind: AccountKind,
        _identity: &Identity,
        _password_hash: &str,
    ) -> Result<Option<Account>, StoreError> {
        Err(StoreError::Database("connection refused".to_string()))
    }

    async fn insert(&self, _account: &NewAccount) -> Result<i64, StoreError> {
        Err(StoreError::Database("connection refused".to_string()))
    }
}
