use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::{
    config::CredentialConfig,
    error::CredentialError,
    models::{Account, AccountKind, Identity, NewAccount},
    password::PasswordHasher,
    repository::CredentialStore,
    token::TokenIssuer,
    types::CredentialClaims,
};

/// Credential lifecycle engine: registration, login and token handling.
///
/// Holds no mutable state; every call is independent and may run
/// concurrently. Registration is a check-then-insert over two store calls,
/// so two concurrent sign-ups for one identity can both pass the pre-check.
/// The store's uniqueness constraint is what finally rejects the loser,
/// which still surfaces as [`CredentialError::Conflict`].
pub struct CredentialService {
    store: Arc<dyn CredentialStore>,
    hasher: PasswordHasher,
    tokens: TokenIssuer,
}

impl CredentialService {
    pub fn new(store: Arc<dyn CredentialStore>, config: &CredentialConfig) -> Self {
        Self {
            store,
            hasher: PasswordHasher::new(config.salt(), config.password_scheme),
            tokens: TokenIssuer::new(config),
        }
    }

    pub fn hash_password(&self, secret: &str) -> String {
        self.hasher.hash(secret)
    }

    /// Duplicate pre-check: the account already holding `identity`, if any
    #[instrument(skip(self, identity))]
    pub async fn find_existing(
        &self,
        kind: AccountKind,
        identity: &Identity,
    ) -> Result<Option<Account>, CredentialError> {
        self.store
            .find_by_identity(kind, identity)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to look up existing account");
                CredentialError::Internal(e.to_string())
            })
    }

    /// Creates an account and returns its store-assigned id
    #[instrument(skip(self, identity, full_name, secret))]
    pub async fn register(
        &self,
        kind: AccountKind,
        identity: Identity,
        full_name: &str,
        secret: &str,
    ) -> Result<i64, CredentialError> {
        info!("Starting account registration");

        if self.find_existing(kind, &identity).await?.is_some() {
            warn!("Registration rejected: identity already in use");
            return Err(CredentialError::Conflict);
        }

        let account = NewAccount::new(
            kind,
            identity,
            full_name.to_string(),
            self.hasher.hash(secret),
        );

        let id = self.store.insert(&account).await.map_err(|e| {
            warn!(error = %e, "Failed to insert account");
            CredentialError::from(e)
        })?;

        info!(account_id = id, "Account registered successfully");
        Ok(id)
    }

    /// Looks up the account matching both identity and password.
    ///
    /// Unknown identity and wrong password are indistinguishable to the caller.
    #[instrument(skip(self, identity, secret))]
    pub async fn authenticate(
        &self,
        kind: AccountKind,
        identity: &Identity,
        secret: &str,
    ) -> Result<Account, CredentialError> {
        let digest = self.hasher.hash(secret);

        match self
            .store
            .find_by_identity_and_digest(kind, identity, &digest)
            .await
        {
            Ok(Some(account)) => {
                info!(account_id = account.id, "Authentication succeeded");
                Ok(account)
            }
            Ok(None) => {
                warn!("Authentication failed: no matching credentials");
                Err(CredentialError::Unauthorized)
            }
            Err(e) => {
                warn!(error = %e, "Failed to look up credentials");
                Err(CredentialError::Internal(e.to_string()))
            }
        }
    }

    pub fn issue_token(
        &self,
        account_id: i64,
        full_name: &str,
        is_vet: bool,
    ) -> Result<String, CredentialError> {
        self.tokens.issue_token(account_id, full_name, is_vet)
    }

    /// Account id carried by a valid token. Never consults the store.
    pub fn parse_token(&self, token: &str) -> Result<i64, CredentialError> {
        self.tokens.parse_token(token)
    }

    pub fn validate_token(&self, token: &str) -> Result<CredentialClaims, CredentialError> {
        self.tokens.validate_token(token)
    }

    /// Registers an account and returns a token for it
    #[instrument(skip(self, identity, full_name, secret))]
    pub async fn sign_up(
        &self,
        kind: AccountKind,
        identity: Identity,
        full_name: &str,
        secret: &str,
    ) -> Result<String, CredentialError> {
        let id = self.register(kind, identity, full_name, secret).await?;
        self.issue_token(id, full_name, kind.is_service_provider())
    }

    /// Authenticates and returns a token for the matched account
    #[instrument(skip(self, identity, secret))]
    pub async fn sign_in(
        &self,
        kind: AccountKind,
        identity: &Identity,
        secret: &str,
    ) -> Result<String, CredentialError> {
        let account = self.authenticate(kind, identity, secret).await?;
        self.issue_token(account.id, &account.full_name, account.kind.is_service_provider())
    }
}
