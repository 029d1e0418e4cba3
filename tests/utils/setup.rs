use axum::Router;
use chrono::Duration;
use std::sync::Arc;

use vetauth::{app, AppState, CredentialConfig, CredentialService, CredentialStore};

use super::mocks::CountingCredentialStore;

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub const TEST_SALT: &str = "test-salt";
pub const TEST_SIGNING_KEY: &str = "test-signing-key";

pub struct TestSetup {
    pub store: Arc<CountingCredentialStore>,
    pub service: Arc<CredentialService>,
}

#[allow(dead_code)]
impl TestSetup {
    pub fn router(&self) -> Router {
        app(AppState::new(self.service.clone()))
    }
}

pub struct TestSetupBuilder {
    token_ttl: Duration,
    signing_key: String,
}

#[allow(dead_code)]
impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            token_ttl: Duration::hours(1),
            signing_key: TEST_SIGNING_KEY.to_string(),
        }
    }

    pub fn with_token_ttl(mut self, token_ttl: Duration) -> Self {
        self.token_ttl = token_ttl;
        self
    }

    pub fn with_signing_key(mut self, signing_key: &str) -> Self {
        self.signing_key = signing_key.to_string();
        self
    }

    fn config(&self) -> CredentialConfig {
        CredentialConfig::new(TEST_SALT, self.signing_key.clone(), self.token_ttl)
    }

    pub fn build(self) -> TestSetup {
        let store = Arc::new(CountingCredentialStore::new());
        let service = Arc::new(CredentialService::new(store.clone(), &self.config()));

        TestSetup { store, service }
    }

    /// Builds a service over an arbitrary store
    pub fn build_with_store(self, store: Arc<dyn CredentialStore>) -> CredentialService {
        CredentialService::new(store, &self.config())
    }
}
