// Library crate for the vet clinic credential service
// This file exposes the public API for integration tests

pub mod credentials;
pub mod shared;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

// Re-export commonly used types for easier access in tests
pub use credentials::{
    config::{ConfigError, CredentialConfig},
    error::{CredentialError, StoreError},
    repository::{CredentialStore, InMemoryCredentialStore, PostgresCredentialStore},
    service::CredentialService,
    Account, AccountKind, CredentialClaims, Identity,
};
pub use shared::{AppError, AppState};

/// Builds the HTTP router for the credential endpoints
pub fn app(app_state: AppState) -> Router {
    let protected = Router::new()
        .route("/auth/v1/validate", get(credentials::validate))
        .layer(middleware::from_fn_with_state(
            app_state.clone(),
            credentials::jwt_auth,
        ));

    Router::new()
        .route("/auth/v1/sign-up/owner", post(credentials::sign_up_owner))
        .route("/auth/v1/sign-up/vet", post(credentials::sign_up_vet))
        .route("/auth/v1/sign-in", post(credentials::sign_in))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
