// Public API - what other modules can use
pub use handlers::{sign_in, sign_up_owner, sign_up_vet, validate};
pub use middleware::jwt_auth;
pub use models::{Account, AccountKind, Identity};
pub use types::CredentialClaims;

// Internal modules
pub mod config;
pub mod error;
mod handlers;
mod middleware;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;
pub mod types;
