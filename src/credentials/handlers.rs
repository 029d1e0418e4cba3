use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use tracing::{debug, info, instrument, warn};

use super::{
    models::{AccountKind, Identity},
    types::{CredentialClaims, SignInRequest, SignUpRequest, TokenResponse, ValidateResponse},
};
use crate::shared::{AppError, AppState};

fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        warn!(error = %rejection, "Failed to parse request body");
        AppError::BadRequest("invalid input body. Failed to parse".to_string())
    })
}

fn identity_from(email: Option<String>, phone: Option<String>) -> Result<Identity, AppError> {
    Identity::new(email, phone).ok_or_else(|| {
        warn!("Request carries neither email nor phone");
        AppError::BadRequest("email or phone is required".to_string())
    })
}

async fn sign_up(
    state: &AppState,
    kind: AccountKind,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, AppError> {
    let input = parse_body(payload)?;
    let identity = identity_from(input.email, input.phone)?;

    debug!(%kind, "Creating account");
    let token = state
        .credential_service
        .sign_up(kind, identity, &input.full_name, &input.password)
        .await?;

    info!(%kind, "Successfully signed up");
    Ok(Json(TokenResponse { token }))
}

/// POST /auth/v1/sign-up/owner
#[instrument(name = "sign_up_owner", skip(state, payload))]
pub async fn sign_up_owner(
    State(state): State<AppState>,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, AppError> {
    sign_up(&state, AccountKind::Owner, payload).await
}

/// POST /auth/v1/sign-up/vet
#[instrument(name = "sign_up_vet", skip(state, payload))]
pub async fn sign_up_vet(
    State(state): State<AppState>,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, AppError> {
    sign_up(&state, AccountKind::Vet, payload).await
}

/// POST /auth/v1/sign-in
#[instrument(name = "sign_in", skip(state, payload))]
pub async fn sign_in(
    State(state): State<AppState>,
    payload: Result<Json<SignInRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, AppError> {
    let input = parse_body(payload)?;
    let identity = identity_from(input.email, input.phone)?;
    let kind = if input.is_vet {
        AccountKind::Vet
    } else {
        AccountKind::Owner
    };

    let token = state
        .credential_service
        .sign_in(kind, &identity, &input.password)
        .await?;

    info!(%kind, "Successfully signed in");
    Ok(Json(TokenResponse { token }))
}

/// GET /auth/v1/validate, behind `jwt_auth`
pub async fn validate(Extension(claims): Extension<CredentialClaims>) -> Json<ValidateResponse> {
    Json(ValidateResponse {
        user_id: claims.user_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::{
        config::CredentialConfig, repository::InMemoryCredentialStore, service::CredentialService,
    };
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use chrono::Duration;
    use std::sync::Arc;
    use tower::ServiceExt; // for `oneshot`

    fn app() -> Router {
        let service = CredentialService::new(
            Arc::new(InMemoryCredentialStore::new()),
            &CredentialConfig::new("salt", "key", Duration::hours(1)),
        );

        Router::new()
            .route("/sign-up/owner", axum::routing::post(sign_up_owner))
            .with_state(AppState::new(Arc::new(service)))
    }

    fn post(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/sign-up/owner")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_sign_up_owner_handler() {
        let response = app()
            .oneshot(post(r#"{"email":"a@x.com","full_name":"Ann","password":"pw"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let token_response: TokenResponse = serde_json::from_slice(&body).unwrap();
        assert!(token_response.token.contains('.'));
    }

    #[tokio::test]
    async fn test_sign_up_without_identity_is_bad_request() {
        let response = app()
            .oneshot(post(r#"{"email":"  ","full_name":"Ann","password":"pw"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let response = app().oneshot(post(r#"{"email":"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app()
            .oneshot(post(r#"{"email":"a@x.com"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
