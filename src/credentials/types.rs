use serde::{Deserialize, Serialize};

/// JWT claims carried by every issued token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CredentialClaims {
    pub exp: i64, // Expiration timestamp (standard JWT claim)
    pub iat: i64, // Issued at timestamp (standard JWT claim)
    #[serde(rename = "UserId")]
    pub user_id: i64,
    #[serde(rename = "FullName", default)]
    pub full_name: String,
    #[serde(rename = "IsVet", default)]
    pub is_vet: bool,
}

/// Request body for the sign-up endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub full_name: String,
    pub password: String,
}

/// Request body for the sign-in endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub password: String,
    #[serde(default)]
    pub is_vet: bool,
}

/// Response structure for sign-up and sign-in
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TokenResponse {
    pub token: String,
}

/// Response structure for token validation
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ValidateResponse {
    pub user_id: i64,
}
