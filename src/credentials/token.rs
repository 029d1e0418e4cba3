use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, instrument};

use super::{config::CredentialConfig, error::CredentialError, types::CredentialClaims};

/// Issues and verifies HMAC-signed JWTs
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    pub ttl: Duration,
}

impl TokenIssuer {
    pub fn new(config: &CredentialConfig) -> Self {
        // Only the HMAC family is accepted, whatever the header claims.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.signing_key()),
            decoding_key: DecodingKey::from_secret(config.signing_key()),
            validation,
            ttl: config.token_ttl,
        }
    }

    /// Signs fresh claims for `user_id`, valid for the configured TTL
    #[instrument(skip(self, full_name))]
    pub fn issue_token(
        &self,
        user_id: i64,
        full_name: &str,
        is_vet: bool,
    ) -> Result<String, CredentialError> {
        let now = Utc::now();
        let exp = (now + self.ttl).timestamp();

        debug!(
            ttl_seconds = self.ttl.num_seconds(),
            exp_timestamp = exp,
            "Creating JWT token with expiration"
        );

        let claims = CredentialClaims {
            exp,
            iat: now.timestamp(),
            user_id,
            full_name: full_name.to_string(),
            is_vet,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            debug!(error = %e, "Failed to encode JWT token");
            CredentialError::Internal(e.to_string())
        })
    }

    /// Verifies signature, algorithm family and expiry and returns the claims
    #[instrument(skip(self, token))]
    pub fn validate_token(&self, token: &str) -> Result<CredentialClaims, CredentialError> {
        debug!("Decoding and validating JWT token");

        decode::<CredentialClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| {
                debug!(
                    user_id = data.claims.user_id,
                    exp = data.claims.exp,
                    "JWT token decoded successfully"
                );
                data.claims
            })
            .map_err(|e| {
                debug!(error = %e, "Failed to decode JWT token");
                CredentialError::from(e)
            })
    }

    /// Returns the account id embedded in a valid token
    pub fn parse_token(&self, token: &str) -> Result<i64, CredentialError> {
        self.validate_token(token).map(|claims| claims.user_id)
    }
}
