use crate::error::AppError;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Represents the claims encoded within an identity token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the user's unique identifier.
    pub sub: i64,
    /// Email of the user at issuance time.
    pub email: String,
    /// Expiration timestamp (seconds since epoch) for the token.
    pub exp: usize,
}

/// Issues and verifies HS256-signed identity tokens.
///
/// Owns the encoding and decoding keys, built once from the configured secret
/// at startup. Tokens are valid for 24 hours from issuance; validity is purely
/// signature plus expiry, there is no revocation list.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Generates a token for the given user.
    ///
    /// # Returns
    /// A `Result` containing the signed token string if successful.
    /// Returns `AppError::InternalServerError` if token encoding fails.
    pub fn issue(&self, user_id: i64, email: &str) -> Result<String, AppError> {
        let expiration = chrono::Utc::now()
            .checked_add_signed(chrono::Duration::hours(24))
            .expect("valid timestamp")
            .timestamp() as usize;

        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            exp: expiration,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
    }

    /// Verifies a token string and decodes its claims.
    ///
    /// Default validation checks apply: the signature must match, the
    /// algorithm must be HS256, and the token must not be expired. A token is
    /// either fully trusted or fully rejected.
    ///
    /// # Returns
    /// A `Result` containing the decoded `Claims` if the token is valid.
    /// Returns `AppError::Unauthorized` otherwise.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
    }
}
