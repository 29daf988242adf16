//! JWT validation and decoding.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use innkeeper_core::config::AuthConfig;
use innkeeper_core::error::AppError;

use super::claims::{Claims, TokenType};

/// Validates and decodes JWTs issued by [`super::encoder::JwtEncoder`].
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation parameters (algorithm + expiry).
    validation: Validation,
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        // Claims carry no audience; don't reject for a missing one.
        validation.validate_aud = false;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decode and validate an access token.
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decode(token)?;
        if claims.token_type != TokenType::Access {
            return Err(AppError::authentication(
                "Expected an access token, got a refresh token",
            ));
        }
        Ok(claims)
    }

    /// Decode and validate a refresh token.
    pub fn decode_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decode(token)?;
        if claims.token_type != TokenType::Refresh {
            return Err(AppError::authentication(
                "Expected a refresh token, got an access token",
            ));
        }
        Ok(claims)
    }

    fn decode(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::authentication(format!("Invalid or expired token: {e}")))
    }
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::encoder::JwtEncoder;
    use chrono::Utc;
    use innkeeper_entity::user::{User, UserRole, UserStatus};
    use uuid::Uuid;

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret-key-for-unit-tests".to_string(),
            jwt_access_ttl_minutes: 30,
            jwt_refresh_ttl_hours: 72,
            min_password_length: 8,
        }
    }

    fn test_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Front Desk".to_string(),
            email: "desk@example.com".to_string(),
            password_hash: "unused".to_string(),
            role: UserRole::Receptionist,
            status: UserStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            last_login_at: None,
        }
    }

    #[test]
    fn test_round_trip() {
        let config = test_config();
        let encoder = JwtEncoder::new(&config);
        let decoder = JwtDecoder::new(&config);
        let user = test_user();

        let pair = encoder.generate_token_pair(&user).unwrap();
        let claims = decoder.decode_access_token(&pair.access_token).unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.role, UserRole::Receptionist);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_refresh_token_rejected_as_access() {
        let config = test_config();
        let encoder = JwtEncoder::new(&config);
        let decoder = JwtDecoder::new(&config);

        let pair = encoder.generate_token_pair(&test_user()).unwrap();
        assert!(decoder.decode_access_token(&pair.refresh_token).is_err());
        assert!(decoder.decode_refresh_token(&pair.refresh_token).is_ok());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let encoder = JwtEncoder::new(&test_config());
        let mut other = test_config();
        other.jwt_secret = "a-different-secret".to_string();
        let decoder = JwtDecoder::new(&other);

        let pair = encoder.generate_token_pair(&test_user()).unwrap();
        assert!(decoder.decode_access_token(&pair.access_token).is_err());
    }
}
