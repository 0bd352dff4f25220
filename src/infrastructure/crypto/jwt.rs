//! JWT Token handling

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::SecurityConfig;
use crate::domain::UserRole;

pub const TOKEN_ISSUER: &str = "car-rental";

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token expiration time in hours
    pub expiration_hours: i64,
    /// Issuer claim
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self::from(&SecurityConfig::default())
    }
}

impl From<&SecurityConfig> for JwtConfig {
    fn from(cfg: &SecurityConfig) -> Self {
        Self {
            secret: cfg.jwt_secret.clone(),
            expiration_hours: cfg.jwt_expiration_hours,
            issuer: TOKEN_ISSUER.to_string(),
        }
    }
}

impl JwtConfig {
    pub fn expires_in_secs(&self) -> i64 {
        self.expiration_hours * 3600
    }
}

/// JWT TokenClaims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    /// Subject (user ID)
    pub sub: String,
    pub username: String,
    /// `USER` or `ADMIN`
    pub role: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    pub iss: String,
}

impl TokenClaims {
    pub fn new(user_id: i32, username: &str, role: UserRole, config: &JwtConfig) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(config.expiration_hours);

        Self {
            sub: user_id.to_string(),
            username: username.to_string(),
            role: role.as_str().to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: config.issuer.clone(),
        }
    }

    /// Numeric user id from `sub`
    pub fn user_id(&self) -> Option<i32> {
        self.sub.parse().ok()
    }

    pub fn role(&self) -> UserRole {
        UserRole::from_str(&self.role)
    }

    pub fn is_admin(&self) -> bool {
        self.role().is_admin()
    }
}

/// Create a JWT token for a user
pub fn create_token(
    user_id: i32,
    username: &str,
    role: UserRole,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let token_claims = TokenClaims::new(user_id, username, role, config);

    encode(
        &Header::default(),
        &token_claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify and decode a JWT token
pub fn verify_token(
    token: &str,
    config: &JwtConfig,
) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.set_issuer(&[&config.issuer]);

    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".into(),
            expiration_hours: 1,
            issuer: TOKEN_ISSUER.into(),
        }
    }

    #[test]
    fn token_round_trip() {
        let token = create_token(42, "lan", UserRole::Admin, &config()).unwrap();
        let claims = verify_token(&token, &config()).unwrap();
        assert_eq!(claims.user_id(), Some(42));
        assert_eq!(claims.username, "lan");
        assert!(claims.is_admin());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = create_token(1, "lan", UserRole::User, &config()).unwrap();
        let other = JwtConfig {
            secret: "other".into(),
            ..config()
        };
        assert!(verify_token(&token, &other).is_err());
    }

    #[test]
    fn wrong_issuer_is_rejected() {
        let foreign = JwtConfig {
            issuer: "someone-else".into(),
            ..config()
        };
        let token = create_token(1, "lan", UserRole::User, &foreign).unwrap();
        assert!(verify_token(&token, &config()).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let expired = JwtConfig {
            expiration_hours: -2,
            ..config()
        };
        let token = create_token(1, "lan", UserRole::User, &expired).unwrap();
        assert!(verify_token(&token, &config()).is_err());
    }
}
