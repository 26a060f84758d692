use anyhow::{Context, Result};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::entities::sea_orm_active_enums::RoleEnum;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub username: String,
    pub role: RoleEnum,
    pub exp: i64,
    pub iat: i64,
}

pub struct JwtManager {
    secret: String,
}

impl JwtManager {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn create_token(
        &self,
        user_id: &str,
        username: &str,
        role: RoleEnum,
        ttl_seconds: i64,
    ) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: user_id.to_string(),
            username: username.to_string(),
            role,
            exp: now + ttl_seconds,
            iat: now,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .context("Failed to sign session token")
    }

    /// Verifies signature and expiry. Expired or tampered tokens fail,
    /// which is what makes a stale session snapshot unrestorable.
    pub fn verify_token(&self, token: &str) -> Result<SessionClaims> {
        let data = decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .context("Invalid session token")?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trip() {
        let manager = JwtManager::new("test-secret");
        let token = manager
            .create_token("u-1", "alice", RoleEnum::Mentor, 3600)
            .unwrap();

        let claims = manager.verify_token(&token).unwrap();
        assert_eq!(claims.sub, "u-1");
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.role, RoleEnum::Mentor);
    }

    #[test]
    fn expired_token_is_rejected() {
        let manager = JwtManager::new("test-secret");
        let token = manager
            .create_token("u-1", "alice", RoleEnum::Mentor, -120)
            .unwrap();
        assert!(manager.verify_token(&token).is_err());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = JwtManager::new("secret-a")
            .create_token("u-1", "alice", RoleEnum::Admin, 3600)
            .unwrap();
        assert!(JwtManager::new("secret-b").verify_token(&token).is_err());
    }
}
