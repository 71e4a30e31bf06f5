//! Credential service
//!
//! Password digests and bearer tokens behind one handle, so the directory
//! service never touches argon2 or jsonwebtoken directly.

use shared::error::{AppError, AppResult};
use shared::models::UserRecord;

use super::identity::Identity;
use super::jwt::{JwtError, JwtService};
use super::password;

#[derive(Debug, Clone)]
pub struct CredentialService {
    jwt: JwtService,
}

impl CredentialService {
    pub fn new(jwt: JwtService) -> Self {
        Self { jwt }
    }

    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    pub fn hash(&self, plaintext: &str) -> AppResult<String> {
        password::hash_password(plaintext).map_err(|e| {
            tracing::error!(error = %e, "Password hashing failed");
            AppError::internal("Failed to hash password")
        })
    }

    pub fn verify(&self, plaintext: &str, digest: &str) -> bool {
        password::verify_password(plaintext, digest)
    }

    pub fn issue_token(&self, user: &UserRecord) -> AppResult<String> {
        self.jwt
            .generate_token(user.id, &user.email, user.role)
            .map_err(|e| {
                tracing::error!(error = %e, user_id = user.id, "Token generation failed");
                AppError::internal("Failed to issue token")
            })
    }

    pub fn verify_token(&self, token: &str) -> AppResult<Identity> {
        let claims = self.jwt.validate_token(token).map_err(|e| match e {
            JwtError::ExpiredToken => AppError::token_expired(),
            other => AppError::invalid_token(other.to_string()),
        })?;

        Identity::try_from(claims).map_err(|e| AppError::invalid_token(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::JwtConfig;
    use shared::ErrorCode;
    use shared::models::Role;

    #[test]
    fn test_issue_then_verify() {
        let credentials = CredentialService::new(JwtService::with_config(
            JwtConfig::with_secret("test-secret-key-with-at-least-32-characters"),
        ));
        let user = UserRecord {
            id: 99,
            email: "ada@x.com".into(),
            name: "Ada Lovelace".into(),
            hash_pass: String::new(),
            role: Role::Employee,
            created_at: 0,
            updated_at: 0,
        };

        let token = credentials.issue_token(&user).unwrap();
        let identity = credentials.verify_token(&token).unwrap();
        assert_eq!(identity.user_id, 99);
        assert_eq!(identity.role, Role::Employee);

        let err = credentials.verify_token("bogus").unwrap_err();
        assert_eq!(err.code, ErrorCode::TokenInvalid);
    }
}
