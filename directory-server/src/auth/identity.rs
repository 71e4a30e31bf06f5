//! 请求身份
//!
//! [`Identity`] 是已认证的主体；[`Viewer`] 是请求携带的身份 (可能为匿名)。

use shared::models::Role;

use super::jwt::{Claims, JwtError};
use super::CredentialService;

/// 由 bearer 令牌解析出的已认证主体
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// 用户 ID (users 表)
    pub user_id: i64,
    pub email: String,
    pub role: Role,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl TryFrom<Claims> for Identity {
    type Error = JwtError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let user_id = claims
            .sub
            .parse()
            .map_err(|_| JwtError::InvalidToken(format!("Invalid subject: {}", claims.sub)))?;
        let role = Role::from_db(&claims.role)
            .ok_or_else(|| JwtError::InvalidToken(format!("Unknown role: {}", claims.role)))?;

        Ok(Self {
            user_id,
            email: claims.email,
            role,
        })
    }
}

/// 请求携带的身份，可能为空
///
/// 作为请求数据注入每个 GraphQL 请求。缺失或无效的 bearer 令牌得到匿名
/// viewer，由各操作自行决定是否接受。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewer(pub Option<Identity>);

impl Viewer {
    pub fn anonymous() -> Self {
        Self(None)
    }

    pub fn authenticated(identity: Identity) -> Self {
        Self(Some(identity))
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.0.as_ref()
    }

    /// 从 `Authorization` 头的值解析 viewer
    pub fn from_authorization(credentials: &CredentialService, header: Option<&str>) -> Self {
        let Some(header) = header else {
            return Self::anonymous();
        };

        let Some(token) = super::JwtService::extract_from_header(header) else {
            security_log!("WARN", "malformed_authorization", scheme = "non-bearer");
            return Self::anonymous();
        };

        match credentials.verify_token(token) {
            Ok(identity) => Self::authenticated(identity),
            Err(e) => {
                security_log!("WARN", "invalid_token", reason = %e);
                Self::anonymous()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{JwtConfig, JwtService};

    fn credentials() -> CredentialService {
        CredentialService::new(JwtService::with_config(JwtConfig::with_secret(
            "test-secret-key-with-at-least-32-characters",
        )))
    }

    #[test]
    fn test_missing_header_is_anonymous() {
        assert_eq!(
            Viewer::from_authorization(&credentials(), None),
            Viewer::anonymous()
        );
    }

    #[test]
    fn test_invalid_token_is_anonymous() {
        let viewer = Viewer::from_authorization(&credentials(), Some("Bearer garbage"));
        assert!(viewer.identity().is_none());

        let viewer = Viewer::from_authorization(&credentials(), Some("Token abc"));
        assert!(viewer.identity().is_none());
    }

    #[test]
    fn test_valid_token_resolves_identity() {
        let credentials = credentials();
        let token = credentials
            .jwt()
            .generate_token(7, "grace@x.com", Role::Admin)
            .unwrap();
        let header = format!("Bearer {token}");

        let viewer = Viewer::from_authorization(&credentials, Some(header.as_str()));
        let identity = viewer.identity().expect("identity");
        assert_eq!(identity.user_id, 7);
        assert_eq!(identity.email, "grace@x.com");
        assert!(identity.is_admin());
    }

    #[test]
    fn test_unknown_role_claim_rejected() {
        let claims = Claims {
            sub: "1".into(),
            email: "a@x.com".into(),
            role: "SUPERUSER".into(),
            exp: 0,
            iat: 0,
            iss: String::new(),
            aud: String::new(),
        };
        assert!(Identity::try_from(claims).is_err());
    }
}
