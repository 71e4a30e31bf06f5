//! 认证授权模块
//!
//! - [`JwtService`] - JWT 令牌服务
//! - [`CredentialService`] - 密码摘要与令牌签发/校验
//! - [`Identity`] / [`Viewer`] - 请求身份
//! - [`guard`] - 访问控制与字段脱敏

pub mod credentials;
pub mod guard;
pub mod identity;
pub mod jwt;
pub mod password;

pub use credentials::CredentialService;
pub use guard::{redact, require_admin, require_authenticated};
pub use identity::{Identity, Viewer};
pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
