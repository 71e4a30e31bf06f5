use crate::auth::JwtConfig;
use crate::directory::ListingConfig;

use super::error::ServerError;

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | DATABASE_URL | (无) | PostgreSQL 连接串；development 下缺省时使用内存存储 |
/// | HTTP_PORT | 4000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | JWT_SECRET | (开发环境自动生成) | 令牌签名密钥，至少 32 字符 |
/// | JWT_EXPIRATION_MINUTES | 1440 | 令牌有效期(分钟) |
/// | JWT_ISSUER | directory-server | 令牌签发者 |
/// | JWT_AUDIENCE | directory-clients | 令牌受众 |
/// | DEFAULT_EMPLOYEE_PASSWORD | password123 | 新建员工登录账号的初始密码 |
/// | DB_MAX_CONNECTIONS | 10 | 连接池大小 |
/// | LOG_LEVEL | info | 日志级别 (被 RUST_LOG 覆盖) |
/// | LOG_JSON | false | JSON 格式日志 |
/// | LOG_DIR | (无) | 日志文件目录 (按天滚动) |
///
/// # 示例
///
/// ```ignore
/// DATABASE_URL=postgres://localhost/directory HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL 连接串
    pub database_url: Option<String>,
    /// HTTP 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 新建员工配套账号的初始密码
    pub default_employee_password: String,
    /// 连接池最大连接数
    pub db_max_connections: u32,
    /// 员工列表参数的默认值
    pub listing: ListingConfig,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self, ServerError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let jwt = JwtConfig::from_env(&environment)?;

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|s| !s.is_empty());
        if database_url.is_none() && environment != "development" {
            return Err(ServerError::Config(format!(
                "DATABASE_URL must be set in {environment} environment"
            )));
        }

        Ok(Self {
            database_url,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(4000),
            environment,
            jwt,
            default_employee_password: std::env::var("DEFAULT_EMPLOYEE_PASSWORD")
                .unwrap_or_else(|_| "password123".into()),
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            listing: ListingConfig::default(),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
        })
    }

    /// 内存存储的开发配置 (测试使用)
    pub fn for_development(jwt: JwtConfig) -> Self {
        Self {
            database_url: None,
            http_port: 0,
            environment: "development".into(),
            jwt,
            default_employee_password: "password123".into(),
            db_max_connections: 10,
            listing: ListingConfig::default(),
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
        }
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
