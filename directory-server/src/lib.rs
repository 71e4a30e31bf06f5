//! 员工目录服务
//!
//! 基于 GraphQL 的员工目录，两种角色：管理员维护员工信息；
//! 所有已登录用户均可浏览、搜索和标记员工。
//!
//! # 模块结构
//!
//! ```text
//! directory-server/src/
//! ├── core/        # 配置、状态、服务器
//! ├── auth/        # JWT、Argon2、访问控制
//! ├── directory/   # 列表参数翻译、目录服务
//! ├── db/          # 存储 (PostgreSQL / 内存)
//! ├── graphql/     # GraphQL schema
//! ├── api/         # HTTP 路由
//! └── utils/       # 日志
//! ```

// 安全日志宏 - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr $(, $($fields:tt)+)?) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event
            $(, $($fields)+)?
        );
    };
}

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod directory;
pub mod graphql;
pub mod utils;

// Re-export 公共类型
pub use auth::{CredentialService, Identity, JwtService, Viewer};
pub use core::{Config, Server, ServerState};
pub use directory::DirectoryService;
pub use graphql::{DirectorySchema, build_schema};

// Re-export shared 中的统一错误类型
pub use shared::error::{AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export 日志初始化函数
pub use utils::logger::{init_logger, init_logger_with_file};
