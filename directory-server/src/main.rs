use anyhow::Context;
use directory_server::{Config, Server, ServerState, init_logger_with_file};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 加载 .env
    let _ = dotenvy::dotenv();

    // 2. 加载配置
    let config = Config::from_env().context("Failed to load configuration")?;

    // 3. 日志
    init_logger_with_file(
        Some(&config.log_level),
        config.log_json,
        config.log_dir.as_deref(),
    );
    tracing::info!("Staff directory starting (env: {})", config.environment);

    // 4. 初始化服务器状态
    let state = ServerState::initialize(&config)
        .await
        .context("Failed to initialize server state")?;

    // 5. 启动 HTTP 服务器
    Server::with_state(config, state)
        .run()
        .await
        .context("Server error")?;

    Ok(())
}
