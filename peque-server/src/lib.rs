//! Peque Store Server - 二手童装门店的预约与库存服务
//!
//! # 架构概述
//!
//! 本模块是门店服务端的主入口，提供以下核心功能：
//!
//! - **预约** (`booking`): 可预约时段计算 + 收货资格校验（纯逻辑）
//! - **数据库** (`db`): SQLite 存储 (sqlx) 与仓储层
//! - **认证** (`auth`): JWT 校验与角色归一化（令牌由上游认证服务签发）
//! - **变更订阅** (`sync`): 进程内变更广播 (ChangeFeed)
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! peque-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 校验、角色
//! ├── booking/       # 时段可用性、收货资格、统计窗口
//! ├── sync/          # 变更广播
//! ├── api/           # HTTP 路由和处理器
//! ├── utils/         # 工具函数
//! └── db/            # 数据库层
//! ```

pub mod api;
pub mod auth;
pub mod booking;
pub mod core;
pub mod db;
pub mod sync;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use sync::ChangeFeed;
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
    ____
   / __ \___  ____ ___  _____
  / /_/ / _ \/ __ `/ / / / _ \
 / ____/  __/ /_/ / /_/ /  __/
/_/    \___/\__, /\__,_/\___/
              /_/
    "#
    );
}

/// 设置运行环境 (dotenv + 日志)
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    init_logger();
    Ok(())
}
