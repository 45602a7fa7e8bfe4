//! 认证授权模块
//!
//! 提供 JWT 校验、角色归一化和中间件：
//! - [`JwtService`] - JWT 令牌服务 (校验上游签发的令牌)
//! - [`CurrentUser`] - 当前用户上下文 (角色已归一化)
//! - [`require_auth`] - 认证中间件 (公共预约路由除外)

pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;
