//! 错误类型 re-export
//!
//! 统一错误系统定义在 `shared::error`，这里只是 re-export，
//! 让 server 端代码通过 `crate::utils` 拿到全部错误类型。

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};

/// 便捷函数：成功响应
pub fn ok<T: serde::Serialize>(data: T) -> ApiResponse<T> {
    ApiResponse::success(data)
}
