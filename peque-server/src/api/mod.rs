//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`appointments`] - 顾客预约向导接口 (公共)
//! - [`admin`] - 预约后台管理接口 (员工)
//! - [`inventory`] - POS 库存接口 (员工 / 管理级)

pub mod admin;
pub mod appointments;
pub mod health;
pub mod inventory;

// Re-export common types for handlers
pub use crate::utils::AppResult;
