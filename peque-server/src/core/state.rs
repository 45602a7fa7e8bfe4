use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::sync::ChangeFeed;
use crate::utils::AppError;

/// 服务器状态 - 持有所有服务的共享引用
///
/// ServerState 是服务端的核心数据结构，使用 Arc 实现浅拷贝，
/// 所有权成本极低，可以安全地 clone 进每个请求处理函数。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | pool | SqlitePool | SQLite 连接池 |
/// | jwt_service | Arc<JwtService> | JWT 校验服务 |
/// | change_feed | Arc<ChangeFeed> | 进程内变更广播 |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 连接池
    pub pool: SqlitePool,
    /// JWT 校验服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
    /// 变更广播 (用于 broadcast_sync 自动递增版本号)
    pub change_feed: Arc<ChangeFeed>,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`ServerState::initialize`] 代替；测试场景传入
    /// 内存数据库连接池直接构造。
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        Self {
            jwt_service: Arc::new(JwtService::with_config(config.jwt.clone())),
            change_feed: Arc::new(ChangeFeed::new()),
            config,
            pool,
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 数据库 (work_dir/database/peque.db，含迁移)
    /// 3. JWT 服务与变更广播
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        let db_path = config.database_dir().join("peque.db");
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;

        Ok(Self::new(config.clone(), db_service.pool))
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// 广播同步消息
    ///
    /// 向所有订阅者广播资源变更通知。版本号由 [`ChangeFeed`] 自动递增，
    /// 订阅方以服务器返回的权威数据替换本地副本，而不是假定自己的
    /// 乐观更新已经生效。
    ///
    /// # 参数
    /// - `resource`: 资源类型 (如 "appointment", "subcategory")
    /// - `action`: 变更类型 ("created", "updated", "deleted")
    /// - `id`: 资源 ID
    /// - `data`: 资源数据 (deleted 时为 None)
    pub async fn broadcast_sync<T: serde::Serialize>(
        &self,
        resource: &str,
        action: &str,
        id: &str,
        data: Option<&T>,
    ) {
        self.change_feed.publish(resource, action, id, data);
    }
}
