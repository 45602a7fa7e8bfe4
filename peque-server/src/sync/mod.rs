//! 进程内变更广播
//!
//! 预约、子类目、库存等资源发生写操作后，向所有订阅者推送
//! [`SyncPayload`]。每个资源维护单调递增的版本号，订阅方据此
//! 判断是否落后，并用服务器返回的权威数据替换本地副本。

use dashmap::DashMap;
use serde::Serialize;
use shared::message::SyncPayload;
use tokio::sync::broadcast;

/// 广播通道容量 — 慢消费者会丢掉最旧的消息 (Lagged)
const CHANNEL_CAPACITY: usize = 256;

/// 资源版本追踪 + 广播通道
pub struct ChangeFeed {
    /// 每个资源的当前版本号
    versions: DashMap<String, u64>,
    /// 广播发送端 (无订阅者时 send 失败是正常情况)
    sender: broadcast::Sender<SyncPayload>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            versions: DashMap::new(),
            sender,
        }
    }

    /// 获取资源当前版本号 (从未变更过的资源为 0)
    pub fn version(&self, resource: &str) -> u64 {
        self.versions.get(resource).map(|v| *v).unwrap_or(0)
    }

    /// 订阅变更通知
    pub fn subscribe(&self) -> broadcast::Receiver<SyncPayload> {
        self.sender.subscribe()
    }

    /// 发布资源变更
    ///
    /// 版本号先递增再广播，保证订阅方看到的版本单调递增。
    pub fn publish<T: Serialize>(
        &self,
        resource: &str,
        action: &str,
        id: &str,
        data: Option<&T>,
    ) {
        let version = {
            let mut entry = self.versions.entry(resource.to_string()).or_insert(0);
            *entry += 1;
            *entry
        };

        let data = data.and_then(|d| match serde_json::to_value(d) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Failed to serialize sync payload for {resource}: {e}");
                None
            }
        });

        let payload = SyncPayload {
            resource: resource.to_string(),
            version,
            action: action.to_string(),
            id: id.to_string(),
            data,
        };

        // 没有订阅者时 send 返回 Err，不算错误
        if self.sender.send(payload).is_ok() {
            tracing::debug!("Broadcast {resource} {action} (v{version})");
        }
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ChangeFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeFeed")
            .field("resources", &self.versions.len())
            .finish()
    }
}
