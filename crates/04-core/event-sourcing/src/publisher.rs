//! 事件发布器

use crate::command::CommittedEvent;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tracing::debug;

/// 事件发布器
///
/// 把已提交的事件广播给所有订阅者；没有订阅者时事件直接丢弃。
#[derive(Debug)]
pub struct EventPublisher {
    sender: broadcast::Sender<CommittedEvent>,
    published: AtomicU64,
}

impl EventPublisher {
    /// 默认广播缓冲区大小
    pub const DEFAULT_CAPACITY: usize = 256;

    /// 创建发布器
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// 以指定缓冲区大小创建发布器
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            published: AtomicU64::new(0),
        }
    }

    /// 订阅事件
    pub fn subscribe(&self) -> broadcast::Receiver<CommittedEvent> {
        self.sender.subscribe()
    }

    /// 发布事件，返回收到事件的订阅者数量
    pub fn publish(&self, event: CommittedEvent) -> usize {
        self.published.fetch_add(1, Ordering::Relaxed);
        let event_type = event.event_type();
        let receivers = self.sender.send(event).unwrap_or(0);
        debug!("发布事件: {} -> {} 个订阅者", event_type, receivers);
        receivers
    }

    /// 已发布事件数量
    pub fn published_count(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}
