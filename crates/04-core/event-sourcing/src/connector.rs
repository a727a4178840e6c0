//! 状态连接器

use crate::command::CommittedEvent;
use crate::publisher::EventPublisher;
use std::sync::Arc;
use tracing::debug;

/// 状态连接器
///
/// 处理器产生的事件经由它提交，提交即发布。
#[derive(Debug, Clone)]
pub struct StateConnector {
    publisher: Arc<EventPublisher>,
}

impl StateConnector {
    /// 创建状态连接器
    pub fn new(publisher: Arc<EventPublisher>) -> Self {
        Self { publisher }
    }

    /// 提交事件，返回提交数量
    pub fn commit(&self, events: &[CommittedEvent]) -> usize {
        for event in events {
            self.publisher.publish(Arc::clone(event));
        }
        debug!("提交 {} 个事件", events.len());
        events.len()
    }

    /// 使用的事件发布器
    pub fn publisher(&self) -> &Arc<EventPublisher> {
        &self.publisher
    }
}
