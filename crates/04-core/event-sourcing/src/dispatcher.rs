//! 命令分发器

use crate::command::{Command, CommandHandler, CommittedEvent};
use crate::connector::StateConnector;
use crate::errors::DispatchError;
use di_abstractions::{ResolverExt, ServiceResolver};
use tracing::debug;

/// 命令分发器
///
/// 按命令类型从容器解析 `dyn CommandHandler<C>`，调用后通过 [`StateConnector`] 提交事件。
#[derive(Debug, Default)]
pub struct CommandDispatcher;

impl CommandDispatcher {
    /// 创建分发器
    pub fn new() -> Self {
        Self
    }

    /// 分发命令
    pub async fn dispatch<C: Command>(
        &self,
        resolver: &dyn ServiceResolver,
        command: C,
    ) -> Result<Vec<CommittedEvent>, DispatchError> {
        let handler = resolver.resolve::<dyn CommandHandler<C>>()?;
        let connector = resolver.resolve::<StateConnector>()?;
        debug!("分发命令: {}", std::any::type_name::<C>());

        let events = handler.handle(command).await?;
        connector.commit(&events);
        Ok(events)
    }
}
