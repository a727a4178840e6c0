//! 命令、事件与命令处理器契约

use crate::errors::HandlerError;
use async_trait::async_trait;
use di_abstractions::{Capability, ContractDescriptor, TypeArg};
use std::fmt::Debug;
use std::sync::Arc;

/// 命令标记 trait
pub trait Command: Send + Sync + 'static {}

/// 领域事件
pub trait Event: Debug + Send + Sync + 'static {
    /// 事件类型名称
    fn event_type(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// 已提交的事件
pub type CommittedEvent = Arc<dyn Event>;

/// 命令处理器契约
///
/// 一个类型可以对多个命令类型分别实现此 trait。
#[async_trait]
pub trait CommandHandler<C: Command>: Send + Sync {
    /// 处理命令，返回产生的事件
    async fn handle(&self, command: C) -> Result<Vec<CommittedEvent>, HandlerError>;
}

/// `CommandHandler<C>` 的契约描述符
pub const COMMAND_HANDLER: ContractDescriptor = ContractDescriptor::new("CommandHandler", 1);

/// 命令处理器契约描述符
pub fn command_handler_contract() -> ContractDescriptor {
    COMMAND_HANDLER
}

/// `H` 实现 `CommandHandler<C>` 的能力
pub fn handles<H, C>() -> Capability
where
    H: CommandHandler<C> + 'static,
    C: Command,
{
    Capability::specialized::<H, dyn CommandHandler<C>>(
        COMMAND_HANDLER,
        vec![TypeArg::of::<C>()],
        as_command_handler::<H, C>,
    )
}

/// 命令类型仍是未绑定类型参数的 `CommandHandler` 能力，用于描述开放泛型处理器
pub fn handles_parameter(parameter: &'static str) -> Capability {
    Capability::marker(COMMAND_HANDLER, vec![TypeArg::parameter(parameter)])
}

fn as_command_handler<H, C>(handler: Arc<H>) -> Arc<dyn CommandHandler<C>>
where
    H: CommandHandler<C> + 'static,
    C: Command,
{
    handler
}
