//! # Event Sourcing
//!
//! 命令处理器契约以及宿主应用始终需要的三个固定服务。
//!
//! - [`CommandHandler`] - "处理类型为 `C` 的命令" 的泛型契约
//! - [`handles`] - 为类型描述符生成 `CommandHandler<C>` 能力
//! - [`EventPublisher`] - 已提交事件的广播
//! - [`StateConnector`] - 通过发布器提交处理器产生的事件
//! - [`CommandDispatcher`] - 从容器解析命令处理器并调用

pub mod command;
pub mod connector;
pub mod dispatcher;
pub mod errors;
pub mod publisher;

pub use command::*;
pub use connector::StateConnector;
pub use dispatcher::CommandDispatcher;
pub use errors::{DispatchError, HandlerError};
pub use publisher::EventPublisher;
