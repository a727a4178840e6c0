//! # 事件溯源组合层
//!
//! 负责把命令处理器自动绑定到依赖注入注册表：
//!
//! - **类型扫描**: [`GenericContractScanner`] 在显式给出的模块中查找泛型契约的全部特化
//! - **绑定**: [`HandlerBinder`] 把每个（特化, 实现类型）注册到 [`ServiceRegistry`]
//! - **固定服务**: [`FixedServices`] 注册状态连接器、命令分发器和事件发布器
//! - **配置**: [`EventSourcingOptions`] 控制是否扫描以及各服务的生命周期
//!
//! ## 基本使用
//!
//! ```rust,ignore
//! use di_abstractions::{StaticModule, TypeModule};
//! use di_impl::ServiceCollection;
//! use event_sourcing_composition::{EventSourcingOptions, EventSourcingRegistryExt};
//!
//! let handlers = StaticModule::new("billing").with_described::<InvoiceHandler>();
//! let modules: [&dyn TypeModule; 1] = [&handlers];
//!
//! let mut services = ServiceCollection::new();
//! let summary = services.add_event_sourcing(
//!     &EventSourcingOptions::new().with_handler_scanning(true),
//!     &modules,
//! )?;
//! println!("注册了 {} 个命令处理器", summary.handler_bindings);
//! ```
//!
//! [`ServiceRegistry`]: di_abstractions::ServiceRegistry

pub mod binder;
pub mod extension;
pub mod logging;
pub mod options;
pub mod type_scanner;


pub use binder::{FixedServices, HandlerBinder};
pub use extension::{EventSourcingRegistryExt, SetupSummary};
pub use logging::{init_logging, LoggingConfig};
pub use options::EventSourcingOptions;
pub use type_scanner::GenericContractScanner;

// 重新导出错误类型
pub use infrastructure_common::InfrastructureError;
