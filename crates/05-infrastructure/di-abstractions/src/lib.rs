//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义服务注册、服务解析以及编译时类型发现的核心接口。
//!
//! ## 核心接口
//!
//! - [`ServiceRegistry`] - 服务注册表接口
//! - [`ServiceResolver`] - 服务解析接口
//! - [`TypeModule`] - 可被扫描的类型模块
//! - [`TypeScanner`] - 泛型契约扫描器接口
//! - [`TypeDescriptor`] / [`Capability`] - 代替运行时反射的类型描述表

pub mod discovery;
pub mod factory;
pub mod registry;
pub mod resolver;
pub mod scanner;

pub use discovery::*;
pub use factory::*;
pub use registry::*;
pub use resolver::*;
pub use scanner::*;
