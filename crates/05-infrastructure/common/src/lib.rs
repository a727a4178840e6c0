//! # Infrastructure Common
//!
//! 事件溯源绑定器各层共享的基础定义。
//!
//! ## 核心类型
//!
//! - [`TypeInfo`] - 稳定的类型标识（`TypeId` + 可读名称）
//! - [`Lifetime`] - 服务生命周期（瞬时 / 单例）
//! - [`DependencyError`] / [`ComponentError`] / [`ConfigError`] - 分层错误类型
//! - [`InfrastructureError`] - 启动阶段的顶层错误
//!
//! ## 设计原则
//!
//! - 基于 Rust 类型系统的编译时安全
//! - 不依赖运行时反射，类型信息全部来自 `TypeId` 与 `type_name`

pub mod errors;
pub mod lifecycle;
pub mod metadata;

pub use errors::*;
pub use lifecycle::*;
pub use metadata::*;
