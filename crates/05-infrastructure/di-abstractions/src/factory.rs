//! 服务工厂
//!
//! 容器中的实例统一以 `Arc<dyn Any>` 存放，内部包裹的是 `Arc<S>`，
//! 其中 `S` 是注册键对应的服务类型（具体类型或 trait object）。

use crate::resolver::ServiceResolver;
use infrastructure_common::{DependencyError, TypeInfo};
use std::any::Any;
use std::sync::Arc;

/// 类型擦除后的服务实例，内部为 `Arc<S>`
pub type Instance = Arc<dyn Any + Send + Sync>;

/// 服务工厂函数类型
pub type ServiceFactory =
    Arc<dyn Fn(&dyn ServiceResolver) -> Result<Instance, DependencyError> + Send + Sync>;

/// 将返回 `Arc<S>` 的函数包装为服务工厂
pub fn factory_for<S, F>(factory: F) -> ServiceFactory
where
    S: ?Sized + Send + Sync + 'static,
    F: Fn(&dyn ServiceResolver) -> Result<Arc<S>, DependencyError> + Send + Sync + 'static,
{
    Arc::new(move |resolver| factory(resolver).map(|service| Arc::new(service) as Instance))
}

/// 将具体类型的构造函数包装为服务工厂
pub fn constructor_for<T, F>(constructor: F) -> ServiceFactory
where
    T: Send + Sync + 'static,
    F: Fn(&dyn ServiceResolver) -> Result<T, DependencyError> + Send + Sync + 'static,
{
    factory_for::<T, _>(move |resolver| constructor(resolver).map(Arc::new))
}

/// 从类型擦除的实例中取回 `Arc<S>`
pub fn downcast_service<S>(instance: &Instance, produced_by: &str) -> Result<Arc<S>, DependencyError>
where
    S: ?Sized + Send + Sync + 'static,
{
    instance
        .downcast_ref::<Arc<S>>()
        .cloned()
        .ok_or_else(|| DependencyError::TypeMismatch {
            expected: TypeInfo::of::<S>().name,
            actual: produced_by.to_string(),
        })
}
