//! 服务解析器抽象接口

use crate::factory::{downcast_service, Instance};
use crate::registry::ServiceKey;
use infrastructure_common::DependencyError;
use std::sync::Arc;

/// 服务解析器 trait
///
/// 对象安全的解析入口，服务工厂通过它获取自己的依赖。
pub trait ServiceResolver: Send + Sync {
    /// 解析指定键的服务，多次注册时返回最后一次注册
    fn resolve_instance(&self, key: &ServiceKey) -> Result<Instance, DependencyError>;

    /// 按注册顺序解析指定键的全部服务
    fn resolve_all_instances(&self, key: &ServiceKey) -> Result<Vec<Instance>, DependencyError>;

    /// 检查指定键是否已注册
    fn is_registered(&self, key: &ServiceKey) -> bool;
}

/// 类型化解析辅助方法
pub trait ResolverExt: ServiceResolver {
    /// 解析服务
    fn resolve<S>(&self) -> Result<Arc<S>, DependencyError>
    where
        S: ?Sized + Send + Sync + 'static,
    {
        let key = ServiceKey::of::<S>();
        let instance = self.resolve_instance(&key)?;
        downcast_service::<S>(&instance, key.service().short_name())
    }

    /// 解析服务的全部实现
    fn resolve_all<S>(&self) -> Result<Vec<Arc<S>>, DependencyError>
    where
        S: ?Sized + Send + Sync + 'static,
    {
        let key = ServiceKey::of::<S>();
        self.resolve_all_instances(&key)?
            .iter()
            .map(|instance| downcast_service::<S>(instance, key.service().short_name()))
            .collect()
    }

    /// 检查服务是否已注册
    fn contains<S>(&self) -> bool
    where
        S: ?Sized + 'static,
    {
        self.is_registered(&ServiceKey::of::<S>())
    }
}

impl<R: ServiceResolver + ?Sized> ResolverExt for R {}
