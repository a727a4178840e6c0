//! 服务注册表抽象接口

use crate::factory::{constructor_for, factory_for, Instance, ServiceFactory};
use crate::resolver::ServiceResolver;
use infrastructure_common::{DependencyError, Lifetime, TypeInfo};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// 服务键
///
/// 注册和解析时使用的抽象标识：具体类型自身，或某个契约的特化（如 `dyn CommandHandler<C>`）。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceKey {
    service: TypeInfo,
}

impl ServiceKey {
    /// 以类型创建服务键
    pub fn of<S: ?Sized + 'static>() -> Self {
        Self {
            service: TypeInfo::of::<S>(),
        }
    }

    /// 以已有的类型信息创建服务键
    pub fn from_type_info(service: TypeInfo) -> Self {
        Self { service }
    }

    /// 服务类型信息
    pub fn service(&self) -> &TypeInfo {
        &self.service
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.service, f)
    }
}

/// 服务描述符
///
/// 一条注册记录：请求 `key` 时由 `factory` 构造 `implementation` 的实例。
#[derive(Clone)]
pub struct ServiceDescriptor {
    key: ServiceKey,
    implementation: TypeInfo,
    lifetime: Lifetime,
    factory: ServiceFactory,
}

impl ServiceDescriptor {
    /// 创建服务描述符
    pub fn new(
        key: ServiceKey,
        implementation: TypeInfo,
        lifetime: Lifetime,
        factory: ServiceFactory,
    ) -> Self {
        Self {
            key,
            implementation,
            lifetime,
            factory,
        }
    }

    /// 具体类型绑定到自身
    pub fn for_self<T, F>(lifetime: Lifetime, constructor: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&dyn ServiceResolver) -> Result<T, DependencyError> + Send + Sync + 'static,
    {
        Self::new(
            ServiceKey::of::<T>(),
            TypeInfo::of::<T>(),
            lifetime,
            constructor_for(constructor),
        )
    }

    /// 实现类型 `I` 绑定到服务 `S`
    pub fn for_service<S, I, F>(lifetime: Lifetime, factory: F) -> Self
    where
        S: ?Sized + Send + Sync + 'static,
        I: 'static,
        F: Fn(&dyn ServiceResolver) -> Result<Arc<S>, DependencyError> + Send + Sync + 'static,
    {
        Self::new(
            ServiceKey::of::<S>(),
            TypeInfo::of::<I>(),
            lifetime,
            factory_for(factory),
        )
    }

    /// 服务键
    pub fn key(&self) -> &ServiceKey {
        &self.key
    }

    /// 实现类型
    pub fn implementation(&self) -> &TypeInfo {
        &self.implementation
    }

    /// 生命周期
    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    /// 调用工厂创建实例
    pub fn create(&self, resolver: &dyn ServiceResolver) -> Result<Instance, DependencyError> {
        (self.factory)(resolver)
    }
}

impl fmt::Debug for ServiceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceDescriptor")
            .field("key", &self.key.service().name)
            .field("implementation", &self.implementation.name)
            .field("lifetime", &self.lifetime)
            .field("factory", &"<function>")
            .finish()
    }
}

/// 同一服务键多次注册时的处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationPolicy {
    /// 保留全部注册，解析单个服务时最后一次注册生效
    #[default]
    Append,
    /// 每个服务键只允许一次注册，重复注册返回错误
    RejectDuplicates,
    /// 新注册替换已有的同键注册
    Replace,
}

/// 服务注册表 trait
///
/// 启动阶段单线程使用，不要求并发安全。
pub trait ServiceRegistry {
    /// 注册服务
    fn register(&mut self, descriptor: ServiceDescriptor) -> Result<(), DependencyError>;

    /// 按注册顺序返回全部注册
    fn descriptors(&self) -> &[ServiceDescriptor];

    /// 重复注册策略
    fn policy(&self) -> RegistrationPolicy;

    /// 注册数量
    fn len(&self) -> usize {
        self.descriptors().len()
    }

    /// 是否为空
    fn is_empty(&self) -> bool {
        self.descriptors().is_empty()
    }

    /// 检查服务键是否已注册
    fn contains(&self, key: &ServiceKey) -> bool {
        self.descriptors().iter().any(|d| d.key() == key)
    }

    /// 指定服务键的注册数量
    fn count(&self, key: &ServiceKey) -> usize {
        self.descriptors().iter().filter(|d| d.key() == key).count()
    }
}

/// 类型化注册辅助方法
pub trait ServiceRegistryExt: ServiceRegistry {
    /// 注册瞬时自绑定服务
    fn add_transient<T, F>(&mut self, constructor: F) -> Result<&mut Self, DependencyError>
    where
        T: Send + Sync + 'static,
        F: Fn(&dyn ServiceResolver) -> Result<T, DependencyError> + Send + Sync + 'static,
    {
        self.register(ServiceDescriptor::for_self(Lifetime::Transient, constructor))?;
        Ok(self)
    }

    /// 注册单例自绑定服务
    fn add_singleton<T, F>(&mut self, constructor: F) -> Result<&mut Self, DependencyError>
    where
        T: Send + Sync + 'static,
        F: Fn(&dyn ServiceResolver) -> Result<T, DependencyError> + Send + Sync + 'static,
    {
        self.register(ServiceDescriptor::for_self(Lifetime::Singleton, constructor))?;
        Ok(self)
    }

    /// 以指定生命周期注册自绑定服务
    fn add_self<T, F>(&mut self, lifetime: Lifetime, constructor: F) -> Result<&mut Self, DependencyError>
    where
        T: Send + Sync + 'static,
        F: Fn(&dyn ServiceResolver) -> Result<T, DependencyError> + Send + Sync + 'static,
    {
        self.register(ServiceDescriptor::for_self(lifetime, constructor))?;
        Ok(self)
    }
}

impl<R: ServiceRegistry + ?Sized> ServiceRegistryExt for R {}
