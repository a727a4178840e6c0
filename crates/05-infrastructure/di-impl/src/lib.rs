//! # 依赖注入具体实现
//!
//! 提供内存中的服务注册表 [`ServiceCollection`] 和服务提供者 [`ServiceProvider`]。

use di_abstractions::{
    Instance, RegistrationPolicy, ServiceDescriptor, ServiceKey, ServiceRegistry, ServiceResolver,
};
use infrastructure_common::DependencyError;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// 服务注册表实现
///
/// 按注册顺序保存服务描述符，重复注册按 [`RegistrationPolicy`] 处理。
#[derive(Debug, Default)]
pub struct ServiceCollection {
    descriptors: Vec<ServiceDescriptor>,
    policy: RegistrationPolicy,
}

impl ServiceCollection {
    /// 创建允许多次注册的注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 以指定重复注册策略创建注册表
    pub fn with_policy(policy: RegistrationPolicy) -> Self {
        Self {
            descriptors: Vec::new(),
            policy,
        }
    }

    /// 根据当前注册构建服务提供者
    pub fn build_provider(&self) -> ServiceProvider {
        ServiceProvider::new(self.descriptors.clone())
    }
}

impl ServiceRegistry for ServiceCollection {
    fn register(&mut self, descriptor: ServiceDescriptor) -> Result<(), DependencyError> {
        match self.policy {
            RegistrationPolicy::Append => {}
            RegistrationPolicy::RejectDuplicates => {
                if let Some(existing) = self.descriptors.iter().find(|d| d.key() == descriptor.key()) {
                    return Err(DependencyError::DuplicateRegistration {
                        service: descriptor.key().to_string(),
                        existing: existing.implementation().to_string(),
                        rejected: descriptor.implementation().to_string(),
                    });
                }
            }
            RegistrationPolicy::Replace => {
                let before = self.descriptors.len();
                self.descriptors.retain(|d| d.key() != descriptor.key());
                if self.descriptors.len() != before {
                    debug!("替换已有注册: {}", descriptor.key());
                }
            }
        }

        debug!(
            "注册服务: {} -> {} ({})",
            descriptor.key(),
            descriptor.implementation(),
            descriptor.lifetime()
        );
        self.descriptors.push(descriptor);
        Ok(())
    }

    fn descriptors(&self) -> &[ServiceDescriptor] {
        &self.descriptors
    }

    fn policy(&self) -> RegistrationPolicy {
        self.policy
    }
}

/// 单条注册及其单例缓存
#[derive(Debug)]
struct Registration {
    descriptor: ServiceDescriptor,
    singleton: OnceCell<Instance>,
}

#[derive(Debug)]
struct ProviderInner {
    registrations: HashMap<ServiceKey, Vec<Registration>>,
    total: usize,
}

/// 服务提供者
///
/// 单例在每条注册上各缓存一个实例；瞬时服务每次解析都调用工厂。
#[derive(Debug, Clone)]
pub struct ServiceProvider {
    inner: Arc<ProviderInner>,
}

impl ServiceProvider {
    /// 从服务描述符创建提供者
    pub fn new(descriptors: Vec<ServiceDescriptor>) -> Self {
        let total = descriptors.len();
        let mut registrations: HashMap<ServiceKey, Vec<Registration>> = HashMap::new();
        for descriptor in descriptors {
            registrations
                .entry(descriptor.key().clone())
                .or_default()
                .push(Registration {
                    descriptor,
                    singleton: OnceCell::new(),
                });
        }

        info!("构建服务提供者完成，共 {} 个注册", total);
        Self {
            inner: Arc::new(ProviderInner {
                registrations,
                total,
            }),
        }
    }

    /// 注册总数
    pub fn len(&self) -> usize {
        self.inner.total
    }

    /// 是否没有任何注册
    pub fn is_empty(&self) -> bool {
        self.inner.total == 0
    }
}

impl ServiceResolver for ServiceProvider {
    fn resolve_instance(&self, key: &ServiceKey) -> Result<Instance, DependencyError> {
        ResolutionScope::new(self).resolve_instance(key)
    }

    fn resolve_all_instances(&self, key: &ServiceKey) -> Result<Vec<Instance>, DependencyError> {
        ResolutionScope::new(self).resolve_all_instances(key)
    }

    fn is_registered(&self, key: &ServiceKey) -> bool {
        self.inner.registrations.contains_key(key)
    }
}

/// 一次解析调用的上下文，记录解析链用于检测循环依赖
struct ResolutionScope<'a> {
    provider: &'a ServiceProvider,
    chain: Mutex<Vec<ServiceKey>>,
}

impl<'a> ResolutionScope<'a> {
    fn new(provider: &'a ServiceProvider) -> Self {
        Self {
            provider,
            chain: Mutex::new(Vec::new()),
        }
    }

    fn registrations(&self, key: &ServiceKey) -> Result<&'a [Registration], DependencyError> {
        self.provider
            .inner
            .registrations
            .get(key)
            .map(Vec::as_slice)
            .ok_or_else(|| DependencyError::ComponentNotRegistered {
                type_name: key.to_string(),
            })
    }

    fn activate(&self, key: &ServiceKey, registration: &Registration) -> Result<Instance, DependencyError> {
        if let Some(instance) = registration.singleton.get() {
            return Ok(Arc::clone(instance));
        }

        self.enter(key)?;
        let result = if registration.descriptor.lifetime().is_singleton() {
            registration
                .singleton
                .get_or_try_init(|| registration.descriptor.create(self))
                .map(Arc::clone)
        } else {
            registration.descriptor.create(self)
        };
        self.chain.lock().pop();

        result
    }

    fn enter(&self, key: &ServiceKey) -> Result<(), DependencyError> {
        let mut chain = self.chain.lock();
        if chain.contains(key) {
            let mut names: Vec<String> = chain.iter().map(ToString::to_string).collect();
            names.push(key.to_string());
            return Err(DependencyError::CircularDependency {
                dependency_chain: names.join(" -> "),
            });
        }
        chain.push(key.clone());
        Ok(())
    }
}

impl ServiceResolver for ResolutionScope<'_> {
    fn resolve_instance(&self, key: &ServiceKey) -> Result<Instance, DependencyError> {
        let registrations = self.registrations(key)?;
        let registration = registrations
            .last()
            .ok_or_else(|| DependencyError::ComponentNotRegistered {
                type_name: key.to_string(),
            })?;

        debug!("解析服务: {} -> {}", key, registration.descriptor.implementation());
        self.activate(key, registration)
    }

    fn resolve_all_instances(&self, key: &ServiceKey) -> Result<Vec<Instance>, DependencyError> {
        let Some(registrations) = self.provider.inner.registrations.get(key) else {
            return Ok(Vec::new());
        };

        registrations
            .iter()
            .map(|registration| self.activate(key, registration))
            .collect()
    }

    fn is_registered(&self, key: &ServiceKey) -> bool {
        self.provider.is_registered(key)
    }
}
