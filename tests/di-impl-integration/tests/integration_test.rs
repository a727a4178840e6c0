//! 服务提供者解析行为的集中集成测试

use anyhow::Result;
use di_abstractions::{
    ResolverExt, ServiceDescriptor, ServiceRegistry, ServiceRegistryExt, ServiceResolver,
};
use di_impl::ServiceCollection;
use infrastructure_common::{DependencyError, Lifetime};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

trait Repository: Send + Sync {
    fn name(&self) -> &'static str;
}

#[derive(Debug, Default)]
struct InMemoryRepository;

impl Repository for InMemoryRepository {
    fn name(&self) -> &'static str {
        "in-memory"
    }
}

/// 依赖仓储的服务
struct OrderService {
    repository: Arc<dyn Repository>,
}

#[test]
fn test_transient_creates_new_instance_per_resolution() -> Result<()> {
    let mut services = ServiceCollection::new();
    services.add_transient(|_| Ok(InMemoryRepository))?;
    let provider = services.build_provider();

    let first = provider.resolve::<InMemoryRepository>()?;
    let second = provider.resolve::<InMemoryRepository>()?;
    assert!(!Arc::ptr_eq(&first, &second));
    Ok(())
}

#[test]
fn test_singleton_is_created_once() -> Result<()> {
    let created = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&created);

    let mut services = ServiceCollection::new();
    services.add_singleton(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(InMemoryRepository)
    })?;
    let provider = services.build_provider();

    let first = provider.resolve::<InMemoryRepository>()?;
    let second = provider.clone().resolve::<InMemoryRepository>()?;
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(created.load(Ordering::SeqCst), 1);
    Ok(())
}

#[test]
fn test_trait_object_service_with_dependencies() -> Result<()> {
    let mut services = ServiceCollection::new();
    services.register(ServiceDescriptor::for_service::<dyn Repository, InMemoryRepository, _>(
        Lifetime::Singleton,
        |_| Ok(Arc::new(InMemoryRepository) as Arc<dyn Repository>),
    ))?;
    services.add_transient(|resolver: &dyn ServiceResolver| {
        Ok(OrderService {
            repository: resolver.resolve::<dyn Repository>()?,
        })
    })?;

    let provider = services.build_provider();
    let service = provider.resolve::<OrderService>()?;
    assert_eq!(service.repository.name(), "in-memory");

    let descriptor = &services.descriptors()[0];
    assert_eq!(descriptor.implementation().name, "InMemoryRepository");
    assert_eq!(descriptor.key().service().name, "dyn Repository");
    Ok(())
}

/// 互相依赖的两个服务
struct Ping;
struct Pong;

#[test]
fn test_circular_dependency_is_detected() -> Result<()> {
    let mut services = ServiceCollection::new();
    services.add_transient(|resolver: &dyn ServiceResolver| {
        resolver.resolve::<Pong>()?;
        Ok(Ping)
    })?;
    services.add_singleton(|resolver: &dyn ServiceResolver| {
        resolver.resolve::<Ping>()?;
        Ok(Pong)
    })?;

    let provider = services.build_provider();
    let error = match provider.resolve::<Ping>() {
        Ok(_) => panic!("循环依赖应该解析失败"),
        Err(error) => error,
    };

    match error {
        DependencyError::CircularDependency { dependency_chain } => {
            assert_eq!(dependency_chain, "Ping -> Pong -> Ping");
        }
        other => panic!("意外的错误: {other}"),
    }
    Ok(())
}
