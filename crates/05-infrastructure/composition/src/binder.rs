//! 注册表绑定
//!
//! 把扫描结果和三个固定服务写入 [`ServiceRegistry`]。

use crate::options::EventSourcingOptions;
use di_abstractions::{
    ResolverExt, ScanMatch, ServiceDescriptor, ServiceFactory, ServiceRegistry,
    ServiceRegistryExt, ServiceResolver,
};
use event_sourcing::{CommandDispatcher, EventPublisher, StateConnector};
use infrastructure_common::{DependencyError, Lifetime};
use std::sync::Arc;
use tracing::{debug, info};

/// 命令处理器绑定器
///
/// 每条扫描结果注册为：服务键 = 契约特化，实现 = 候选类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerBinder {
    lifetime: Lifetime,
}

impl HandlerBinder {
    /// 以指定生命周期创建绑定器
    pub fn new(lifetime: Lifetime) -> Self {
        Self { lifetime }
    }

    /// 处理器注册使用的生命周期
    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    /// 按顺序注册全部扫描结果，返回注册数量
    ///
    /// 遇到第一个错误立即返回，此前已写入注册表的绑定保留不回滚。
    pub fn bind<R>(&self, matches: &[ScanMatch], registry: &mut R) -> Result<usize, DependencyError>
    where
        R: ServiceRegistry + ?Sized,
    {
        for found in matches {
            let descriptor = self.descriptor_for(found)?;
            debug!(
                "绑定 {} -> {} ({})",
                found.specialization,
                found.candidate.type_info(),
                self.lifetime
            );
            registry.register(descriptor)?;
        }

        info!("注册了 {} 个命令处理器绑定", matches.len());
        Ok(matches.len())
    }

    /// 为一条扫描结果生成服务描述符
    pub fn descriptor_for(&self, found: &ScanMatch) -> Result<ServiceDescriptor, DependencyError> {
        let specialization = &found.specialization;
        let contract = specialization.contract();
        if specialization.arguments().len() != contract.arity() {
            return Err(DependencyError::registration_error(
                found.candidate.type_info().name.clone(),
                format!(
                    "契约 {} 需要 {} 个类型实参，实际为 {}",
                    contract,
                    contract.arity(),
                    specialization.arguments().len()
                ),
            ));
        }

        let candidate = found.candidate.type_info().name.clone();
        let constructor = Arc::clone(found.candidate.constructor());
        let activator = Arc::clone(specialization.activator());
        let factory: ServiceFactory = Arc::new(move |resolver: &dyn ServiceResolver| {
            let constructed = constructor(resolver)
                .map_err(|e| DependencyError::creation_failed(candidate.clone(), e))?;
            activator(constructed)
        });

        Ok(ServiceDescriptor::new(
            specialization.service_key(),
            found.candidate.type_info().clone(),
            self.lifetime,
            factory,
        ))
    }
}

/// 事件溯源固定服务
///
/// 状态连接器、命令分发器和事件发布器，各自以自身类型为服务键注册。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedServices {
    pub state_connector: Lifetime,
    pub command_dispatcher: Lifetime,
    pub event_publisher: Lifetime,
}

impl FixedServices {
    /// 固定服务数量
    pub const COUNT: usize = 3;

    /// 从配置读取各服务生命周期
    pub fn from_options(options: &EventSourcingOptions) -> Self {
        Self {
            state_connector: options.state_connector_lifetime,
            command_dispatcher: options.command_dispatcher_lifetime,
            event_publisher: options.event_publisher_lifetime,
        }
    }

    /// 注册固定服务，返回注册数量
    pub fn bind<R>(&self, registry: &mut R) -> Result<usize, DependencyError>
    where
        R: ServiceRegistry + ?Sized,
    {
        registry
            .add_self(self.state_connector, |resolver: &dyn ServiceResolver| {
                Ok(StateConnector::new(resolver.resolve::<EventPublisher>()?))
            })?
            .add_self(self.command_dispatcher, |_: &dyn ServiceResolver| {
                Ok(CommandDispatcher::new())
            })?
            .add_self(self.event_publisher, |_: &dyn ServiceResolver| {
                Ok(EventPublisher::new())
            })?;

        debug!(
            "注册固定服务: StateConnector ({}), CommandDispatcher ({}), EventPublisher ({})",
            self.state_connector, self.command_dispatcher, self.event_publisher
        );
        Ok(Self::COUNT)
    }
}

impl Default for FixedServices {
    fn default() -> Self {
        Self::from_options(&EventSourcingOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use di_abstractions::{
        downcast_service, CandidateType, ContractDescriptor, ServiceKey, Specialization,
        TypeDescriptor,
    };
    use di_impl::ServiceCollection;
    use event_sourcing::{handles, Command, CommandHandler, CommittedEvent, HandlerError};
    use infrastructure_common::TypeInfo;

    struct Ping;

    impl Command for Ping {}

    #[derive(Default)]
    struct PingHandler;

    #[async_trait::async_trait]
    impl CommandHandler<Ping> for PingHandler {
        async fn handle(&self, _: Ping) -> Result<Vec<CommittedEvent>, HandlerError> {
            Ok(Vec::new())
        }
    }

    trait Clock: Send + Sync {}

    struct ClockedPingHandler;

    #[async_trait::async_trait]
    impl CommandHandler<Ping> for ClockedPingHandler {
        async fn handle(&self, _: Ping) -> Result<Vec<CommittedEvent>, HandlerError> {
            Ok(Vec::new())
        }
    }

    fn ping_match() -> ScanMatch {
        match_for(
            TypeDescriptor::from_default::<PingHandler>().implements(handles::<PingHandler, Ping>()),
        )
    }

    fn match_for(descriptor: TypeDescriptor) -> ScanMatch {
        let capability = &descriptor.capabilities()[0];
        ScanMatch {
            specialization: Specialization::new(
                *capability.contract(),
                capability.bound_arguments().unwrap(),
                capability.service().unwrap().clone(),
                Arc::clone(capability.activator().unwrap()),
            ),
            candidate: CandidateType::new(
                descriptor.type_info().clone(),
                "ping",
                Arc::clone(descriptor.constructor().unwrap()),
            ),
        }
    }

    #[test]
    fn binds_specialization_to_candidate() {
        let mut services = ServiceCollection::new();

        let bound = HandlerBinder::new(Lifetime::Singleton)
            .bind(&[ping_match()], &mut services)
            .unwrap();

        assert_eq!(bound, 1);
        let descriptor = &services.descriptors()[0];
        assert_eq!(descriptor.key(), &ServiceKey::of::<dyn CommandHandler<Ping>>());
        assert!(descriptor.implementation().is::<PingHandler>());
        assert_eq!(descriptor.lifetime(), Lifetime::Singleton);
    }

    #[test]
    fn bound_factory_produces_contract_instance() {
        let mut services = ServiceCollection::new();
        HandlerBinder::new(Lifetime::Transient)
            .bind(&[ping_match()], &mut services)
            .unwrap();
        let provider = services.build_provider();

        let instance = provider
            .resolve_instance(&ServiceKey::of::<dyn CommandHandler<Ping>>())
            .unwrap();
        assert!(downcast_service::<dyn CommandHandler<Ping>>(&instance, "PingHandler").is_ok());
    }

    #[test]
    fn constructor_failure_names_the_candidate() {
        let descriptor = TypeDescriptor::concrete::<ClockedPingHandler, _>(|resolver| {
            resolver.resolve::<dyn Clock>()?;
            Ok(ClockedPingHandler)
        })
        .implements(handles::<ClockedPingHandler, Ping>());
        let mut services = ServiceCollection::new();
        HandlerBinder::new(Lifetime::Transient)
            .bind(&[match_for(descriptor)], &mut services)
            .unwrap();
        let provider = services.build_provider();

        let Err(error) = provider.resolve::<dyn CommandHandler<Ping>>() else {
            panic!("缺少 Clock 时处理器不应构造成功");
        };
        match error {
            DependencyError::ComponentCreationFailed { type_name, source } => {
                assert_eq!(type_name, "ClockedPingHandler");
                assert!(source.to_string().contains("Clock"));
            }
            other => panic!("意外的错误: {other}"),
        }
    }

    #[test]
    fn arity_mismatch_is_rejected() {
        let mut found = ping_match();
        found.specialization = Specialization::new(
            ContractDescriptor::new("CommandHandler", 2),
            vec![TypeInfo::of::<Ping>()],
            found.specialization.service().clone(),
            Arc::clone(found.specialization.activator()),
        );

        let error = HandlerBinder::new(Lifetime::Transient)
            .descriptor_for(&found)
            .unwrap_err();
        assert!(matches!(error, DependencyError::RegistrationError { .. }));
    }

    #[test]
    fn bindings_before_a_failure_are_kept() {
        let mut broken = ping_match();
        broken.specialization = Specialization::new(
            ContractDescriptor::new("CommandHandler", 2),
            vec![TypeInfo::of::<Ping>()],
            broken.specialization.service().clone(),
            Arc::clone(broken.specialization.activator()),
        );
        let mut services = ServiceCollection::new();

        let result = HandlerBinder::new(Lifetime::Transient).bind(&[ping_match(), broken], &mut services);

        assert!(result.is_err());
        assert_eq!(services.len(), 1);
    }

    #[test]
    fn fixed_services_follow_configured_lifetimes() {
        let mut services = ServiceCollection::new();
        let options = EventSourcingOptions::new().with_event_publisher_lifetime(Lifetime::Transient);

        let bound = FixedServices::from_options(&options).bind(&mut services).unwrap();

        assert_eq!(bound, FixedServices::COUNT);
        let keys: Vec<&str> = services
            .descriptors()
            .iter()
            .map(|d| d.key().service().short_name())
            .collect();
        assert_eq!(keys, vec!["StateConnector", "CommandDispatcher", "EventPublisher"]);
        assert!(services
            .descriptors()
            .iter()
            .all(|d| d.lifetime() == Lifetime::Transient));
    }

    #[test]
    fn default_fixed_services_share_one_publisher() {
        let mut services = ServiceCollection::new();
        FixedServices::default().bind(&mut services).unwrap();
        let provider = services.build_provider();

        let first = provider.resolve::<StateConnector>().unwrap();
        let second = provider.resolve::<StateConnector>().unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(first.publisher(), second.publisher()));
    }
}
