//! handler-macros 集成测试：派生描述 -> 扫描 -> 绑定 -> 分发

use async_trait::async_trait;
use di_abstractions::{
    Capability, ContractDescriptor, Describe, ResolverExt, ServiceKey, ServiceRegistry,
    ServiceResolver, StaticModule, TypeArg, TypeKind,
};
use di_impl::ServiceCollection;
use event_sourcing::{
    Command, CommandDispatcher, CommandHandler, CommittedEvent, Event, HandlerError,
    StateConnector, COMMAND_HANDLER,
};
use event_sourcing_composition::{EventSourcingOptions, EventSourcingRegistryExt};
use handler_macros::Describe;
use infrastructure_common::DependencyError;
use std::sync::Arc;

struct Deposit(u64);
struct Withdraw(u64);
struct Freeze;

impl Command for Deposit {}
impl Command for Withdraw {}
impl Command for Freeze {}

#[derive(Debug, PartialEq)]
enum AccountEvent {
    Deposited(u64),
    Withdrawn(u64),
    Frozen { prior_events: u64 },
}

impl Event for AccountEvent {}

#[derive(Default, Describe)]
#[describe(handles(Deposit, Withdraw))]
struct AccountHandler;

#[async_trait]
impl CommandHandler<Deposit> for AccountHandler {
    async fn handle(&self, command: Deposit) -> Result<Vec<CommittedEvent>, HandlerError> {
        Ok(vec![Arc::new(AccountEvent::Deposited(command.0))])
    }
}

#[async_trait]
impl CommandHandler<Withdraw> for AccountHandler {
    async fn handle(&self, command: Withdraw) -> Result<Vec<CommittedEvent>, HandlerError> {
        if command.0 == 0 {
            return Err(HandlerError::rejected("取款金额必须大于 0"));
        }
        Ok(vec![Arc::new(AccountEvent::Withdrawn(command.0))])
    }
}

fn compliance_marker() -> Capability {
    Capability::marker(ContractDescriptor::new("Compliance", 1), vec![TypeArg::of::<Freeze>()])
        .implying(event_sourcing::handles::<ComplianceHandler, Freeze>())
}

#[derive(Describe)]
#[describe(constructor = ComplianceHandler::create, capability = compliance_marker())]
struct ComplianceHandler {
    connector: Arc<StateConnector>,
}

impl ComplianceHandler {
    fn create(resolver: &dyn ServiceResolver) -> Result<Self, DependencyError> {
        Ok(Self {
            connector: resolver.resolve()?,
        })
    }
}

#[async_trait]
impl CommandHandler<Freeze> for ComplianceHandler {
    async fn handle(&self, _: Freeze) -> Result<Vec<CommittedEvent>, HandlerError> {
        Ok(vec![Arc::new(AccountEvent::Frozen {
            prior_events: self.connector.publisher().published_count(),
        })])
    }
}

#[test]
fn derived_descriptor_lists_each_command() {
    let descriptor = AccountHandler::describe();

    assert_eq!(descriptor.kind(), TypeKind::Concrete);
    assert!(descriptor.is_constructible());
    assert_eq!(descriptor.capabilities().len(), 2);
    assert!(descriptor
        .capabilities()
        .iter()
        .all(|c| c.is_specialization_of(&COMMAND_HANDLER)));
}

#[test]
fn extra_capability_is_followed_transitively() {
    let module = StaticModule::new("compliance").with_described::<ComplianceHandler>();
    let mut services = ServiceCollection::new();

    let summary = services
        .add_event_sourcing(&EventSourcingOptions::new().with_handler_scanning(true), &[&module])
        .unwrap();

    assert_eq!(summary.handler_bindings, 1);
    assert!(services.contains(&ServiceKey::of::<dyn CommandHandler<Freeze>>()));
}

#[tokio::test]
async fn derived_handlers_are_dispatchable() {
    let accounts = StaticModule::new("accounts").with_described::<AccountHandler>();
    let compliance = StaticModule::new("compliance").with_described::<ComplianceHandler>();
    let mut services = ServiceCollection::new();
    services
        .add_event_sourcing(
            &EventSourcingOptions::new().with_handler_scanning(true),
            &[&accounts, &compliance],
        )
        .unwrap();
    let provider = services.build_provider();
    let dispatcher = provider.resolve::<CommandDispatcher>().unwrap();

    let events = dispatcher.dispatch(&provider, Deposit(40)).await.unwrap();
    assert_eq!(format!("{:?}", events[0]), "Deposited(40)");

    let rejected = dispatcher.dispatch(&provider, Withdraw(0)).await;
    assert!(rejected.is_err());

    let frozen = dispatcher.dispatch(&provider, Freeze).await.unwrap();
    assert_eq!(format!("{:?}", frozen[0]), "Frozen { prior_events: 1 }");
}
