//! 示例领域：账本

use async_trait::async_trait;
use di_abstractions::{ResolverExt, ServiceResolver, StaticModule};
use event_sourcing::{Command, CommandHandler, CommittedEvent, Event, EventPublisher, HandlerError};
use handler_macros::Describe;
use infrastructure_common::DependencyError;
use std::fmt;
use std::sync::Arc;

pub struct OpenAccount {
    pub owner: String,
}

pub struct Deposit {
    pub owner: String,
    pub amount: u64,
}

pub struct CloseAccount {
    pub owner: String,
}

impl Command for OpenAccount {}
impl Command for Deposit {}
impl Command for CloseAccount {}

pub enum LedgerEvent {
    AccountOpened { owner: String },
    Deposited { owner: String, amount: u64 },
    AccountClosed { owner: String, events_seen: u64 },
}

impl fmt::Debug for LedgerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AccountOpened { owner } => write!(f, "{owner} 开户"),
            Self::Deposited { owner, amount } => write!(f, "{owner} 存入 {amount}"),
            Self::AccountClosed { owner, events_seen } => {
                write!(f, "{owner} 销户，此前已发布 {events_seen} 个事件")
            }
        }
    }
}

impl Event for LedgerEvent {
    fn event_type(&self) -> &'static str {
        match self {
            Self::AccountOpened { .. } => "AccountOpened",
            Self::Deposited { .. } => "Deposited",
            Self::AccountClosed { .. } => "AccountClosed",
        }
    }
}

#[derive(Default, Describe)]
#[describe(handles(OpenAccount, Deposit))]
pub struct AccountHandler;

#[async_trait]
impl CommandHandler<OpenAccount> for AccountHandler {
    async fn handle(&self, command: OpenAccount) -> Result<Vec<CommittedEvent>, HandlerError> {
        if command.owner.trim().is_empty() {
            return Err(HandlerError::rejected("账户所有人不能为空"));
        }
        Ok(vec![Arc::new(LedgerEvent::AccountOpened {
            owner: command.owner,
        })])
    }
}

#[async_trait]
impl CommandHandler<Deposit> for AccountHandler {
    async fn handle(&self, command: Deposit) -> Result<Vec<CommittedEvent>, HandlerError> {
        if command.amount == 0 {
            return Err(HandlerError::rejected("存款金额必须大于 0"));
        }
        Ok(vec![Arc::new(LedgerEvent::Deposited {
            owner: command.owner,
            amount: command.amount,
        })])
    }
}

/// 关闭账户时记录已发布的事件数
#[derive(Describe)]
#[describe(handles(CloseAccount), constructor = ClosingHandler::create)]
pub struct ClosingHandler {
    publisher: Arc<EventPublisher>,
}

impl ClosingHandler {
    fn create(resolver: &dyn ServiceResolver) -> Result<Self, DependencyError> {
        Ok(Self {
            publisher: resolver.resolve()?,
        })
    }
}

#[async_trait]
impl CommandHandler<CloseAccount> for ClosingHandler {
    async fn handle(&self, command: CloseAccount) -> Result<Vec<CommittedEvent>, HandlerError> {
        Ok(vec![Arc::new(LedgerEvent::AccountClosed {
            owner: command.owner,
            events_seen: self.publisher.published_count(),
        })])
    }
}

/// 账本模块的类型表
pub fn module() -> StaticModule {
    StaticModule::new("ledger")
        .with_described::<AccountHandler>()
        .with_described::<ClosingHandler>()
}
