use async_trait::async_trait;
use di_abstractions::{Describe, ServiceResolver};
use event_sourcing::{Command, CommandHandler, CommittedEvent, HandlerError};
use handler_macros::Describe;
use infrastructure_common::DependencyError;

struct Refund(u64);
struct Cancel;

impl Command for Refund {}
impl Command for Cancel {}

#[derive(Describe)]
#[describe(handles(Refund, Cancel), constructor = OrderHandler::create)]
struct OrderHandler {
    limit: u64,
}

impl OrderHandler {
    fn create(_: &dyn ServiceResolver) -> Result<Self, DependencyError> {
        Ok(Self { limit: 100 })
    }
}

#[async_trait]
impl CommandHandler<Refund> for OrderHandler {
    async fn handle(&self, command: Refund) -> Result<Vec<CommittedEvent>, HandlerError> {
        if command.0 > self.limit {
            return Err(HandlerError::rejected("超过退款上限"));
        }
        Ok(Vec::new())
    }
}

#[async_trait]
impl CommandHandler<Cancel> for OrderHandler {
    async fn handle(&self, _: Cancel) -> Result<Vec<CommittedEvent>, HandlerError> {
        Ok(Vec::new())
    }
}

fn main() {
    assert_eq!(OrderHandler::describe().capabilities().len(), 2);
}
