use async_trait::async_trait;
use di_abstractions::Describe;
use event_sourcing::{Command, CommandHandler, CommittedEvent, HandlerError};
use handler_macros::Describe;

struct Ship;

impl Command for Ship {}

#[derive(Default, Describe)]
#[describe(handles(Ship))]
struct ShippingHandler;

#[async_trait]
impl CommandHandler<Ship> for ShippingHandler {
    async fn handle(&self, _: Ship) -> Result<Vec<CommittedEvent>, HandlerError> {
        Ok(Vec::new())
    }
}

fn main() {
    let descriptor = ShippingHandler::describe();
    assert!(descriptor.is_constructible());
}
