//! Actor that performs one quote fetch per command.
//!
//! The actor owns the [`QuoteClient`] and processes commands strictly one at
//! a time; the UI enforces its own in-flight guard, so at most one fetch is
//! ever outstanding. A failed fetch is an answer, not an actor crash: the
//! error travels back through the reply channel and the actor keeps running.
use crate::actor::{Actor, Context};
use crate::FetchCmd;
use anyhow::Result;
use muse_quotes::QuoteClient;

pub struct QuoteFetchActor {
    client: QuoteClient,
}

impl QuoteFetchActor {
    pub fn new(client: QuoteClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Actor for QuoteFetchActor {
    type Msg = FetchCmd;

    async fn handle(&mut self, msg: Self::Msg, _ctx: &mut Context<Self>) -> Result<()> {
        let result = self.client.fetch().await;
        if msg.reply.send(result).is_err() {
            tracing::warn!(
                target: "actors",
                source = %self.client.source().name,
                "fetch reply receiver dropped before completion"
            );
        }
        Ok(())
    }
}
