pub mod actor;
pub mod builder;
pub mod fetch;
pub mod system;

use muse_quotes::{Quote, QuoteError};
use tokio::sync::oneshot;

pub use builder::Builder;
pub use fetch::QuoteFetchActor;
pub use system::{ActorSystem, ShutdownHandle};

/// One fetch cycle: the reply carries either the parsed quotes in response
/// order or the failure that aborted rendering.
pub struct FetchCmd {
    pub reply: oneshot::Sender<Result<Vec<Quote>, QuoteError>>,
}
