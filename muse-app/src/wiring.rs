//! Wire the config catalogue into a running actor system.
//!
//! One fetch actor owns the HTTP client for the active source; the TUI actor
//! owns everything the user sees. Addresses flow strictly downward, so there
//! is nothing circular to resolve.
use anyhow::{Context, Result, anyhow};
use muse_actors::{Builder, QuoteFetchActor};
use muse_config::{MuseConfig, QuoteField, SourceDetails, SourceSpec};
use muse_plan::Estimator;
use muse_quotes::{QuoteClient, QuoteSource, ResponseShape, TextField};
use muse_tui::{TuiActor, spawn_tui_feeders};
use std::time::Duration;
use url::Url;

const TICK_RATE: Duration = Duration::from_millis(80);

fn field(f: QuoteField) -> TextField {
    match f {
        QuoteField::Content => TextField::Content,
        QuoteField::Quote => TextField::Quote,
    }
}

/// Translate a declared source into the fetcher's descriptor.
fn source_from_spec(spec: &SourceSpec) -> Result<QuoteSource> {
    match &spec.details {
        SourceDetails::Text { config } => {
            let url = Url::parse(&config.url)
                .with_context(|| format!("source `{}`: bad url `{}`", spec.id, config.url))?;
            Ok(QuoteSource::new(
                spec.id.clone(),
                url,
                ResponseShape::PlainText {
                    author: config.author.clone(),
                },
                None,
            ))
        }
        SourceDetails::Json { config } => {
            let url = Url::parse(&config.url)
                .with_context(|| format!("source `{}`: bad url `{}`", spec.id, config.url))?;
            let shape = match &config.wrapped_key {
                Some(key) => ResponseShape::WrappedArray {
                    key: key.clone(),
                    field: field(config.field),
                },
                None => ResponseShape::JsonArray {
                    field: field(config.field),
                },
            };
            Ok(QuoteSource::new(spec.id.clone(), url, shape, config.limit))
        }
    }
}

pub async fn run(cfg: MuseConfig) -> Result<()> {
    let spec = cfg.active()?;
    let source = source_from_spec(spec)?;
    let source_name = source.name.clone();
    let client = QuoteClient::new(source)?;

    let mut b = Builder::new();
    let shutdown = b.shutdown_handle();

    b.spawn("fetch:main", 8, QuoteFetchActor::new(client));
    let fetcher = b
        .addr::<QuoteFetchActor>("fetch:main")
        .ok_or_else(|| anyhow!("fetch actor address missing"))?;

    let estimator = Estimator::new(cfg.estimator.buffer_minutes);
    let tui = TuiActor::new(fetcher, source_name, estimator, shutdown.clone())?;
    b.spawn("tui:main", 64, tui);
    let tui_addr = b
        .addr::<TuiActor>("tui:main")
        .ok_or_else(|| anyhow!("tui actor address missing"))?;

    spawn_tui_feeders(tui_addr, shutdown, TICK_RATE);

    b.run_until_ctrl_c().await
}
