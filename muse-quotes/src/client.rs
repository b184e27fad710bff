use crate::source::{QuoteSource, ResponseShape, TextField};
use crate::types::{ContentQuote, PlainQuote};
use crate::{Quote, QuoteError};
use muse_http::{HttpClient, RequestOpts};
use std::time::{Duration, Instant};

/// Fetch-and-parse pipeline for one configured [`QuoteSource`].
#[derive(Clone)]
pub struct QuoteClient {
    http: HttpClient,
    source: QuoteSource,
}

impl QuoteClient {
    pub fn new(source: QuoteSource) -> Result<Self, QuoteError> {
        let http = HttpClient::new(source.url.as_str())?;
        Ok(Self { http, source })
    }

    pub fn with_timeout(mut self, dur: Duration) -> Self {
        self.http = self.http.with_timeout(dur);
        self
    }

    pub fn source(&self) -> &QuoteSource {
        &self.source
    }

    /// Perform one GET against the source and parse by its declared shape.
    /// Quotes come back in response order, truncated to the source's limit.
    pub async fn fetch(&self) -> Result<Vec<Quote>, QuoteError> {
        let started = Instant::now();
        tracing::info!(
            target: "quotes",
            source = %self.source.name,
            url = %self.source.url,
            "quotes.fetch.start"
        );

        let result = self.fetch_inner().await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(quotes) => {
                tracing::info!(
                    target: "quotes",
                    source = %self.source.name,
                    count = quotes.len(),
                    elapsed_ms,
                    "quotes.fetch.success"
                );
            }
            Err(e) => {
                tracing::warn!(
                    target: "quotes",
                    source = %self.source.name,
                    elapsed_ms,
                    error = %e,
                    "quotes.fetch.error"
                );
            }
        }

        result
    }

    async fn fetch_inner(&self) -> Result<Vec<Quote>, QuoteError> {
        let mut quotes = match &self.source.shape {
            ResponseShape::PlainText { author } => {
                let body = self.http.get_text("", RequestOpts::default()).await?;
                vec![Quote {
                    text: body.trim().to_string(),
                    author: author.clone(),
                }]
            }
            ResponseShape::JsonArray { field } => match field {
                TextField::Content => self
                    .http
                    .get_json::<Vec<ContentQuote>>("", RequestOpts::default())
                    .await?
                    .into_iter()
                    .map(Quote::from)
                    .collect(),
                TextField::Quote => self
                    .http
                    .get_json::<Vec<PlainQuote>>("", RequestOpts::default())
                    .await?
                    .into_iter()
                    .map(Quote::from)
                    .collect(),
            },
            ResponseShape::WrappedArray { key, field } => {
                let val: serde_json::Value =
                    self.http.get_json("", RequestOpts::default()).await?;
                let inner = val
                    .get(key)
                    .cloned()
                    .ok_or_else(|| QuoteError::Parse(format!("missing key `{key}`")))?;
                match field {
                    TextField::Content => {
                        serde_json::from_value::<Vec<ContentQuote>>(inner)
                            .map_err(|e| QuoteError::Parse(e.to_string()))?
                            .into_iter()
                            .map(Quote::from)
                            .collect()
                    }
                    TextField::Quote => serde_json::from_value::<Vec<PlainQuote>>(inner)
                        .map_err(|e| QuoteError::Parse(e.to_string()))?
                        .into_iter()
                        .map(Quote::from)
                        .collect(),
                }
            }
        };

        if let Some(limit) = self.source.limit {
            quotes.truncate(limit);
        }

        Ok(quotes)
    }
}
