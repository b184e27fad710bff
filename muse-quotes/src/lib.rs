//! Quote fetching for the Muse TUI.
//!
//! A [`QuoteSource`] describes one external quote API: its endpoint URL, the
//! shape of the response body, and an optional truncation limit. The
//! [`QuoteClient`] turns one fetch into an ordered `Vec<Quote>` or a
//! [`QuoteError`]; it holds no state between fetches.

mod client;
mod source;
mod types;

pub use client::QuoteClient;
pub use source::{QuoteSource, ResponseShape, TextField};

use muse_http::HttpError;
use thiserror::Error;

/// One quote, alive only for the duration of a render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

impl Quote {
    /// Render as the single display line the quotes panel shows.
    ///
    /// ```
    /// use muse_quotes::Quote;
    ///
    /// let q = Quote {
    ///     text: "Mind the gap.".into(),
    ///     author: "TfL".into(),
    /// };
    /// assert_eq!(q.display_line(), "\"Mind the gap.\" - TfL");
    /// ```
    pub fn display_line(&self) -> String {
        format!("\"{}\" - {}", self.text, self.author)
    }
}

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error("unexpected response shape: {0}")]
    Parse(String),
}
