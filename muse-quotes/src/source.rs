use url::Url;

/// Which JSON field carries the quote text. Public quote APIs disagree:
/// quotable.io uses `content`, dummyjson and friends use `quote`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Content,
    Quote,
}

/// Declared body shape of a quote endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseShape {
    /// The whole body is one quote; `author` is a fixed label.
    PlainText { author: String },
    /// Top-level JSON array of quote objects.
    JsonArray { field: TextField },
    /// JSON object wrapping the array under `key` (e.g. `{"quotes": [...]}`).
    WrappedArray { key: String, field: TextField },
}

/// One external quote API: endpoint, body shape, optional truncation limit.
#[derive(Debug, Clone)]
pub struct QuoteSource {
    pub name: String,
    pub url: Url,
    pub shape: ResponseShape,
    pub limit: Option<usize>,
}

impl QuoteSource {
    pub fn new(
        name: impl Into<String>,
        url: Url,
        shape: ResponseShape,
        limit: Option<usize>,
    ) -> Self {
        Self {
            name: name.into(),
            url,
            shape,
            limit,
        }
    }
}
