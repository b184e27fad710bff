use crate::Quote;
use serde::Deserialize;

const UNKNOWN_AUTHOR: &str = "Unknown";

/// quotable.io element: `{"content": "...", "author": "..."}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentQuote {
    pub content: String,
    #[serde(default)]
    pub author: Option<String>,
}

/// dummyjson-style element: `{"quote": "...", "author": "..."}`.
#[derive(Debug, Clone, Deserialize)]
pub struct PlainQuote {
    pub quote: String,
    #[serde(default)]
    pub author: Option<String>,
}

impl From<ContentQuote> for Quote {
    fn from(q: ContentQuote) -> Self {
        Quote {
            text: q.content,
            author: q.author.unwrap_or_else(|| UNKNOWN_AUTHOR.into()),
        }
    }
}

impl From<PlainQuote> for Quote {
    fn from(q: PlainQuote) -> Self {
        Quote {
            text: q.quote,
            author: q.author.unwrap_or_else(|| UNKNOWN_AUTHOR.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_element_maps_text_and_author() {
        let q: ContentQuote =
            serde_json::from_str(r#"{"content":"Stay curious.","author":"A. Nony"}"#).unwrap();
        let quote = Quote::from(q);
        assert_eq!(quote.text, "Stay curious.");
        assert_eq!(quote.author, "A. Nony");
    }

    #[test]
    fn missing_author_defaults_to_unknown() {
        let q: PlainQuote = serde_json::from_str(r#"{"quote":"Onward."}"#).unwrap();
        let quote = Quote::from(q);
        assert_eq!(quote.author, "Unknown");
    }
}
