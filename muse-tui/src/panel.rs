use crate::{styles, transcript::TranscriptLine};
use muse_quotes::Quote;

/// Buffer backing the quotes window.
///
/// A successful fetch replaces the whole buffer; a failed fetch leaves the
/// previous quotes in place and appends a single error line, so stale but
/// valid content survives a flaky endpoint.
#[derive(Default)]
pub struct QuotesPanel {
    lines: Vec<TranscriptLine>,
}

impl QuotesPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply_success(&mut self, quotes: &[Quote]) {
        self.lines.clear();
        for q in quotes {
            self.lines
                .push(TranscriptLine::new(q.display_line(), styles::quote()));
        }
    }

    pub fn apply_failure(&mut self, message: &str) {
        self.lines.push(TranscriptLine::new(
            format!("Error loading quotes: {message}"),
            styles::error(),
        ));
    }

    pub fn lines(&self) -> &[TranscriptLine] {
        &self.lines
    }
}
