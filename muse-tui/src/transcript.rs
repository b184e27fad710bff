//! Styled line buffer entries shared by the quotes and planner windows.

use ratatui::style::Style;

/// One logical display line plus its style. Wrapping happens at draw time,
/// so a long quote may occupy several terminal rows.
#[derive(Clone)]
pub struct TranscriptLine {
    pub text: String,
    pub style: Style,
}

impl TranscriptLine {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}
