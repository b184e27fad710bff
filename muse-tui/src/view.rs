use crate::transcript::TranscriptLine;
use anyhow::Result;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Position},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};
use std::io::Stdout;
use textwrap::wrap;

pub struct ViewSnap {
    pub input: String,
    pub input_cursor: usize,
    pub quotes: Vec<TranscriptLine>,
    pub notes: Vec<TranscriptLine>,
    pub scroll: usize,
    pub in_flight: bool,
    pub spinner: &'static str,
    pub source_name: String,
}

impl ViewSnap {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        input: String,
        input_cursor: usize,
        quotes: Vec<TranscriptLine>,
        notes: Vec<TranscriptLine>,
        scroll: usize,
        in_flight: bool,
        spinner: &'static str,
        source_name: String,
    ) -> Self {
        Self {
            input,
            input_cursor,
            quotes,
            notes,
            scroll,
            in_flight,
            spinner,
            source_name,
        }
    }
}

pub fn draw(term: &mut Terminal<CrosstermBackend<Stdout>>, snap: &ViewSnap) -> Result<()> {
    term.draw(|frame| {
        let area = frame.area();

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(6),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(area);

        // Header
        let header = Paragraph::new(Line::from(vec![Span::styled(
            " Muse ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )]))
        .wrap(Wrap { trim: true });
        frame.render_widget(header, layout[0]);

        // Quotes window, scrollable from the bottom
        let visible_h = layout[1].height.saturating_sub(2) as usize;
        let content_width = layout[1].width.saturating_sub(2) as usize;
        let wrapped = wrap_transcript(&snap.quotes, content_width);
        let total = wrapped.len();
        let start = total.saturating_sub(visible_h + snap.scroll);
        let end = total.saturating_sub(snap.scroll.min(total));

        let items: Vec<ListItem> = wrapped[start..end]
            .iter()
            .map(|(text, style)| {
                let line = Line::from(Span::styled(text.clone(), *style));
                ListItem::new(line)
            })
            .collect();

        let body = List::new(items).block(Block::default().borders(Borders::ALL).title(" Quotes "));
        frame.render_widget(body, layout[1]);

        // Planner window: newest output lines pinned to the bottom
        let notes_h = layout[2].height.saturating_sub(2) as usize;
        let notes_width = layout[2].width.saturating_sub(2) as usize;
        let wrapped_notes = wrap_transcript(&snap.notes, notes_width);
        let skip = wrapped_notes.len().saturating_sub(notes_h);
        let note_items: Vec<ListItem> = wrapped_notes[skip..]
            .iter()
            .map(|(text, style)| ListItem::new(Line::from(Span::styled(text.clone(), *style))))
            .collect();
        let notes =
            List::new(note_items).block(Block::default().borders(Borders::ALL).title(" Planner "));
        frame.render_widget(notes, layout[2]);

        // Input box
        let input_box = Paragraph::new(snap.input.clone())
            .block(Block::default().borders(Borders::ALL).title(" Input "));
        frame.render_widget(Clear, layout[3]);
        frame.render_widget(input_box, layout[3]);

        // Caret placement — uses snapshot, not `self`
        let caret_x = layout[3].x + 1 + visual_caret_col(&snap.input, snap.input_cursor);
        let caret_y = layout[3].y + 1;
        frame.set_cursor_position(Position {
            x: caret_x,
            y: caret_y,
        });

        // Status bar
        let status_line = Line::from(vec![
            Span::raw(" "),
            Span::styled(snap.spinner, Style::default().fg(Color::Yellow)),
            Span::raw(" "),
            if snap.in_flight {
                Span::styled("Fetching…", Style::default().fg(Color::Yellow))
            } else {
                Span::styled("Idle", Style::default().fg(Color::Green))
            },
            Span::raw(format!(" • source: {}", snap.source_name)),
        ]);
        let status = Paragraph::new(status_line)
            .block(Block::default().borders(Borders::ALL).title(" Status "));
        frame.render_widget(status, layout[4]);
    })?;

    Ok(())
}

fn visual_caret_col(input: &str, cursor: usize) -> u16 {
    use unicode_width::UnicodeWidthStr;
    UnicodeWidthStr::width(&input[..cursor]) as u16
}

fn wrap_transcript(lines: &[TranscriptLine], width: usize) -> Vec<(String, Style)> {
    let effective_width = width.max(1);
    let mut out = Vec::new();

    for entry in lines {
        let style = entry.style;
        if entry.text.is_empty() {
            out.push((String::new(), style));
            continue;
        }

        for raw_line in entry.text.split('\n') {
            if raw_line.is_empty() {
                out.push((String::new(), style));
                continue;
            }

            let segments = wrap(raw_line, effective_width);
            if segments.is_empty() {
                out.push((String::new(), style));
            } else {
                out.extend(segments.into_iter().map(|seg| (seg.into_owned(), style)));
            }
        }
    }

    out
}
