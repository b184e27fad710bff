use crate::{
    command::{Command, parse_command},
    panel::QuotesPanel,
    styles,
    transcript::TranscriptLine,
    view::{self, ViewSnap},
};
use anyhow::Result;
use async_trait::async_trait;
use crossterm::{
    event::{Event as CtEvent, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use muse_actors::{
    FetchCmd, QuoteFetchActor,
    actor::{Actor, Addr, Context},
    system::ShutdownHandle,
};
use muse_plan::{Estimator, coerce_number};
use muse_quotes::{Quote, QuoteError};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self, Stdout},
    time::{Duration, Instant},
};
use tokio::sync::oneshot;

const BRAILLE_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub enum TuiMsg {
    InputEvent(CtEvent),
    Tick,
    Submit(String),
    FetchDone(Result<Vec<Quote>, QuoteError>),
    OpError(String),
    Shutdown,
}

pub struct TuiActor {
    // deps
    fetcher: Addr<QuoteFetchActor>,
    source_name: String,
    estimator: Estimator,

    // terminal
    term: Terminal<CrosstermBackend<Stdout>>,
    tick_rate: Duration,
    last_tick: Instant,

    // ui state
    input: String,
    input_cursor: usize,
    quotes: QuotesPanel,
    notes: Vec<TranscriptLine>, // estimator output window
    scroll: usize,              // from bottom, quotes window
    dirty: bool,

    // single in-flight request; re-triggers while true are ignored
    in_flight: bool,
    spin_idx: usize,

    // shutdown coordination
    shutdown: ShutdownHandle,
}

impl TuiActor {
    pub fn new(
        fetcher: Addr<QuoteFetchActor>,
        source_name: String,
        estimator: Estimator,
        shutdown: ShutdownHandle,
    ) -> Result<Self> {
        let mut stdout = io::stdout();
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut term = Terminal::new(backend)?;
        term.clear()?;

        Ok(Self {
            fetcher,
            source_name,
            estimator,
            term,
            tick_rate: Duration::from_millis(80),
            last_tick: Instant::now(),
            input: String::new(),
            input_cursor: 0,
            quotes: QuotesPanel::new(),
            notes: vec![TranscriptLine::new(
                "Press F5 or type '/fetch' to load quotes. '/help' lists commands.",
                styles::system(),
            )],
            scroll: 0,
            dirty: true,
            in_flight: false,
            spin_idx: 0,
            shutdown,
        })
    }

    fn cursor_left(&mut self) {
        if self.input_cursor == 0 {
            return;
        }
        self.input_cursor -= 1;
        while self.input_cursor > 0 && !self.input.is_char_boundary(self.input_cursor) {
            self.input_cursor -= 1;
        }
    }

    fn cursor_right(&mut self) {
        if self.input_cursor >= self.input.len() {
            return;
        }
        self.input_cursor += 1;
        while self.input_cursor < self.input.len()
            && !self.input.is_char_boundary(self.input_cursor)
        {
            self.input_cursor += 1;
        }
    }

    fn cursor_home(&mut self) {
        self.input_cursor = 0;
    }

    fn cursor_end(&mut self) {
        self.input_cursor = self.input.len();
    }

    fn insert_char(&mut self, ch: char) {
        self.input.insert(self.input_cursor, ch);
        self.input_cursor += ch.len_utf8();
    }

    fn backspace(&mut self) {
        if self.input_cursor == 0 {
            return;
        }
        let mut prev = self.input_cursor.saturating_sub(1);
        while prev > 0 && !self.input.is_char_boundary(prev) {
            prev -= 1;
        }
        self.input.drain(prev..self.input_cursor);
        self.input_cursor = prev;
    }

    fn delete(&mut self) {
        if self.input_cursor >= self.input.len() {
            return;
        }
        let start = self.input_cursor;
        let mut end = start + 1;
        while end < self.input.len() && !self.input.is_char_boundary(end) {
            end += 1;
        }
        self.input.drain(start..end);
    }

    fn note<S: Into<String>>(&mut self, s: S, style: ratatui::style::Style) {
        self.notes.push(TranscriptLine::new(s, style));
        self.dirty = true;
    }

    fn spinner(&self) -> &'static str {
        if self.in_flight {
            BRAILLE_FRAMES[self.spin_idx % BRAILLE_FRAMES.len()]
        } else {
            " "
        }
    }

    fn step_spinner(&mut self) {
        if self.in_flight {
            self.spin_idx = (self.spin_idx + 1) % BRAILLE_FRAMES.len();
            self.dirty = true;
        }
    }

    fn trigger_fetch(&mut self, me: Addr<TuiActor>) {
        if self.in_flight {
            tracing::debug!(target: "tui", "fetch re-trigger ignored");
            self.note("fetch already in progress", styles::dim());
            return;
        }
        tracing::info!(target: "tui", source = %self.source_name, "fetch triggered");
        self.in_flight = true;
        self.dirty = true;

        let (tx, rx) = oneshot::channel::<Result<Vec<Quote>, QuoteError>>();
        let _ = self.fetcher.try_send(FetchCmd { reply: tx });
        tokio::spawn(async move {
            match rx.await {
                Ok(result) => {
                    let _ = me.send(TuiMsg::FetchDone(result)).await;
                }
                Err(e) => {
                    let _ = me.send(TuiMsg::OpError(format!("fetch: {e}"))).await;
                }
            }
        });
    }

    fn draw(&mut self) -> Result<()> {
        let snap = ViewSnap::new(
            self.input.clone(),
            self.input_cursor,
            self.quotes.lines().to_vec(),
            self.notes.clone(),
            self.scroll,
            self.in_flight,
            self.spinner(),
            self.source_name.clone(),
        );

        view::draw(&mut self.term, &snap)
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<TuiMsg> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL)
            | (KeyCode::Char('q'), KeyModifiers::CONTROL) => return Some(TuiMsg::Shutdown),
            (KeyCode::F(5), _) => {
                return Some(TuiMsg::Submit("/fetch".into()));
            }
            (KeyCode::PageUp, _) => {
                self.scroll = self.scroll.saturating_add(5);
                self.dirty = true;
            }
            (KeyCode::PageDown, _) => {
                self.scroll = self.scroll.saturating_sub(5);
                self.dirty = true;
            }
            (KeyCode::Up, _) => {
                self.scroll = self.scroll.saturating_add(1);
                self.dirty = true;
            }
            (KeyCode::Down, _) => {
                self.scroll = self.scroll.saturating_sub(1);
                self.dirty = true;
            }
            (KeyCode::Enter, _) => {
                let line = std::mem::take(&mut self.input);
                self.input_cursor = 0;
                self.dirty = true;
                return Some(TuiMsg::Submit(line));
            }
            (KeyCode::Left, _) => {
                self.cursor_left();
                self.dirty = true;
            }
            (KeyCode::Right, _) => {
                self.cursor_right();
                self.dirty = true;
            }
            (KeyCode::Home, _) => {
                self.cursor_home();
                self.dirty = true;
            }
            (KeyCode::End, _) => {
                self.cursor_end();
                self.dirty = true;
            }
            (KeyCode::Backspace, _) => {
                self.backspace();
                self.dirty = true;
            }
            (KeyCode::Delete, _) => {
                self.delete();
                self.dirty = true;
            }
            (KeyCode::Esc, _) => {
                self.input.clear();
                self.input_cursor = 0;
                self.dirty = true;
            }
            (KeyCode::Char(ch), _) => {
                self.insert_char(ch);
                self.dirty = true;
            }
            _ => {}
        }
        None
    }

    fn route_submit(&mut self, line: String, me: Addr<TuiActor>) {
        let s = line.trim().to_string();
        if s.is_empty() {
            return;
        }

        if s.starts_with('/') {
            let cmd = parse_command(&s);
            self.handle_command(cmd, me);
            return;
        }

        self.note(format!("× Not a command: {s}"), styles::error());
        self.note("Try `/help`.", styles::dim());
    }

    fn handle_command(&mut self, cmd: Command, me: Addr<TuiActor>) {
        match cmd {
            Command::Fetch => self.trigger_fetch(me),
            Command::Hours(raw) => {
                // Mirrors a form field: any text is accepted, oddities only
                // surface in the computed estimate.
                self.estimator.set_free_hours(coerce_number(&raw));
                self.dirty = true;
            }
            Command::Tasks(raw) => {
                self.estimator.set_num_of_tasks(coerce_number(&raw));
                let line = self.estimator.estimate_line();
                self.note(line, styles::value());
            }
            Command::Help => {
                self.note("Commands:", styles::label());
                self.note("  /fetch          load quotes (also F5)", styles::value());
                self.note("  /hours <n>      set free hours", styles::value());
                self.note(
                    "  /tasks <n>      set task count and print the estimate",
                    styles::value(),
                );
                self.note("  /quit           exit", styles::value());
            }
            Command::Quit => {
                let _ = me.try_send(TuiMsg::Shutdown);
            }
            Command::Unknown(s) => {
                self.note(format!("× Unknown command: {s}"), styles::error());
                self.note("Try `/help`.", styles::dim());
            }
        }
    }
}

#[async_trait]
impl Actor for TuiActor {
    type Msg = TuiMsg;

    async fn handle(&mut self, msg: Self::Msg, ctx: &mut Context<Self>) -> Result<()> {
        match msg {
            TuiMsg::InputEvent(ev) => {
                if let CtEvent::Key(k) = ev
                    && let Some(next) = self.handle_key(k)
                {
                    let _ = ctx.addr().try_send(next);
                }
            }
            TuiMsg::Submit(line) => self.route_submit(line, ctx.addr()),
            TuiMsg::FetchDone(result) => {
                match result {
                    Ok(quotes) => self.quotes.apply_success(&quotes),
                    Err(e) => self.quotes.apply_failure(&e.to_string()),
                }
                self.in_flight = false;
                self.dirty = true;
            }
            TuiMsg::OpError(e) => {
                self.note(format!("× Error: {e}"), styles::error());
                self.in_flight = false;
            }
            TuiMsg::Tick => {
                self.step_spinner();
                if self.dirty || self.last_tick.elapsed() >= self.tick_rate {
                    self.draw()?;
                    self.last_tick = Instant::now();
                    self.dirty = false;
                }
            }
            TuiMsg::Shutdown => {
                disable_raw_mode().ok();
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                self.shutdown.signal();
                ctx.stop();
            }
        }

        Ok(())
    }
}
