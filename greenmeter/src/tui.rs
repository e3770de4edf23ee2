//! # Kiosk Display
//!
//! Full-screen terminal view using `ratatui`.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │                                          │
//! │           19.10.2026 14:03:00            │
//! │                                          │
//! │        ██████  ██  ██  ██    ██          │
//! │        ...  (percentage, block font)     │
//! │                                          │
//! │ error text (only when the fetch failed)  │
//! └──────────────────────────────────────────┘
//!   whole screen filled with the status color
//! ```
//!
//! Readings arrive over a channel from the poller; the display never
//! fetches anything itself. Escape (or Ctrl+C) quits.

// Terminal sizes are u16; rendered widths are usize
#![allow(clippy::cast_possible_truncation)]

use crate::domain::TuiError;
use crate::reading::Reading;
use crossbeam_channel::{Receiver, TryRecvError};
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use greenmeter_common::StatusColor;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io::{self, IsTerminal};
use std::time::Duration;

pub mod digits;
pub mod theme;

use theme::{number_style, screen_style, time_style, PLACEHOLDER_BG, PLACEHOLDER_FG};

/// Shown until the first reading arrives
pub const PLACEHOLDER_TEXT: &str = "Show the current carbon emission";

/// How long to wait for a key before checking the channel again
const INPUT_POLL: Duration = Duration::from_millis(100);

/// Display state: the latest reading and whether the user asked to leave
#[derive(Debug, Default)]
pub struct KioskApp {
    latest: Option<Reading>,
    should_quit: bool,
}

impl KioskApp {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the shown reading
    pub fn update(&mut self, reading: Reading) {
        self.latest = Some(reading);
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Escape quits. Ctrl+C too, since raw mode keeps SIGINT from firing.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    /// Draw the whole frame
    pub fn render(&self, f: &mut Frame) {
        match &self.latest {
            None => render_placeholder(f),
            Some(reading) => render_reading(f, reading),
        }
    }
}

fn render_placeholder(f: &mut Frame) {
    let area = f.area();
    let style = Style::new().bg(PLACEHOLDER_BG).fg(PLACEHOLDER_FG);
    f.render_widget(Block::default().style(style), area);

    let rows = centered_rows(area, 1);
    f.render_widget(
        Paragraph::new(PLACEHOLDER_TEXT).style(style).alignment(Alignment::Center),
        rows,
    );
}

fn render_reading(f: &mut Frame, reading: &Reading) {
    let area = f.area();
    let status = reading.status;
    f.render_widget(Block::default().style(screen_style(status)), area);

    let number = format!("{}%", reading.percentage);
    let big = usize::from(area.width) >= digits::rendered_width(&number);
    let number_height = if big { digits::GLYPH_HEIGHT as u16 } else { 1 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(1),             // Time
            Constraint::Length(1),             // Gap
            Constraint::Length(number_height), // Percentage
            Constraint::Fill(1),
            Constraint::Length(1), // Error footer
        ])
        .split(area);

    f.render_widget(
        Paragraph::new(reading.time_label()).style(time_style(status)).alignment(Alignment::Center),
        chunks[1],
    );

    let number_lines: Vec<Line> = if big {
        digits::render(&number).into_iter().map(Line::from).collect()
    } else {
        vec![Line::from(number)]
    };
    f.render_widget(
        Paragraph::new(number_lines).style(number_style(status)).alignment(Alignment::Center),
        chunks[3],
    );

    if let Some(ref err) = reading.error {
        f.render_widget(
            Paragraph::new(err.as_str())
                .style(time_style(StatusColor::Grey))
                .wrap(Wrap { trim: true }),
            chunks[5],
        );
    }
}

/// A strip of `height` rows vertically centered in `area`
fn centered_rows(area: Rect, height: u16) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Fill(1), Constraint::Length(height), Constraint::Fill(1)])
        .split(area);
    chunks[1]
}

/// Drive `app` on `terminal` until the user quits.
///
/// Redraws when a reading arrives or the terminal is resized.
fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut KioskApp,
    reading_rx: &Receiver<Reading>,
) -> Result<(), TuiError> {
    let mut dirty = true;

    loop {
        // Only the newest pending reading matters
        loop {
            match reading_rx.try_recv() {
                Ok(reading) => {
                    app.update(reading);
                    dirty = true;
                }
                Err(TryRecvError::Empty) => break,
                // Poller is gone, nothing more will ever be shown
                Err(TryRecvError::Disconnected) => return Ok(()),
            }
        }

        if dirty {
            terminal.draw(|f| app.render(f))?;
            dirty = false;
        }

        if event::poll(INPUT_POLL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Resize(_, _) => dirty = true,
                _ => {}
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}

/// Run the full-screen display, consuming readings from the poller.
///
/// # Errors
/// Returns an error if stdout is not a terminal or terminal setup or
/// rendering fails. The terminal is restored either way.
pub fn run_kiosk(reading_rx: Receiver<Reading>) -> Result<(), TuiError> {
    if !io::stdout().is_terminal() {
        return Err(TuiError::TerminalError(
            "stdout is not a terminal (run with --headless)".to_string(),
        ));
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = KioskApp::new();
    let result = event_loop(&mut terminal, &mut app, &reading_rx);

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, Show)?;
    terminal.show_cursor()?;

    result
}
