use std::{
    io::{self, Stdout, Write},
    time::{Duration, Instant},
};

use chip::{
    definitions::{display, keyboard},
    devices::{DisplayCommands, Input, KeyboardCommands, SoundCommands},
};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute, terminal,
};
use tui::{
    backend::CrosstermBackend,
    layout::Rect,
    text::Spans,
    widgets::{Block, Borders, Paragraph},
    Terminal,
};

use crate::definitions;

/// crossterm reports its own error type, the devices speak io
fn into_io(err: crossterm::ErrorKind) -> io::Error {
    match err {
        crossterm::ErrorKind::IoError(err) => err,
        other => io::Error::new(io::ErrorKind::Other, other.to_string()),
    }
}

/// Puts the terminal into raw mode on the alternate screen and
/// restores it once dropped.
pub(crate) struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode().map_err(into_io)?;
        execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide).map_err(into_io)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let restored = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen)
            .and_then(|_| terminal::disable_raw_mode());
        if let Err(err) = restored {
            log::warn!("unable to restore the terminal: {}", err);
        }
    }
}

pub(crate) struct DisplayAdapter {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    title: String,
}

impl DisplayAdapter {
    pub fn new(title: &str) -> io::Result<Self> {
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        terminal.clear()?;
        Ok(Self {
            terminal,
            title: title.to_string(),
        })
    }

    /// one line of text per row of pixels
    fn board(pixels: &[u8]) -> Vec<Spans<'static>> {
        pixels
            .chunks(display::WIDTH)
            .map(|row| {
                let line: String = row
                    .iter()
                    .map(|&pixel| {
                        if pixel == 0 {
                            definitions::field::INACTIVE
                        } else {
                            definitions::field::ACTIVE
                        }
                    })
                    .collect();
                Spans::from(line)
            })
            .collect()
    }
}

impl DisplayCommands for DisplayAdapter {
    fn display(&mut self, pixels: &[u8]) -> io::Result<()> {
        log::trace!("drawing the display");

        let board = Self::board(pixels);
        let title = self.title.clone();
        let width = (display::WIDTH * definitions::field::ACTIVE.chars().count()) as u16
            + definitions::field::BORDER;
        let height = display::HEIGHT as u16 + definitions::field::BORDER;

        self.terminal.draw(|f| {
            let area = Rect::new(0, 0, width, height).intersection(f.size());
            let block = Block::default().borders(Borders::ALL).title(title);
            f.render_widget(Paragraph::new(board).block(block), area);
        })?;
        Ok(())
    }
}

/// What a single terminal key stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    Key(usize),
    Quit,
}

/// Maps a terminal key onto the hex keypad.
pub(crate) fn map_key(event: KeyEvent) -> Option<Action> {
    match event.code {
        KeyCode::Esc => Some(Action::Quit),
        // raw mode swallows the interrupt signal
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Action::Quit)
        }
        KeyCode::Char(c) => {
            let c = c.to_ascii_lowercase();
            definitions::keymap::KEYS
                .iter()
                .zip(keyboard::LAYOUT.iter())
                .find_map(|(chars, keys)| {
                    chars
                        .iter()
                        .position(|&key| key == c)
                        .map(|column| Action::Key(keys[column]))
                })
        }
        _ => None,
    }
}

/// Terminals only report presses and auto repeats, so every key counts as
/// held for a short while after it was last reported.
#[derive(Debug, Clone)]
pub(crate) struct HeldKeys {
    last_seen: [Option<Instant>; keyboard::SIZE],
    hold: Duration,
}

impl HeldKeys {
    pub fn new(hold: Duration) -> Self {
        Self {
            last_seen: [None; keyboard::SIZE],
            hold,
        }
    }

    pub fn press(&mut self, key: usize, now: Instant) {
        if let Some(entry) = self.last_seen.get_mut(key) {
            *entry = Some(now);
        }
    }

    pub fn state(&self, now: Instant) -> [bool; keyboard::SIZE] {
        let mut keys = [false; keyboard::SIZE];
        for (key, seen) in keys.iter_mut().zip(self.last_seen.iter()) {
            *key = matches!(seen, Some(seen) if now.saturating_duration_since(*seen) < self.hold);
        }
        keys
    }
}

pub(crate) struct KeyboardAdapter {
    held: HeldKeys,
}

impl KeyboardAdapter {
    pub fn new() -> Self {
        Self {
            held: HeldKeys::new(Duration::from_millis(keyboard::HOLD_MILLIS)),
        }
    }
}

impl KeyboardCommands for KeyboardAdapter {
    fn poll(&mut self) -> io::Result<Input> {
        while event::poll(Duration::from_secs(0)).map_err(into_io)? {
            if let Event::Key(key) = event::read().map_err(into_io)? {
                match map_key(key) {
                    Some(Action::Quit) => return Ok(Input::Quit),
                    Some(Action::Key(index)) => {
                        log::trace!("was pressed {:#X}", index);
                        self.held.press(index, Instant::now());
                    }
                    None => log::debug!("ignoring the unmapped key {:?}", key.code),
                }
            }
        }
        Ok(Input::Keys(self.held.state(Instant::now())))
    }
}

/// Rings the terminal bell whenever the tone starts, terminals can not hold a tone.
pub(crate) struct SoundAdapter<W> {
    out: W,
}

impl<W: Write> SoundAdapter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> SoundCommands for SoundAdapter<W> {
    fn set_tone(&mut self, active: bool) -> io::Result<()> {
        if active {
            self.out.write_all(definitions::sound::BELL)?;
            self.out.flush()?;
        }
        Ok(())
    }
}
