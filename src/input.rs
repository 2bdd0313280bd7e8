//! Keyboard input via crossterm.
//!
//! Polling never blocks: pending events are drained until one maps to a
//! command, and anything unrecognised (other keys, releases, resizes) is
//! dropped on the floor.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::entities::Command;
use crate::ports::InputSource;

/// Map a key event to a game command.
///
/// ← / A : move left, → / D : move right, SPACE : fire, Q / ESC / Ctrl-C : quit.
pub fn command_for(key: &KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Command::MoveRight),
        KeyCode::Char(' ') => Some(Command::Fire),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

/// Where terminal events come from.
pub trait EventSource {
    /// Whether an event is ready within `timeout`.
    fn poll(&mut self, timeout: Duration) -> io::Result<bool>;

    /// Next event, blocking until one arrives.
    fn read(&mut self) -> io::Result<Event>;
}

/// crossterm's global event queue.
#[derive(Debug, Default)]
pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        event::poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        event::read()
    }
}

/// Reads the terminal's event queue. Raw mode must already be enabled.
#[derive(Debug, Default)]
pub struct TerminalInput<E = CrosstermEvents> {
    events: E,
}

impl TerminalInput {
    pub fn new() -> Self {
        Self::with_events(CrosstermEvents)
    }
}

impl<E: EventSource> TerminalInput<E> {
    pub fn with_events(events: E) -> Self {
        Self { events }
    }

    /// Discard everything already queued, such as key repeats left over from
    /// play. Returns how many events were dropped.
    pub fn flush(&mut self) -> io::Result<usize> {
        let mut dropped = 0;
        while self.events.poll(Duration::ZERO)? {
            self.events.read()?;
            dropped += 1;
        }
        Ok(dropped)
    }

    /// Block until a fresh key is pressed and return it. Keys queued before
    /// the call are ignored.
    pub fn wait_for_key(&mut self) -> io::Result<KeyEvent> {
        let dropped = self.flush()?;
        if dropped > 0 {
            log::debug!("dropped {} stale input events", dropped);
        }
        loop {
            if let Event::Key(key) = self.events.read()? {
                if key.kind != KeyEventKind::Release {
                    return Ok(key);
                }
            }
        }
    }
}

impl<E: EventSource> InputSource for TerminalInput<E> {
    fn poll(&mut self) -> Option<Command> {
        loop {
            match self.events.poll(Duration::ZERO) {
                Ok(true) => {}
                Ok(false) => return None,
                Err(e) => {
                    log::warn!("input poll failed: {}", e);
                    return None;
                }
            }
            match self.events.read() {
                Ok(Event::Key(key)) => {
                    if let Some(command) = command_for(&key) {
                        return Some(command);
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    log::warn!("input read failed: {}", e);
                    return None;
                }
            }
        }
    }
}
