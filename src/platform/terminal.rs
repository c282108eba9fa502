//! Terminal platform: raw-mode session guard and keyboard input via crossterm.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{QueueableCommand, cursor, style, terminal};

use super::{InputEvent, InputSource, Key};

/// Raw mode + alternate screen for as long as the guard lives.
///
/// Dropping the guard restores the terminal, including on early returns and
/// panics that unwind through the owner.
pub struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.queue(terminal::EnterAlternateScreen)?;
        stdout.queue(cursor::Hide)?;
        stdout.queue(terminal::DisableLineWrap)?;
        stdout.flush()?;
        log::debug!("Terminal entered raw mode");
        Ok(Self { active: true })
    }

    /// Restore the terminal now and report failures
    pub fn exit(mut self) -> io::Result<()> {
        self.restore()
    }

    fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        let mut stdout = io::stdout();
        stdout.queue(style::ResetColor)?;
        stdout.queue(terminal::EnableLineWrap)?;
        stdout.queue(cursor::Show)?;
        stdout.queue(terminal::LeaveAlternateScreen)?;
        stdout.flush()?;
        terminal::disable_raw_mode()?;
        log::debug!("Terminal restored");
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            log::warn!("Failed to restore terminal: {e}");
        }
    }
}

/// Keyboard input read from the controlling terminal
#[derive(Debug, Default)]
pub struct TerminalInput;

impl TerminalInput {
    pub fn new() -> Self {
        Self
    }
}

impl InputSource for TerminalInput {
    fn poll_events(&mut self, out: &mut Vec<InputEvent>) -> io::Result<()> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                // Held keys do not repeat flaps
                if key.kind == KeyEventKind::Press {
                    out.push(map_key(key));
                }
            }
        }
        Ok(())
    }
}

/// Translate a terminal key press into a game event
pub fn map_key(key: KeyEvent) -> InputEvent {
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('d'))
    {
        return InputEvent::Quit;
    }

    let key = match key.code {
        KeyCode::Esc => Key::Escape,
        KeyCode::Char(' ') | KeyCode::Up => Key::Jump,
        KeyCode::Char('r') | KeyCode::Char('R') => Key::Restart,
        _ => Key::Other,
    };
    InputEvent::KeyDown(key)
}
