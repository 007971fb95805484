use std::collections::HashMap;
use std::io;
use std::time::Duration;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::types::{Rect, Viewport};

/// What the game cares about from the terminal's event stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameInput {
    Close,            // The window-close signal.
    Press(Rect),      // Pointer press over the logical area of one cell.
    Resize(u16, u16), // New terminal size in cells.
}

/// Anything that can hand over the raw events pending for a frame.
pub trait EventSource {
    fn drain(&mut self, frame_count: u64) -> io::Result<Vec<Event>>;
}

/// Reads the real terminal without blocking.
pub struct TerminalInput;

impl EventSource for TerminalInput {
    fn drain(&mut self, _frame_count: u64) -> io::Result<Vec<Event>> {
        let mut out = Vec::new();
        while event::poll(Duration::ZERO)? {
            out.push(event::read()?);
        }
        Ok(out)
    }
}

// --- SimulatedInput for debugging ---
pub struct SimulatedInput {
    events: HashMap<u64, Vec<Event>>,
}

impl SimulatedInput {
    pub fn new(events: HashMap<u64, Vec<Event>>) -> Self {
        SimulatedInput { events }
    }

    pub fn push(&mut self, frame_count: u64, event: Event) {
        self.events.entry(frame_count).or_default().push(event);
    }
}

impl EventSource for SimulatedInput {
    fn drain(&mut self, frame_count: u64) -> io::Result<Vec<Event>> {
        Ok(self.events.remove(&frame_count).unwrap_or_default())
    }
}

/// Maps a raw terminal event onto game input, using the viewport for pointer positions.
pub fn translate(event: &Event, viewport: &Viewport) -> Option<GameInput> {
    match event {
        Event::Mouse(MouseEvent { kind: MouseEventKind::Down(MouseButton::Left), column, row, .. }) => {
            Some(GameInput::Press(viewport.cell_span(*column, *row)))
        }
        Event::Key(KeyEvent { code, modifiers, kind: KeyEventKind::Press, .. }) => match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(GameInput::Close),
            KeyCode::Esc | KeyCode::Char('q') => Some(GameInput::Close),
            _ => None,
        },
        Event::Resize(cols, rows) => Some(GameInput::Resize(*cols, *rows)),
        _ => None,
    }
}

/// A left-button press at a terminal cell.
pub fn mouse_down(column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

/// The key event the close signal is scripted with.
pub fn close_key() -> Event {
    Event::Key(KeyCode::Esc.into())
}
