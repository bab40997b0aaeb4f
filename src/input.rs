//! Keyboard state for the game loops.
//!
//! Key events arrive asynchronously; [`KeyTracker`] remembers the frame each
//! key was last reported and answers "is it held?" per frame, so diagonal
//! moves and firing while moving work on any terminal.  Terminals with the
//! kitty keyboard protocol also send `Release`, which drops a key at once.
//! Elsewhere a key lapses after [`HOLD_WINDOW`] quiet frames.
//!
//! Space is special: a fresh press is latched as a fire edge until the next
//! [`KeyTracker::snapshot`], so one tap fires exactly one volley.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Frames a key stays held after its last press/repeat.  At 50 fps this is
/// 120 ms, longer than the gap between OS auto-repeat events (about 67 ms
/// at 15 Hz), so a held key never flickers off between repeats.
pub const HOLD_WINDOW: u64 = 6;

/// Per-frame view of the five game keys plus the fire edge.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    /// Fire was pressed (not repeated) since the previous snapshot.
    pub fire_pressed: bool,
}

impl InputSnapshot {
    /// Sum of the held directional keys, each contributing a unit step.
    pub fn movement(&self) -> (i32, i32) {
        let mut dx = 0;
        let mut dy = 0;
        if self.up {
            dy -= 1;
        }
        if self.down {
            dy += 1;
        }
        if self.left {
            dx -= 1;
        }
        if self.right {
            dx += 1;
        }
        (dx, dy)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    Quit,
}

#[derive(Debug, Default)]
pub struct KeyTracker {
    // Maps each held key → the frame it was last seen (press or repeat).
    key_frame: HashMap<KeyCode, u64>,
    fire_edge: bool,
}

impl KeyTracker {
    pub fn new() -> Self {
        KeyTracker::default()
    }

    /// Feed one key event seen during `frame`.  Returns a command for keys
    /// that act immediately rather than being held.
    pub fn record(&mut self, event: KeyEvent, frame: u64) -> Option<Command> {
        let code = normalize(event.code);
        match event.kind {
            KeyEventKind::Press => {
                match code {
                    KeyCode::Char('q') | KeyCode::Esc => return Some(Command::Quit),
                    KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Some(Command::Quit);
                    }
                    KeyCode::Char(' ') => {
                        // A classic terminal's auto-repeat arrives as Press too;
                        // only a fresh press is an edge.
                        if !self.is_held(&code, frame) {
                            self.fire_edge = true;
                        }
                    }
                    _ => {}
                }
                self.key_frame.insert(code, frame);
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(code, frame);
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&code);
            }
        }
        None
    }

    /// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
    fn is_held(&self, key: &KeyCode, frame: u64) -> bool {
        self.key_frame
            .get(key)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    /// Held-key view for `frame`; consumes the pending fire edge.
    pub fn snapshot(&mut self, frame: u64) -> InputSnapshot {
        let snapshot = InputSnapshot {
            up: self.is_held(&KeyCode::Up, frame),
            down: self.is_held(&KeyCode::Down, frame),
            left: self.is_held(&KeyCode::Left, frame),
            right: self.is_held(&KeyCode::Right, frame),
            fire: self.is_held(&KeyCode::Char(' '), frame),
            fire_pressed: self.fire_edge,
        };
        self.fire_edge = false;
        snapshot
    }
}

/// Fold WASD and upper-case letters onto the canonical keys.
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char('w') | KeyCode::Char('W') => KeyCode::Up,
        KeyCode::Char('s') | KeyCode::Char('S') => KeyCode::Down,
        KeyCode::Char('a') | KeyCode::Char('A') => KeyCode::Left,
        KeyCode::Char('d') | KeyCode::Char('D') => KeyCode::Right,
        KeyCode::Char('Q') => KeyCode::Char('q'),
        other => other,
    }
}
