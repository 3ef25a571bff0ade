//! Host-side input assembly
//!
//! Key and drag events arrive whenever the windowing layer delivers them;
//! the simulation reads one `TickInput` per tick. This buffer sits in
//! between: it tracks held keys, latches key-down edges and accumulates
//! drag until the next snapshot is taken.

use glam::Vec2;

use crate::sim::{HeldDirections, TickInput};

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Special,
}

#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HeldDirections,
    special_held: bool,
    special_edge: bool,
    drag: Vec2,
    /// Idle/demo mode passed through to the tick
    pub idle_mode: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key pressed (auto-repeat presses are harmless)
    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Up => self.held.up = true,
            Key::Down => self.held.down = true,
            Key::Left => self.held.left = true,
            Key::Right => self.held.right = true,
            Key::Special => {
                if !self.special_held {
                    self.special_edge = true;
                }
                self.special_held = true;
            }
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Up => self.held.up = false,
            Key::Down => self.held.down = false,
            Key::Left => self.held.left = false,
            Key::Right => self.held.right = false,
            Key::Special => self.special_held = false,
        }
    }

    /// Accumulate a drag gesture delta
    pub fn drag(&mut self, delta: Vec2) {
        if delta.is_finite() {
            self.drag += delta;
        }
    }

    /// Drop all held keys (e.g. on window blur)
    pub fn release_all(&mut self) {
        self.held = HeldDirections::default();
        self.special_held = false;
        self.special_edge = false;
        self.drag = Vec2::ZERO;
    }

    /// Input for the next tick. Held keys persist; the special edge and
    /// drag are consumed.
    pub fn take_tick_input(&mut self) -> TickInput {
        let drag = std::mem::take(&mut self.drag);
        TickInput {
            held: self.held,
            special: std::mem::take(&mut self.special_edge),
            drag: (drag != Vec2::ZERO).then_some(drag),
            idle_mode: self.idle_mode,
        }
    }

    pub fn held(&self) -> HeldDirections {
        self.held
    }
}
