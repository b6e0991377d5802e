//! Player input for the simulation
//!
//! The platform layer feeds button and pointer events in; the tick reads the
//! held/triggered state and advances the edge state once per tick.

use glam::DVec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Button {
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    MouseLeft,
}

impl Button {
    pub const ALL: [Button; 5] = [
        Button::KeyW,
        Button::KeyA,
        Button::KeyS,
        Button::KeyD,
        Button::MouseLeft,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Map a DOM-style key code to a movement key
    pub fn from_key_code(code: u32) -> Option<Self> {
        match code {
            87 => Some(Button::KeyW),
            65 => Some(Button::KeyA),
            83 => Some(Button::KeyS),
            68 => Some(Button::KeyD),
            _ => None,
        }
    }
}

/// Button and pointer state for a single tick (deterministic)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputState {
    held: [bool; 5],
    prev: [bool; 5],
    /// Pointer position in simulation space
    pub pointer: DVec2,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, button: Button) {
        self.held[button.index()] = true;
    }

    pub fn release(&mut self, button: Button) {
        self.held[button.index()] = false;
    }

    pub fn set(&mut self, button: Button, down: bool) {
        self.held[button.index()] = down;
    }

    pub fn set_pointer(&mut self, pos: DVec2) {
        self.pointer = pos;
    }

    pub fn is_held(&self, button: Button) -> bool {
        self.held[button.index()]
    }

    /// Held now but not at the last edge advance
    pub fn is_triggered(&self, button: Button) -> bool {
        self.held[button.index()] && !self.prev[button.index()]
    }

    /// Remember the current state for the next tick's trigger checks
    pub fn advance_edges(&mut self) {
        self.prev = self.held;
    }

    /// Movement intent from WASD: -1, 0 or +1 per axis, opposing keys cancel
    pub fn move_axes(&self) -> DVec2 {
        let axis = |neg: Button, pos: Button| -> f64 {
            (self.is_held(pos) as i8 - self.is_held(neg) as i8) as f64
        };
        DVec2::new(
            axis(Button::KeyA, Button::KeyD),
            axis(Button::KeyW, Button::KeyS),
        )
    }
}

/// Maps client (window) pixel coordinates onto the simulation's space for a
/// canvas displayed at an integer scale with a border
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenTransform {
    /// Client position of the canvas element's top-left corner
    pub origin: DVec2,
    pub border: f64,
    pub scale: f64,
}

impl Default for ScreenTransform {
    fn default() -> Self {
        Self {
            origin: DVec2::ZERO,
            border: 1.0,
            scale: 2.0,
        }
    }
}

impl ScreenTransform {
    pub fn client_to_sim(&self, client: DVec2) -> DVec2 {
        ((client - (self.origin + DVec2::splat(self.border))) / self.scale).round()
    }
}
