//! Rendering interface
//!
//! The simulation never draws pixels itself. A platform renderer implements
//! [`Renderer`] (two primitives in simulation coordinates) and
//! [`draw_scene`] walks the state once per frame emitting calls.
//! [`DrawList`] records the calls for headless runs and tests.

pub mod shapes;

use glam::DVec2;
use serde::{Deserialize, Serialize};

pub use shapes::draw_scene;

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0x00, 0x00, 0x00);
    pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);
    pub const RED: Rgb = Rgb(0xff, 0x00, 0x00);
    pub const GREEN: Rgb = Rgb(0x00, 0xff, 0x00);
    pub const GREY: Rgb = Rgb(0xcc, 0xcc, 0xcc);

    /// Scale each channel by `factor` (clamped to 0-1)
    pub fn scaled(self, factor: f64) -> Rgb {
        let f = factor.clamp(0.0, 1.0);
        let ch = |c: u8| (c as f64 * f).round() as u8;
        Rgb(ch(self.0), ch(self.1), ch(self.2))
    }

    /// CSS-style hex string, e.g. `#ff0000`
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Primitive draw calls in simulation space
pub trait Renderer {
    /// Axis-aligned filled square centered on `center`
    fn draw_square(&mut self, center: DVec2, width: f64, color: Rgb);
    /// Filled circle
    fn draw_circle(&mut self, center: DVec2, radius: f64, color: Rgb);
}

/// A single recorded draw call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DrawCmd {
    Square { center: DVec2, width: f64, color: Rgb },
    Circle { center: DVec2, radius: f64, color: Rgb },
}

impl DrawCmd {
    pub fn color(&self) -> Rgb {
        match *self {
            DrawCmd::Square { color, .. } | DrawCmd::Circle { color, .. } => color,
        }
    }
}

/// Renderer that records every call in order
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn count_color(&self, color: Rgb) -> usize {
        self.commands.iter().filter(|c| c.color() == color).count()
    }
}

impl Renderer for DrawList {
    fn draw_square(&mut self, center: DVec2, width: f64, color: Rgb) {
        self.commands.push(DrawCmd::Square {
            center,
            width,
            color,
        });
    }

    fn draw_circle(&mut self, center: DVec2, radius: f64, color: Rgb) {
        self.commands.push(DrawCmd::Circle {
            center,
            radius,
            color,
        });
    }
}
