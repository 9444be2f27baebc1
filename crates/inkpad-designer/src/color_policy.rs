//! Color choice for newly drawn shapes.

use crate::model::Color;

/// Picks the fill color of the next new shape.
pub trait ColorPolicy {
    fn next_color(&mut self) -> Color;
}

/// Cycles through a fixed palette in order.
#[derive(Debug, Clone)]
pub struct PaletteCycle {
    palette: Vec<Color>,
    counter: usize,
}

impl PaletteCycle {
    /// An empty palette falls back to black.
    pub fn new(palette: Vec<Color>) -> Self {
        Self {
            palette,
            counter: 0,
        }
    }
}

impl Default for PaletteCycle {
    fn default() -> Self {
        Self::new(vec![
            Color::rgb(0x34, 0x98, 0xdb),
            Color::rgb(0xe7, 0x4c, 0x3c),
            Color::rgb(0x2e, 0xcc, 0x71),
            Color::rgb(0xf1, 0xc4, 0x0f),
            Color::rgb(0x9b, 0x59, 0xb6),
            Color::rgb(0x1a, 0xbc, 0x9c),
            Color::rgb(0xe6, 0x7e, 0x22),
        ])
    }
}

impl ColorPolicy for PaletteCycle {
    fn next_color(&mut self) -> Color {
        if self.palette.is_empty() {
            return Color::BLACK;
        }
        let color = self.palette[self.counter % self.palette.len()];
        self.counter += 1;
        color
    }
}

/// Always the same color.
#[derive(Debug, Clone, Copy)]
pub struct FixedColor(pub Color);

impl ColorPolicy for FixedColor {
    fn next_color(&mut self) -> Color {
        self.0
    }
}
