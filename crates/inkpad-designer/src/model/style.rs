//! Fill, stroke and color types shared by every shape.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Bounds, Point};
use crate::surface::{DrawingSurface, Paint};

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(text: &str) -> Option<Self> {
        let hex = text.trim().strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            3 => {
                let mut out = [0u8; 3];
                for (slot, c) in out.iter_mut().zip(hex.chars()) {
                    let v = c.to_digit(16)? as u8;
                    *slot = v * 16 + v;
                }
                Some(Self::rgb(out[0], out[1], out[2]))
            }
            6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    /// `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// 0.0 to 1.0
    pub offset: f64,
    pub color: Color,
}

impl GradientStop {
    pub fn new(offset: f64, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Linear gradient laid across a shape's bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearGradient {
    /// Direction in degrees; 0 runs left to right, 90 top to bottom.
    pub angle: f64,
    pub stops: Vec<GradientStop>,
}

impl LinearGradient {
    pub fn new(angle: f64, stops: Vec<GradientStop>) -> Self {
        Self { angle, stops }
    }

    /// Start and end points of the gradient line so that it spans `bounds`
    /// along `angle`, centered on the box.
    pub fn endpoints(&self, bounds: &Bounds) -> (Point, Point) {
        let (sin, cos) = self.angle.to_radians().sin_cos();
        let half = (bounds.width * cos.abs() + bounds.height * sin.abs()) / 2.0;
        let c = bounds.center();
        (
            Point::new(c.x - cos * half, c.y - sin * half),
            Point::new(c.x + cos * half, c.y + sin * half),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Fill {
    Solid(Color),
    LinearGradient(LinearGradient),
}

impl Fill {
    pub fn paint(&self, bounds: &Bounds) -> Paint {
        match self {
            Fill::Solid(color) => Paint::Solid(*color),
            Fill::LinearGradient(gradient) => {
                let (start, end) = gradient.endpoints(bounds);
                Paint::LinearGradient {
                    start,
                    end,
                    stops: gradient.stops.clone(),
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f64,
}

impl StrokeStyle {
    pub fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }
}

/// Style block common to every shape variant.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShapeStyle {
    pub fill: Option<Fill>,
    pub stroke: Option<StrokeStyle>,
    /// Rotation in degrees about the shape's bounding-box center.
    pub rotation: f64,
}

impl ShapeStyle {
    pub fn filled(color: Color) -> Self {
        Self {
            fill: Some(Fill::Solid(color)),
            ..Self::default()
        }
    }

    pub fn stroked(color: Color, width: f64) -> Self {
        Self {
            stroke: Some(StrokeStyle::new(color, width)),
            ..Self::default()
        }
    }

    pub fn stroke_width(&self) -> f64 {
        self.stroke.map(|s| s.width).unwrap_or(0.0)
    }

    /// Selects the fill paint on `surface`; returns false when unfilled.
    pub fn apply_fill(&self, surface: &mut dyn DrawingSurface, bounds: &Bounds) -> bool {
        match &self.fill {
            Some(fill) => {
                surface.set_fill(fill.paint(bounds));
                true
            }
            None => false,
        }
    }

    /// Selects the stroke paint on `surface`; returns false when unstroked.
    pub fn apply_stroke(&self, surface: &mut dyn DrawingSurface) -> bool {
        match self.stroke {
            Some(stroke) if stroke.width > 0.0 => {
                surface.set_stroke(Paint::Solid(stroke.color), stroke.width);
                true
            }
            _ => false,
        }
    }

    /// Markup attributes for fill and stroke. `shape_id` names the gradient
    /// definition emitted separately by `Shape::collect_gradient_defs`.
    pub fn markup_attributes(&self, shape_id: u64) -> String {
        let fill = match &self.fill {
            Some(Fill::Solid(color)) => color.to_hex(),
            Some(Fill::LinearGradient(_)) => format!("url(#{})", gradient_id(shape_id)),
            None => "none".to_string(),
        };
        match self.stroke {
            Some(stroke) => format!(
                r#"fill="{}" stroke="{}" stroke-width="{}""#,
                fill,
                stroke.color.to_hex(),
                stroke.width
            ),
            None => format!(r#"fill="{}" stroke="none""#, fill),
        }
    }
}

/// Identifier shared by a shape's gradient fill reference and definition.
pub fn gradient_id(shape_id: u64) -> String {
    format!("gradient-{}", shape_id)
}
