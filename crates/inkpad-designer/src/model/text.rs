//! Text box: a rectangle whose content is word-wrapped to its width.

use serde::{Deserialize, Serialize};

use super::{AxisMap, Bounds, DesignerShape, Point, ShapeStyle};
use crate::surface::{DrawingSurface, HitTester};

/// Line advance as a multiple of the font size.
pub const LINE_HEIGHT: f64 = 1.2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignTextBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub text: String,
    pub font_size: f64,
    pub font_family: String,
}

impl DesignTextBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64, text: &str) -> Self {
        Self {
            x,
            y,
            width,
            height,
            text: text.to_string(),
            font_size: 16.0,
            font_family: "sans-serif".to_string(),
        }
    }

    pub fn set_bounds(&mut self, bounds: &Bounds) {
        self.x = bounds.x;
        self.y = bounds.y;
        self.width = bounds.width;
        self.height = bounds.height;
    }

    /// Baseline of the first line.
    pub fn first_baseline(&self) -> f64 {
        self.y + self.font_size
    }

    /// Greedy word wrap. Explicit newlines always break; a single word wider
    /// than the box keeps a line of its own.
    pub fn wrap_lines(&self, measure: impl Fn(&str) -> f64) -> Vec<String> {
        let mut lines = Vec::new();
        for paragraph in self.text.split('\n') {
            let mut current = String::new();
            for word in paragraph.split_whitespace() {
                if current.is_empty() {
                    current.push_str(word);
                    continue;
                }
                let candidate = format!("{} {}", current, word);
                if measure(&candidate) <= self.width {
                    current = candidate;
                } else {
                    lines.push(std::mem::take(&mut current));
                    current.push_str(word);
                }
            }
            lines.push(current);
        }
        lines
    }
}

impl DesignerShape for DesignTextBox {
    fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }

    fn anchor(&self) -> Point {
        Point::new(self.x, self.y)
    }

    fn render(&self, surface: &mut dyn DrawingSurface, style: &ShapeStyle) {
        if !style.apply_fill(surface, &self.bounds()) {
            return;
        }
        surface.set_font(&self.font_family, self.font_size);
        let lines = self.wrap_lines(|s| surface.measure_text(s));
        let advance = self.font_size * LINE_HEIGHT;
        for (i, line) in lines.iter().enumerate() {
            if !line.is_empty() {
                surface.fill_text(line, self.x, self.first_baseline() + advance * i as f64);
            }
        }
    }

    fn contains_point(&self, p: Point, _style: &ShapeStyle, _hit: &dyn HitTester) -> bool {
        self.bounds().contains(p)
    }

    fn to_markup(&self, attributes: &str) -> String {
        format!(
            r#"<text x="{}" y="{}" data-width="{}" data-height="{}" font-size="{}" font-family="{}" {}>{}</text>"#,
            self.x,
            self.first_baseline(),
            self.width,
            self.height,
            self.font_size,
            escape_xml(&self.font_family),
            attributes,
            escape_xml(&self.text)
        )
    }

    /// Text is not scaled, only its box.
    fn transform(&mut self, map: &AxisMap) {
        let a = map.apply(Point::new(self.x, self.y));
        let b = map.apply(Point::new(self.x + self.width, self.y + self.height));
        self.set_bounds(&Bounds::from_corners(a, b));
    }
}

pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
