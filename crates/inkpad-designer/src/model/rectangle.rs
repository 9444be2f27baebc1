//! Rectangle shape.

use serde::{Deserialize, Serialize};

use super::{AxisMap, Bounds, DesignerShape, Point, ShapeStyle};
use crate::surface::{DrawingSurface, HitTester};

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DesignRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn set_bounds(&mut self, bounds: &Bounds) {
        self.x = bounds.x;
        self.y = bounds.y;
        self.width = bounds.width;
        self.height = bounds.height;
    }
}

impl DesignerShape for DesignRect {
    fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }

    fn anchor(&self) -> Point {
        Point::new(self.x, self.y)
    }

    fn render(&self, surface: &mut dyn DrawingSurface, style: &ShapeStyle) {
        let bounds = self.bounds();
        if style.apply_fill(surface, &bounds) {
            surface.fill_rect(bounds);
        }
        if style.apply_stroke(surface) {
            surface.stroke_rect(bounds);
        }
    }

    fn contains_point(&self, p: Point, _style: &ShapeStyle, _hit: &dyn HitTester) -> bool {
        self.bounds().contains(p)
    }

    fn to_markup(&self, attributes: &str) -> String {
        format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" {}/>"#,
            self.x, self.y, self.width, self.height, attributes
        )
    }

    fn transform(&mut self, map: &AxisMap) {
        let a = map.apply(Point::new(self.x, self.y));
        let b = map.apply(Point::new(self.x + self.width, self.y + self.height));
        self.set_bounds(&Bounds::from_corners(a, b));
    }
}
