//! Straight line segment.

use serde::{Deserialize, Serialize};

use super::{AxisMap, Bounds, DesignerShape, Point, ShapeStyle};
use crate::surface::{DrawingSurface, HitTester};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignLine {
    pub start: Point,
    pub end: Point,
}

impl DesignLine {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }
}

impl DesignerShape for DesignLine {
    fn bounds(&self) -> Bounds {
        Bounds::from_corners(self.start, self.end)
    }

    fn anchor(&self) -> Point {
        self.start
    }

    fn render(&self, surface: &mut dyn DrawingSurface, style: &ShapeStyle) {
        if style.apply_stroke(surface) {
            surface.stroke_line(self.start, self.end);
        }
    }

    /// Within stroke width plus the hit tolerance of the segment.
    fn contains_point(&self, p: Point, style: &ShapeStyle, hit: &dyn HitTester) -> bool {
        p.distance_to_segment(&self.start, &self.end) <= style.stroke_width() + hit.tolerance()
    }

    fn to_markup(&self, attributes: &str) -> String {
        format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" {}/>"#,
            self.start.x, self.start.y, self.end.x, self.end.y, attributes
        )
    }

    fn transform(&mut self, map: &AxisMap) {
        self.start = map.apply(self.start);
        self.end = map.apply(self.end);
    }
}
