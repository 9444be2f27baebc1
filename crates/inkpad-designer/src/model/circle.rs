use serde::{Deserialize, Serialize};

use super::{AxisMap, Bounds, DesignerShape, Point, ShapeStyle};
use crate::surface::{DrawingSurface, HitTester};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignCircle {
    pub center: Point,
    pub radius: f64,
}

impl DesignCircle {
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }
}

impl DesignerShape for DesignCircle {
    fn bounds(&self) -> Bounds {
        Bounds::new(
            self.center.x - self.radius,
            self.center.y - self.radius,
            self.radius * 2.0,
            self.radius * 2.0,
        )
    }

    fn anchor(&self) -> Point {
        self.center
    }

    fn render(&self, surface: &mut dyn DrawingSurface, style: &ShapeStyle) {
        if style.apply_fill(surface, &self.bounds()) {
            surface.fill_circle(self.center, self.radius);
        }
        if style.apply_stroke(surface) {
            surface.stroke_circle(self.center, self.radius);
        }
    }

    fn contains_point(&self, p: Point, _style: &ShapeStyle, _hit: &dyn HitTester) -> bool {
        let dx = p.x - self.center.x;
        let dy = p.y - self.center.y;
        dx * dx + dy * dy <= self.radius * self.radius
    }

    fn to_markup(&self, attributes: &str) -> String {
        format!(
            r#"<circle cx="{}" cy="{}" r="{}" {}/>"#,
            self.center.x, self.center.y, self.radius, attributes
        )
    }

    /// Circles stay circular: the radius follows the smaller axis scale.
    fn transform(&mut self, map: &AxisMap) {
        self.center = map.apply(self.center);
        self.radius *= map.sx.abs().min(map.sy.abs());
    }
}
