//! Composite shape exclusively owning an ordered list of children.

use serde::{Deserialize, Serialize};

use super::{AxisMap, Bounds, DesignerShape, Point, Shape, ShapeStyle};
use crate::surface::{DrawingSurface, HitTester};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignGroup {
    pub children: Vec<Shape>,
    /// Top-left of the children at grouping time, moved with the group.
    pub origin: Point,
}

impl DesignGroup {
    pub fn new(children: Vec<Shape>) -> Self {
        let origin = union_bounds(&children)
            .map(|b| Point::new(b.x, b.y))
            .unwrap_or_default();
        Self { children, origin }
    }

    /// Total number of shapes below this group, at every depth.
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.as_group().map_or(0, DesignGroup::descendant_count))
            .sum()
    }
}

/// Union of the shapes' bounds; `None` when empty.
pub fn union_bounds(shapes: &[Shape]) -> Option<Bounds> {
    shapes
        .iter()
        .map(Shape::bounds)
        .reduce(|acc, b| acc.union(&b))
}

impl DesignerShape for DesignGroup {
    fn bounds(&self) -> Bounds {
        union_bounds(&self.children)
            .unwrap_or_else(|| Bounds::new(self.origin.x, self.origin.y, 0.0, 0.0))
    }

    fn anchor(&self) -> Point {
        self.origin
    }

    fn render(&self, surface: &mut dyn DrawingSurface, _style: &ShapeStyle) {
        for child in &self.children {
            child.render(surface);
        }
    }

    fn contains_point(&self, p: Point, _style: &ShapeStyle, hit: &dyn HitTester) -> bool {
        self.children
            .iter()
            .any(|child| child.contains_point_with(p, hit))
    }

    fn to_markup(&self, attributes: &str) -> String {
        let mut out = format!("<g {}>", attributes);
        for child in &self.children {
            out.push_str(&child.to_markup());
        }
        out.push_str("</g>");
        out
    }

    fn transform(&mut self, map: &AxisMap) {
        self.origin = map.apply(self.origin);
        for child in &mut self.children {
            child.transform(map);
        }
    }
}
