//! Shape model: the closed set of drawable variants and their common data.
//!
//! Every variant implements [`DesignerShape`]; [`ShapeKind`] dispatches to
//! the variant exhaustively and [`Shape`] adds the id and style shared by
//! all of them. Rotation is applied by `Shape` about the variant's
//! bounding-box center, both when drawing and when writing markup.

use serde::{Deserialize, Serialize};

use crate::surface::{DrawingSurface, GeometryHitTester, HitTester};

mod circle;
mod group;
mod line;
mod path;
mod properties;
mod rectangle;
mod style;
mod text;

pub use circle::DesignCircle;
pub use group::DesignGroup;
pub use line::DesignLine;
pub use path::{ClosingSegment, DesignPath, PathPoint, PathPointKind, PathSnapshot, PointType};
pub use properties::{PropertyKey, ShapeProperty};
pub use rectangle::DesignRect;
pub use style::{
    gradient_id, Color, Fill, GradientStop, LinearGradient, ShapeStyle, StrokeStyle,
};
pub use text::{DesignTextBox, LINE_HEIGHT};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    /// Linear interpolation towards `other`.
    pub fn lerp(&self, other: &Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        self.lerp(other, 0.5)
    }

    pub fn rotate_about(&self, center: &Point, degrees: f64) -> Point {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let dx = self.x - center.x;
        let dy = self.y - center.y;
        Point::new(
            center.x + dx * cos - dy * sin,
            center.y + dx * sin + dy * cos,
        )
    }

    /// Shortest distance from this point to the segment `a`–`b`.
    pub fn distance_to_segment(&self, a: &Point, b: &Point) -> f64 {
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let len_sq = dx * dx + dy * dy;
        if len_sq == 0.0 {
            return self.distance_to(a);
        }
        let t = (((self.x - a.x) * dx + (self.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
        self.distance_to(&Point::new(a.x + t * dx, a.y + t * dy))
    }
}

/// Axis-aligned box in canvas coordinates (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box spanning two arbitrary corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self::new(
            a.x.min(b.x),
            a.y.min(b.y),
            (a.x - b.x).abs(),
            (a.y - b.y).abs(),
        )
    }

    /// Smallest box containing every point; `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        let mut any = false;
        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
            any = true;
        }
        any.then(|| Self::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    pub fn intersects(&self, other: &Bounds) -> bool {
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.bottom()
            && other.y <= self.bottom()
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Bounds::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Bounds {
        Bounds::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    pub fn approx_eq(&self, other: &Bounds) -> bool {
        const EPS: f64 = 1e-9;
        (self.x - other.x).abs() < EPS
            && (self.y - other.y).abs() < EPS
            && (self.width - other.width).abs() < EPS
            && (self.height - other.height).abs() < EPS
    }
}

/// Per-axis affine map `p' = (p.x * sx + tx, p.y * sy + ty)`.
///
/// Translation and bounding-box rescaling are both expressed with it, so a
/// single traversal (`Shape::transform`) serves moving and resizing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisMap {
    pub sx: f64,
    pub sy: f64,
    pub tx: f64,
    pub ty: f64,
}

impl AxisMap {
    pub fn translation(dx: f64, dy: f64) -> Self {
        Self {
            sx: 1.0,
            sy: 1.0,
            tx: dx,
            ty: dy,
        }
    }

    /// Maps `from` onto `to`, keeping `from`'s top-left as the scaling
    /// origin. `None` when `from` has no area on either axis.
    pub fn between(from: &Bounds, to: &Bounds) -> Option<Self> {
        if from.width.abs() < f64::EPSILON || from.height.abs() < f64::EPSILON {
            return None;
        }
        let sx = to.width / from.width;
        let sy = to.height / from.height;
        Some(Self {
            sx,
            sy,
            tx: to.x - from.x * sx,
            ty: to.y - from.y * sy,
        })
    }

    /// Like `between`, but an axis with zero extent is only translated.
    pub fn between_lenient(from: &Bounds, to: &Bounds) -> Self {
        let (sx, tx) = if from.width.abs() < f64::EPSILON {
            (1.0, to.x - from.x)
        } else {
            let s = to.width / from.width;
            (s, to.x - from.x * s)
        };
        let (sy, ty) = if from.height.abs() < f64::EPSILON {
            (1.0, to.y - from.y)
        } else {
            let s = to.height / from.height;
            (s, to.y - from.y * s)
        };
        Self { sx, sy, tx, ty }
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(p.x * self.sx + self.tx, p.y * self.sy + self.ty)
    }
}

/// Behaviour every shape variant provides.
pub trait DesignerShape {
    /// Unrotated bounding box.
    fn bounds(&self) -> Bounds;

    /// Position anchor (top-left, center or first point depending on variant).
    fn anchor(&self) -> Point;

    /// Draws the variant in its own (unrotated) frame.
    fn render(&self, surface: &mut dyn DrawingSurface, style: &ShapeStyle);

    /// Containment test in the variant's own (unrotated) frame.
    fn contains_point(&self, p: Point, style: &ShapeStyle, hit: &dyn HitTester) -> bool;

    /// Markup element; `attributes` carries id, style and transform.
    fn to_markup(&self, attributes: &str) -> String;

    /// Applies an axis map to every coordinate the variant owns.
    fn transform(&mut self, map: &AxisMap);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeType {
    Rect,
    Circle,
    Line,
    Path,
    TextBox,
    Group,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShapeKind {
    Rect(DesignRect),
    Circle(DesignCircle),
    Line(DesignLine),
    Path(DesignPath),
    TextBox(DesignTextBox),
    Group(DesignGroup),
}

impl ShapeKind {
    fn inner(&self) -> &dyn DesignerShape {
        match self {
            ShapeKind::Rect(s) => s,
            ShapeKind::Circle(s) => s,
            ShapeKind::Line(s) => s,
            ShapeKind::Path(s) => s,
            ShapeKind::TextBox(s) => s,
            ShapeKind::Group(s) => s,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn DesignerShape {
        match self {
            ShapeKind::Rect(s) => s,
            ShapeKind::Circle(s) => s,
            ShapeKind::Line(s) => s,
            ShapeKind::Path(s) => s,
            ShapeKind::TextBox(s) => s,
            ShapeKind::Group(s) => s,
        }
    }

    pub fn shape_type(&self) -> ShapeType {
        match self {
            ShapeKind::Rect(_) => ShapeType::Rect,
            ShapeKind::Circle(_) => ShapeType::Circle,
            ShapeKind::Line(_) => ShapeType::Line,
            ShapeKind::Path(_) => ShapeType::Path,
            ShapeKind::TextBox(_) => ShapeType::TextBox,
            ShapeKind::Group(_) => ShapeType::Group,
        }
    }
}

/// A shape in the scene: stable id, common style and variant geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: u64,
    pub style: ShapeStyle,
    pub kind: ShapeKind,
}

impl Shape {
    pub fn new(id: u64, kind: ShapeKind, style: ShapeStyle) -> Self {
        Self { id, style, kind }
    }

    pub fn rect(id: u64, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(
            id,
            ShapeKind::Rect(DesignRect::new(x, y, width, height)),
            ShapeStyle::filled(Color::BLACK),
        )
    }

    pub fn circle(id: u64, center: Point, radius: f64) -> Self {
        Self::new(
            id,
            ShapeKind::Circle(DesignCircle::new(center, radius)),
            ShapeStyle::filled(Color::BLACK),
        )
    }

    pub fn line(id: u64, start: Point, end: Point) -> Self {
        Self::new(
            id,
            ShapeKind::Line(DesignLine::new(start, end)),
            ShapeStyle::stroked(Color::BLACK, 2.0),
        )
    }

    pub fn path(id: u64, path: DesignPath) -> Self {
        Self::new(
            id,
            ShapeKind::Path(path),
            ShapeStyle::stroked(Color::BLACK, 2.0),
        )
    }

    pub fn text_box(id: u64, x: f64, y: f64, width: f64, height: f64, text: &str) -> Self {
        Self::new(
            id,
            ShapeKind::TextBox(DesignTextBox::new(x, y, width, height, text)),
            ShapeStyle::filled(Color::BLACK),
        )
    }

    /// Builds a group owning `children`, anchored at their union's top-left.
    pub fn group(id: u64, children: Vec<Shape>) -> Self {
        Self::new(
            id,
            ShapeKind::Group(DesignGroup::new(children)),
            ShapeStyle::default(),
        )
    }

    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn shape_type(&self) -> ShapeType {
        self.kind.shape_type()
    }

    pub fn bounds(&self) -> Bounds {
        self.kind.inner().bounds()
    }

    pub fn anchor(&self) -> Point {
        self.kind.inner().anchor()
    }

    pub fn rotation(&self) -> f64 {
        self.style.rotation
    }

    /// Draws the shape, rotated about its bounding-box center.
    pub fn render(&self, surface: &mut dyn DrawingSurface) {
        surface.save();
        if self.style.rotation != 0.0 {
            let c = self.bounds().center();
            surface.translate(c.x, c.y);
            surface.rotate(self.style.rotation);
            surface.translate(-c.x, -c.y);
        }
        self.kind.inner().render(surface, &self.style);
        surface.restore();
    }

    /// Hit-test with lyon-backed path queries.
    pub fn contains_point(&self, p: Point) -> bool {
        self.contains_point_with(p, &GeometryHitTester::default())
    }

    /// Hit-test delegating path queries to `hit`.
    pub fn contains_point_with(&self, p: Point, hit: &dyn HitTester) -> bool {
        let local = if self.style.rotation != 0.0 {
            p.rotate_about(&self.bounds().center(), -self.style.rotation)
        } else {
            p
        };
        self.kind.inner().contains_point(local, &self.style, hit)
    }

    /// `transform="rotate(angle, cx, cy)"` when rotated, empty otherwise.
    pub fn transform_attribute(&self) -> String {
        if self.style.rotation == 0.0 {
            return String::new();
        }
        let c = self.bounds().center();
        format!(
            r#" transform="rotate({}, {}, {})""#,
            self.style.rotation, c.x, c.y
        )
    }

    pub fn to_markup(&self) -> String {
        let attributes = match self.kind {
            ShapeKind::Group(_) => format!(r#"id="shape-{}"{}"#, self.id, self.transform_attribute()),
            _ => format!(
                r#"id="shape-{}" {}{}"#,
                self.id,
                self.style.markup_attributes(self.id),
                self.transform_attribute()
            ),
        };
        self.kind.inner().to_markup(&attributes)
    }

    /// Appends gradient definitions for this shape and its descendants.
    pub fn collect_gradient_defs(&self, defs: &mut Vec<String>) {
        if let Some(Fill::LinearGradient(gradient)) = &self.style.fill {
            let mut def = format!(
                r#"<linearGradient id="{}" x1="0" y1="0" x2="1" y2="0" gradientTransform="rotate({} 0.5 0.5)">"#,
                gradient_id(self.id),
                gradient.angle
            );
            for stop in &gradient.stops {
                def.push_str(&format!(
                    r#"<stop offset="{}" stop-color="{}"/>"#,
                    stop.offset,
                    stop.color.to_hex()
                ));
            }
            def.push_str("</linearGradient>");
            defs.push(def);
        }
        if let ShapeKind::Group(group) = &self.kind {
            for child in &group.children {
                child.collect_gradient_defs(defs);
            }
        }
    }

    /// Applies `map` to this shape and, for groups, every descendant.
    pub fn transform(&mut self, map: &AxisMap) {
        self.kind.inner_mut().transform(map);
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.transform(&AxisMap::translation(dx, dy));
    }

    /// Re-fits the shape from bounding box `from` to `to`.
    ///
    /// Box-like variants take `to` directly, circles take its center and
    /// the smaller half-extent, lines and paths are mapped point by point
    /// (an axis with zero extent is only translated). Groups are rescaled
    /// as a whole relative to `from`'s top-left; a group with zero-size
    /// `from` is left untouched and `false` is returned.
    pub fn fit_bounds(&mut self, from: &Bounds, to: &Bounds) -> bool {
        match &mut self.kind {
            ShapeKind::Rect(rect) => {
                rect.set_bounds(to);
                true
            }
            ShapeKind::TextBox(text) => {
                text.set_bounds(to);
                true
            }
            ShapeKind::Circle(circle) => {
                circle.center = to.center();
                circle.radius = to.width.min(to.height) / 2.0;
                true
            }
            ShapeKind::Line(_) | ShapeKind::Path(_) => {
                let map = AxisMap::between_lenient(from, to);
                self.transform(&map);
                true
            }
            ShapeKind::Group(_) => match AxisMap::between(from, to) {
                Some(map) => {
                    self.transform(&map);
                    true
                }
                None => {
                    tracing::warn!(
                        "Group {} has a zero-size source bound, skipping rescale",
                        self.id
                    );
                    false
                }
            },
        }
    }

    pub fn as_path(&self) -> Option<&DesignPath> {
        match &self.kind {
            ShapeKind::Path(path) => Some(path),
            _ => None,
        }
    }

    pub fn as_path_mut(&mut self) -> Option<&mut DesignPath> {
        match &mut self.kind {
            ShapeKind::Path(path) => Some(path),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&DesignGroup> {
        match &self.kind {
            ShapeKind::Group(group) => Some(group),
            _ => None,
        }
    }

    pub fn as_group_mut(&mut self) -> Option<&mut DesignGroup> {
        match &mut self.kind {
            ShapeKind::Group(group) => Some(group),
            _ => None,
        }
    }

    /// Depth-first search for `id` in this shape's subtree (itself included).
    pub fn find(&self, id: u64) -> Option<&Shape> {
        if self.id == id {
            return Some(self);
        }
        self.as_group()?
            .children
            .iter()
            .find_map(|child| child.find(id))
    }

    pub fn find_mut(&mut self, id: u64) -> Option<&mut Shape> {
        if self.id == id {
            return Some(self);
        }
        match &mut self.kind {
            ShapeKind::Group(group) => group
                .children
                .iter_mut()
                .find_map(|child| child.find_mut(id)),
            _ => None,
        }
    }

    /// Ids of this shape and all descendants, depth-first.
    pub fn subtree_ids(&self) -> Vec<u64> {
        let mut ids = vec![self.id];
        if let ShapeKind::Group(group) = &self.kind {
            for child in &group.children {
                ids.extend(child.subtree_ids());
            }
        }
        ids
    }
}
