//! Resize handles for a single selected shape, plus the rotation helper.
//!
//! Handles are laid out on the shape's unrotated bounding box and rotated
//! with the shape when drawn; hit-testing undoes that rotation first.

use inkpad_core::constants::{HANDLE_HALF_SIZE, MIN_BOX_SIZE, MIN_CIRCLE_RADIUS};

use crate::model::{Bounds, Color, Point, Shape, ShapeKind};
use crate::surface::{DrawingSurface, Paint};

/// Compass position of a resize handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    NW,
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
}

impl Handle {
    pub const ALL: [Handle; 8] = [
        Handle::NW,
        Handle::N,
        Handle::NE,
        Handle::E,
        Handle::SE,
        Handle::S,
        Handle::SW,
        Handle::W,
    ];

    /// Unit outward direction, y grows downwards.
    pub fn direction(&self) -> (f64, f64) {
        match self {
            Handle::NW => (-1.0, -1.0),
            Handle::N => (0.0, -1.0),
            Handle::NE => (1.0, -1.0),
            Handle::E => (1.0, 0.0),
            Handle::SE => (1.0, 1.0),
            Handle::S => (0.0, 1.0),
            Handle::SW => (-1.0, 1.0),
            Handle::W => (-1.0, 0.0),
        }
    }

    pub fn is_corner(&self) -> bool {
        let (x, y) = self.direction();
        x != 0.0 && y != 0.0
    }

    /// NW, W and SW.
    pub fn is_west(&self) -> bool {
        self.direction().0 < 0.0
    }

    pub fn position(&self, bounds: &Bounds) -> Point {
        let (dx, dy) = self.direction();
        let c = bounds.center();
        Point::new(
            c.x + dx * bounds.width / 2.0,
            c.y + dy * bounds.height / 2.0,
        )
    }
}

#[derive(Debug, Clone)]
pub struct TransformControls {
    half_size: f64,
    handles: Vec<(Handle, Bounds)>,
    center: Point,
    rotation: f64,
}

impl Default for TransformControls {
    fn default() -> Self {
        Self::new(HANDLE_HALF_SIZE)
    }
}

impl TransformControls {
    pub fn new(half_size: f64) -> Self {
        Self {
            half_size,
            handles: Vec::new(),
            center: Point::default(),
            rotation: 0.0,
        }
    }

    /// Recomputes the handle squares from `shape`'s live geometry.
    pub fn refresh(&mut self, shape: &Shape) {
        let bounds = shape.bounds();
        self.center = bounds.center();
        self.rotation = shape.rotation();
        let s = self.half_size;
        self.handles = Handle::ALL
            .iter()
            .map(|h| {
                let p = h.position(&bounds);
                (*h, Bounds::new(p.x - s, p.y - s, s * 2.0, s * 2.0))
            })
            .collect();
    }

    pub fn clear(&mut self) {
        self.handles.clear();
    }

    pub fn handles(&self) -> &[(Handle, Bounds)] {
        &self.handles
    }

    /// Handle whose square contains `p`, if any.
    pub fn handle_at(&self, p: Point) -> Option<Handle> {
        let local = if self.rotation != 0.0 {
            p.rotate_about(&self.center, -self.rotation)
        } else {
            p
        };
        self.handles
            .iter()
            .find(|(_, square)| square.contains(local))
            .map(|(h, _)| *h)
    }

    pub fn render(&self, surface: &mut dyn DrawingSurface) {
        if self.handles.is_empty() {
            return;
        }
        surface.save();
        if self.rotation != 0.0 {
            surface.translate(self.center.x, self.center.y);
            surface.rotate(self.rotation);
            surface.translate(-self.center.x, -self.center.y);
        }
        surface.set_fill(Paint::Solid(Color::WHITE));
        surface.set_stroke(Paint::Solid(Color::rgb(0x00, 0x78, 0xd4)), 1.0);
        surface.set_line_dash(&[]);
        for (_, square) in &self.handles {
            surface.fill_rect(*square);
            surface.stroke_rect(*square);
        }
        surface.restore();
    }

    /// Applies a handle drag of `(dx, dy)` to `shape`.
    pub fn resize(shape: &mut Shape, handle: Handle, dx: f64, dy: f64) {
        if matches!(shape.kind, ShapeKind::Path(_) | ShapeKind::Group(_)) {
            let from = shape.bounds();
            let to = resize_box(&from, handle, dx, dy, MIN_BOX_SIZE);
            shape.fit_bounds(&from, &to);
            return;
        }
        match &mut shape.kind {
            ShapeKind::Rect(rect) => {
                let current = Bounds::new(rect.x, rect.y, rect.width, rect.height);
                let b = resize_box(&current, handle, dx, dy, MIN_BOX_SIZE);
                rect.set_bounds(&b);
            }
            ShapeKind::TextBox(text) => {
                let current = Bounds::new(text.x, text.y, text.width, text.height);
                let b = resize_box(&current, handle, dx, dy, MIN_BOX_SIZE);
                text.set_bounds(&b);
            }
            ShapeKind::Circle(circle) => {
                let (ox, oy) = handle.direction();
                let outward = dx * ox + dy * oy;
                let magnitude = if handle.is_corner() {
                    dx.hypot(dy)
                } else {
                    outward.abs()
                };
                let change = outward.signum() * magnitude;
                circle.radius = (circle.radius + change).max(MIN_CIRCLE_RADIUS);
            }
            ShapeKind::Line(line) => {
                if handle.is_west() {
                    line.start = line.start.offset(dx, dy);
                } else {
                    line.end = line.end.offset(dx, dy);
                }
            }
            ShapeKind::Path(_) | ShapeKind::Group(_) => {}
        }
    }
}

/// Moves the edges named by `handle`, keeping the opposite edges fixed and
/// flooring each affected dimension at `min`.
pub fn resize_box(b: &Bounds, handle: Handle, dx: f64, dy: f64, min: f64) -> Bounds {
    let (hx, hy) = handle.direction();
    let mut left = b.x;
    let mut right = b.right();
    let mut top = b.y;
    let mut bottom = b.bottom();
    if hx < 0.0 {
        left = (left + dx).min(right - min);
    } else if hx > 0.0 {
        right = (right + dx).max(left + min);
    }
    if hy < 0.0 {
        top = (top + dy).min(bottom - min);
    } else if hy > 0.0 {
        bottom = (bottom + dy).max(top + min);
    }
    Bounds::new(left, top, right - left, bottom - top)
}

/// Rotation in degrees that points the top of a shape centered at `pivot`
/// towards `pointer`. With `snap`, rounds to 15 degree steps.
pub fn rotation_towards(pivot: Point, pointer: Point, snap: bool) -> f64 {
    let angle = (pointer.y - pivot.y).atan2(pointer.x - pivot.x).to_degrees() + 90.0;
    let angle = if snap { (angle / 15.0).round() * 15.0 } else { angle };
    angle.rem_euclid(360.0)
}
