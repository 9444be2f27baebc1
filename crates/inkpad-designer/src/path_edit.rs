//! Focused editor for one path's anchors and control handles.
//!
//! The manager never owns the path; every mutating call takes it by
//! `&mut`, rebuilds its path data and refreshes the handle list.
//!
//! Handle ownership follows the path storage convention: the incoming
//! handle of anchor `i` is its own `cp2`, the outgoing handle is `cp1` of
//! point `i + 1` (or the closing segment for the last anchor of a closed
//! path). Both are presented next to anchor `i` and obey its continuity
//! policy.

use inkpad_core::constants::{MIN_PATH_POINTS, PATH_HANDLE_RADIUS};

use crate::model::{Color, DesignPath, PathPoint, PathPointKind, Point, PointType};
use crate::surface::{DrawingSurface, Paint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    Anchor,
    Incoming,
    Outgoing,
    /// Control of the quadratic segment ending at the point.
    QuadControl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandleRef {
    pub point: usize,
    pub kind: HandleKind,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathHandle {
    pub handle: HandleRef,
    pub position: Point,
    /// Anchor the handle is tied to when drawn.
    pub anchor: Point,
}

/// Segment type a point can be converted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Line,
    Cubic,
    Quadratic,
}

#[derive(Debug, Clone)]
pub struct PathEditManager {
    shape_id: Option<u64>,
    handles: Vec<PathHandle>,
    active: Option<HandleRef>,
    radius: f64,
}

impl Default for PathEditManager {
    fn default() -> Self {
        Self::new(PATH_HANDLE_RADIUS)
    }
}

impl PathEditManager {
    pub fn new(radius: f64) -> Self {
        Self {
            shape_id: None,
            handles: Vec::new(),
            active: None,
            radius,
        }
    }

    pub fn begin(&mut self, shape_id: u64, path: &DesignPath) {
        tracing::debug!("Editing path {}", shape_id);
        self.shape_id = Some(shape_id);
        self.active = None;
        self.refresh_handles(path);
    }

    pub fn end(&mut self) {
        self.shape_id = None;
        self.active = None;
        self.handles.clear();
    }

    pub fn is_editing(&self) -> bool {
        self.shape_id.is_some()
    }

    pub fn shape_id(&self) -> Option<u64> {
        self.shape_id
    }

    pub fn handles(&self) -> &[PathHandle] {
        &self.handles
    }

    pub fn active(&self) -> Option<HandleRef> {
        self.active
    }

    pub fn set_active(&mut self, handle: Option<HandleRef>) {
        self.active = handle;
    }

    /// Rebuilds the handle list from the path's points.
    pub fn refresh_handles(&mut self, path: &DesignPath) {
        self.handles.clear();
        for (i, point) in path.points.iter().enumerate() {
            let anchor = point.position;
            self.handles.push(PathHandle {
                handle: HandleRef {
                    point: i,
                    kind: HandleKind::Anchor,
                },
                position: anchor,
                anchor,
            });
            if let Some(p) = path.incoming(i) {
                self.push_control(i, HandleKind::Incoming, p, anchor);
            }
            if let Some(p) = path.outgoing(i) {
                self.push_control(i, HandleKind::Outgoing, p, anchor);
            }
            if let PathPointKind::Quadratic { cp } = point.kind {
                self.push_control(i, HandleKind::QuadControl, cp, anchor);
            }
        }
    }

    fn push_control(&mut self, point: usize, kind: HandleKind, position: Point, anchor: Point) {
        self.handles.push(PathHandle {
            handle: HandleRef { point, kind },
            position,
            anchor,
        });
    }

    /// Closest handle within the hit radius of `p`.
    pub fn handle_at(&self, p: Point) -> Option<HandleRef> {
        self.handles
            .iter()
            .map(|h| (h, h.position.distance_to(&p)))
            .filter(|(_, d)| *d <= self.radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(h, _)| h.handle)
    }

    /// Moves `handle` to `to`. With `break_continuity` the sibling handle is
    /// left alone whatever the point's policy.
    pub fn move_handle(
        &mut self,
        path: &mut DesignPath,
        handle: HandleRef,
        to: Point,
        break_continuity: bool,
    ) -> bool {
        let i = handle.point;
        let Some(point) = path.points.get(i).copied() else {
            return false;
        };
        let anchor = point.position;
        let moved = match handle.kind {
            HandleKind::Anchor => {
                let dx = to.x - anchor.x;
                let dy = to.y - anchor.y;
                path.points[i].position = to;
                if let Some(p) = path.incoming(i) {
                    path.set_incoming(i, p.offset(dx, dy));
                }
                if let Some(p) = path.outgoing(i) {
                    path.set_outgoing(i, p.offset(dx, dy));
                }
                // quadratic controls on either side travel with the anchor
                for j in [i, i + 1] {
                    if let Some(PathPointKind::Quadratic { cp }) =
                        path.points.get_mut(j).map(|p| &mut p.kind)
                    {
                        *cp = cp.offset(dx, dy);
                    }
                }
                true
            }
            HandleKind::Incoming => {
                let moved = path.set_incoming(i, to);
                if moved && !break_continuity {
                    if let Some(sibling) = path.outgoing(i) {
                        if let Some(p) = constrain_sibling(anchor, to, sibling, point.point_type) {
                            path.set_outgoing(i, p);
                        }
                    }
                }
                moved
            }
            HandleKind::Outgoing => {
                let moved = path.set_outgoing(i, to);
                if moved && !break_continuity {
                    if let Some(sibling) = path.incoming(i) {
                        if let Some(p) = constrain_sibling(anchor, to, sibling, point.point_type) {
                            path.set_incoming(i, p);
                        }
                    }
                }
                moved
            }
            HandleKind::QuadControl => match &mut path.points[i].kind {
                PathPointKind::Quadratic { cp } => {
                    *cp = to;
                    true
                }
                _ => false,
            },
        };
        if moved {
            self.finish(path);
        }
        moved
    }

    /// Sets the continuity policy of point `index` and applies it at once:
    /// the outgoing handle is re-aimed from the incoming one.
    pub fn set_point_type(&mut self, path: &mut DesignPath, index: usize, point_type: PointType) -> bool {
        let Some(point) = path.points.get_mut(index) else {
            return false;
        };
        point.point_type = point_type;
        let anchor = point.position;
        if let (Some(incoming), Some(outgoing)) = (path.incoming(index), path.outgoing(index)) {
            if let Some(p) = constrain_sibling(anchor, incoming, outgoing, point_type) {
                path.set_outgoing(index, p);
            }
        }
        self.finish(path);
        true
    }

    /// Converts the segment ending at point `index`. Rejected for the
    /// initial move point and when the segment already has that kind.
    pub fn convert_point(&mut self, path: &mut DesignPath, index: usize, target: SegmentKind) -> bool {
        if index == 0 || index >= path.points.len() {
            tracing::warn!("Point {} has no incoming segment to convert", index);
            return false;
        }
        let prev = path.points[index - 1].position;
        let point = &mut path.points[index];
        let cur = point.position;
        let kind = match (point.kind, target) {
            (PathPointKind::Move, _) => {
                tracing::warn!("Cannot convert move point {}", index);
                return false;
            }
            (PathPointKind::Line, SegmentKind::Cubic) => PathPointKind::Cubic {
                cp1: prev.lerp(&cur, 1.0 / 3.0),
                cp2: prev.lerp(&cur, 2.0 / 3.0),
            },
            (PathPointKind::Line, SegmentKind::Quadratic) => PathPointKind::Quadratic {
                cp: prev.midpoint(&cur),
            },
            (PathPointKind::Cubic { cp1, cp2 }, SegmentKind::Quadratic) => {
                PathPointKind::Quadratic {
                    cp: cp1.midpoint(&cp2),
                }
            }
            (PathPointKind::Quadratic { cp }, SegmentKind::Cubic) => PathPointKind::Cubic {
                cp1: prev.lerp(&cp, 2.0 / 3.0),
                cp2: cur.lerp(&cp, 2.0 / 3.0),
            },
            (PathPointKind::Cubic { .. } | PathPointKind::Quadratic { .. }, SegmentKind::Line) => {
                PathPointKind::Line
            }
            _ => return false,
        };
        point.kind = kind;
        self.finish(path);
        true
    }

    /// Splits the segment ending at point `index` at its midpoint. Curves
    /// are subdivided so their shape is unchanged. Returns the new index.
    pub fn insert_point(&mut self, path: &mut DesignPath, index: usize) -> Option<usize> {
        if index == 0 || index >= path.points.len() {
            return None;
        }
        let prev = path.points[index - 1].position;
        let point = path.points[index];
        let cur = point.position;
        let (inserted, rest) = match point.kind {
            PathPointKind::Move => return None,
            PathPointKind::Line => (PathPoint::line_to(prev.midpoint(&cur)), PathPointKind::Line),
            PathPointKind::Cubic { cp1, cp2 } => {
                let p01 = prev.midpoint(&cp1);
                let p12 = cp1.midpoint(&cp2);
                let p23 = cp2.midpoint(&cur);
                let p012 = p01.midpoint(&p12);
                let p123 = p12.midpoint(&p23);
                let mid = p012.midpoint(&p123);
                (
                    PathPoint::cubic(p01, p012, mid),
                    PathPointKind::Cubic { cp1: p123, cp2: p23 },
                )
            }
            PathPointKind::Quadratic { cp } => {
                let q0 = prev.midpoint(&cp);
                let q1 = cp.midpoint(&cur);
                (
                    PathPoint::quadratic(q0, q0.midpoint(&q1)),
                    PathPointKind::Quadratic { cp: q1 },
                )
            }
        };
        path.points[index].kind = rest;
        path.points.insert(index, inserted);
        self.finish(path);
        Some(index)
    }

    /// Removes point `index`, refusing to go below the minimum point count.
    pub fn remove_point(&mut self, path: &mut DesignPath, index: usize) -> bool {
        if path.points.len() <= MIN_PATH_POINTS {
            tracing::warn!(
                "Path needs at least {} points, not removing point {}",
                MIN_PATH_POINTS,
                index
            );
            return false;
        }
        if index >= path.points.len() {
            return false;
        }
        path.points.remove(index);
        if index == 0 {
            if let Some(first) = path.points.first_mut() {
                first.kind = PathPointKind::Move;
            }
        }
        if self.active.is_some_and(|h| h.point >= index) {
            self.active = None;
        }
        self.finish(path);
        true
    }

    /// Appends a straight point, or the initial move point of an empty path.
    pub fn append_point(&mut self, path: &mut DesignPath, p: Point) {
        let point = if path.points.is_empty() {
            PathPoint::move_to(p)
        } else {
            PathPoint::line_to(p)
        };
        path.points.push(point);
        if path.closed {
            // the closing segment now starts from the new last anchor
            path.open();
            path.close();
        }
        self.finish(path);
    }

    pub fn toggle_closed(&mut self, path: &mut DesignPath) -> bool {
        let changed = if path.closed { path.open() } else { path.close() };
        if changed {
            self.finish(path);
        }
        changed
    }

    fn finish(&mut self, path: &mut DesignPath) {
        path.rebuild_data();
        self.refresh_handles(path);
    }

    pub fn render(&self, surface: &mut dyn DrawingSurface) {
        if self.handles.is_empty() {
            return;
        }
        let accent = Color::rgb(0x00, 0x78, 0xd4);
        surface.save();
        surface.set_line_dash(&[]);
        surface.set_stroke(Paint::Solid(accent), 1.0);
        for h in self.handles.iter().filter(|h| h.handle.kind != HandleKind::Anchor) {
            surface.stroke_line(h.anchor, h.position);
        }
        for h in &self.handles {
            let active = self.active == Some(h.handle);
            let fill = match (h.handle.kind, active) {
                (_, true) => accent,
                (HandleKind::Anchor, false) => Color::WHITE,
                _ => Color::rgb(0xdd, 0xee, 0xff),
            };
            surface.set_fill(Paint::Solid(fill));
            let r = if h.handle.kind == HandleKind::Anchor {
                self.radius
            } else {
                self.radius * 0.8
            };
            surface.fill_circle(h.position, r);
            surface.stroke_circle(h.position, r);
        }
        surface.restore();
    }
}

/// New position for the sibling of a handle moved to `moved`, or `None`
/// when the policy leaves it alone.
pub fn constrain_sibling(anchor: Point, moved: Point, sibling: Point, policy: PointType) -> Option<Point> {
    let vx = anchor.x - moved.x;
    let vy = anchor.y - moved.y;
    let len = vx.hypot(vy);
    match policy {
        PointType::Corner => None,
        PointType::Symmetrical => Some(Point::new(anchor.x + vx, anchor.y + vy)),
        PointType::Smooth => {
            if len < f64::EPSILON {
                return None;
            }
            let keep = anchor.distance_to(&sibling);
            Some(Point::new(
                anchor.x + vx / len * keep,
                anchor.y + vy / len * keep,
            ))
        }
    }
}
