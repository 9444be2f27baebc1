//! Bezier path shape.
//!
//! Points are stored in drawing order. A cubic point carries both controls
//! of the segment that *ends* at it, so the outgoing handle of point `i`
//! lives on point `i + 1` as `cp1` while its incoming handle is its own
//! `cp2`. A closed path additionally owns a closing cubic segment running
//! from the last anchor back to the first; its controls serve as the last
//! anchor's outgoing handle and the first anchor's incoming handle.
//!
//! The serialized path data (`M x y`, `L x y`, `C ...`, `Q ...`, `Z`) is
//! cached and rebuilt after every mutation.

use std::sync::LazyLock;

use inkpad_core::MarkupError;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{AxisMap, Bounds, DesignerShape, Point, ShapeStyle};
use crate::surface::{DrawingSurface, HitTester, PathGeometry};

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d*\.?\d+(?:[eE][-+]?\d+)?").expect("valid number regex"));

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[MLCQZmlcqz]|[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?|[^\s,]")
        .expect("valid token regex")
});

/// Tangent-continuity policy between a point's two control handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PointType {
    #[default]
    Smooth,
    Symmetrical,
    Corner,
}

impl PointType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PointType::Smooth => "smooth",
            PointType::Symmetrical => "symmetrical",
            PointType::Corner => "corner",
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        match text.trim() {
            "smooth" => Some(PointType::Smooth),
            "symmetrical" => Some(PointType::Symmetrical),
            "corner" => Some(PointType::Corner),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathPointKind {
    Move,
    Line,
    /// `cp1` belongs to the previous anchor, `cp2` to this one.
    Cubic { cp1: Point, cp2: Point },
    Quadratic { cp: Point },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub position: Point,
    pub kind: PathPointKind,
    pub point_type: PointType,
}

impl PathPoint {
    pub fn move_to(position: Point) -> Self {
        Self::with_kind(position, PathPointKind::Move)
    }

    pub fn line_to(position: Point) -> Self {
        Self::with_kind(position, PathPointKind::Line)
    }

    pub fn cubic(cp1: Point, cp2: Point, position: Point) -> Self {
        Self::with_kind(position, PathPointKind::Cubic { cp1, cp2 })
    }

    pub fn quadratic(cp: Point, position: Point) -> Self {
        Self::with_kind(position, PathPointKind::Quadratic { cp })
    }

    fn with_kind(position: Point, kind: PathPointKind) -> Self {
        Self {
            position,
            kind,
            point_type: PointType::default(),
        }
    }

    pub fn with_type(mut self, point_type: PointType) -> Self {
        self.point_type = point_type;
        self
    }

    fn map(&mut self, f: impl Fn(Point) -> Point) {
        self.position = f(self.position);
        match &mut self.kind {
            PathPointKind::Cubic { cp1, cp2 } => {
                *cp1 = f(*cp1);
                *cp2 = f(*cp2);
            }
            PathPointKind::Quadratic { cp } => *cp = f(*cp),
            PathPointKind::Move | PathPointKind::Line => {}
        }
    }
}

/// Controls of the segment closing the path from the last anchor to the first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClosingSegment {
    pub cp1: Point,
    pub cp2: Point,
}

impl ClosingSegment {
    /// Straight closing curve with controls at 1/3 and 2/3 of `from`–`to`.
    pub fn straight(from: Point, to: Point) -> Self {
        Self {
            cp1: from.lerp(&to, 1.0 / 3.0),
            cp2: from.lerp(&to, 2.0 / 3.0),
        }
    }
}

/// Everything needed to restore a path's geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSnapshot {
    pub points: Vec<PathPoint>,
    pub closed: bool,
    pub closing: Option<ClosingSegment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignPath {
    pub points: Vec<PathPoint>,
    pub closed: bool,
    pub closing: Option<ClosingSegment>,
    data: String,
}

impl DesignPath {
    /// Builds a path from points; `closed` synthesizes a straight closing
    /// segment when there are at least two points.
    pub fn new(points: Vec<PathPoint>, closed: bool) -> Self {
        let mut path = Self {
            points,
            closed: false,
            closing: None,
            data: String::new(),
        };
        if closed {
            path.close();
        }
        path.rebuild_data();
        path
    }

    /// Open polyline through `positions`.
    pub fn polyline(positions: &[Point]) -> Self {
        let points = positions
            .iter()
            .enumerate()
            .map(|(i, p)| {
                if i == 0 {
                    PathPoint::move_to(*p)
                } else {
                    PathPoint::line_to(*p)
                }
            })
            .collect();
        Self::new(points, false)
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Regenerates the cached path data from the points.
    pub fn rebuild_data(&mut self) {
        let mut parts = Vec::with_capacity(self.points.len() + 1);
        for (i, point) in self.points.iter().enumerate() {
            let p = point.position;
            let part = match point.kind {
                _ if i == 0 => format!("M {} {}", p.x, p.y),
                PathPointKind::Move => format!("M {} {}", p.x, p.y),
                PathPointKind::Line => format!("L {} {}", p.x, p.y),
                PathPointKind::Cubic { cp1, cp2 } => format!(
                    "C {} {} {} {} {} {}",
                    cp1.x, cp1.y, cp2.x, cp2.y, p.x, p.y
                ),
                PathPointKind::Quadratic { cp } => {
                    format!("Q {} {} {} {}", cp.x, cp.y, p.x, p.y)
                }
            };
            parts.push(part);
        }
        if self.closed {
            if let (Some(closing), Some(first)) = (self.closing, self.points.first()) {
                let p = first.position;
                parts.push(format!(
                    "C {} {} {} {} {} {} Z",
                    closing.cp1.x, closing.cp1.y, closing.cp2.x, closing.cp2.y, p.x, p.y
                ));
            } else {
                parts.push("Z".to_string());
            }
        }
        self.data = parts.join(" ");
    }

    /// Marks the path closed. Rejected below two points or when already closed.
    pub fn close(&mut self) -> bool {
        if self.closed || self.points.len() < 2 {
            return false;
        }
        let first = self.points[0].position;
        let last = self.points[self.points.len() - 1].position;
        self.closing = Some(ClosingSegment::straight(last, first));
        self.closed = true;
        self.rebuild_data();
        true
    }

    pub fn open(&mut self) -> bool {
        if !self.closed {
            return false;
        }
        self.closed = false;
        self.closing = None;
        self.rebuild_data();
        true
    }

    pub fn snapshot(&self) -> PathSnapshot {
        PathSnapshot {
            points: self.points.clone(),
            closed: self.closed,
            closing: self.closing,
        }
    }

    pub fn restore(&mut self, snapshot: &PathSnapshot) {
        self.points = snapshot.points.clone();
        self.closed = snapshot.closed;
        self.closing = snapshot.closing;
        self.rebuild_data();
    }

    /// Incoming control handle of anchor `index`, if it has one.
    pub fn incoming(&self, index: usize) -> Option<Point> {
        if index == 0 {
            return if self.closed {
                self.closing.map(|c| c.cp2)
            } else {
                None
            };
        }
        match self.points.get(index)?.kind {
            PathPointKind::Cubic { cp2, .. } => Some(cp2),
            _ => None,
        }
    }

    /// Outgoing control handle of anchor `index`, stored on the next point
    /// (or on the closing segment for the last anchor of a closed path).
    pub fn outgoing(&self, index: usize) -> Option<Point> {
        if index + 1 == self.points.len() {
            return if self.closed {
                self.closing.map(|c| c.cp1)
            } else {
                None
            };
        }
        match self.points.get(index + 1)?.kind {
            PathPointKind::Cubic { cp1, .. } => Some(cp1),
            _ => None,
        }
    }

    /// Overwrites the incoming handle; false if anchor `index` has none.
    pub fn set_incoming(&mut self, index: usize, value: Point) -> bool {
        if index == 0 {
            return match (&mut self.closing, self.closed) {
                (Some(closing), true) => {
                    closing.cp2 = value;
                    true
                }
                _ => false,
            };
        }
        match self.points.get_mut(index).map(|p| &mut p.kind) {
            Some(PathPointKind::Cubic { cp2, .. }) => {
                *cp2 = value;
                true
            }
            _ => false,
        }
    }

    /// Overwrites the outgoing handle; false if anchor `index` has none.
    pub fn set_outgoing(&mut self, index: usize, value: Point) -> bool {
        if index + 1 == self.points.len() {
            return match (&mut self.closing, self.closed) {
                (Some(closing), true) => {
                    closing.cp1 = value;
                    true
                }
                _ => false,
            };
        }
        match self.points.get_mut(index + 1).map(|p| &mut p.kind) {
            Some(PathPointKind::Cubic { cp1, .. }) => {
                *cp1 = value;
                true
            }
            _ => false,
        }
    }

    /// Geometry handed to the drawing surface and hit tester.
    pub fn geometry(&self) -> PathGeometry {
        let mut geometry = PathGeometry::new();
        for (i, point) in self.points.iter().enumerate() {
            match point.kind {
                _ if i == 0 => geometry.move_to(point.position),
                PathPointKind::Move => geometry.move_to(point.position),
                PathPointKind::Line => geometry.line_to(point.position),
                PathPointKind::Cubic { cp1, cp2 } => geometry.cubic_to(cp1, cp2, point.position),
                PathPointKind::Quadratic { cp } => geometry.quad_to(cp, point.position),
            }
        }
        if self.closed {
            if let (Some(closing), Some(first)) = (self.closing, self.points.first()) {
                geometry.cubic_to(closing.cp1, closing.cp2, first.position);
            }
            geometry.close();
        }
        geometry
    }

    /// Comma-separated continuity policies, one per point.
    pub fn point_types_attribute(&self) -> String {
        self.points
            .iter()
            .map(|p| p.point_type.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Parses path data written with `M`, `L`, `C`, `Q` and `Z` (absolute or
    /// relative, with implicit command repetition).
    ///
    /// A trailing cubic that returns to the first anchor right before `Z` is
    /// read back as the closing segment.
    pub fn from_data(data: &str) -> Result<Self, MarkupError> {
        let tokens: Vec<&str> = TOKEN_RE.find_iter(data).map(|m| m.as_str()).collect();
        let mut points: Vec<PathPoint> = Vec::new();
        let mut closed = false;
        let mut current = Point::default();
        let mut command: Option<char> = None;
        let mut pos = 0;

        let number = |pos: &mut usize| -> Result<f64, MarkupError> {
            let token = tokens.get(*pos).ok_or_else(|| MarkupError::InvalidPathData {
                position: *pos,
                reason: "unexpected end of data".to_string(),
            })?;
            let value = token.parse::<f64>().map_err(|_| MarkupError::InvalidPathData {
                position: *pos,
                reason: format!("expected a number, found '{}'", token),
            })?;
            *pos += 1;
            Ok(value)
        };

        while pos < tokens.len() {
            let token = tokens[pos];
            let letter = token.chars().next().filter(|c| c.is_ascii_alphabetic());
            let cmd = match letter {
                Some(c) => {
                    pos += 1;
                    c
                }
                None => match command {
                    // implicit repetition; a repeated moveto becomes a lineto
                    Some('M') => 'L',
                    Some('m') => 'l',
                    Some(c) if c != 'Z' && c != 'z' => c,
                    _ => {
                        return Err(MarkupError::InvalidPathData {
                            position: pos,
                            reason: format!("expected a command, found '{}'", token),
                        })
                    }
                },
            };
            let relative = cmd.is_ascii_lowercase();
            let base = if relative { current } else { Point::default() };
            let read_point = |pos: &mut usize| -> Result<Point, MarkupError> {
                let x = number(pos)?;
                let y = number(pos)?;
                Ok(Point::new(base.x + x, base.y + y))
            };
            match cmd.to_ascii_uppercase() {
                'M' => {
                    let p = read_point(&mut pos)?;
                    points.push(PathPoint::move_to(p));
                    current = p;
                }
                'L' => {
                    let p = read_point(&mut pos)?;
                    points.push(PathPoint::line_to(p));
                    current = p;
                }
                'C' => {
                    let cp1 = read_point(&mut pos)?;
                    let cp2 = read_point(&mut pos)?;
                    let p = read_point(&mut pos)?;
                    points.push(PathPoint::cubic(cp1, cp2, p));
                    current = p;
                }
                'Q' => {
                    let cp = read_point(&mut pos)?;
                    let p = read_point(&mut pos)?;
                    points.push(PathPoint::quadratic(cp, p));
                    current = p;
                }
                'Z' => {
                    closed = true;
                    if let Some(first) = points.first() {
                        current = first.position;
                    }
                }
                _ => {
                    return Err(MarkupError::InvalidPathData {
                        position: pos.saturating_sub(1),
                        reason: format!("unsupported command '{}'", cmd),
                    })
                }
            }
            command = Some(cmd);
        }

        if points.first().map(|p| p.kind) != Some(PathPointKind::Move) && !points.is_empty() {
            return Err(MarkupError::InvalidPathData {
                position: 0,
                reason: "path data must start with a moveto".to_string(),
            });
        }

        let mut path = Self {
            points,
            closed: false,
            closing: None,
            data: String::new(),
        };
        if closed {
            let first = path.points.first().map(|p| p.position);
            let returns_home = match (path.points.last(), first) {
                (Some(last), Some(first)) if path.points.len() > 2 => {
                    last.position == first && matches!(last.kind, PathPointKind::Cubic { .. })
                }
                _ => false,
            };
            if returns_home {
                if let Some(PathPoint {
                    kind: PathPointKind::Cubic { cp1, cp2 },
                    ..
                }) = path.points.pop()
                {
                    path.closing = Some(ClosingSegment { cp1, cp2 });
                    path.closed = true;
                }
            } else {
                path.close();
            }
        }
        path.rebuild_data();
        Ok(path)
    }

    /// Bounds from every numeric literal in the path data, read as
    /// alternating x/y pairs. Control points count as if they were on the
    /// curve, so curved paths get a generous box.
    pub fn literal_bounds(&self) -> Option<Bounds> {
        let numbers: Vec<f64> = NUMBER_RE
            .find_iter(&self.data)
            .filter_map(|m| m.as_str().parse().ok())
            .collect();
        Bounds::from_points(
            numbers
                .chunks_exact(2)
                .map(|pair| Point::new(pair[0], pair[1])),
        )
    }
}

impl DesignerShape for DesignPath {
    fn bounds(&self) -> Bounds {
        self.literal_bounds().unwrap_or_else(|| {
            let a = self.anchor();
            Bounds::new(a.x, a.y, 0.0, 0.0)
        })
    }

    fn anchor(&self) -> Point {
        self.points.first().map(|p| p.position).unwrap_or_default()
    }

    fn render(&self, surface: &mut dyn DrawingSurface, style: &ShapeStyle) {
        if self.points.is_empty() {
            return;
        }
        let geometry = self.geometry();
        if style.apply_fill(surface, &self.bounds()) {
            surface.fill_path(&geometry);
        }
        if style.apply_stroke(surface) {
            surface.stroke_path(&geometry);
        }
    }

    /// Fill test or widened stroke test. The fill test runs whether or not
    /// the path has a fill, so the inside of an unfilled closed path hits.
    fn contains_point(&self, p: Point, style: &ShapeStyle, hit: &dyn HitTester) -> bool {
        if self.points.is_empty() {
            return false;
        }
        let geometry = self.geometry();
        hit.is_point_in_fill(&geometry, p)
            || hit.is_point_in_stroke(&geometry, p, style.stroke_width() + hit.tolerance())
    }

    fn to_markup(&self, attributes: &str) -> String {
        format!(
            r#"<path d="{}" data-point-types="{}" {}/>"#,
            self.data,
            self.point_types_attribute(),
            attributes
        )
    }

    fn transform(&mut self, map: &AxisMap) {
        for point in &mut self.points {
            point.map(|p| map.apply(p));
        }
        if let Some(closing) = &mut self.closing {
            closing.cp1 = map.apply(closing.cp1);
            closing.cp2 = map.apply(closing.cp2);
        }
        self.rebuild_data();
    }
}
