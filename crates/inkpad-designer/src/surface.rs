//! Drawing-surface contract consumed by the shape model and the renderer.
//!
//! The editor drives an immediate-mode 2D context; it never rasterises by
//! itself. `DrawingSurface` is the capability the host provides,
//! `HitTester` answers point-in-fill / point-in-stroke questions for
//! arbitrary paths. Two surfaces ship with the crate: `RecordingSurface`
//! (keeps a log of calls, used by tests and headless hosts) and the
//! tiny-skia backed `PixmapSurface` in `pixmap_surface`.

use lyon::algorithms::hit_test::hit_test_path;
use lyon::math::point;
use lyon::path::iterator::PathIterator;
use lyon::path::{Event, FillRule, Path};

use inkpad_core::constants::HIT_TOLERANCE;

use crate::model::{Bounds, Color, GradientStop, Point};

/// Paint used for fills and strokes.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Linear gradient between two canvas-space points.
    LinearGradient {
        start: Point,
        end: Point,
        stops: Vec<GradientStop>,
    },
}

/// One drawing command of an arbitrary path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    QuadTo { ctrl: Point, to: Point },
    CubicTo { ctrl1: Point, ctrl2: Point, to: Point },
    Close,
}

/// Surface-independent description of a path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathGeometry {
    commands: Vec<PathCommand>,
}

impl PathGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, p: Point) {
        self.commands.push(PathCommand::MoveTo(p));
    }

    pub fn line_to(&mut self, p: Point) {
        self.commands.push(PathCommand::LineTo(p));
    }

    pub fn quad_to(&mut self, ctrl: Point, to: Point) {
        self.commands.push(PathCommand::QuadTo { ctrl, to });
    }

    pub fn cubic_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.commands.push(PathCommand::CubicTo { ctrl1, ctrl2, to });
    }

    pub fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Converts to a lyon path. Segments before the first `MoveTo` are
    /// dropped since lyon requires every sub-path to begin explicitly.
    pub fn to_lyon(&self) -> Path {
        let mut builder = Path::builder();
        let mut open = false;

        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) => {
                    if open {
                        builder.end(false);
                    }
                    builder.begin(point(p.x as f32, p.y as f32));
                    open = true;
                }
                PathCommand::LineTo(p) if open => {
                    builder.line_to(point(p.x as f32, p.y as f32));
                }
                PathCommand::QuadTo { ctrl, to } if open => {
                    builder.quadratic_bezier_to(
                        point(ctrl.x as f32, ctrl.y as f32),
                        point(to.x as f32, to.y as f32),
                    );
                }
                PathCommand::CubicTo { ctrl1, ctrl2, to } if open => {
                    builder.cubic_bezier_to(
                        point(ctrl1.x as f32, ctrl1.y as f32),
                        point(ctrl2.x as f32, ctrl2.y as f32),
                        point(to.x as f32, to.y as f32),
                    );
                }
                PathCommand::Close if open => {
                    builder.end(true);
                    open = false;
                }
                _ => {}
            }
        }
        if open {
            builder.end(false);
        }
        builder.build()
    }
}

/// Immediate-mode 2D drawing context.
///
/// Angles are in degrees. Text is drawn relative to its baseline.
pub trait DrawingSurface {
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f64, dy: f64);
    fn rotate(&mut self, degrees: f64);

    fn set_fill(&mut self, paint: Paint);
    fn set_stroke(&mut self, paint: Paint, width: f64);
    /// An empty slice switches back to solid strokes.
    fn set_line_dash(&mut self, dash: &[f64]);

    fn fill_rect(&mut self, rect: Bounds);
    fn stroke_rect(&mut self, rect: Bounds);
    fn fill_circle(&mut self, center: Point, radius: f64);
    fn stroke_circle(&mut self, center: Point, radius: f64);
    fn stroke_line(&mut self, from: Point, to: Point);
    fn fill_path(&mut self, path: &PathGeometry);
    fn stroke_path(&mut self, path: &PathGeometry);

    fn set_font(&mut self, family: &str, size: f64);
    fn measure_text(&self, text: &str) -> f64;
    fn fill_text(&mut self, text: &str, x: f64, baseline_y: f64);
}

/// Point-in-path queries for shapes whose geometry is not cheaply testable
/// analytically.
pub trait HitTester {
    fn is_point_in_fill(&self, path: &PathGeometry, p: Point) -> bool;

    /// `width` is the full stroke width; the point hits when it lies within
    /// half of it from the outline.
    fn is_point_in_stroke(&self, path: &PathGeometry, p: Point, width: f64) -> bool;

    /// Slack added to stroke widths for line and path hit-tests.
    fn tolerance(&self) -> f64 {
        HIT_TOLERANCE
    }
}

/// Hit tester backed by lyon's path algorithms.
#[derive(Debug, Clone, Copy)]
pub struct GeometryHitTester {
    tolerance: f64,
    flattening: f32,
}

impl GeometryHitTester {
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            flattening: 0.1,
        }
    }
}

impl Default for GeometryHitTester {
    fn default() -> Self {
        Self::new(HIT_TOLERANCE)
    }
}

impl HitTester for GeometryHitTester {
    fn is_point_in_fill(&self, path: &PathGeometry, p: Point) -> bool {
        if path.is_empty() {
            return false;
        }
        let lyon_path = path.to_lyon();
        hit_test_path(
            &point(p.x as f32, p.y as f32),
            lyon_path.iter(),
            FillRule::NonZero,
            self.flattening,
        )
    }

    fn is_point_in_stroke(&self, path: &PathGeometry, p: Point, width: f64) -> bool {
        let lyon_path = path.to_lyon();
        let half = width / 2.0;
        for event in lyon_path.iter().flattened(self.flattening) {
            let (from, to) = match event {
                Event::Line { from, to } => (from, to),
                Event::End { last, first, close } if close => (last, first),
                _ => continue,
            };
            let a = Point::new(from.x as f64, from.y as f64);
            let b = Point::new(to.x as f64, to.y as f64);
            if p.distance_to_segment(&a, &b) <= half {
                return true;
            }
        }
        false
    }

    fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

/// A single recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Save,
    Restore,
    Translate(f64, f64),
    Rotate(f64),
    SetFill(Paint),
    SetStroke(Paint, f64),
    SetLineDash(Vec<f64>),
    FillRect(Bounds),
    StrokeRect(Bounds),
    FillCircle(Point, f64),
    StrokeCircle(Point, f64),
    StrokeLine(Point, Point),
    FillPath(PathGeometry),
    StrokePath(PathGeometry),
    SetFont(String, f64),
    FillText(String, f64, f64),
}

/// Surface that records calls instead of drawing.
///
/// Text is measured with a fixed advance of half the font size per
/// character, which keeps layout deterministic without a font backend.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    ops: Vec<SurfaceOp>,
    font_size: f64,
    depth: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            font_size: 16.0,
            depth: 0,
        }
    }

    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    pub fn clear(&mut self) {
        self.ops.clear();
        self.depth = 0;
    }

    /// Current save/restore nesting; zero after a balanced frame.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn count(&self, pred: impl Fn(&SurfaceOp) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawingSurface for RecordingSurface {
    fn save(&mut self) {
        self.depth += 1;
        self.ops.push(SurfaceOp::Save);
    }

    fn restore(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.ops.push(SurfaceOp::Restore);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.ops.push(SurfaceOp::Translate(dx, dy));
    }

    fn rotate(&mut self, degrees: f64) {
        self.ops.push(SurfaceOp::Rotate(degrees));
    }

    fn set_fill(&mut self, paint: Paint) {
        self.ops.push(SurfaceOp::SetFill(paint));
    }

    fn set_stroke(&mut self, paint: Paint, width: f64) {
        self.ops.push(SurfaceOp::SetStroke(paint, width));
    }

    fn set_line_dash(&mut self, dash: &[f64]) {
        self.ops.push(SurfaceOp::SetLineDash(dash.to_vec()));
    }

    fn fill_rect(&mut self, rect: Bounds) {
        self.ops.push(SurfaceOp::FillRect(rect));
    }

    fn stroke_rect(&mut self, rect: Bounds) {
        self.ops.push(SurfaceOp::StrokeRect(rect));
    }

    fn fill_circle(&mut self, center: Point, radius: f64) {
        self.ops.push(SurfaceOp::FillCircle(center, radius));
    }

    fn stroke_circle(&mut self, center: Point, radius: f64) {
        self.ops.push(SurfaceOp::StrokeCircle(center, radius));
    }

    fn stroke_line(&mut self, from: Point, to: Point) {
        self.ops.push(SurfaceOp::StrokeLine(from, to));
    }

    fn fill_path(&mut self, path: &PathGeometry) {
        self.ops.push(SurfaceOp::FillPath(path.clone()));
    }

    fn stroke_path(&mut self, path: &PathGeometry) {
        self.ops.push(SurfaceOp::StrokePath(path.clone()));
    }

    fn set_font(&mut self, family: &str, size: f64) {
        self.font_size = size;
        self.ops.push(SurfaceOp::SetFont(family.to_string(), size));
    }

    fn measure_text(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.font_size * 0.5
    }

    fn fill_text(&mut self, text: &str, x: f64, baseline_y: f64) {
        self.ops
            .push(SurfaceOp::FillText(text.to_string(), x, baseline_y));
    }
}
