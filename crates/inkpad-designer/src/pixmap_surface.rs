//! Raster drawing surface backed by tiny-skia.
//!
//! Anti-aliased shapes, gradients and dashes are supported. Text is
//! measured with a fixed advance ratio and not rasterised; hosts that need
//! glyphs draw them on top.

use tiny_skia::{
    FillRule, GradientStop as SkiaStop, LinearGradient, Paint as SkiaPaint, PathBuilder, Pixmap,
    Rect, SpreadMode, Stroke, StrokeDash, Transform,
};

use crate::model::{Bounds, Color, Point};
use crate::surface::{DrawingSurface, Paint, PathCommand, PathGeometry};

/// Average glyph advance as a fraction of the font size.
const ADVANCE_RATIO: f64 = 0.5;

#[derive(Debug, Clone)]
struct State {
    transform: Transform,
    fill: Paint,
    stroke: Paint,
    stroke_width: f64,
    dash: Vec<f64>,
    font_size: f64,
}

impl Default for State {
    fn default() -> Self {
        Self {
            transform: Transform::identity(),
            fill: Paint::Solid(Color::BLACK),
            stroke: Paint::Solid(Color::BLACK),
            stroke_width: 1.0,
            dash: Vec::new(),
            font_size: 16.0,
        }
    }
}

pub struct PixmapSurface {
    pixmap: Pixmap,
    state: State,
    stack: Vec<State>,
}

impl PixmapSurface {
    /// `None` when either dimension is zero.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        let pixmap = Pixmap::new(width, height)?;
        Some(Self {
            pixmap,
            state: State::default(),
            stack: Vec::new(),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn clear(&mut self, color: Color) {
        self.pixmap.fill(skia_color(color));
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Premultiplied RGBA of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let p = self.pixmap.pixel(x, y)?;
        Some([p.red(), p.green(), p.blue(), p.alpha()])
    }

    fn paint(&self, paint: &Paint) -> Option<SkiaPaint<'static>> {
        let mut out = SkiaPaint::default();
        out.anti_alias = true;
        match paint {
            Paint::Solid(color) => out.set_color(skia_color(*color)),
            Paint::LinearGradient { start, end, stops } => {
                let stops = stops
                    .iter()
                    .map(|s| SkiaStop::new(s.offset as f32, skia_color(s.color)))
                    .collect();
                out.shader = LinearGradient::new(
                    skia_point(*start),
                    skia_point(*end),
                    stops,
                    SpreadMode::Pad,
                    Transform::identity(),
                )?;
            }
        }
        Some(out)
    }

    fn stroke(&self) -> Stroke {
        let mut stroke = Stroke {
            width: self.state.stroke_width as f32,
            ..Default::default()
        };
        if !self.state.dash.is_empty() {
            stroke.dash = StrokeDash::new(self.state.dash.iter().map(|d| *d as f32).collect(), 0.0);
        }
        stroke
    }

    fn fill_skia_path(&mut self, path: Option<tiny_skia::Path>) {
        let (Some(path), Some(paint)) = (path, self.paint(&self.state.fill)) else {
            return;
        };
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, self.state.transform, None);
    }

    fn stroke_skia_path(&mut self, path: Option<tiny_skia::Path>) {
        let (Some(path), Some(paint)) = (path, self.paint(&self.state.stroke)) else {
            return;
        };
        let stroke = self.stroke();
        self.pixmap
            .stroke_path(&path, &paint, &stroke, self.state.transform, None);
    }
}

fn skia_color(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a)
}

fn skia_point(p: Point) -> tiny_skia::Point {
    tiny_skia::Point::from_xy(p.x as f32, p.y as f32)
}

fn rect_path(rect: Bounds) -> Option<tiny_skia::Path> {
    Rect::from_xywh(
        rect.x as f32,
        rect.y as f32,
        rect.width as f32,
        rect.height as f32,
    )
    .map(PathBuilder::from_rect)
}

fn geometry_path(geometry: &PathGeometry) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for command in geometry.commands() {
        match *command {
            PathCommand::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathCommand::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathCommand::QuadTo { ctrl, to } => {
                pb.quad_to(ctrl.x as f32, ctrl.y as f32, to.x as f32, to.y as f32)
            }
            PathCommand::CubicTo { ctrl1, ctrl2, to } => pb.cubic_to(
                ctrl1.x as f32,
                ctrl1.y as f32,
                ctrl2.x as f32,
                ctrl2.y as f32,
                to.x as f32,
                to.y as f32,
            ),
            PathCommand::Close => pb.close(),
        }
    }
    pb.finish()
}

impl DrawingSurface for PixmapSurface {
    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.state.transform = self.state.transform.pre_translate(dx as f32, dy as f32);
    }

    fn rotate(&mut self, degrees: f64) {
        self.state.transform = self.state.transform.pre_rotate(degrees as f32);
    }

    fn set_fill(&mut self, paint: Paint) {
        self.state.fill = paint;
    }

    fn set_stroke(&mut self, paint: Paint, width: f64) {
        self.state.stroke = paint;
        self.state.stroke_width = width;
    }

    fn set_line_dash(&mut self, dash: &[f64]) {
        self.state.dash = dash.to_vec();
    }

    fn fill_rect(&mut self, rect: Bounds) {
        self.fill_skia_path(rect_path(rect));
    }

    fn stroke_rect(&mut self, rect: Bounds) {
        self.stroke_skia_path(rect_path(rect));
    }

    fn fill_circle(&mut self, center: Point, radius: f64) {
        self.fill_skia_path(PathBuilder::from_circle(
            center.x as f32,
            center.y as f32,
            radius as f32,
        ));
    }

    fn stroke_circle(&mut self, center: Point, radius: f64) {
        self.stroke_skia_path(PathBuilder::from_circle(
            center.x as f32,
            center.y as f32,
            radius as f32,
        ));
    }

    fn stroke_line(&mut self, from: Point, to: Point) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.x as f32, from.y as f32);
        pb.line_to(to.x as f32, to.y as f32);
        self.stroke_skia_path(pb.finish());
    }

    fn fill_path(&mut self, path: &PathGeometry) {
        self.fill_skia_path(geometry_path(path));
    }

    fn stroke_path(&mut self, path: &PathGeometry) {
        self.stroke_skia_path(geometry_path(path));
    }

    fn set_font(&mut self, _family: &str, size: f64) {
        self.state.font_size = size;
    }

    fn measure_text(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.state.font_size * ADVANCE_RATIO
    }

    fn fill_text(&mut self, _text: &str, _x: f64, _baseline_y: f64) {}
}
