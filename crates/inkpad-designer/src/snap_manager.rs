//! Grid and shape-edge snapping.
//!
//! Grid snap moves a coordinate to the nearest grid line when it is within
//! the threshold. Shape snap considers the left/center/right and
//! top/middle/bottom lines of every non-excluded shape, keeps the closest
//! candidate within the threshold, overrides the grid result and emits a
//! guide. Guides are feedback only.

use inkpad_core::SnapSettings;

use crate::model::{Bounds, Color, Point, Shape};
use crate::surface::{DrawingSurface, Paint};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideOrientation {
    /// Vertical line at an x position.
    Vertical,
    /// Horizontal line at a y position.
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapGuide {
    pub orientation: GuideOrientation,
    pub position: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SnapResult {
    pub point: Point,
    pub guides: Vec<SnapGuide>,
}

/// Offset that snaps a moving box, with the guides it produced.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SnapOffset {
    pub dx: f64,
    pub dy: f64,
    pub guides: Vec<SnapGuide>,
}

#[derive(Debug, Clone, Default)]
pub struct SnapManager {
    settings: SnapSettings,
    guides: Vec<SnapGuide>,
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

impl SnapManager {
    pub fn new(settings: SnapSettings) -> Self {
        Self {
            settings,
            guides: Vec::new(),
        }
    }

    pub fn settings(&self) -> &SnapSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut SnapSettings {
        &mut self.settings
    }

    /// Guides from the most recent snap, for drawing.
    pub fn guides(&self) -> &[SnapGuide] {
        &self.guides
    }

    pub fn clear_guides(&mut self) {
        self.guides.clear();
    }

    /// Snaps `p` against the grid and the shapes not listed in `exclude`.
    pub fn snap_point(&mut self, p: Point, shapes: &[Shape], exclude: &[u64]) -> SnapResult {
        self.guides.clear();
        if !self.settings.enabled {
            return SnapResult {
                point: p,
                guides: Vec::new(),
            };
        }
        let (xs, ys) = self.shape_lines(shapes, exclude);
        let mut point = p;
        let mut guides = Vec::new();

        if let Some(x) = self.grid_snap(p.x) {
            point.x = x;
        }
        if let Some(x) = self.nearest(p.x, &xs) {
            point.x = x;
            guides.push(SnapGuide {
                orientation: GuideOrientation::Vertical,
                position: x,
            });
        }
        if let Some(y) = self.grid_snap(p.y) {
            point.y = y;
        }
        if let Some(y) = self.nearest(p.y, &ys) {
            point.y = y;
            guides.push(SnapGuide {
                orientation: GuideOrientation::Horizontal,
                position: y,
            });
        }

        self.guides = guides.clone();
        SnapResult { point, guides }
    }

    /// Snaps a moving box: each of its three lines per axis is tried and the
    /// smallest correcting offset wins, shape candidates before grid ones.
    pub fn snap_bounds(&mut self, bounds: &Bounds, shapes: &[Shape], exclude: &[u64]) -> SnapOffset {
        self.guides.clear();
        if !self.settings.enabled {
            return SnapOffset::default();
        }
        let (xs, ys) = self.shape_lines(shapes, exclude);
        let c = bounds.center();
        let mut offset = SnapOffset::default();

        for axis in [Axis::X, Axis::Y] {
            let (lines, candidates) = match axis {
                Axis::X => ([bounds.x, c.x, bounds.right()], &xs),
                Axis::Y => ([bounds.y, c.y, bounds.bottom()], &ys),
            };
            let shape_hit = lines
                .iter()
                .filter_map(|line| self.nearest(*line, candidates).map(|hit| (hit - line, hit)))
                .min_by(|a, b| a.0.abs().total_cmp(&b.0.abs()));
            let delta = match shape_hit {
                Some((delta, position)) => {
                    offset.guides.push(SnapGuide {
                        orientation: match axis {
                            Axis::X => GuideOrientation::Vertical,
                            Axis::Y => GuideOrientation::Horizontal,
                        },
                        position,
                    });
                    delta
                }
                None => lines
                    .iter()
                    .filter_map(|line| self.grid_snap(*line).map(|g| g - line))
                    .min_by(|a, b| a.abs().total_cmp(&b.abs()))
                    .unwrap_or(0.0),
            };
            match axis {
                Axis::X => offset.dx = delta,
                Axis::Y => offset.dy = delta,
            }
        }

        self.guides = offset.guides.clone();
        offset
    }

    fn grid_snap(&self, value: f64) -> Option<f64> {
        if !self.settings.grid_enabled || self.settings.grid_size <= 0.0 {
            return None;
        }
        let snapped = (value / self.settings.grid_size).round() * self.settings.grid_size;
        ((snapped - value).abs() <= self.settings.threshold).then_some(snapped)
    }

    fn nearest(&self, value: f64, candidates: &[f64]) -> Option<f64> {
        if !self.settings.shape_enabled {
            return None;
        }
        candidates
            .iter()
            .copied()
            .filter(|c| (c - value).abs() <= self.settings.threshold)
            .min_by(|a, b| (a - value).abs().total_cmp(&(b - value).abs()))
    }

    fn shape_lines(&self, shapes: &[Shape], exclude: &[u64]) -> (Vec<f64>, Vec<f64>) {
        let mut xs = Vec::new();
        let mut ys = Vec::new();
        for shape in shapes.iter().filter(|s| !exclude.contains(&s.id)) {
            let b = shape.bounds();
            let c = b.center();
            xs.extend([b.x, c.x, b.right()]);
            ys.extend([b.y, c.y, b.bottom()]);
        }
        (xs, ys)
    }

    /// Draws the current guides across a `width` × `height` canvas.
    pub fn render(&self, surface: &mut dyn DrawingSurface, width: f64, height: f64) {
        if self.guides.is_empty() {
            return;
        }
        surface.save();
        surface.set_stroke(Paint::Solid(Color::rgb(0xff, 0x00, 0xff)), 1.0);
        surface.set_line_dash(&[4.0, 4.0]);
        for guide in &self.guides {
            match guide.orientation {
                GuideOrientation::Vertical => surface.stroke_line(
                    Point::new(guide.position, 0.0),
                    Point::new(guide.position, height),
                ),
                GuideOrientation::Horizontal => surface.stroke_line(
                    Point::new(0.0, guide.position),
                    Point::new(width, guide.position),
                ),
            }
        }
        surface.restore();
    }
}
