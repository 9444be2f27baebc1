//! Pointer gestures: press, drag, release, double click and cancel.

use inkpad_core::constants::{MIN_DRAWN_SIZE, MIN_PATH_POINTS, PATH_HANDLE_RADIUS};

use super::types::{Interaction, Modifiers, Tool};
use super::Renderer;
use crate::commands::{AddShape, MoveShapes, ResizeShape, SceneCommand};
use crate::model::{
    Bounds, Color, DesignCircle, DesignLine, DesignPath, DesignRect, DesignTextBox, PathPoint,
    Point, Shape, ShapeKind, ShapeStyle,
};
use crate::transform_controls::TransformControls;

const DEFAULT_TEXT: &str = "Text";
const DEFAULT_TEXT_WIDTH: f64 = 160.0;
const DEFAULT_TEXT_HEIGHT: f64 = 40.0;
const DRAWN_STROKE_WIDTH: f64 = 2.0;

/// Geometry a drawing tool produces for a press at `start` released at
/// `end`, or `None` when the gesture is too small to keep.
pub(super) fn drawn_kind(tool: Tool, start: Point, end: Point) -> Option<ShapeKind> {
    let b = Bounds::from_corners(start, end);
    let tiny = b.width < MIN_DRAWN_SIZE || b.height < MIN_DRAWN_SIZE;
    match tool {
        Tool::Rect => {
            (!tiny).then(|| ShapeKind::Rect(DesignRect::new(b.x, b.y, b.width, b.height)))
        }
        Tool::Circle => {
            let radius = start.distance_to(&end);
            (radius >= MIN_DRAWN_SIZE).then(|| ShapeKind::Circle(DesignCircle::new(start, radius)))
        }
        Tool::Line => (start.distance_to(&end) >= MIN_DRAWN_SIZE)
            .then(|| ShapeKind::Line(DesignLine::new(start, end))),
        Tool::Text => {
            // a plain click drops a default-sized box
            let b = if tiny {
                Bounds::new(start.x, start.y, DEFAULT_TEXT_WIDTH, DEFAULT_TEXT_HEIGHT)
            } else {
                b
            };
            Some(ShapeKind::TextBox(DesignTextBox::new(
                b.x,
                b.y,
                b.width,
                b.height,
                DEFAULT_TEXT,
            )))
        }
        Tool::Select | Tool::Pen => None,
    }
}

fn drawn_style(kind: &ShapeKind, color: Color) -> ShapeStyle {
    match kind {
        ShapeKind::Line(_) | ShapeKind::Path(_) => ShapeStyle::stroked(color, DRAWN_STROKE_WIDTH),
        _ => ShapeStyle::filled(color),
    }
}

impl Renderer {
    pub fn pointer_down(&mut self, p: Point, modifiers: Modifiers) {
        if self.is_interacting() {
            self.abort_gesture();
        }
        if self.path_session.is_some() && self.press_in_path_session(p) {
            return;
        }
        match self.tool {
            Tool::Select => self.begin_select(p, modifiers),
            Tool::Pen => self.pen_click(p),
            tool => {
                let start = self.snapped(p);
                self.interaction = Interaction::Drawing {
                    tool,
                    start,
                    current: start,
                };
            }
        }
    }

    pub fn pointer_move(&mut self, p: Point, modifiers: Modifiers) {
        let mut interaction = std::mem::take(&mut self.interaction);
        match &mut interaction {
            Interaction::Idle => {}
            Interaction::Moving {
                ids,
                start,
                origin,
                applied,
            } => {
                let (rx, ry) = (p.x - start.x, p.y - start.y);
                let offset =
                    self.snap
                        .snap_bounds(&origin.translated(rx, ry), self.scene.shapes(), ids.as_slice());
                let total = (rx + offset.dx, ry + offset.dy);
                let (dx, dy) = (total.0 - applied.0, total.1 - applied.1);
                if dx != 0.0 || dy != 0.0 {
                    for id in ids.iter() {
                        if let Some(shape) = self.scene.find_mut(*id) {
                            shape.translate(dx, dy);
                        }
                    }
                    *applied = total;
                }
            }
            Interaction::Resizing {
                id,
                handle,
                start,
                original,
                ..
            } => {
                // replay from the press state so floors never accumulate
                if let Some(shape) = self.scene.find_mut(*id) {
                    shape.kind = original.clone();
                    TransformControls::resize(shape, *handle, p.x - start.x, p.y - start.y);
                }
            }
            Interaction::Marquee { current, .. } => *current = p,
            Interaction::Drawing { current, .. } => *current = self.snapped(p),
            Interaction::PathHandle { handle, .. } => {
                if let Some(id) = self.editing_path() {
                    if let Some(path) = self.scene.find_mut(id).and_then(|s| s.as_path_mut()) {
                        self.path_edit.move_handle(path, *handle, p, modifiers.alt);
                    }
                }
            }
        }
        self.interaction = interaction;
    }

    /// Finishes the gesture, recording its effect in the history.
    pub fn pointer_up(&mut self, p: Point, modifiers: Modifiers) {
        self.pointer_move(p, modifiers);
        let interaction = std::mem::take(&mut self.interaction);
        self.snap.clear_guides();
        match interaction {
            Interaction::Idle => {}
            Interaction::Moving {
                ids,
                applied: (dx, dy),
                ..
            } => {
                if dx != 0.0 || dy != 0.0 {
                    let cmd = SceneCommand::MoveShapes(MoveShapes { ids, dx, dy });
                    self.history.record_executed(cmd);
                }
            }
            Interaction::Resizing {
                id,
                before,
                original,
                ..
            } => {
                if let Some(shape) = self.scene.find(id) {
                    if shape.kind != original {
                        let after = shape.bounds();
                        let resized = shape.kind.clone();
                        let cmd = ResizeShape::recorded(id, before, after, original, resized);
                        self.history.record_executed(SceneCommand::ResizeShape(cmd));
                    }
                }
            }
            Interaction::Marquee {
                start,
                current,
                additive,
            } => {
                let area = Bounds::from_corners(start, current);
                if area.width >= MIN_DRAWN_SIZE || area.height >= MIN_DRAWN_SIZE {
                    self.selection
                        .select_in_rect(self.scene.shapes(), &area, additive);
                }
            }
            Interaction::Drawing {
                tool,
                start,
                current,
            } => {
                self.finish_drawing(tool, start, current);
            }
            Interaction::PathHandle { .. } => self.path_edit.set_active(None),
        }
    }

    /// Select tool: opens a path-edit session on a path. Pen tool: finishes
    /// the path under construction.
    pub fn double_click(&mut self, p: Point) {
        match self.tool {
            Tool::Pen => {
                if let Some(path) = self.pen.as_mut() {
                    // the second press of the double click added a duplicate
                    let n = path.points.len();
                    if n > MIN_PATH_POINTS
                        && path.points[n - 1]
                            .position
                            .distance_to(&path.points[n - 2].position)
                            <= PATH_HANDLE_RADIUS
                    {
                        path.points.pop();
                        path.rebuild_data();
                    }
                }
                self.finish_pen();
            }
            Tool::Select => {
                let hit = self.scene.hit_test(p, self.hit_tester.as_ref());
                if let Some(id) = hit {
                    if self.scene.find(id).is_some_and(|s| s.as_path().is_some()) {
                        self.begin_path_edit(id);
                    }
                }
            }
            _ => {}
        }
    }

    /// Abandons the current gesture and any pen path, restoring the
    /// geometry from before the press. History is untouched.
    pub fn cancel_interaction(&mut self) {
        self.abort_gesture();
        if self.pen.take().is_some() {
            tracing::debug!("Pen path discarded");
        }
    }

    /// Commits the pen path as a new shape; fewer than two points discards it.
    pub fn finish_pen(&mut self) -> Option<u64> {
        let path = self.pen.take()?;
        if path.len() < MIN_PATH_POINTS {
            tracing::debug!("Discarding pen path with {} point(s)", path.len());
            return None;
        }
        let kind = ShapeKind::Path(path);
        let style = drawn_style(&kind, self.color_policy.next_color());
        Some(self.insert_drawn(kind, style))
    }

    pub(super) fn abort_gesture(&mut self) {
        match std::mem::take(&mut self.interaction) {
            Interaction::Moving {
                ids,
                applied: (dx, dy),
                ..
            } => {
                for id in &ids {
                    if let Some(shape) = self.scene.find_mut(*id) {
                        shape.translate(-dx, -dy);
                    }
                }
            }
            Interaction::Resizing { id, original, .. } => {
                if let Some(shape) = self.scene.find_mut(id) {
                    shape.kind = original;
                }
            }
            Interaction::PathHandle { before, .. } => {
                if let Some(id) = self.editing_path() {
                    if let Some(path) = self.scene.find_mut(id).and_then(|s| s.as_path_mut()) {
                        path.restore(&before);
                        self.path_edit.refresh_handles(path);
                    }
                }
                self.path_edit.set_active(None);
            }
            Interaction::Idle | Interaction::Marquee { .. } | Interaction::Drawing { .. } => {}
        }
        self.snap.clear_guides();
    }

    /// Handles a press while a path is being edited. Returns true when the
    /// press was consumed; a press away from the path ends the session.
    fn press_in_path_session(&mut self, p: Point) -> bool {
        let Some(id) = self.editing_path() else {
            return false;
        };
        if let Some(handle) = self.path_edit.handle_at(p) {
            if let Some(path) = self.scene.find(id).and_then(|s| s.as_path()) {
                self.path_edit.set_active(Some(handle));
                self.interaction = Interaction::PathHandle {
                    handle,
                    before: path.snapshot(),
                };
                return true;
            }
        }
        let on_path = self
            .scene
            .find(id)
            .is_some_and(|s| s.contains_point_with(p, self.hit_tester.as_ref()));
        if on_path {
            return true;
        }
        self.end_path_edit();
        false
    }

    fn begin_select(&mut self, p: Point, modifiers: Modifiers) {
        if let Some(shape) = self.selection.single().and_then(|id| self.scene.find(id)) {
            self.transform_controls.refresh(shape);
            if let Some(handle) = self.transform_controls.handle_at(p) {
                self.interaction = Interaction::Resizing {
                    id: shape.id,
                    handle,
                    start: p,
                    before: shape.bounds(),
                    original: shape.kind.clone(),
                };
                return;
            }
        }

        let Some(id) = self.scene.hit_test(p, self.hit_tester.as_ref()) else {
            if !modifiers.shift {
                self.selection.clear();
            }
            self.interaction = Interaction::Marquee {
                start: p,
                current: p,
                additive: modifiers.shift,
            };
            return;
        };

        if modifiers.shift {
            self.selection.toggle(id);
            if !self.selection.contains(id) {
                return;
            }
        } else if !self.selection.contains(id) {
            self.selection.select(id);
        }
        let ids = self.selection.ids().to_vec();
        let origin = ids
            .iter()
            .filter_map(|id| self.scene.find(*id))
            .map(|s| s.bounds())
            .reduce(|a, b| a.union(&b));
        if let Some(origin) = origin {
            self.interaction = Interaction::Moving {
                ids,
                start: p,
                origin,
                applied: (0.0, 0.0),
            };
        }
    }

    fn pen_click(&mut self, p: Point) {
        let p = self.snapped(p);
        let Some(path) = self.pen.as_mut() else {
            self.pen = Some(DesignPath::new(vec![PathPoint::move_to(p)], false));
            return;
        };
        let closes = path.len() >= MIN_PATH_POINTS
            && path.points[0].position.distance_to(&p) <= PATH_HANDLE_RADIUS;
        if closes {
            path.close();
            self.finish_pen();
        } else {
            path.points.push(PathPoint::line_to(p));
            path.rebuild_data();
        }
    }

    fn finish_drawing(&mut self, tool: Tool, start: Point, end: Point) -> Option<u64> {
        let Some(kind) = drawn_kind(tool, start, end) else {
            tracing::debug!("Discarding {:?} gesture below the minimum size", tool);
            return None;
        };
        let style = drawn_style(&kind, self.color_policy.next_color());
        Some(self.insert_drawn(kind, style))
    }

    fn insert_drawn(&mut self, kind: ShapeKind, style: ShapeStyle) -> u64 {
        let id = self.scene.allocate_id();
        let index = self.scene.len();
        let cmd = AddShape::new(Shape::new(id, kind, style), index);
        self.history
            .execute(SceneCommand::AddShape(cmd), &mut self.scene);
        self.selection.select(id);
        id
    }

    fn snapped(&mut self, p: Point) -> Point {
        self.snap.snap_point(p, self.scene.shapes(), &[]).point
    }
}
