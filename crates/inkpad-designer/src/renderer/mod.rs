//! Scene controller.
//!
//! [`Renderer`] exclusively owns the scene and the command history, and
//! drives the other managers with borrowed shapes per call. Live pointer
//! gestures mutate geometry directly; the finished gesture is recorded in
//! the history with `record_executed`. Every other mutation goes through
//! `CommandHistory::execute`.

mod interaction;
mod operations;
mod types;

pub use types::{Modifiers, Tool};

use inkpad_core::EditorConfig;

use crate::color_policy::{ColorPolicy, PaletteCycle};
use crate::history::CommandHistory;
use crate::model::{Bounds, Color, DesignPath, Shape, ShapeStyle};
use crate::path_edit::PathEditManager;
use crate::scene::Scene;
use crate::selection::Selection;
use crate::snap_manager::SnapManager;
use crate::surface::{DrawingSurface, GeometryHitTester, HitTester, Paint};
use crate::transform_controls::TransformControls;
use types::{Interaction, PathSession, PenPath};

const SELECTION_COLOR: Color = Color::rgb(0x00, 0x78, 0xd4);
const PREVIEW_COLOR: Color = Color::rgb(0x80, 0x80, 0x80);

/// Scene controller owning shapes, selection, history and editing managers.
pub struct Renderer {
    config: EditorConfig,
    scene: Scene,
    history: CommandHistory,
    selection: Selection,
    transform_controls: TransformControls,
    path_edit: PathEditManager,
    snap: SnapManager,
    color_policy: Box<dyn ColorPolicy>,
    hit_tester: Box<dyn HitTester>,
    tool: Tool,
    interaction: Interaction,
    path_session: Option<PathSession>,
    pen: PenPath,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Renderer {
    /// Creates an empty document configured by `config`.
    pub fn new(config: EditorConfig) -> Self {
        Self {
            history: CommandHistory::new(config.history_capacity),
            transform_controls: TransformControls::new(config.handle_half_size),
            snap: SnapManager::new(config.snap.clone()),
            hit_tester: Box::new(GeometryHitTester::new(config.hit_tolerance)),
            color_policy: Box::new(PaletteCycle::default()),
            scene: Scene::new(),
            selection: Selection::new(),
            path_edit: PathEditManager::default(),
            tool: Tool::Select,
            interaction: Interaction::Idle,
            path_session: None,
            pen: None,
            config,
        }
    }

    /// Replaces the color policy used for newly drawn shapes.
    pub fn with_color_policy(mut self, policy: Box<dyn ColorPolicy>) -> Self {
        self.color_policy = policy;
        self
    }

    pub fn with_hit_tester(mut self, hit_tester: Box<dyn HitTester>) -> Self {
        self.hit_tester = hit_tester;
        self
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn shapes(&self) -> &[Shape] {
        self.scene.shapes()
    }

    pub fn shape(&self, id: u64) -> Option<&Shape> {
        self.scene.find(id)
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn snap_manager(&self) -> &SnapManager {
        &self.snap
    }

    pub fn snap_manager_mut(&mut self) -> &mut SnapManager {
        &mut self.snap
    }

    pub fn path_edit(&self) -> &PathEditManager {
        &self.path_edit
    }

    pub fn transform_controls(&self) -> &TransformControls {
        &self.transform_controls
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Switches tools. A pen path in progress is finished first, any other
    /// gesture is abandoned.
    pub fn set_tool(&mut self, tool: Tool) {
        if tool == self.tool {
            return;
        }
        self.abort_gesture();
        if self.tool == Tool::Pen {
            self.finish_pen();
        }
        tracing::debug!("Tool changed from {:?} to {:?}", self.tool, tool);
        self.tool = tool;
    }

    /// True between a pointer press and its release.
    pub fn is_interacting(&self) -> bool {
        !matches!(self.interaction, Interaction::Idle)
    }

    /// Id of the path being edited, if a path-edit session is open.
    pub fn editing_path(&self) -> Option<u64> {
        self.path_session.as_ref().map(|s| s.shape_id)
    }

    /// Path under construction by the pen tool.
    pub fn pen_path(&self) -> Option<&DesignPath> {
        self.pen.as_ref()
    }

    pub fn select(&mut self, id: u64) -> bool {
        if !self.scene.contains(id) {
            return false;
        }
        self.selection.select(id);
        true
    }

    pub fn toggle_selection(&mut self, id: u64) {
        if self.scene.contains(id) {
            self.selection.toggle(id);
        }
    }

    pub fn select_all(&mut self) {
        self.selection.select_all(self.scene.shapes());
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Shape being drawn by the active gesture, not yet in the scene.
    pub fn preview_shape(&self) -> Option<Shape> {
        let stroke = ShapeStyle::stroked(PREVIEW_COLOR, 1.0);
        match &self.interaction {
            Interaction::Drawing {
                tool,
                start,
                current,
            } => interaction::drawn_kind(*tool, *start, *current)
                .map(|kind| Shape::new(0, kind, stroke)),
            _ => self
                .pen
                .as_ref()
                .map(|path| Shape::path(0, path.clone()).with_style(stroke)),
        }
    }

    /// Marquee rectangle of the active selection drag.
    pub fn marquee(&self) -> Option<Bounds> {
        match &self.interaction {
            Interaction::Marquee { start, current, .. } => {
                Some(Bounds::from_corners(*start, *current))
            }
            _ => None,
        }
    }

    /// Redraws the scene and every overlay.
    ///
    /// Transform handles are recomputed here from the selected shape's live
    /// geometry, so they are shown only for a single selection outside a
    /// path-edit session.
    pub fn render(&mut self, surface: &mut dyn DrawingSurface) {
        for shape in self.scene.shapes() {
            shape.render(surface);
        }
        if let Some(preview) = self.preview_shape() {
            preview.render(surface);
        }
        self.render_selection_boxes(surface);

        let editing = self.editing_path();
        let single = self
            .selection
            .single()
            .filter(|id| editing != Some(*id))
            .and_then(|id| self.scene.find(id));
        match single {
            Some(shape) => {
                self.transform_controls.refresh(shape);
                self.transform_controls.render(surface);
            }
            None => self.transform_controls.clear(),
        }

        self.path_edit.render(surface);
        self.snap
            .render(surface, self.config.canvas_width, self.config.canvas_height);

        if let Some(area) = self.marquee() {
            surface.save();
            surface.set_fill(Paint::Solid(Color::rgba(0x00, 0x78, 0xd4, 0x20)));
            surface.set_stroke(Paint::Solid(SELECTION_COLOR), 1.0);
            surface.set_line_dash(&[4.0, 2.0]);
            surface.fill_rect(area);
            surface.stroke_rect(area);
            surface.restore();
        }
    }

    fn render_selection_boxes(&self, surface: &mut dyn DrawingSurface) {
        if self.selection.is_empty() {
            return;
        }
        surface.save();
        surface.set_stroke(Paint::Solid(SELECTION_COLOR), 1.0);
        surface.set_line_dash(&[5.0, 3.0]);
        for shape in self.selection.ids().iter().filter_map(|id| self.scene.find(*id)) {
            let bounds = shape.bounds();
            let rotation = shape.rotation();
            if rotation != 0.0 {
                let c = bounds.center();
                surface.save();
                surface.translate(c.x, c.y);
                surface.rotate(rotation);
                surface.translate(-c.x, -c.y);
                surface.stroke_rect(bounds);
                surface.restore();
            } else {
                surface.stroke_rect(bounds);
            }
        }
        surface.restore();
    }

    /// Selected shapes in selection order.
    fn selected_shapes(&self) -> Vec<&Shape> {
        self.selection
            .ids()
            .iter()
            .filter_map(|id| self.scene.find(*id))
            .collect()
    }
}
