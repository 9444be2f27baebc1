//! Renderer operations: document-level edits issued through the history.

use inkpad_core::MarkupError;

use super::Renderer;
use crate::align_manager::{self, Alignment, Distribution, SizeMatch};
use crate::commands::{
    AddShape, CompositeCommand, GroupShapes, MoveShapes, RemoveShape, ResizeShape, SceneCommand,
    UngroupShapes, UpdateProperties,
};
use crate::markup::{export_scene, parse_scene};
use crate::model::{DesignPath, Point, PointType, Shape, ShapeProperty};
use crate::path_edit::{PathEditManager, SegmentKind};
use crate::transform_controls::rotation_towards;

use super::types::PathSession;

impl Renderer {
    /// Adds `shape` on top of the scene under a fresh id (its descendants
    /// are renumbered too) and returns that id.
    pub fn add_shape(&mut self, mut shape: Shape) -> u64 {
        self.assign_fresh_ids(&mut shape);
        let id = shape.id;
        let index = self.scene.len();
        self.history
            .execute(SceneCommand::AddShape(AddShape::new(shape, index)), &mut self.scene);
        id
    }

    /// Removes every selected shape as one undoable step.
    pub fn delete_selected(&mut self) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        if self
            .editing_path()
            .is_some_and(|id| self.selection.contains(id))
        {
            self.end_path_edit();
        }
        let commands = self
            .selection
            .ids()
            .iter()
            .map(|id| SceneCommand::RemoveShape(RemoveShape::new(*id)))
            .collect();
        self.selection.clear();
        self.commit("Delete Shapes", commands)
    }

    /// Groups the selected top-level shapes. Needs at least two.
    pub fn group_selected(&mut self) -> Option<u64> {
        let ids: Vec<u64> = self
            .selection
            .ids()
            .iter()
            .copied()
            .filter(|id| matches!(self.scene.locate(*id), Some((None, _))))
            .collect();
        if ids.len() < 2 {
            tracing::warn!("Grouping needs at least 2 top-level shapes, got {}", ids.len());
            return None;
        }
        let group_id = self.scene.allocate_id();
        self.history.execute(
            SceneCommand::GroupShapes(GroupShapes::new(group_id, ids)),
            &mut self.scene,
        );
        self.selection.select(group_id);
        Some(group_id)
    }

    /// Dissolves every selected group and selects the released children.
    pub fn ungroup_selected(&mut self) -> bool {
        let mut children = Vec::new();
        let mut commands = Vec::new();
        for shape in self.selected_shapes() {
            match shape.as_group() {
                Some(group) => {
                    children.extend(group.children.iter().map(|c| c.id));
                    commands.push(SceneCommand::UngroupShapes(UngroupShapes::new(shape.id)));
                }
                None => tracing::warn!("Shape {} is not a group, nothing to ungroup", shape.id),
            }
        }
        if !self.commit("Ungroup Shapes", commands) {
            return false;
        }
        self.selection.set(children);
        true
    }

    pub fn align_selected(&mut self, alignment: Alignment) -> bool {
        let moves = align_manager::align(&self.selected_shapes(), alignment);
        let commands = moves
            .into_iter()
            .filter(|m| m.dx != 0.0 || m.dy != 0.0)
            .map(|m| {
                SceneCommand::MoveShapes(MoveShapes {
                    ids: vec![m.id],
                    dx: m.dx,
                    dy: m.dy,
                })
            })
            .collect();
        self.commit("Align Shapes", commands)
    }

    pub fn distribute_selected(&mut self, distribution: Distribution) -> bool {
        let moves = align_manager::distribute(&self.selected_shapes(), distribution);
        let commands = moves
            .into_iter()
            .filter(|m| m.dx != 0.0 || m.dy != 0.0)
            .map(|m| {
                SceneCommand::MoveShapes(MoveShapes {
                    ids: vec![m.id],
                    dx: m.dx,
                    dy: m.dy,
                })
            })
            .collect();
        self.commit("Distribute Shapes", commands)
    }

    /// Copies the first selected shape's size onto the others.
    pub fn equalize_selected(&mut self, size: SizeMatch) -> bool {
        let resizes = align_manager::equalize(&self.selected_shapes(), size);
        let commands = resizes
            .into_iter()
            .filter(|r| !r.before.approx_eq(&r.after))
            .map(|r| SceneCommand::ResizeShape(ResizeShape::new(r.id, r.before, r.after)))
            .collect();
        self.commit("Match Size", commands)
    }

    /// Sets `property` on every selected shape that carries it, one
    /// update-properties command per shape.
    pub fn set_property_selected(&mut self, property: ShapeProperty) -> bool {
        let key = property.key();
        let commands = self
            .selected_shapes()
            .into_iter()
            .filter_map(|shape| {
                let before = shape.property(key)?;
                (before != property).then(|| {
                    SceneCommand::UpdateProperties(UpdateProperties {
                        id: shape.id,
                        before: vec![before],
                        after: vec![property.clone()],
                    })
                })
            })
            .collect();
        self.commit("Update Properties", commands)
    }

    pub fn rotate_selected(&mut self, degrees: f64) -> bool {
        self.set_property_selected(ShapeProperty::Rotation(degrees.rem_euclid(360.0)))
    }

    /// Points a single selected shape towards `pointer`, rotating about its
    /// bounding-box center; `snap` rounds to 15 degree steps.
    pub fn rotate_selected_towards(&mut self, pointer: Point, snap: bool) -> bool {
        let Some(pivot) = self
            .selection
            .single()
            .and_then(|id| self.scene.find(id))
            .map(|s| s.bounds().center())
        else {
            return false;
        };
        self.rotate_selected(rotation_towards(pivot, pointer, snap))
    }

    pub fn undo(&mut self) -> bool {
        self.settle();
        let undone = self.history.undo(&mut self.scene);
        self.selection.retain_existing(self.scene.shapes());
        undone
    }

    pub fn redo(&mut self) -> bool {
        self.settle();
        let redone = self.history.redo(&mut self.scene);
        self.selection.retain_existing(self.scene.shapes());
        redone
    }

    /// Starts a new, empty document. The id counter keeps counting.
    pub fn reset(&mut self) {
        self.cancel_interaction();
        self.path_session = None;
        self.path_edit.end();
        self.scene.clear();
        self.history.clear();
        self.selection.clear();
        self.transform_controls.clear();
        tracing::info!("Document reset");
    }

    /// Replaces the document with the scene in `text`. On error the current
    /// document is left untouched.
    pub fn load_markup(&mut self, text: &str) -> Result<(), MarkupError> {
        let parsed = parse_scene(text)?;
        self.reset();
        self.config.canvas_width = parsed.width;
        self.config.canvas_height = parsed.height;
        let count = parsed.shapes.len();
        self.scene.replace_all(parsed.shapes);
        tracing::info!(
            "Loaded {} shapes on a {}x{} canvas",
            count,
            parsed.width,
            parsed.height
        );
        Ok(())
    }

    pub fn export_markup(&self) -> String {
        export_scene(
            self.scene.shapes(),
            self.config.canvas_width,
            self.config.canvas_height,
        )
    }

    /// Opens a path-edit session on path `id`, closing any other session.
    pub fn begin_path_edit(&mut self, id: u64) -> bool {
        if self.editing_path() == Some(id) {
            return true;
        }
        self.end_path_edit();
        let Some(path) = self.scene.find(id).and_then(|s| s.as_path()) else {
            tracing::warn!("Shape {} is not a path, cannot edit its points", id);
            return false;
        };
        self.path_edit.begin(id, path);
        self.path_session = Some(PathSession {
            shape_id: id,
            before: path.snapshot(),
        });
        self.selection.select(id);
        true
    }

    /// Closes the path-edit session, recording one update-properties
    /// command when the path changed. Returns true if one was recorded.
    pub fn end_path_edit(&mut self) -> bool {
        let Some(session) = self.path_session.take() else {
            return false;
        };
        self.path_edit.end();
        let Some(after) = self
            .scene
            .find(session.shape_id)
            .and_then(|s| s.as_path())
            .map(|p| p.snapshot())
        else {
            return false;
        };
        if after == session.before {
            return false;
        }
        let cmd = UpdateProperties {
            id: session.shape_id,
            before: vec![ShapeProperty::PathData(session.before)],
            after: vec![ShapeProperty::PathData(after)],
        };
        self.history
            .record_executed(SceneCommand::UpdateProperties(cmd));
        true
    }

    pub fn set_point_type(&mut self, index: usize, point_type: PointType) -> bool {
        self.edit_path(|edit, path| edit.set_point_type(path, index, point_type))
            .unwrap_or(false)
    }

    pub fn convert_point(&mut self, index: usize, target: SegmentKind) -> bool {
        self.edit_path(|edit, path| edit.convert_point(path, index, target))
            .unwrap_or(false)
    }

    pub fn insert_point(&mut self, index: usize) -> Option<usize> {
        self.edit_path(|edit, path| edit.insert_point(path, index))
            .flatten()
    }

    pub fn remove_point(&mut self, index: usize) -> bool {
        self.edit_path(|edit, path| edit.remove_point(path, index))
            .unwrap_or(false)
    }

    pub fn toggle_path_closed(&mut self) -> bool {
        self.edit_path(|edit, path| edit.toggle_closed(path))
            .unwrap_or(false)
    }

    fn edit_path<R>(
        &mut self,
        f: impl FnOnce(&mut PathEditManager, &mut DesignPath) -> R,
    ) -> Option<R> {
        let id = self.editing_path()?;
        let path = self.scene.find_mut(id)?.as_path_mut()?;
        Some(f(&mut self.path_edit, path))
    }

    /// Closes open gestures and sessions before history navigation.
    fn settle(&mut self) {
        self.abort_gesture();
        self.end_path_edit();
    }

    /// Executes `commands` as one history entry: alone, or wrapped in a
    /// composite named `name`. Nothing is recorded for an empty list.
    fn commit(&mut self, name: &str, mut commands: Vec<SceneCommand>) -> bool {
        let cmd = match commands.len() {
            0 => return false,
            1 => commands.remove(0),
            _ => SceneCommand::Composite(CompositeCommand::new(name, commands)),
        };
        self.history.execute(cmd, &mut self.scene);
        true
    }

    fn assign_fresh_ids(&mut self, shape: &mut Shape) {
        shape.id = self.scene.allocate_id();
        if let Some(group) = shape.as_group_mut() {
            for child in &mut group.children {
                self.assign_fresh_ids(child);
            }
        }
    }
}
