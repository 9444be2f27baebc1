//! Invertible scene commands.
//!
//! Each command captures exactly what it needs to replay and revert its own
//! effect. Shapes are addressed by id; removed shapes are held by value
//! inside the command until they are put back, so a shape keeps its id and
//! data across any number of undo/redo cycles.

use crate::model::{Bounds, DesignGroup, Shape, ShapeKind, ShapeProperty};
use crate::scene::Scene;

#[derive(Debug, Clone)]
#[allow(clippy::large_enum_variant)]
pub enum SceneCommand {
    AddShape(AddShape),
    RemoveShape(RemoveShape),
    MoveShapes(MoveShapes),
    ResizeShape(ResizeShape),
    UpdateProperties(UpdateProperties),
    GroupShapes(GroupShapes),
    UngroupShapes(UngroupShapes),
    Composite(CompositeCommand),
}

#[derive(Debug, Clone)]
pub struct AddShape {
    pub id: u64,
    pub parent: Option<u64>,
    pub index: usize,
    /// Some while the shape is out of the scene.
    pub shape: Option<Shape>,
}

impl AddShape {
    /// Inserts `shape` into the top-level list at `index` when applied.
    pub fn new(shape: Shape, index: usize) -> Self {
        Self {
            id: shape.id,
            parent: None,
            index,
            shape: Some(shape),
        }
    }

    /// Records a shape the caller already inserted at `(parent, index)`.
    pub fn recorded(id: u64, parent: Option<u64>, index: usize) -> Self {
        Self {
            id,
            parent,
            index,
            shape: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RemoveShape {
    pub id: u64,
    pub parent: Option<u64>,
    pub index: usize,
    /// Some while the shape is out of the scene.
    pub shape: Option<Shape>,
}

impl RemoveShape {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            parent: None,
            index: 0,
            shape: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MoveShapes {
    pub ids: Vec<u64>,
    pub dx: f64,
    pub dy: f64,
}

/// Bounding-box resize.
///
/// The geometry on both sides is captured the first time the command runs
/// (or supplied by the caller for interactive drags), so undo and redo
/// replay it exactly even when the bounds fit is lossy, e.g. circles
/// inside a non-uniformly scaled group or a line dragged past its start.
#[derive(Debug, Clone)]
pub struct ResizeShape {
    pub id: u64,
    pub before: Bounds,
    pub after: Bounds,
    pub original: Option<ShapeKind>,
    pub resized: Option<ShapeKind>,
}

impl ResizeShape {
    pub fn new(id: u64, before: Bounds, after: Bounds) -> Self {
        Self {
            id,
            before,
            after,
            original: None,
            resized: None,
        }
    }

    /// Records a resize the caller already performed on the shape.
    pub fn recorded(id: u64, before: Bounds, after: Bounds, original: ShapeKind, resized: ShapeKind) -> Self {
        Self {
            id,
            before,
            after,
            original: Some(original),
            resized: Some(resized),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateProperties {
    pub id: u64,
    pub before: Vec<ShapeProperty>,
    pub after: Vec<ShapeProperty>,
}

#[derive(Debug, Clone)]
pub struct GroupShapes {
    pub group_id: u64,
    pub child_ids: Vec<u64>,
    /// `(child id, top-level index)` before grouping, ascending by index.
    pub placements: Vec<(u64, usize)>,
    /// Group without its children while ungrouped (keeps style across redo).
    pub shell: Option<Shape>,
}

impl GroupShapes {
    pub fn new(group_id: u64, child_ids: Vec<u64>) -> Self {
        Self {
            group_id,
            child_ids,
            placements: Vec::new(),
            shell: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UngroupShapes {
    pub group_id: u64,
    pub parent: Option<u64>,
    pub index: usize,
    pub child_ids: Vec<u64>,
    pub shell: Option<Shape>,
}

impl UngroupShapes {
    pub fn new(group_id: u64) -> Self {
        Self {
            group_id,
            parent: None,
            index: 0,
            child_ids: Vec::new(),
            shell: None,
        }
    }
}

/// Named command list applied in order and inverted in reverse.
#[derive(Debug, Clone)]
pub struct CompositeCommand {
    pub name: String,
    pub commands: Vec<SceneCommand>,
}

impl CompositeCommand {
    pub fn new(name: impl Into<String>, commands: Vec<SceneCommand>) -> Self {
        Self {
            name: name.into(),
            commands,
        }
    }
}

impl SceneCommand {
    pub fn name(&self) -> &str {
        match self {
            SceneCommand::AddShape(_) => "Add Shape",
            SceneCommand::RemoveShape(_) => "Remove Shape",
            SceneCommand::MoveShapes(_) => "Move Shapes",
            SceneCommand::ResizeShape(_) => "Resize Shape",
            SceneCommand::UpdateProperties(_) => "Update Properties",
            SceneCommand::GroupShapes(_) => "Group Shapes",
            SceneCommand::UngroupShapes(_) => "Ungroup Shapes",
            SceneCommand::Composite(cmd) => &cmd.name,
        }
    }

    pub fn apply(&mut self, scene: &mut Scene) {
        match self {
            SceneCommand::AddShape(cmd) => {
                if let Some(shape) = cmd.shape.take() {
                    let index = cmd.index;
                    match scene.insert(cmd.parent, index, shape) {
                        Ok(index) => cmd.index = index,
                        Err(shape) => {
                            tracing::warn!("Cannot add shape {}: host is gone", cmd.id);
                            cmd.shape = Some(shape);
                        }
                    }
                }
            }
            SceneCommand::RemoveShape(cmd) => match scene.remove(cmd.id) {
                Some((parent, index, shape)) => {
                    cmd.parent = parent;
                    cmd.index = index;
                    cmd.shape = Some(shape);
                }
                None => tracing::warn!("Cannot remove shape {}: not in scene", cmd.id),
            },
            SceneCommand::MoveShapes(cmd) => translate_all(scene, &cmd.ids, cmd.dx, cmd.dy),
            SceneCommand::ResizeShape(cmd) => {
                let Some(shape) = scene.find_mut(cmd.id) else {
                    tracing::warn!("Cannot resize shape {}: not in scene", cmd.id);
                    return;
                };
                if cmd.original.is_none() {
                    cmd.original = Some(shape.kind.clone());
                }
                match &cmd.resized {
                    Some(kind) => shape.kind = kind.clone(),
                    None => {
                        shape.fit_bounds(&cmd.before, &cmd.after);
                        cmd.resized = Some(shape.kind.clone());
                    }
                }
            }
            SceneCommand::UpdateProperties(cmd) => set_all(scene, cmd.id, &cmd.after),
            SceneCommand::GroupShapes(cmd) => group(scene, cmd),
            SceneCommand::UngroupShapes(cmd) => ungroup(scene, cmd),
            SceneCommand::Composite(cmd) => {
                for sub in &mut cmd.commands {
                    sub.apply(scene);
                }
            }
        }
    }

    pub fn invert(&mut self, scene: &mut Scene) {
        match self {
            SceneCommand::AddShape(cmd) => {
                if let Some((parent, index, shape)) = scene.remove(cmd.id) {
                    cmd.parent = parent;
                    cmd.index = index;
                    cmd.shape = Some(shape);
                }
            }
            SceneCommand::RemoveShape(cmd) => {
                if let Some(shape) = cmd.shape.take() {
                    if let Err(shape) = scene.insert(cmd.parent, cmd.index, shape) {
                        tracing::warn!("Cannot restore shape {}: host is gone", cmd.id);
                        cmd.shape = Some(shape);
                    }
                }
            }
            SceneCommand::MoveShapes(cmd) => translate_all(scene, &cmd.ids, -cmd.dx, -cmd.dy),
            SceneCommand::ResizeShape(cmd) => {
                if let Some(shape) = scene.find_mut(cmd.id) {
                    match &cmd.original {
                        Some(kind) => shape.kind = kind.clone(),
                        None => {
                            shape.fit_bounds(&cmd.after, &cmd.before);
                        }
                    }
                }
            }
            SceneCommand::UpdateProperties(cmd) => set_all(scene, cmd.id, &cmd.before),
            SceneCommand::GroupShapes(cmd) => ungroup_created(scene, cmd),
            SceneCommand::UngroupShapes(cmd) => regroup(scene, cmd),
            SceneCommand::Composite(cmd) => {
                for sub in cmd.commands.iter_mut().rev() {
                    sub.invert(scene);
                }
            }
        }
    }
}

fn translate_all(scene: &mut Scene, ids: &[u64], dx: f64, dy: f64) {
    for id in ids {
        match scene.find_mut(*id) {
            Some(shape) => shape.translate(dx, dy),
            None => tracing::warn!("Cannot move shape {}: not in scene", id),
        }
    }
}

fn set_all(scene: &mut Scene, id: u64, properties: &[ShapeProperty]) {
    let Some(shape) = scene.find_mut(id) else {
        tracing::warn!("Cannot update shape {}: not in scene", id);
        return;
    };
    for property in properties {
        shape.set_property(property);
    }
}

fn group(scene: &mut Scene, cmd: &mut GroupShapes) {
    let mut placements: Vec<(u64, usize)> = cmd
        .child_ids
        .iter()
        .filter_map(|id| match scene.locate(*id) {
            Some((None, index)) => Some((*id, index)),
            _ => {
                tracing::warn!("Shape {} is not top-level, leaving it out of the group", id);
                None
            }
        })
        .collect();
    placements.sort_by_key(|(_, index)| *index);

    let mut children = Vec::with_capacity(placements.len());
    for (id, _) in placements.iter().rev() {
        if let Some((_, _, shape)) = scene.remove(*id) {
            children.push(shape);
        }
    }
    children.reverse();

    let group = match cmd.shell.take() {
        Some(mut shell) => {
            shell.kind = ShapeKind::Group(DesignGroup::new(children));
            shell
        }
        None => Shape::group(cmd.group_id, children),
    };
    scene.push(group);
    cmd.placements = placements;
}

fn ungroup_created(scene: &mut Scene, cmd: &mut GroupShapes) {
    let Some((_, _, mut group)) = scene.remove(cmd.group_id) else {
        tracing::warn!("Cannot undo grouping: group {} is gone", cmd.group_id);
        return;
    };
    let children = match group.as_group_mut() {
        Some(g) => std::mem::take(&mut g.children),
        None => Vec::new(),
    };
    cmd.shell = Some(group);

    let mut children: Vec<Option<Shape>> = children.into_iter().map(Some).collect();
    for (id, index) in &cmd.placements {
        let child = children
            .iter_mut()
            .find(|c| c.as_ref().is_some_and(|s| s.id == *id))
            .and_then(Option::take);
        if let Some(child) = child {
            let _ = scene.insert(None, *index, child);
        }
    }
}

fn ungroup(scene: &mut Scene, cmd: &mut UngroupShapes) {
    if !scene.find(cmd.group_id).is_some_and(|s| s.as_group().is_some()) {
        tracing::warn!("Shape {} is not a group, nothing to ungroup", cmd.group_id);
        return;
    }
    let Some((parent, index, mut group)) = scene.remove(cmd.group_id) else {
        return;
    };
    let children = match group.as_group_mut() {
        Some(g) => std::mem::take(&mut g.children),
        None => Vec::new(),
    };
    if group.rotation() != 0.0 {
        tracing::debug!(
            "Ungrouping rotated group {}; children keep their own rotation",
            cmd.group_id
        );
    }
    cmd.parent = parent;
    cmd.index = index;
    cmd.child_ids = children.iter().map(|c| c.id).collect();
    cmd.shell = Some(group);

    if let Some(host) = scene.host_mut(parent) {
        let at = index.min(host.len());
        host.splice(at..at, children);
    }
}

fn regroup(scene: &mut Scene, cmd: &mut UngroupShapes) {
    let Some(mut shell) = cmd.shell.take() else {
        return;
    };
    let mut children = Vec::with_capacity(cmd.child_ids.len());
    for id in &cmd.child_ids {
        if let Some((_, _, child)) = scene.remove(*id) {
            children.push(child);
        }
    }
    // keep the group's own origin, children may all have been removed
    let origin = shell.as_group().map(|g| g.origin).unwrap_or_default();
    let mut group = DesignGroup::new(children);
    if group.children.is_empty() {
        group.origin = origin;
    }
    shell.kind = ShapeKind::Group(group);
    if let Err(shell) = scene.insert(cmd.parent, cmd.index, shell) {
        tracing::warn!("Cannot restore group {}: host is gone", cmd.group_id);
        cmd.shell = Some(shell);
    }
}
