//! Shape table: the ordered top-level shape list plus id allocation.
//!
//! Commands address shapes by id and by `(parent, index)` position, where
//! `parent` is `None` for the top level or the id of the owning group.

use crate::model::{Point, Shape, ShapeKind};
use crate::surface::HitTester;

#[derive(Debug, Clone, Default)]
pub struct Scene {
    shapes: Vec<Shape>,
    next_id: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            shapes: Vec::new(),
            next_id: 1,
        }
    }

    /// Hands out a fresh id. Ids are never reused within a scene.
    pub fn allocate_id(&mut self) -> u64 {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        id
    }

    /// Makes sure future ids are greater than `id`.
    pub fn reserve_past(&mut self, id: u64) {
        if self.next_id <= id {
            self.next_id = id + 1;
        }
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Drops every shape. The id counter keeps counting.
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    pub fn top_level_ids(&self) -> Vec<u64> {
        self.shapes.iter().map(|s| s.id).collect()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.find(id).is_some()
    }

    pub fn find(&self, id: u64) -> Option<&Shape> {
        self.shapes.iter().find_map(|s| s.find(id))
    }

    pub fn find_mut(&mut self, id: u64) -> Option<&mut Shape> {
        self.shapes.iter_mut().find_map(|s| s.find_mut(id))
    }

    /// Position of `id`: owning group (or `None` for the top level) and index.
    pub fn locate(&self, id: u64) -> Option<(Option<u64>, usize)> {
        fn search(list: &[Shape], parent: Option<u64>, id: u64) -> Option<(Option<u64>, usize)> {
            for (index, shape) in list.iter().enumerate() {
                if shape.id == id {
                    return Some((parent, index));
                }
                if let ShapeKind::Group(group) = &shape.kind {
                    if let Some(found) = search(&group.children, Some(shape.id), id) {
                        return Some(found);
                    }
                }
            }
            None
        }
        search(&self.shapes, None, id)
    }

    /// The list that holds children of `parent`.
    pub fn host_mut(&mut self, parent: Option<u64>) -> Option<&mut Vec<Shape>> {
        match parent {
            None => Some(&mut self.shapes),
            Some(id) => self.find_mut(id)?.as_group_mut().map(|g| &mut g.children),
        }
    }

    /// Inserts `shape` at `index` (clamped to the list length). Returns the
    /// shape back when `parent` does not name a group.
    pub fn insert(&mut self, parent: Option<u64>, index: usize, shape: Shape) -> Result<usize, Shape> {
        self.reserve_past(shape.subtree_ids().into_iter().max().unwrap_or(0));
        match self.host_mut(parent) {
            Some(list) => {
                let index = index.min(list.len());
                list.insert(index, shape);
                Ok(index)
            }
            None => Err(shape),
        }
    }

    pub fn push(&mut self, shape: Shape) {
        self.reserve_past(shape.subtree_ids().into_iter().max().unwrap_or(0));
        self.shapes.push(shape);
    }

    /// Detaches `id` wherever it lives, returning its position and value.
    pub fn remove(&mut self, id: u64) -> Option<(Option<u64>, usize, Shape)> {
        let (parent, index) = self.locate(id)?;
        let shape = self.host_mut(parent)?.remove(index);
        Some((parent, index, shape))
    }

    /// Replaces the whole shape list, e.g. after loading a document.
    pub fn replace_all(&mut self, shapes: Vec<Shape>) {
        for shape in &shapes {
            self.reserve_past(shape.subtree_ids().into_iter().max().unwrap_or(0));
        }
        self.shapes = shapes;
    }

    /// Topmost top-level shape containing `p`.
    pub fn hit_test(&self, p: Point, hit: &dyn HitTester) -> Option<u64> {
        self.shapes
            .iter()
            .rev()
            .find(|s| s.contains_point_with(p, hit))
            .map(|s| s.id)
    }
}
