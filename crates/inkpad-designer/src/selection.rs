//! Ordered selection of top-level shape ids.

use crate::model::{Bounds, Shape};

/// Selected shape ids in selection order, without duplicates.
///
/// Transform handles are only shown for a singleton selection; every
/// selected shape gets a selection box.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    ids: Vec<u64>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[u64] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.ids.contains(&id)
    }

    /// The only selected id, if exactly one shape is selected.
    pub fn single(&self) -> Option<u64> {
        match self.ids.as_slice() {
            [id] => Some(*id),
            _ => None,
        }
    }

    /// Replaces the selection with `id`.
    pub fn select(&mut self, id: u64) {
        self.ids.clear();
        self.ids.push(id);
    }

    pub fn add(&mut self, id: u64) {
        if !self.contains(id) {
            self.ids.push(id);
        }
    }

    /// Adds `id` if absent, removes it otherwise.
    pub fn toggle(&mut self, id: u64) {
        if let Some(pos) = self.ids.iter().position(|s| *s == id) {
            self.ids.remove(pos);
        } else {
            self.ids.push(id);
        }
    }

    pub fn remove(&mut self, id: u64) {
        self.ids.retain(|s| *s != id);
    }

    pub fn set(&mut self, ids: impl IntoIterator<Item = u64>) {
        self.ids.clear();
        for id in ids {
            self.add(id);
        }
    }

    pub fn select_all(&mut self, shapes: &[Shape]) {
        self.set(shapes.iter().map(|s| s.id));
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Selects every shape whose bounds intersect `area`; with `additive`
    /// the current selection is kept.
    pub fn select_in_rect(&mut self, shapes: &[Shape], area: &Bounds, additive: bool) {
        if !additive {
            self.ids.clear();
        }
        for shape in shapes {
            if shape.bounds().intersects(area) {
                self.add(shape.id);
            }
        }
    }

    /// Drops ids that no longer name a shape in `shapes`.
    pub fn retain_existing(&mut self, shapes: &[Shape]) {
        self.ids.retain(|id| shapes.iter().any(|s| s.id == *id));
    }
}
