//! Batch alignment, distribution and size matching.
//!
//! Everything here is pure: the functions read shape bounds and return the
//! moves or resizes to perform, which the caller turns into commands.
//! Coordinates grow downwards, so "top" is the smallest y.

use crate::model::{Bounds, Shape, ShapeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    CenterHorizontal,
    Right,
    Top,
    CenterVertical,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distribution {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeMatch {
    Width,
    Height,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeMove {
    pub id: u64,
    pub dx: f64,
    pub dy: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeResize {
    pub id: u64,
    pub before: Bounds,
    pub after: Bounds,
}

pub const MIN_ALIGN: usize = 2;
pub const MIN_DISTRIBUTE: usize = 3;
pub const MIN_EQUALIZE: usize = 2;

/// Moves aligning every shape to the shared edge or center of the group.
pub fn align(shapes: &[&Shape], alignment: Alignment) -> Vec<ShapeMove> {
    if shapes.len() < MIN_ALIGN {
        tracing::warn!(
            "Align needs at least {} shapes, got {}",
            MIN_ALIGN,
            shapes.len()
        );
        return Vec::new();
    }
    let bounds: Vec<(u64, Bounds)> = shapes.iter().map(|s| (s.id, s.bounds())).collect();
    let Some(all) = bounds.iter().map(|(_, b)| *b).reduce(|a, b| a.union(&b)) else {
        return Vec::new();
    };
    let target = match alignment {
        Alignment::Left => all.x,
        Alignment::Right => all.right(),
        Alignment::CenterHorizontal => all.center().x,
        Alignment::Top => all.y,
        Alignment::Bottom => all.bottom(),
        Alignment::CenterVertical => all.center().y,
    };

    bounds
        .iter()
        .filter_map(|(id, b)| {
            let (dx, dy) = match alignment {
                Alignment::Left => (target - b.x, 0.0),
                Alignment::Right => (target - b.right(), 0.0),
                Alignment::CenterHorizontal => (target - b.center().x, 0.0),
                Alignment::Top => (0.0, target - b.y),
                Alignment::Bottom => (0.0, target - b.bottom()),
                Alignment::CenterVertical => (0.0, target - b.center().y),
            };
            (dx.abs() > f64::EPSILON || dy.abs() > f64::EPSILON).then_some(ShapeMove {
                id: *id,
                dx,
                dy,
            })
        })
        .collect()
}

/// Spreads the shapes so the gaps between neighbours are equal. The first
/// and last shape along the axis stay put.
pub fn distribute(shapes: &[&Shape], distribution: Distribution) -> Vec<ShapeMove> {
    if shapes.len() < MIN_DISTRIBUTE {
        tracing::warn!(
            "Distribute needs at least {} shapes, got {}",
            MIN_DISTRIBUTE,
            shapes.len()
        );
        return Vec::new();
    }
    let horizontal = distribution == Distribution::Horizontal;
    let mut items: Vec<(u64, f64, f64)> = shapes
        .iter()
        .map(|s| {
            let (pos, len) = start_size(&s.bounds(), horizontal);
            (s.id, pos, len)
        })
        .collect();
    items.sort_by(|a, b| a.1.total_cmp(&b.1));

    let first = items[0];
    let last = items[items.len() - 1];
    let span = last.1 + last.2 - first.1;
    let occupied: f64 = items.iter().map(|(_, _, len)| len).sum();
    let gap = (span - occupied) / (items.len() - 1) as f64;

    let mut cursor = first.1 + first.2 + gap;
    let mut moves = Vec::new();
    for (id, pos, len) in &items[1..items.len() - 1] {
        let delta = cursor - pos;
        if delta.abs() > f64::EPSILON {
            moves.push(if horizontal {
                ShapeMove { id: *id, dx: delta, dy: 0.0 }
            } else {
                ShapeMove { id: *id, dx: 0.0, dy: delta }
            });
        }
        cursor += len + gap;
    }
    moves
}

fn start_size(b: &Bounds, horizontal: bool) -> (f64, f64) {
    if horizontal {
        (b.x, b.width)
    } else {
        (b.y, b.height)
    }
}

/// Copies the first shape's width and/or height onto the others. Circles
/// take the size as their diameter and keep their center; other shapes keep
/// their top-left corner.
pub fn equalize(shapes: &[&Shape], size: SizeMatch) -> Vec<ShapeResize> {
    if shapes.len() < MIN_EQUALIZE {
        tracing::warn!(
            "Equalize needs at least {} shapes, got {}",
            MIN_EQUALIZE,
            shapes.len()
        );
        return Vec::new();
    }
    let reference = shapes[0].bounds();
    shapes[1..]
        .iter()
        .filter_map(|shape| {
            let before = shape.bounds();
            let (width, height) = match size {
                SizeMatch::Width => (reference.width, before.height),
                SizeMatch::Height => (before.width, reference.height),
                SizeMatch::Both => (reference.width, reference.height),
            };
            let after = match shape.kind {
                ShapeKind::Circle(_) => {
                    let diameter = match size {
                        SizeMatch::Width => reference.width,
                        SizeMatch::Height => reference.height,
                        SizeMatch::Both => reference.width.min(reference.height),
                    };
                    let c = before.center();
                    Bounds::new(c.x - diameter / 2.0, c.y - diameter / 2.0, diameter, diameter)
                }
                _ => Bounds::new(before.x, before.y, width, height),
            };
            (!after.approx_eq(&before)).then_some(ShapeResize {
                id: shape.id,
                before,
                after,
            })
        })
        .collect()
}
