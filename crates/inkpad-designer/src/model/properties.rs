//! Editable property subsets captured by update-properties commands.

use serde::{Deserialize, Serialize};

use super::{Fill, PathSnapshot, Shape, ShapeKind, StrokeStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyKey {
    Fill,
    Stroke,
    Rotation,
    Text,
    FontSize,
    FontFamily,
    PathData,
}

/// One property value. Variant-specific properties are ignored by shapes
/// that do not carry them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShapeProperty {
    Fill(Option<Fill>),
    Stroke(Option<StrokeStyle>),
    Rotation(f64),
    Text(String),
    FontSize(f64),
    FontFamily(String),
    PathData(PathSnapshot),
}

impl ShapeProperty {
    pub fn key(&self) -> PropertyKey {
        match self {
            ShapeProperty::Fill(_) => PropertyKey::Fill,
            ShapeProperty::Stroke(_) => PropertyKey::Stroke,
            ShapeProperty::Rotation(_) => PropertyKey::Rotation,
            ShapeProperty::Text(_) => PropertyKey::Text,
            ShapeProperty::FontSize(_) => PropertyKey::FontSize,
            ShapeProperty::FontFamily(_) => PropertyKey::FontFamily,
            ShapeProperty::PathData(_) => PropertyKey::PathData,
        }
    }
}

impl Shape {
    /// Current value of `key`, or `None` if this variant has no such property.
    pub fn property(&self, key: PropertyKey) -> Option<ShapeProperty> {
        match (key, &self.kind) {
            (PropertyKey::Fill, _) => Some(ShapeProperty::Fill(self.style.fill.clone())),
            (PropertyKey::Stroke, _) => Some(ShapeProperty::Stroke(self.style.stroke)),
            (PropertyKey::Rotation, _) => Some(ShapeProperty::Rotation(self.style.rotation)),
            (PropertyKey::Text, ShapeKind::TextBox(t)) => Some(ShapeProperty::Text(t.text.clone())),
            (PropertyKey::FontSize, ShapeKind::TextBox(t)) => {
                Some(ShapeProperty::FontSize(t.font_size))
            }
            (PropertyKey::FontFamily, ShapeKind::TextBox(t)) => {
                Some(ShapeProperty::FontFamily(t.font_family.clone()))
            }
            (PropertyKey::PathData, ShapeKind::Path(p)) => {
                Some(ShapeProperty::PathData(p.snapshot()))
            }
            _ => None,
        }
    }

    /// Current values for each key this shape supports.
    pub fn properties(&self, keys: &[PropertyKey]) -> Vec<ShapeProperty> {
        keys.iter().filter_map(|key| self.property(*key)).collect()
    }

    /// Writes `property`; returns false when the variant does not carry it.
    pub fn set_property(&mut self, property: &ShapeProperty) -> bool {
        match (property, &mut self.kind) {
            (ShapeProperty::Fill(fill), _) => self.style.fill = fill.clone(),
            (ShapeProperty::Stroke(stroke), _) => self.style.stroke = *stroke,
            (ShapeProperty::Rotation(angle), _) => self.style.rotation = *angle,
            (ShapeProperty::Text(text), ShapeKind::TextBox(t)) => t.text = text.clone(),
            (ShapeProperty::FontSize(size), ShapeKind::TextBox(t)) => t.font_size = *size,
            (ShapeProperty::FontFamily(family), ShapeKind::TextBox(t)) => {
                t.font_family = family.clone()
            }
            (ShapeProperty::PathData(snapshot), ShapeKind::Path(p)) => p.restore(snapshot),
            _ => return false,
        }
        true
    }
}
