//! Scene markup: SVG export and import of the same dialect.
//!
//! Export wraps every top-level shape in an `<svg>` root sized to the
//! canvas, preceded by a `<defs>` block holding one `linearGradient` per
//! gradient-filled shape (`gradient-{id}`). Leaf elements carry
//! `id="shape-{id}"` and, when rotated, `transform="rotate(a, cx, cy)"`
//! about their own bounding-box center.

mod import;

pub use import::{parse_scene, ParsedScene};

use crate::model::Shape;

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

pub fn export_scene(shapes: &[Shape], width: f64, height: f64) -> String {
    let mut out = format!(
        r#"<svg xmlns="{}" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        SVG_NAMESPACE, width, height, width, height
    );
    let mut defs = Vec::new();
    for shape in shapes {
        shape.collect_gradient_defs(&mut defs);
    }
    if !defs.is_empty() {
        out.push_str("<defs>");
        for def in &defs {
            out.push_str(def);
        }
        out.push_str("</defs>");
    }
    for shape in shapes {
        out.push_str(&shape.to_markup());
    }
    out.push_str("</svg>");
    out
}
