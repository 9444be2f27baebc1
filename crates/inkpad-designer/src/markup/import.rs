//! Reads exported scene markup back into shapes.

use std::collections::HashMap;

use inkpad_core::MarkupError;
use roxmltree::{Document, Node};

use inkpad_core::constants::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};

use crate::model::{
    Color, DesignCircle, DesignGroup, DesignLine, DesignPath, DesignRect, DesignTextBox, Fill,
    GradientStop, LinearGradient, Point, PointType, Shape, ShapeKind, ShapeStyle, StrokeStyle,
    LINE_HEIGHT,
};

/// Canvas size and top-level shapes read from a document.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedScene {
    pub width: f64,
    pub height: f64,
    pub shapes: Vec<Shape>,
}

/// Parses a scene document. Elements without a `shape-{id}` id receive
/// fresh ids above the largest id found in the document.
pub fn parse_scene(text: &str) -> Result<ParsedScene, MarkupError> {
    let doc = Document::parse(text).map_err(|e| MarkupError::Malformed {
        message: e.to_string(),
    })?;
    let root = doc.root_element();
    if root.tag_name().name() != "svg" {
        return Err(MarkupError::UnexpectedRoot {
            found: root.tag_name().name().to_string(),
        });
    }

    let mut width = optional_number(root, "width")?.unwrap_or(DEFAULT_CANVAS_WIDTH);
    let mut height = optional_number(root, "height")?.unwrap_or(DEFAULT_CANVAS_HEIGHT);
    if root.attribute("width").is_none() || root.attribute("height").is_none() {
        if let Some(view_box) = root.attribute("viewBox") {
            let parts: Vec<f64> = view_box
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter_map(|s| s.parse().ok())
                .collect();
            if parts.len() == 4 {
                width = parts[2];
                height = parts[3];
            }
        }
    }

    let gradients = collect_gradients(root)?;
    let mut reader = Reader { gradients };
    let mut shapes = reader.children(root)?;

    let mut next = shapes
        .iter()
        .flat_map(Shape::subtree_ids)
        .max()
        .unwrap_or(0)
        + 1;
    for shape in &mut shapes {
        assign_missing_ids(shape, &mut next);
    }
    Ok(ParsedScene {
        width,
        height,
        shapes,
    })
}

fn assign_missing_ids(shape: &mut Shape, next: &mut u64) {
    if shape.id == 0 {
        shape.id = *next;
        *next += 1;
    }
    if let Some(group) = shape.as_group_mut() {
        for child in &mut group.children {
            assign_missing_ids(child, next);
        }
    }
}

struct Reader {
    gradients: HashMap<String, LinearGradient>,
}

impl Reader {
    fn children(&mut self, node: Node) -> Result<Vec<Shape>, MarkupError> {
        let mut shapes = Vec::new();
        for child in node.children().filter(|n| n.is_element()) {
            if let Some(shape) = self.element(child)? {
                shapes.push(shape);
            }
        }
        Ok(shapes)
    }

    fn element(&mut self, node: Node) -> Result<Option<Shape>, MarkupError> {
        let tag = node.tag_name().name();
        let kind = match tag {
            "rect" => ShapeKind::Rect(DesignRect::new(
                optional_number(node, "x")?.unwrap_or(0.0),
                optional_number(node, "y")?.unwrap_or(0.0),
                number(node, "width")?,
                number(node, "height")?,
            )),
            "circle" => ShapeKind::Circle(DesignCircle::new(
                Point::new(
                    optional_number(node, "cx")?.unwrap_or(0.0),
                    optional_number(node, "cy")?.unwrap_or(0.0),
                ),
                number(node, "r")?,
            )),
            "line" => ShapeKind::Line(DesignLine::new(
                Point::new(
                    optional_number(node, "x1")?.unwrap_or(0.0),
                    optional_number(node, "y1")?.unwrap_or(0.0),
                ),
                Point::new(
                    optional_number(node, "x2")?.unwrap_or(0.0),
                    optional_number(node, "y2")?.unwrap_or(0.0),
                ),
            )),
            "path" => ShapeKind::Path(path(node)?),
            "text" => ShapeKind::TextBox(text_box(node)?),
            "g" => {
                let children = self.children(node)?;
                ShapeKind::Group(DesignGroup::new(children))
            }
            "defs" | "title" | "desc" | "metadata" | "style" => return Ok(None),
            other => {
                tracing::warn!("Skipping unsupported element <{}>", other);
                return Ok(None);
            }
        };

        let id = node
            .attribute("id")
            .and_then(|v| v.strip_prefix("shape-"))
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);
        let style = if tag == "g" {
            ShapeStyle {
                rotation: rotation(node)?,
                ..ShapeStyle::default()
            }
        } else {
            self.style(node, tag)?
        };
        Ok(Some(Shape::new(id, kind, style)))
    }

    fn style(&self, node: Node, tag: &str) -> Result<ShapeStyle, MarkupError> {
        let fill_value = style_value(node, "fill");
        let fill = match fill_value.as_deref() {
            // lines have no interior; other elements default to black
            None if tag == "line" => None,
            None => Some(Fill::Solid(Color::BLACK)),
            Some("none") => None,
            Some(value) => Some(self.fill(value)?),
        };
        let stroke = match style_value(node, "stroke").as_deref() {
            None | Some("none") => None,
            Some(value) => {
                let width = match style_value(node, "stroke-width") {
                    Some(w) => parse_number("stroke-width", &w)?,
                    None => 1.0,
                };
                Some(StrokeStyle::new(color("stroke", value)?, width))
            }
        };
        Ok(ShapeStyle {
            fill,
            stroke,
            rotation: rotation(node)?,
        })
    }

    fn fill(&self, value: &str) -> Result<Fill, MarkupError> {
        if let Some(reference) = value
            .strip_prefix("url(#")
            .and_then(|v| v.strip_suffix(')'))
        {
            return self
                .gradients
                .get(reference)
                .cloned()
                .map(Fill::LinearGradient)
                .ok_or_else(|| MarkupError::InvalidAttribute {
                    attribute: "fill".to_string(),
                    value: value.to_string(),
                });
        }
        Ok(Fill::Solid(color("fill", value)?))
    }
}

/// Attribute value, with an inline `style` declaration taking precedence.
fn style_value(node: Node, name: &str) -> Option<String> {
    if let Some(style) = node.attribute("style") {
        for declaration in style.split(';') {
            if let Some((key, value)) = declaration.split_once(':') {
                if key.trim() == name {
                    return Some(value.trim().to_string());
                }
            }
        }
    }
    node.attribute(name).map(|v| v.trim().to_string())
}

fn collect_gradients(root: Node) -> Result<HashMap<String, LinearGradient>, MarkupError> {
    let mut gradients = HashMap::new();
    for node in root
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "linearGradient")
    {
        let Some(id) = node.attribute("id") else {
            continue;
        };
        let angle = match node.attribute("gradientTransform") {
            Some(transform) => parse_rotate(transform)
                .map(|(angle, _)| angle)
                .ok_or_else(|| MarkupError::InvalidAttribute {
                    attribute: "gradientTransform".to_string(),
                    value: transform.to_string(),
                })?,
            None => 0.0,
        };
        let mut stops = Vec::new();
        for stop in node
            .children()
            .filter(|n| n.is_element() && n.tag_name().name() == "stop")
        {
            let offset = match style_value(stop, "offset") {
                Some(v) => match v.strip_suffix('%') {
                    Some(pct) => parse_number("offset", pct)? / 100.0,
                    None => parse_number("offset", &v)?,
                },
                None => 0.0,
            };
            let stop_color = match style_value(stop, "stop-color") {
                Some(v) => color("stop-color", &v)?,
                None => Color::BLACK,
            };
            stops.push(GradientStop::new(offset, stop_color));
        }
        gradients.insert(id.to_string(), LinearGradient::new(angle, stops));
    }
    Ok(gradients)
}

fn path(node: Node) -> Result<DesignPath, MarkupError> {
    let data = node
        .attribute("d")
        .ok_or_else(|| missing(node, "d"))?;
    let mut path = DesignPath::from_data(data)?;
    if let Some(types) = node.attribute("data-point-types") {
        for (point, name) in path.points.iter_mut().zip(types.split(',')) {
            point.point_type = PointType::parse(name).ok_or_else(|| MarkupError::InvalidAttribute {
                attribute: "data-point-types".to_string(),
                value: name.to_string(),
            })?;
        }
    }
    Ok(path)
}

fn text_box(node: Node) -> Result<DesignTextBox, MarkupError> {
    let content: String = node
        .descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();
    let font_size = optional_number(node, "font-size")?.unwrap_or(16.0);
    let x = optional_number(node, "x")?.unwrap_or(0.0);
    let baseline = optional_number(node, "y")?.unwrap_or(font_size);
    let width = match optional_number(node, "data-width")? {
        Some(w) => w,
        None => content.chars().count() as f64 * font_size * 0.5,
    };
    let height = match optional_number(node, "data-height")? {
        Some(h) => h,
        None => font_size * LINE_HEIGHT,
    };
    let mut text = DesignTextBox::new(x, baseline - font_size, width, height, &content);
    text.font_size = font_size;
    if let Some(family) = style_value(node, "font-family") {
        text.font_family = family;
    }
    Ok(text)
}

fn rotation(node: Node) -> Result<f64, MarkupError> {
    let Some(transform) = node.attribute("transform") else {
        return Ok(0.0);
    };
    match parse_rotate(transform) {
        Some((angle, _)) => Ok(angle),
        None => {
            tracing::warn!("Ignoring unsupported transform '{}'", transform);
            Ok(0.0)
        }
    }
}

/// Parses `rotate(a)`, `rotate(a cx cy)` or `rotate(a, cx, cy)`.
fn parse_rotate(text: &str) -> Option<(f64, Option<Point>)> {
    let inner = text.trim().strip_prefix("rotate(")?.strip_suffix(')')?;
    let values: Vec<f64> = inner
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().ok())
        .collect::<Option<_>>()?;
    match values.as_slice() {
        [a] => Some((*a, None)),
        [a, cx, cy] => Some((*a, Some(Point::new(*cx, *cy)))),
        _ => None,
    }
}

fn color(attribute: &str, value: &str) -> Result<Color, MarkupError> {
    let named = match value {
        "black" => Some(Color::BLACK),
        "white" => Some(Color::WHITE),
        "red" => Some(Color::rgb(255, 0, 0)),
        "green" => Some(Color::rgb(0, 128, 0)),
        "blue" => Some(Color::rgb(0, 0, 255)),
        _ => None,
    };
    named
        .or_else(|| Color::from_hex(value))
        .ok_or_else(|| MarkupError::InvalidAttribute {
            attribute: attribute.to_string(),
            value: value.to_string(),
        })
}

fn missing(node: Node, attribute: &str) -> MarkupError {
    MarkupError::MissingAttribute {
        element: node.tag_name().name().to_string(),
        attribute: attribute.to_string(),
    }
}

fn parse_number(attribute: &str, value: &str) -> Result<f64, MarkupError> {
    let trimmed = value.trim();
    let trimmed = trimmed.strip_suffix("px").unwrap_or(trimmed);
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| MarkupError::InvalidAttribute {
            attribute: attribute.to_string(),
            value: value.to_string(),
        })
}

fn optional_number(node: Node, attribute: &str) -> Result<Option<f64>, MarkupError> {
    node.attribute(attribute)
        .map(|v| parse_number(attribute, v))
        .transpose()
}

fn number(node: Node, attribute: &str) -> Result<f64, MarkupError> {
    optional_number(node, attribute)?.ok_or_else(|| missing(node, attribute))
}
