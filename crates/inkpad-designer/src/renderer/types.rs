//! Renderer type definitions: Tool, Modifiers and the drag state machine.

use crate::model::{Bounds, DesignPath, PathSnapshot, Point, ShapeKind};
use crate::path_edit::HandleRef;
use crate::transform_controls::Handle;

/// Active tool of the scene controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Select,
    Rect,
    Circle,
    Line,
    /// Click-to-add path points.
    Pen,
    Text,
}

/// Modifier keys held during a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Additive selection.
    pub shift: bool,
    /// Breaks handle continuity while dragging a path control.
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        alt: false,
    };
    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        alt: false,
    };
    pub const ALT: Modifiers = Modifiers {
        shift: false,
        alt: true,
    };
}

/// Transient state of a pointer gesture between press and release.
///
/// Nothing in here is part of the committed scene: dropping it (after
/// undoing the live geometry changes it describes) leaves scene and
/// history exactly as they were before the press.
#[derive(Debug, Clone, Default)]
pub(crate) enum Interaction {
    #[default]
    Idle,
    Moving {
        ids: Vec<u64>,
        start: Point,
        /// Union of the dragged shapes' bounds at press time.
        origin: Bounds,
        /// Offset already applied to the shapes.
        applied: (f64, f64),
    },
    Resizing {
        id: u64,
        handle: Handle,
        start: Point,
        before: Bounds,
        original: ShapeKind,
    },
    Marquee {
        start: Point,
        current: Point,
        additive: bool,
    },
    Drawing {
        tool: Tool,
        start: Point,
        current: Point,
    },
    PathHandle {
        handle: HandleRef,
        /// Path geometry at press time, restored on cancel.
        before: PathSnapshot,
    },
}

/// Open path-edit session on one shape.
#[derive(Debug, Clone)]
pub(crate) struct PathSession {
    pub shape_id: u64,
    /// Path data when the session began.
    pub before: PathSnapshot,
}

/// Pen tool path under construction; not in the scene until finished.
pub(crate) type PenPath = Option<DesignPath>;
