//! Editor-wide constants.

/// Maximum number of commands kept in the undo history.
pub const HISTORY_CAPACITY: usize = 100;

/// Extra distance added to stroke widths when hit-testing lines and paths.
pub const HIT_TOLERANCE: f64 = 5.0;

/// Smallest width/height a box-like shape can be resized to.
pub const MIN_BOX_SIZE: f64 = 10.0;

/// Smallest radius a circle can be resized to.
pub const MIN_CIRCLE_RADIUS: f64 = 5.0;

/// Half the side length of a square transform handle.
pub const HANDLE_HALF_SIZE: f64 = 5.0;

/// Hit radius of a path-edit anchor or control handle.
pub const PATH_HANDLE_RADIUS: f64 = 5.0;

/// A path being edited never drops below this many points.
pub const MIN_PATH_POINTS: usize = 2;

/// Default grid spacing for snapping.
pub const DEFAULT_GRID_SIZE: f64 = 20.0;

/// Default snapping distance.
pub const DEFAULT_SNAP_THRESHOLD: f64 = 8.0;

/// Default canvas dimensions.
pub const DEFAULT_CANVAS_WIDTH: f64 = 800.0;
pub const DEFAULT_CANVAS_HEIGHT: f64 = 600.0;

/// Shapes smaller than this when a drag ends are discarded instead of added.
pub const MIN_DRAWN_SIZE: f64 = 2.0;
