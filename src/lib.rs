//! # inkpad
//!
//! An interactive 2D vector-drawing engine: shapes, bezier path editing,
//! undo/redo, snapping, alignment and SVG round-tripping.
//!
//! ## Architecture
//!
//! inkpad is organized as a workspace:
//!
//! 1. **inkpad-core** - Error types, constants and editor configuration
//! 2. **inkpad-designer** - Shape model, commands, managers and the scene controller
//! 3. **inkpad** - This crate: re-exports, logging setup and the demo binary

pub use inkpad_core as core;
pub use inkpad_designer as designer;

pub use inkpad_core::{ConfigError, EditorConfig, Error, MarkupError, Result, SnapSettings};

pub use inkpad_designer::{
    Alignment, Bounds, Color, CommandHistory, DesignPath, Distribution, DrawingSurface, Fill,
    Modifiers, PathPoint, PixmapSurface, Point, PointType, RecordingSurface, Renderer, Scene,
    SceneCommand, Shape, ShapeKind, ShapeProperty, ShapeStyle, SizeMatch, StrokeStyle, Tool,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging on stderr (stdout carries exported markup)
/// with `RUST_LOG` support and INFO as the default level.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
