//! # inkpad core
//!
//! Shared building blocks for the inkpad crates:
//! - **error**: `thiserror` error enums for the host-facing boundaries
//! - **constants**: tolerances, floors and capacities used by the editor
//! - **config**: serde-backed editor and snapping settings

pub mod config;
pub mod constants;
pub mod error;

pub use config::{EditorConfig, SnapSettings};
pub use error::{ConfigError, Error, MarkupError, Result};
