//! orderviz core library - transform composition and scene logic
//!
//! This library provides the framework-independent part of the sketch:
//! transform values, projection, the object and mode galleries, the grid
//! and reference-frame markers, and the per-frame orchestration. Drawing
//! and controls go through the `Canvas` and `Ui` seams.

pub mod canvas;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod modes;
pub mod objects;
pub mod params;
pub mod projection;
pub mod quantize;
pub mod scene;
pub mod transform;
pub mod ui;

// Re-export commonly used types
pub use canvas::{Canvas, DrawCommand, DrawList, Rgba, TextSize};
pub use error::{Result, SketchError};
pub use geometry::{Segment, WireFrame};
pub use modes::{ModeGallery, ModeKind};
pub use objects::{ObjectKind, ObjectStage};
pub use projection::{Camera, ProjectionMode, Viewport};
pub use scene::Sketch;
pub use transform::{RotationState, Transform};
pub use ui::Ui;
