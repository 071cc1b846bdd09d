//! # Procedural Gradient Coloring
//!
//! The island's terrain is colored per vertex by mapping each vertex's height
//! through a three-stop gradient. This module holds the pure evaluator, the
//! vertex color synthesizer, and the reactive controller that keeps mesh
//! color buffers in sync with the scene settings.

pub mod blend;
pub mod recolor;
pub mod synthesize;

// Re-export main types
pub use blend::{blend, lerp, Color, GradientStops};
pub use recolor::{Debouncer, RecolorController, RecolorStats, HEIGHT_DOMAIN, WIREFRAME_DEBOUNCE};
pub use synthesize::{map_linear, synthesize, HeightAxis};
