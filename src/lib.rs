//! Skerry
//!
//! A floating-island scene demo built on wgpu and winit: a height-gradient
//! colored island that spins, scattered grass placed by raycast, a car, a
//! moon, and a flock of procedural birds, all driven by an imgui control
//! panel.

pub mod app;
pub mod error;
pub mod gfx;
pub mod gradient;
pub mod island;
pub mod settings;
pub mod ui;
pub mod wgpu_utils;

pub use app::SkerryApp;
pub use error::SceneError;

/// Creates a default application instance
pub fn default() -> SkerryApp {
    SkerryApp::new()
}
