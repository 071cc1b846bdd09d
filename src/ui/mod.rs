//! # User Interface Module
//!
//! Dear ImGui-based control panel: the [`UiManager`] handles winit/wgpu
//! integration and input capture, [`panel`] builds the island controls.
//!
//! When the UI is focused, input is captured so camera controls stay quiet.

pub mod manager;
pub mod panel;

// Re-export main types
pub use manager::UiManager;
pub use panel::settings_panel;
