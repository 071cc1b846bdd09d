//! # Graphics Module
//!
//! All graphics-related functionality for the floating island demo: camera
//! systems, rendering pipelines, scene management, procedural geometry,
//! raycasting, and GPU resource handling.
//!
//! ## Architecture Overview
//!
//! - **Camera System** ([`camera`]) - Orbit camera with smooth controls
//! - **Rendering Pipeline** ([`rendering`]) - Shaded rendering with shadow
//!   mapping and a wireframe pipeline variant
//! - **Scene Management** ([`scene`]) - Objects, meshes, and model loading
//! - **Resource Management** ([`resources`]) - Materials and GPU resources
//! - **Geometry** ([`geometry`]) - Procedural primitives for scene props
//! - **Raycasting** ([`raycast`]) - Surface queries for prop placement

pub mod camera;
pub mod geometry;
pub mod raycast;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::orbit_camera::OrbitCamera;
pub use rendering::render_engine::RenderEngine;
