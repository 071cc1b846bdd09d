//! Island scene composition.
//!
//! Everything specific to the floating island demo lives here: the load
//! pipeline that brings in the island, grass, and car, the raycast placement
//! of props, the shared group transform, and the birds.

pub mod birds;
pub mod group;
pub mod pipeline;
pub mod placement;

pub use birds::BirdFlock;
pub use group::{IslandGroup, DEFAULT_HEIGHT, SPIN_RATE};
pub use pipeline::{AssetPaths, LoadStage, PipelineReport, ScenePipeline};
pub use placement::{place_on_surface, Placement, DROP_HEIGHT, GRASS_SPOTS};
