//! Scene graph: objects, meshes, vertices, and model loading.

pub mod loader;
pub mod object;
pub mod scene;
pub mod vertex;

pub use loader::{ModelSource, ObjSource};
pub use object::{DrawObject, Mesh, Object, ObjectUniform};
pub use scene::{Scene, SceneStatistics};
pub use vertex::Vertex3D;
