//! Error types for scene loading and composition.

use thiserror::Error;

/// Errors surfaced while building the scene.
#[derive(Debug, Error)]
pub enum SceneError {
    /// An OBJ asset could not be read or parsed.
    #[error("failed to load model '{path}': {source}")]
    AssetLoad {
        path: String,
        #[source]
        source: tobj::LoadError,
    },

    /// An asset parsed but contained no usable mesh data.
    #[error("model '{path}' contains no meshes")]
    EmptyModel { path: String },

    /// A scene object handle no longer resolves to an object.
    #[error("no object at index {index}")]
    MissingObject { index: usize },
}
