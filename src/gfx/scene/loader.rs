//! Model loading.
//!
//! The scene pipeline talks to a [`ModelSource`] rather than the filesystem
//! directly, so composition logic can be driven by synthetic meshes in tests.
//! The real implementation is [`ObjSource`], a thin wrapper over `tobj`.

use crate::error::SceneError;

use super::object::Mesh;

/// Source of mesh data for named model paths.
pub trait ModelSource {
    fn load(&self, path: &str) -> Result<Vec<Mesh>, SceneError>;
}

/// Loads OBJ files from disk.
pub struct ObjSource;

impl ModelSource for ObjSource {
    fn load(&self, path: &str) -> Result<Vec<Mesh>, SceneError> {
        let (models, _materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
        )
        .map_err(|source| SceneError::AssetLoad {
            path: path.to_string(),
            source,
        })?;

        if models.is_empty() {
            return Err(SceneError::EmptyModel {
                path: path.to_string(),
            });
        }

        let mut meshes = Vec::with_capacity(models.len());
        for model in models {
            let tobj::Mesh {
                positions,
                normals,
                indices,
                ..
            } = model.mesh;

            // OBJ files are not required to carry normals
            let normals = if normals.is_empty() {
                Mesh::calculate_face_normals(&positions, &indices)
            } else {
                normals
            };

            meshes.push(Mesh::new(positions, normals, indices));
        }

        log::info!("loaded {} mesh(es) from {}", meshes.len(), path);
        Ok(meshes)
    }
}
