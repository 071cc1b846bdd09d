use wgpu::Device;

use crate::gfx::{
    camera::camera_utils::CameraManager,
    geometry::GeometryData,
    resources::material::{Material, MaterialManager},
};

use super::object::{Mesh, Object};

/// Main scene containing objects, materials, and camera
pub struct Scene {
    pub camera_manager: CameraManager,
    pub objects: Vec<Object>,
    pub material_manager: MaterialManager,
}

impl Scene {
    /// Creates a new scene with the given camera manager
    pub fn new(camera_manager: CameraManager) -> Self {
        Self {
            camera_manager,
            objects: Vec::new(),
            material_manager: MaterialManager::new(),
        }
    }

    /// Scene with a default camera, for tests that never touch the GPU.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        use crate::gfx::camera::{camera_controller::CameraController, orbit_camera::OrbitCamera};

        let camera = OrbitCamera::new(40.0, 0.3, 0.0, cgmath::Vector3::new(0.0, 0.0, 0.0), 1.0);
        let controller = CameraController::new(0.005, 0.1);
        Self::new(CameraManager::new(camera, controller))
    }

    /// Updates the scene (camera matrices, etc.)
    pub fn update(&mut self) {
        self.camera_manager.camera.update_view_proj();
    }

    /// Adds an object built from already-loaded meshes.
    ///
    /// Returns the object's index, which is the handle used by the recolor
    /// controller and the island group.
    pub fn add_object_from_meshes(&mut self, name: &str, meshes: Vec<Mesh>) -> usize {
        let unique = self.ensure_unique_name(name);
        self.objects.push(Object::new(&unique, meshes));
        self.objects.len() - 1
    }

    /// Adds an object from procedurally generated geometry.
    pub fn add_object_from_geometry(&mut self, name: &str, geometry: &GeometryData) -> usize {
        let (positions, normals, indices) = geometry.to_buffers();
        let mesh = Mesh::new(positions, normals, indices);
        self.add_object_from_meshes(name, vec![mesh])
    }

    /// Creates a new material and adds it to the material manager
    pub fn add_material(
        &mut self,
        name: &str,
        base_color: [f32; 4],
        metallic: f32,
        roughness: f32,
    ) -> &mut Material {
        let material = Material::new(name, base_color, metallic, roughness);
        self.material_manager.add_material(material);
        self.material_manager.get_material_mut(name).unwrap()
    }

    /// Convenience method for creating materials with RGB colors
    pub fn add_material_rgb(
        &mut self,
        name: &str,
        r: f32,
        g: f32,
        b: f32,
        metallic: f32,
        roughness: f32,
    ) -> &mut Material {
        self.add_material(name, [r, g, b, 1.0], metallic, roughness)
    }

    /// Initializes GPU resources for all objects and materials
    ///
    /// Must be called after the GPU context is available and before rendering.
    pub fn init_gpu_resources(&mut self, device: &Device, queue: &wgpu::Queue) {
        for object in self.objects.iter_mut() {
            object.init_gpu_resources(device);
        }
        self.material_manager.update_all_gpu_resources(device, queue);
    }

    /// Initializes GPU resources for objects added after startup.
    pub fn init_pending_gpu_resources(&mut self, device: &Device) {
        for object in self.objects.iter_mut() {
            if object.gpu_resources.is_none() {
                object.init_gpu_resources(device);
            }
        }
    }

    /// Updates all object transforms and syncs to GPU
    pub fn update_all_transforms(&mut self, queue: &wgpu::Queue) {
        for object in &mut self.objects {
            if object.gpu_resources.is_some() {
                object.update_transform(queue);
            }
        }
    }

    /// Rewrites the vertex buffers of meshes whose colors changed since the
    /// last frame. Whole-buffer swaps, never partial patches.
    pub fn flush_dirty_colors(&mut self, queue: &wgpu::Queue) {
        for object in &mut self.objects {
            for mesh in object.meshes.iter_mut() {
                mesh.flush_colors(queue);
            }
        }
    }

    /// Gets material for rendering an object, falling back to the default.
    pub fn get_material_for_object(&self, object: &Object) -> &Material {
        self.material_manager
            .get_material_for_object(object.material_id.as_ref())
    }

    pub fn get_object(&self, index: usize) -> Option<&Object> {
        self.objects.get(index)
    }

    pub fn get_object_mut(&mut self, index: usize) -> Option<&mut Object> {
        self.objects.get_mut(index)
    }

    pub fn get_object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn ensure_unique_name(&self, desired_name: &str) -> String {
        let mut counter = 0;
        let mut test_name = desired_name.to_string();

        while self.objects.iter().any(|obj| obj.name == test_name) {
            counter += 1;
            test_name = format!("{} ({})", desired_name, counter);
        }

        test_name
    }

    /// Gets statistics about the scene
    pub fn get_statistics(&self) -> SceneStatistics {
        let total_triangles: u32 = self
            .objects
            .iter()
            .map(|obj| obj.meshes.iter().map(|m| m.index_count / 3).sum::<u32>())
            .sum();

        let total_vertices: u32 = self
            .objects
            .iter()
            .map(|obj| obj.meshes.iter().map(|m| m.vertex_count).sum::<u32>())
            .sum();

        SceneStatistics {
            object_count: self.objects.len(),
            material_count: self.material_manager.list_materials().len(),
            total_triangles,
            total_vertices,
        }
    }
}

/// Scene statistics for debugging and UI display
#[derive(Debug)]
pub struct SceneStatistics {
    pub object_count: usize,
    pub material_count: usize,
    pub total_triangles: u32,
    pub total_vertices: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri_mesh() -> Mesh {
        Mesh::new(
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0].repeat(3),
            vec![0, 1, 2],
        )
    }

    #[test]
    fn object_indices_are_stable_handles() {
        let mut scene = Scene::for_tests();
        let a = scene.add_object_from_meshes("island", vec![tri_mesh()]);
        let b = scene.add_object_from_meshes("grass", vec![tri_mesh()]);
        assert_eq!((a, b), (0, 1));
        assert_eq!(scene.get_object(a).unwrap().name, "island");
        assert_eq!(scene.get_object(b).unwrap().name, "grass");
    }

    #[test]
    fn duplicate_names_are_made_unique() {
        let mut scene = Scene::for_tests();
        scene.add_object_from_meshes("grass", vec![tri_mesh()]);
        let second = scene.add_object_from_meshes("grass", vec![tri_mesh()]);
        assert_eq!(scene.get_object(second).unwrap().name, "grass (1)");
    }

    #[test]
    fn statistics_count_all_meshes() {
        let mut scene = Scene::for_tests();
        scene.add_object_from_meshes("a", vec![tri_mesh(), tri_mesh()]);
        let stats = scene.get_statistics();
        assert_eq!(stats.object_count, 1);
        assert_eq!(stats.total_triangles, 2);
        assert_eq!(stats.total_vertices, 6);
    }
}
