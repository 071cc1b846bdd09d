use std::ops::Range;

use cgmath::{Matrix4, SquareMatrix, Vector3};
use wgpu::Device;

use super::vertex::Vertex3D;

/// CPU-side mesh with lazily created GPU buffers.
///
/// Positions, normals, and colors are interleaved as [`Vertex3D`]. The color
/// attribute can be replaced after load (gradient recoloring); replacement is
/// always a whole-buffer swap, flushed to the GPU on the next frame.
pub struct Mesh {
    vertices: Vec<Vertex3D>,
    indices: Vec<u32>,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    pub index_count: u32,
    pub vertex_count: u32,
    colors_dirty: bool,
}

// Clones share no GPU state; the copy uploads its own buffers on init.
impl Clone for Mesh {
    fn clone(&self) -> Self {
        Self {
            vertices: self.vertices.clone(),
            indices: self.indices.clone(),
            vertex_buffer: None,
            index_buffer: None,
            index_count: self.index_count,
            vertex_count: self.vertex_count,
            colors_dirty: false,
        }
    }
}

impl Mesh {
    /// Builds a mesh from flat position/normal buffers (xyz-interleaved).
    /// Vertex colors start out white until a recolor pass runs.
    pub fn new(positions: Vec<f32>, normals: Vec<f32>, indices: Vec<u32>) -> Self {
        let index_count = indices.len() as u32;
        let vertex_count = (positions.len() / 3) as u32;

        let mut vertices = Vec::with_capacity(vertex_count as usize);
        for i in 0..vertex_count as usize {
            vertices.push(Vertex3D {
                position: [positions[i * 3], positions[i * 3 + 1], positions[i * 3 + 2]],
                normal: [normals[i * 3], normals[i * 3 + 1], normals[i * 3 + 2]],
                color: [1.0, 1.0, 1.0],
            });
        }

        Self {
            vertices,
            indices,
            vertex_buffer: None,
            index_buffer: None,
            index_count,
            vertex_count,
            colors_dirty: false,
        }
    }

    /// Vertex positions, one `[x, y, z]` per vertex in buffer order.
    pub fn positions(&self) -> Vec<[f32; 3]> {
        self.vertices.iter().map(|v| v.position).collect()
    }

    /// Flat RGB color buffer, three floats per vertex.
    pub fn colors(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.vertices.len() * 3);
        for v in &self.vertices {
            out.extend_from_slice(&v.color);
        }
        out
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Replaces the whole color attribute. `colors` must hold exactly three
    /// floats per vertex.
    pub fn set_colors(&mut self, colors: &[f32]) {
        assert_eq!(
            colors.len(),
            self.vertices.len() * 3,
            "color buffer length must be 3 x vertex count"
        );

        for (i, v) in self.vertices.iter_mut().enumerate() {
            v.color = [colors[i * 3], colors[i * 3 + 1], colors[i * 3 + 2]];
        }
        self.colors_dirty = true;
    }

    pub fn colors_dirty(&self) -> bool {
        self.colors_dirty
    }

    /// Rewrites the full GPU vertex buffer if the colors changed since the
    /// last flush. No-op before `init_gpu_resources`.
    pub fn flush_colors(&mut self, queue: &wgpu::Queue) {
        if !self.colors_dirty {
            return;
        }
        if let Some(buffer) = &self.vertex_buffer {
            queue.write_buffer(buffer, 0, bytemuck::cast_slice(&self.vertices));
        }
        self.colors_dirty = false;
    }

    pub(crate) fn init_gpu_resources(&mut self, device: &Device) {
        let vertex_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Vertex Buffer"),
                contents: bytemuck::cast_slice(&self.vertices),
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            },
        );

        let index_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Index Buffer"),
                contents: bytemuck::cast_slice(&self.indices),
                usage: wgpu::BufferUsages::INDEX,
            },
        );

        self.vertex_buffer = Some(vertex_buffer);
        self.index_buffer = Some(index_buffer);
        self.colors_dirty = false;
    }

    /// Calculates smooth vertex normals by averaging face normals. Used when
    /// a loaded model carries no normals; runs once at load time, never on
    /// recolor (coloring does not alter geometry).
    pub fn calculate_face_normals(positions: &[f32], indices: &[u32]) -> Vec<f32> {
        let vertex_count = positions.len() / 3;
        let mut normals = vec![0.0; positions.len()];
        let mut counts = vec![0u32; vertex_count];

        for triangle in indices.chunks(3) {
            let i0 = triangle[0] as usize;
            let i1 = triangle[1] as usize;
            let i2 = triangle[2] as usize;

            let v0 = Vector3::new(
                positions[i0 * 3],
                positions[i0 * 3 + 1],
                positions[i0 * 3 + 2],
            );
            let v1 = Vector3::new(
                positions[i1 * 3],
                positions[i1 * 3 + 1],
                positions[i1 * 3 + 2],
            );
            let v2 = Vector3::new(
                positions[i2 * 3],
                positions[i2 * 3 + 1],
                positions[i2 * 3 + 2],
            );

            let face_normal = (v1 - v0).cross(v2 - v0);

            for &vertex_idx in &[i0, i1, i2] {
                normals[vertex_idx * 3] += face_normal.x;
                normals[vertex_idx * 3 + 1] += face_normal.y;
                normals[vertex_idx * 3 + 2] += face_normal.z;
                counts[vertex_idx] += 1;
            }
        }

        for i in 0..vertex_count {
            if counts[i] > 0 {
                let n = Vector3::new(normals[i * 3], normals[i * 3 + 1], normals[i * 3 + 2])
                    / counts[i] as f32;
                let length = (n.x * n.x + n.y * n.y + n.z * n.z).sqrt();
                if length > 0.0 {
                    normals[i * 3] = n.x / length;
                    normals[i * 3 + 1] = n.y / length;
                    normals[i * 3 + 2] = n.z / length;
                }
            }
        }

        normals
    }
}

/// Per-object uniform data: model matrix plus shading flags.
///
/// Must match the ObjectUniform struct in scene.wgsl exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    /// x: receive_shadow (0/1), y: use_vertex_color (0/1), z/w unused
    pub flags: [f32; 4],
}

/// GPU resources for one object: uniform buffer plus bind group.
pub struct ObjectGpuResources {
    pub transform_buffer: wgpu::Buffer,
    pub transform_bind_group: wgpu::BindGroup,
}

/// A scene object: one or more meshes sharing a transform and render flags.
pub struct Object {
    pub name: String,
    pub meshes: Vec<Mesh>,
    pub transform: Matrix4<f32>,
    pub material_id: Option<String>,
    pub visible: bool,
    pub wireframe: bool,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
    /// Meshes render with their per-vertex color attribute instead of the
    /// material base color.
    pub vertex_colored: bool,
    pub gpu_resources: Option<ObjectGpuResources>,
}

impl Object {
    pub fn new(name: &str, meshes: Vec<Mesh>) -> Self {
        Self {
            name: name.to_string(),
            meshes,
            transform: Matrix4::identity(),
            material_id: None,
            visible: true,
            wireframe: false,
            cast_shadow: false,
            receive_shadow: false,
            vertex_colored: false,
            gpu_resources: None,
        }
    }

    pub fn set_material(&mut self, material_id: &str) {
        self.material_id = Some(material_id.to_string());
    }

    pub fn set_transform(&mut self, transform: Matrix4<f32>) {
        self.transform = transform;
    }

    fn uniform(&self) -> ObjectUniform {
        ObjectUniform {
            // cgmath matrices are column-major, which is what the GPU expects
            model: self.transform.into(),
            flags: [
                if self.receive_shadow { 1.0 } else { 0.0 },
                if self.vertex_colored { 1.0 } else { 0.0 },
                0.0,
                0.0,
            ],
        }
    }

    /// Syncs the transform and flag uniform to the GPU if resources exist.
    pub fn update_transform(&mut self, queue: &wgpu::Queue) {
        if let Some(gpu_resources) = &self.gpu_resources {
            let uniform = self.uniform();
            queue.write_buffer(
                &gpu_resources.transform_buffer,
                0,
                bytemuck::bytes_of(&uniform),
            );
        }
    }

    pub fn get_transform_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu_resources
            .as_ref()
            .map(|res| &res.transform_bind_group)
    }

    pub fn init_gpu_resources(&mut self, device: &Device) {
        for mesh in self.meshes.iter_mut() {
            mesh.init_gpu_resources(device);
        }

        let uniform = self.uniform();
        let transform_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Object Uniform Buffer"),
                contents: bytemuck::bytes_of(&uniform),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            },
        );

        let transform_bind_group_layout = Self::bind_group_layout(device);

        let transform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Object Bind Group"),
            layout: &transform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: transform_buffer.as_entire_binding(),
            }],
        });

        self.gpu_resources = Some(ObjectGpuResources {
            transform_buffer,
            transform_bind_group,
        });
    }

    /// Layout shared by all per-object bind groups (slot 1 in pipelines).
    pub fn bind_group_layout(device: &Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Object Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        })
    }
}

pub trait DrawObject<'a> {
    fn draw_mesh(&mut self, mesh: &'a Mesh);
    fn draw_mesh_instanced(&mut self, mesh: &'a Mesh, instances: Range<u32>);
    fn draw_object(&mut self, object: &'a Object);
    fn draw_object_instanced(&mut self, object: &'a Object, instances: Range<u32>);
}

impl<'a, 'b> DrawObject<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh(&mut self, mesh: &'b Mesh) {
        self.draw_mesh_instanced(mesh, 0..1);
    }

    fn draw_mesh_instanced(&mut self, mesh: &'b Mesh, instances: Range<u32>) {
        let vertex_buffer = match &mesh.vertex_buffer {
            Some(buffer) => buffer,
            None => return, // Skip drawing if not uploaded
        };
        let index_buffer = match &mesh.index_buffer {
            Some(buffer) => buffer,
            None => return,
        };

        self.set_vertex_buffer(0, vertex_buffer.slice(..));
        self.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.index_count, 0, instances);
    }

    fn draw_object(&mut self, object: &'b Object) {
        self.draw_object_instanced(object, 0..1);
    }

    fn draw_object_instanced(&mut self, object: &'b Object, instances: Range<u32>) {
        for mesh in &object.meshes {
            self.draw_mesh_instanced(mesh, instances.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_colors_replaces_whole_buffer() {
        let mut mesh = Mesh::new(
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0].repeat(3),
            vec![0, 1, 2],
        );

        let colors = vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9];
        mesh.set_colors(&colors);

        assert_eq!(mesh.colors(), colors);
        assert!(mesh.colors_dirty());
    }

    #[test]
    #[should_panic(expected = "color buffer length")]
    fn set_colors_rejects_wrong_length() {
        let mut mesh = Mesh::new(
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0],
            vec![0.0, 0.0, 1.0].repeat(2),
            vec![],
        );
        mesh.set_colors(&[1.0, 0.0]);
    }

    #[test]
    fn face_normals_for_upward_triangle() {
        let positions = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, -1.0];
        let normals = Mesh::calculate_face_normals(&positions, &[0, 1, 2]);

        for i in 0..3 {
            assert!((normals[i * 3 + 1] - 1.0).abs() < 1e-5);
        }
    }
}
