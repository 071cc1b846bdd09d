//! Island group transform.
//!
//! The island, its grass, and the car move as one rigid group: a yaw spin
//! around the group origin plus a vertical offset driven by the UI slider.
//! Each member keeps a local transform (its scale and placement on the
//! island) which is composed with the group transform every frame.

use cgmath::{Matrix4, Rad, Vector3};

use crate::gfx::scene::Scene;

/// Spin rate in radians per second.
///
/// Matches one hundredth of a radian per frame at 60 fps, but scaled by the
/// frame delta so the turn speed is independent of refresh rate.
pub const SPIN_RATE: f32 = 0.6;

/// Default vertical offset of the island group.
pub const DEFAULT_HEIGHT: f32 = -5.0;

struct Member {
    object: usize,
    local: Matrix4<f32>,
}

/// A set of scene objects sharing one group transform.
pub struct IslandGroup {
    members: Vec<Member>,
    position_y: f32,
    yaw: f32,
}

impl IslandGroup {
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
            position_y: DEFAULT_HEIGHT,
            yaw: 0.0,
        }
    }

    /// Adds an object with its local transform and immediately applies the
    /// composed transform to the scene object.
    pub fn add_member(&mut self, scene: &mut Scene, object: usize, local: Matrix4<f32>) {
        if let Some(obj) = scene.get_object_mut(object) {
            obj.set_transform(self.group_transform() * local);
        }
        self.members.push(Member { object, local });
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Sets the group's vertical offset. The slider value maps to this
    /// directly, so a slider at 3.0 puts the group origin at y = 3.0.
    pub fn set_height(&mut self, y: f32) {
        self.position_y = y;
    }

    pub fn height(&self) -> f32 {
        self.position_y
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Advances the spin by `dt` seconds.
    pub fn spin(&mut self, dt: f32) {
        self.yaw += SPIN_RATE * dt;
    }

    fn group_transform(&self) -> Matrix4<f32> {
        Matrix4::from_translation(Vector3::new(0.0, self.position_y, 0.0))
            * Matrix4::from_angle_y(Rad(self.yaw))
    }

    /// Writes the composed transform of every member back into the scene.
    pub fn sync(&self, scene: &mut Scene) {
        let group = self.group_transform();
        for member in &self.members {
            if let Some(object) = scene.get_object_mut(member.object) {
                object.set_transform(group * member.local);
            }
        }
    }
}

impl Default for IslandGroup {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::{Mesh, Scene};
    use cgmath::SquareMatrix;

    fn tri_mesh() -> Mesh {
        Mesh::new(
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0].repeat(3),
            vec![0, 1, 2],
        )
    }

    #[test]
    fn height_slider_maps_directly_to_group_origin() {
        let mut scene = Scene::for_tests();
        let index = scene.add_object_from_meshes("island", vec![tri_mesh()]);

        let mut group = IslandGroup::new();
        group.add_member(&mut scene, index, Matrix4::identity());

        group.set_height(3.0);
        group.sync(&mut scene);

        let transform = scene.get_object(index).unwrap().transform;
        assert_eq!(transform.w.y, 3.0);
    }

    #[test]
    fn member_local_transform_is_preserved_under_group() {
        let mut scene = Scene::for_tests();
        let index = scene.add_object_from_meshes("grass", vec![tri_mesh()]);

        let mut group = IslandGroup::new();
        let local = Matrix4::from_translation(cgmath::Vector3::new(0.0, 2.0, 0.0));
        group.add_member(&mut scene, index, local);

        group.set_height(3.0);
        group.sync(&mut scene);

        let transform = scene.get_object(index).unwrap().transform;
        assert!((transform.w.y - 5.0).abs() < 1e-5);
    }

    #[test]
    fn spin_is_scaled_by_frame_delta() {
        let mut group = IslandGroup::new();
        group.spin(0.5);
        group.spin(0.5);
        assert!((group.yaw() - SPIN_RATE).abs() < 1e-6);
    }

    #[test]
    fn default_height_matches_initial_drop() {
        let group = IslandGroup::new();
        assert_eq!(group.height(), DEFAULT_HEIGHT);
    }
}
