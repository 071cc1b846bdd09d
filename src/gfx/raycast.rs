//! Ray casting against scene objects.
//!
//! Used by the grass placement pass to drop props onto the island surface.
//! Intersection runs on the CPU-side mesh data with the object's world
//! transform applied, with an AABB quick reject per mesh before the
//! triangle loop.

use cgmath::{ElementWise, InnerSpace, Matrix4, Vector3, Vector4, Zero};

use crate::gfx::scene::object::Object;

const EPSILON: f32 = 1e-7;
const DEDUP_EPSILON: f32 = 1e-4;

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Vector3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Ray pointing straight down from (x, height, z).
    pub fn downward(x: f32, height: f32, z: f32) -> Self {
        Self::new(Vector3::new(x, height, z), -Vector3::unit_y())
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box for intersection testing
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    pub min: Vector3<f32>,
    pub max: Vector3<f32>,
}

impl Aabb {
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    pub fn from_vertices(vertices: &[[f32; 3]]) -> Self {
        if vertices.is_empty() {
            return Self::new(Vector3::zero(), Vector3::zero());
        }

        let mut min = Vector3::new(vertices[0][0], vertices[0][1], vertices[0][2]);
        let mut max = min;

        for vertex in vertices.iter().skip(1) {
            let v = Vector3::new(vertex[0], vertex[1], vertex[2]);
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            min.z = min.z.min(v.z);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
            max.z = max.z.max(v.z);
        }

        Self::new(min, max)
    }

    /// Returns the distance to the intersection point, or None on a miss.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inv_dir = Vector3::new(
            1.0 / ray.direction.x,
            1.0 / ray.direction.y,
            1.0 / ray.direction.z,
        );

        let t_min = (self.min - ray.origin).mul_element_wise(inv_dir);
        let t_max = (self.max - ray.origin).mul_element_wise(inv_dir);

        let t1 = Vector3::new(
            t_min.x.min(t_max.x),
            t_min.y.min(t_max.y),
            t_min.z.min(t_max.z),
        );
        let t2 = Vector3::new(
            t_min.x.max(t_max.x),
            t_min.y.max(t_max.y),
            t_min.z.max(t_max.z),
        );

        let t_near = t1.x.max(t1.y.max(t1.z));
        let t_far = t2.x.min(t2.y.min(t2.z));

        if t_near <= t_far && t_far >= 0.0 {
            Some(if t_near >= 0.0 { t_near } else { t_far })
        } else {
            None
        }
    }
}

/// A single ray-triangle intersection, in world space.
#[derive(Debug, Clone, Copy)]
pub struct Hit {
    pub point: Vector3<f32>,
    pub distance: f32,
}

/// Möller-Trumbore ray-triangle intersection.
///
/// Returns the distance along the ray, or None if the ray misses or the
/// triangle is behind the origin. Both winding orders count as hits.
fn intersect_triangle(
    ray: &Ray,
    v0: Vector3<f32>,
    v1: Vector3<f32>,
    v2: Vector3<f32>,
) -> Option<f32> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray.direction.cross(edge2);
    let a = edge1.dot(h);
    if a.abs() < EPSILON {
        return None; // Ray parallel to triangle plane
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    if t > EPSILON {
        Some(t)
    } else {
        None
    }
}

fn transform_point(matrix: &Matrix4<f32>, p: [f32; 3]) -> Vector3<f32> {
    let v = matrix * Vector4::new(p[0], p[1], p[2], 1.0);
    Vector3::new(v.x / v.w, v.y / v.w, v.z / v.w)
}

/// Intersects a ray with every triangle of an object, nearest hit first.
///
/// A ray grazing the shared edge of two triangles reports the same surface
/// point from both, so hits at equal distance are collapsed to one.
pub fn intersect_object(ray: &Ray, object: &Object) -> Vec<Hit> {
    let mut hits = Vec::new();

    for mesh in &object.meshes {
        let world: Vec<[f32; 3]> = mesh
            .positions()
            .into_iter()
            .map(|p| transform_point(&object.transform, p).into())
            .collect();

        if Aabb::from_vertices(&world).intersect_ray(ray).is_none() {
            continue;
        }

        for tri in mesh.indices().chunks_exact(3) {
            let v0 = Vector3::from(world[tri[0] as usize]);
            let v1 = Vector3::from(world[tri[1] as usize]);
            let v2 = Vector3::from(world[tri[2] as usize]);

            if let Some(t) = intersect_triangle(ray, v0, v1, v2) {
                hits.push(Hit {
                    point: ray.point_at(t),
                    distance: t,
                });
            }
        }
    }

    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits.dedup_by(|a, b| (a.distance - b.distance).abs() < DEDUP_EPSILON);
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::object::Mesh;
    use cgmath::Matrix4;

    fn quad_at_height(h: f32) -> Object {
        // Two triangles spanning x, z in [-10, 10] at y = h
        let mesh = Mesh::new(
            vec![
                -10.0, h, -10.0, //
                10.0, h, -10.0, //
                10.0, h, 10.0, //
                -10.0, h, 10.0,
            ],
            vec![0.0, 1.0, 0.0].repeat(4),
            vec![0, 2, 1, 0, 3, 2],
        );
        Object::new("quad", vec![mesh])
    }

    #[test]
    fn downward_ray_hits_flat_quad_at_height() {
        let object = quad_at_height(2.5);
        let hits = intersect_object(&Ray::downward(3.0, 20.0, -4.0), &object);
        assert_eq!(hits.len(), 1);
        assert!((hits[0].point.y - 2.5).abs() < 1e-4);
        assert!((hits[0].distance - 17.5).abs() < 1e-4);
    }

    #[test]
    fn ray_outside_quad_misses() {
        let object = quad_at_height(0.0);
        let hits = intersect_object(&Ray::downward(50.0, 20.0, 0.0), &object);
        assert!(hits.is_empty());
    }

    #[test]
    fn hits_are_sorted_nearest_first() {
        let mut object = quad_at_height(5.0);
        let lower = quad_at_height(-3.0);
        object.meshes.extend(lower.meshes);
        let hits = intersect_object(&Ray::downward(0.0, 20.0, 0.0), &object);
        assert_eq!(hits.len(), 2);
        assert!(hits[0].distance < hits[1].distance);
        assert!((hits[0].point.y - 5.0).abs() < 1e-4);
    }

    #[test]
    fn object_transform_is_applied() {
        let mut object = quad_at_height(0.0);
        object.transform = Matrix4::from_translation(cgmath::Vector3::new(0.0, -5.0, 0.0));
        let hits = intersect_object(&Ray::downward(0.0, 20.0, 0.0), &object);
        assert_eq!(hits.len(), 1);
        assert!((hits[0].point.y + 5.0).abs() < 1e-4);
    }

    #[test]
    fn ray_through_shared_edge_counts_once() {
        // The quad's diagonal runs along x = z, so this ray grazes the edge
        // both triangles share and must not report the point twice
        let object = quad_at_height(1.0);
        let hits = intersect_object(&Ray::downward(4.0, 20.0, 4.0), &object);
        assert_eq!(hits.len(), 1);
        assert!((hits[0].point.y - 1.0).abs() < 1e-4);
    }

    #[test]
    fn triangle_behind_origin_is_ignored() {
        let object = quad_at_height(30.0);
        let hits = intersect_object(&Ray::downward(0.0, 20.0, 0.0), &object);
        assert!(hits.is_empty());
    }
}
