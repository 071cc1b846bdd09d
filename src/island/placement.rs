//! Raycast placement of props onto the island surface.
//!
//! Each prop spot is an (x, z) pair. A ray is cast straight down from above
//! the island; the first hit gives the prop's resting height. Spots whose ray
//! misses the island entirely fall back to ground level with a warning, so a
//! malformed island never aborts the scene build.

use cgmath::Vector3;

use crate::gfx::raycast::{intersect_object, Ray};
use crate::gfx::scene::object::Object;

/// Height the placement rays start from, safely above the island's top.
pub const DROP_HEIGHT: f32 = 20.0;

/// Resting height used when a ray misses the island.
pub const FALLBACK_HEIGHT: f32 = 0.0;

/// (x, z) spots where grass tufts grow, in island group space.
pub const GRASS_SPOTS: [[f32; 2]; 16] = [
    [10.0, -3.0],
    [9.0, -3.0],
    [7.0, -4.0],
    [6.0, -3.0],
    [8.0, -3.0],
    [6.0, -4.0],
    [10.0, -2.0],
    [6.0, -11.0],
    [9.0, -10.0],
    [5.0, -11.0],
    [8.0, -11.0],
    [5.0, -11.0],
    [7.0, -11.0],
    [-2.0, -9.0],
    [-3.0, -9.0],
    [-4.0, -8.0],
];

/// Where a prop ended up, and whether it actually rests on the surface.
#[derive(Debug, Clone, Copy)]
pub struct Placement {
    pub position: Vector3<f32>,
    pub grounded: bool,
}

/// Resolves each spot to a surface position on the island.
///
/// Returns one placement per spot, in spot order.
pub fn place_on_surface(island: &Object, spots: &[[f32; 2]]) -> Vec<Placement> {
    spots
        .iter()
        .map(|&[x, z]| {
            let ray = Ray::downward(x, DROP_HEIGHT, z);
            let hits = intersect_object(&ray, island);

            match hits.first() {
                Some(hit) => Placement {
                    position: hit.point,
                    grounded: true,
                },
                None => {
                    log::warn!(
                        "placement ray at ({x}, {z}) missed the island, dropping to ground level"
                    );
                    Placement {
                        position: Vector3::new(x, FALLBACK_HEIGHT, z),
                        grounded: false,
                    }
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::object::Mesh;

    fn flat_island(height: f32) -> Object {
        let mesh = Mesh::new(
            vec![
                -20.0, height, -20.0, //
                20.0, height, -20.0, //
                20.0, height, 20.0, //
                -20.0, height, 20.0,
            ],
            vec![0.0, 1.0, 0.0].repeat(4),
            vec![0, 2, 1, 0, 3, 2],
        );
        Object::new("island", vec![mesh])
    }

    #[test]
    fn spots_rest_on_a_flat_surface() {
        let island = flat_island(4.0);
        let placements = place_on_surface(&island, &GRASS_SPOTS);

        assert_eq!(placements.len(), GRASS_SPOTS.len());
        for (placement, spot) in placements.iter().zip(GRASS_SPOTS.iter()) {
            assert!(placement.grounded);
            assert!((placement.position.y - 4.0).abs() < 1e-4);
            assert!((placement.position.x - spot[0]).abs() < 1e-4);
            assert!((placement.position.z - spot[1]).abs() < 1e-4);
        }
    }

    #[test]
    fn missing_geometry_falls_back_to_ground_level() {
        let island = Object::new("island", vec![]);
        let placements = place_on_surface(&island, &GRASS_SPOTS);

        for placement in &placements {
            assert!(!placement.grounded);
            assert_eq!(placement.position.y, FALLBACK_HEIGHT);
        }
    }

    #[test]
    fn surface_above_drop_height_is_unreachable() {
        let island = flat_island(DROP_HEIGHT + 5.0);
        let placements = place_on_surface(&island, &[[10.0, -3.0]]);
        assert!(!placements[0].grounded);
    }
}
