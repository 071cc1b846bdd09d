//! Procedural birds drifting across the sky.
//!
//! Each bird is a small merged geometry (box body, two flat plate wings)
//! added as its own scene object. Birds fly along +x at a per-bird speed,
//! bobbing on a per-bird sine phase, and wrap around once they leave the
//! scene bounds.

use cgmath::{Matrix4, Vector3};
use rand::Rng;

use crate::gfx::geometry::{generate_cube, GeometryData};
use crate::gfx::scene::Scene;

/// Birds wrap back to -WRAP_X after passing +WRAP_X.
pub const WRAP_X: f32 = 15.0;

struct Bird {
    object: usize,
    home: Vector3<f32>,
    x: f32,
    speed: f32,
    amplitude: f32,
    phase: f32,
}

/// A flock of drifting birds.
///
/// Motion is driven by accumulated scene time, so pausing frame delivery
/// pauses the flock instead of making it jump.
pub struct BirdFlock {
    birds: Vec<Bird>,
    elapsed: f32,
}

fn bird_geometry() -> GeometryData {
    // Body stretched along the flight direction, wings as thin plates
    // sticking out to either side
    let mut body = generate_cube().stretched([0.8, 0.3, 0.3], [0.0, 0.0, 0.0]);
    let left_wing = generate_cube().stretched([0.35, 0.02, 0.6], [0.0, 0.1, -0.45]);
    let right_wing = generate_cube().stretched([0.35, 0.02, 0.6], [0.0, 0.1, 0.45]);
    body.merge(&left_wing);
    body.merge(&right_wing);
    body
}

impl BirdFlock {
    /// A flock with no birds, to be replaced by [`BirdFlock::spawn`]
    pub fn empty() -> Self {
        Self {
            birds: Vec::new(),
            elapsed: 0.0,
        }
    }

    /// Spawns `count` birds at random sky positions.
    pub fn spawn(scene: &mut Scene, rng: &mut impl Rng, count: usize) -> Self {
        let geometry = bird_geometry();
        let mut birds = Vec::with_capacity(count);

        for _ in 0..count {
            let home = Vector3::new(
                0.0,
                rng.random_range(5.0..9.0),
                rng.random_range(-10.0..10.0),
            );
            let x = rng.random_range(-WRAP_X..WRAP_X);
            let speed = rng.random_range(2.0..5.0);
            let amplitude = rng.random_range(0.3..1.0);
            let phase = rng.random_range(0.0..std::f32::consts::TAU);

            let object = scene.add_object_from_geometry("bird", &geometry);
            if let Some(bird) = scene.get_object_mut(object) {
                bird.set_material("bird");
                bird.set_transform(Matrix4::from_translation(Vector3::new(
                    x, home.y, home.z,
                )));
            }

            birds.push(Bird {
                object,
                home,
                x,
                speed,
                amplitude,
                phase,
            });
        }

        Self {
            birds,
            elapsed: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.birds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.birds.is_empty()
    }

    /// Advances every bird by `dt` seconds and syncs transforms.
    pub fn update(&mut self, scene: &mut Scene, dt: f32) {
        self.elapsed += dt;

        for bird in &mut self.birds {
            bird.x += bird.speed * dt;
            if bird.x > WRAP_X {
                bird.x = -WRAP_X;
            }

            let t = self.elapsed + bird.phase;
            let position = Vector3::new(
                bird.x,
                bird.home.y + bird.amplitude * t.sin(),
                bird.home.z + bird.amplitude * (t * 0.7).cos(),
            );

            if let Some(object) = scene.get_object_mut(bird.object) {
                object.set_transform(Matrix4::from_translation(position));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn bird_geometry_is_box_body_with_plate_wings() {
        let geometry = bird_geometry();
        assert_eq!(geometry.vertex_count(), 72);
        assert_eq!(geometry.triangle_count(), 36);

        // Wings reach past the body on z and stay thin plates
        let max_z = geometry
            .vertices
            .iter()
            .map(|v| v[2])
            .fold(f32::NEG_INFINITY, f32::max);
        assert!(max_z > 0.5);
    }

    #[test]
    fn spawn_adds_one_object_per_bird() {
        let mut scene = Scene::for_tests();
        let mut rng = StdRng::seed_from_u64(7);

        let flock = BirdFlock::spawn(&mut scene, &mut rng, 5);
        assert_eq!(flock.len(), 5);
        assert_eq!(scene.get_object_count(), 5);
    }

    #[test]
    fn birds_advance_with_frame_delta() {
        let mut scene = Scene::for_tests();
        let mut rng = StdRng::seed_from_u64(7);
        let mut flock = BirdFlock::spawn(&mut scene, &mut rng, 1);

        let before = flock.birds[0].x;
        let speed = flock.birds[0].speed;
        flock.update(&mut scene, 0.5);

        let expected = if before + speed * 0.5 > WRAP_X {
            -WRAP_X
        } else {
            before + speed * 0.5
        };
        assert!((flock.birds[0].x - expected).abs() < 1e-5);
    }

    #[test]
    fn birds_wrap_at_scene_bounds() {
        let mut scene = Scene::for_tests();
        let mut rng = StdRng::seed_from_u64(7);
        let mut flock = BirdFlock::spawn(&mut scene, &mut rng, 1);

        flock.birds[0].x = WRAP_X - 0.01;
        flock.birds[0].speed = 4.0;
        flock.update(&mut scene, 1.0);

        assert_eq!(flock.birds[0].x, -WRAP_X);
    }

    #[test]
    fn bobbing_stays_within_amplitude_of_home() {
        let mut scene = Scene::for_tests();
        let mut rng = StdRng::seed_from_u64(7);
        let mut flock = BirdFlock::spawn(&mut scene, &mut rng, 1);
        let home_y = flock.birds[0].home.y;
        let amplitude = flock.birds[0].amplitude;

        for _ in 0..100 {
            flock.update(&mut scene, 0.05);
            let y = scene.get_object(0).unwrap().transform.w.y;
            assert!((y - home_y).abs() <= amplitude + 1e-5);
        }
    }
}
