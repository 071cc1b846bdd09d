//! Floating island demo
//!
//! Loads the island, scatters grass on its surface by raycast, parks a car,
//! hangs a moon, and spawns a flock of birds. The control panel recolors the
//! island gradient, moves the island group, and toggles wireframe.

use skerry::gfx::geometry::primitives::generate_sphere;
use skerry::gfx::scene::ObjSource;
use skerry::island::{AssetPaths, BirdFlock, ScenePipeline};

const MOON_POSITION: [f32; 3] = [-10.0, 3.0, 10.0];
const MOON_SCALE: f32 = 1.5;
const BIRD_COUNT: usize = 5;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut app = skerry::default();

    {
        let (scene, recolor, group, birds) = app.world_mut();

        scene.add_material_rgb("grass", 0.2, 0.6, 0.15, 0.0, 0.9);
        scene.add_material_rgb("car", 0.8, 0.2, 0.2, 0.3, 0.4);
        scene.add_material_rgb("bird", 0.95, 0.95, 0.95, 0.0, 0.8);
        scene.add_material_rgb("moon", 0.9, 0.9, 0.8, 0.0, 1.0);

        let mut pipeline = ScenePipeline::new(ObjSource, AssetPaths::default());
        match pipeline.run(scene, recolor, group) {
            Ok(report) => log::info!(
                "island scene ready: {} grass placed ({} fallbacks), {} meshes colored",
                report.grass_placed,
                report.grass_fallbacks,
                report.meshes_colored
            ),
            // A failed load leaves the scene partial; keep rendering what exists
            Err(err) => log::error!(
                "scene composition stopped at {:?}: {}",
                pipeline.stage(),
                err
            ),
        }

        let moon = generate_sphere(24, 16).transformed(MOON_SCALE, MOON_POSITION);
        let moon_index = scene.add_object_from_geometry("moon", &moon);
        if let Some(moon) = scene.get_object_mut(moon_index) {
            moon.set_material("moon");
            moon.cast_shadow = true;
        }

        *birds = BirdFlock::spawn(scene, &mut rand::rng(), BIRD_COUNT);
    }

    app.run()
}
