//! Scene composition pipeline.
//!
//! Loads and places the island, its grass, and the car in a fixed order, as
//! an explicit state machine: each stage depends on the previous one (grass
//! placement raycasts against the island, the car shares the island's group),
//! so a failure stops the run with the stage marker showing where. Dependent
//! stages are never started after a failure.

use cgmath::{Matrix4, Rad, Vector3};

use crate::error::SceneError;
use crate::gfx::scene::{loader::ModelSource, Scene};
use crate::gradient::RecolorController;

use super::group::IslandGroup;
use super::placement::{place_on_surface, GRASS_SPOTS};

/// Uniform scale applied to the island model.
pub const ISLAND_SCALE: f32 = 2.0;

/// Uniform scale applied to each grass tuft.
pub const GRASS_SCALE: f32 = 8.0;

/// Car placement on the island surface.
pub const CAR_POSITION: [f32; 3] = [8.0, 0.6, -1.0];
pub const CAR_YAW: f32 = std::f32::consts::FRAC_PI_3;
pub const CAR_SCALE: f32 = 0.3;

/// Progress marker for the composition pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStage {
    NotStarted,
    Island,
    Grass,
    Car,
    Done,
}

/// Model paths for the three loaded assets.
#[derive(Debug, Clone)]
pub struct AssetPaths {
    pub island: String,
    pub grass: String,
    pub car: String,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            island: "assets/island.obj".to_string(),
            grass: "assets/grass.obj".to_string(),
            car: "assets/car.obj".to_string(),
        }
    }
}

/// Summary of a completed pipeline run.
#[derive(Debug, Default)]
pub struct PipelineReport {
    pub island_object: usize,
    pub grass_placed: usize,
    pub grass_fallbacks: usize,
    pub meshes_colored: usize,
}

/// Loads the island scene in order: island, grass, car.
pub struct ScenePipeline<S: ModelSource> {
    source: S,
    paths: AssetPaths,
    stage: LoadStage,
}

impl<S: ModelSource> ScenePipeline<S> {
    pub fn new(source: S, paths: AssetPaths) -> Self {
        Self {
            source,
            paths,
            stage: LoadStage::NotStarted,
        }
    }

    /// The stage the pipeline is in. After a failed run this names the stage
    /// that failed; stages after it were never started.
    pub fn stage(&self) -> LoadStage {
        self.stage
    }

    /// Runs all stages, populating the scene, the recolor controller, and the
    /// island group.
    pub fn run(
        &mut self,
        scene: &mut Scene,
        recolor: &mut RecolorController,
        group: &mut IslandGroup,
    ) -> Result<PipelineReport, SceneError> {
        let mut report = PipelineReport::default();

        // Stage 1: island, gradient-colored by height
        self.stage = LoadStage::Island;
        let island_meshes = self.source.load(&self.paths.island)?;
        let island_index = scene.add_object_from_meshes("island", island_meshes);
        report.island_object = island_index;

        let island_local = Matrix4::from_scale(ISLAND_SCALE);
        if let Some(island) = scene.get_object_mut(island_index) {
            island.vertex_colored = true;
            island.cast_shadow = true;
            island.receive_shadow = true;
            island.set_transform(island_local);
        }

        recolor.register(island_index);
        let stats = recolor.apply(scene);
        report.meshes_colored = stats.meshes_colored;

        // Stage 2: grass, rested on the island surface by raycast. The
        // raycast runs before the island joins the group, so hit points are
        // in group-local space and can be stored directly as member locals.
        self.stage = LoadStage::Grass;
        let grass_meshes = self.source.load(&self.paths.grass)?;

        let placements = {
            let island = scene
                .get_object(island_index)
                .ok_or(SceneError::MissingObject {
                    index: island_index,
                })?;
            place_on_surface(island, &GRASS_SPOTS)
        };
        group.add_member(scene, island_index, island_local);

        for placement in &placements {
            let index = scene.add_object_from_meshes("grass", grass_meshes.to_vec());
            if let Some(grass) = scene.get_object_mut(index) {
                grass.set_material("grass");
                grass.cast_shadow = true;
            }
            let local = Matrix4::from_translation(placement.position)
                * Matrix4::from_scale(GRASS_SCALE);
            group.add_member(scene, index, local);

            if placement.grounded {
                report.grass_placed += 1;
            } else {
                report.grass_fallbacks += 1;
            }
        }

        // Stage 3: car
        self.stage = LoadStage::Car;
        let car_meshes = self.source.load(&self.paths.car)?;
        let car_index = scene.add_object_from_meshes("car", car_meshes);
        if let Some(car) = scene.get_object_mut(car_index) {
            car.set_material("car");
            car.cast_shadow = true;
        }

        let car_local = Matrix4::from_translation(Vector3::from(CAR_POSITION))
            * Matrix4::from_angle_y(Rad(CAR_YAW))
            * Matrix4::from_scale(CAR_SCALE);
        group.add_member(scene, car_index, car_local);

        self.stage = LoadStage::Done;
        log::info!(
            "scene composed: {} grass placed, {} fallbacks",
            report.grass_placed,
            report.grass_fallbacks
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::Mesh;
    use crate::gradient::GradientStops;
    use std::cell::RefCell;

    /// Mock source serving synthetic meshes, optionally failing one path.
    struct StubSource {
        fail_on: Option<String>,
        loads: RefCell<Vec<String>>,
    }

    impl StubSource {
        fn new() -> Self {
            Self {
                fail_on: None,
                loads: RefCell::new(Vec::new()),
            }
        }

        fn failing_on(path: &str) -> Self {
            Self {
                fail_on: Some(path.to_string()),
                loads: RefCell::new(Vec::new()),
            }
        }
    }

    impl ModelSource for StubSource {
        fn load(&self, path: &str) -> Result<Vec<Mesh>, SceneError> {
            self.loads.borrow_mut().push(path.to_string());
            if self.fail_on.as_deref() == Some(path) {
                return Err(SceneError::EmptyModel {
                    path: path.to_string(),
                });
            }

            // Flat quad wide enough for every grass spot
            Ok(vec![Mesh::new(
                vec![
                    -20.0, 1.0, -20.0, //
                    20.0, 1.0, -20.0, //
                    20.0, 1.0, 20.0, //
                    -20.0, 1.0, 20.0,
                ],
                vec![0.0, 1.0, 0.0].repeat(4),
                vec![0, 2, 1, 0, 3, 2],
            )])
        }
    }

    fn run_pipeline(source: StubSource) -> (ScenePipeline<StubSource>, Scene, Result<PipelineReport, SceneError>) {
        let mut pipeline = ScenePipeline::new(source, AssetPaths::default());
        let mut scene = Scene::for_tests();
        let mut recolor = RecolorController::new(GradientStops::default());
        let mut group = IslandGroup::new();
        let result = pipeline.run(&mut scene, &mut recolor, &mut group);
        (pipeline, scene, result)
    }

    #[test]
    fn stages_run_in_order() {
        let (pipeline, _, result) = run_pipeline(StubSource::new());
        let report = result.unwrap();

        assert_eq!(pipeline.stage(), LoadStage::Done);
        assert_eq!(
            pipeline.source.loads.borrow().as_slice(),
            &[
                "assets/island.obj".to_string(),
                "assets/grass.obj".to_string(),
                "assets/car.obj".to_string(),
            ]
        );
        assert_eq!(report.grass_placed, GRASS_SPOTS.len());
        assert_eq!(report.grass_fallbacks, 0);
    }

    #[test]
    fn scene_holds_island_grass_and_car() {
        let (_, scene, result) = run_pipeline(StubSource::new());
        assert!(result.is_ok());
        // 1 island + 16 grass + 1 car
        assert_eq!(scene.get_object_count(), 2 + GRASS_SPOTS.len());
        assert!(scene.get_object(0).unwrap().vertex_colored);
    }

    #[test]
    fn island_failure_leaves_dependent_stages_unstarted() {
        let (pipeline, scene, result) = run_pipeline(StubSource::failing_on("assets/island.obj"));

        assert!(result.is_err());
        assert_eq!(pipeline.stage(), LoadStage::Island);
        assert_eq!(pipeline.source.loads.borrow().len(), 1);
        assert_eq!(scene.get_object_count(), 0);
    }

    #[test]
    fn grass_failure_keeps_island_but_never_loads_car() {
        let (pipeline, scene, result) = run_pipeline(StubSource::failing_on("assets/grass.obj"));

        assert!(result.is_err());
        assert_eq!(pipeline.stage(), LoadStage::Grass);
        assert_eq!(pipeline.source.loads.borrow().len(), 2);
        assert_eq!(scene.get_object_count(), 1);
    }

    #[test]
    fn island_is_gradient_colored_during_load() {
        let (_, scene, result) = run_pipeline(StubSource::new());
        assert_eq!(result.unwrap().meshes_colored, 1);

        let island = scene.get_object(0).unwrap();
        let colors = island.meshes[0].colors();
        // Quad sits at y = 1, inside the domain: not the default white
        assert_ne!(colors, vec![1.0; colors.len()]);
    }
}
