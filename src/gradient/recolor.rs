//! Reactive recoloring controller
//!
//! Binds the vertex color synthesizer to the scene settings: whenever a bound
//! gradient stop changes, every registered mesh has its color attribute
//! resynthesized and fully replaced. The wireframe toggle runs through a
//! debounce timer instead, so rapid toggling collapses into a single apply.

use std::time::{Duration, Instant};

use crate::gfx::scene::Scene;

use super::blend::{Color, GradientStops};
use super::synthesize::{synthesize, HeightAxis};

/// The fixed height-to-t mapping domain of the island gradient.
pub const HEIGHT_DOMAIN: (f32, f32) = (-5.0, 10.0);

/// Quiet window for the wireframe debounce.
pub const WIREFRAME_DEBOUNCE: Duration = Duration::from_millis(100);

/// Counts from a recolor pass, mostly for logging and tests.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RecolorStats {
    pub meshes_colored: usize,
    pub meshes_skipped: usize,
}

/// Recomputes gradient vertex colors for a registered set of scene objects.
///
/// Owned by the application and passed by reference wherever needed; there is
/// no ambient/global state behind it.
pub struct RecolorController {
    stops: GradientStops,
    axis: HeightAxis,
    domain: (f32, f32),
    registered: Vec<usize>,
}

impl Default for RecolorController {
    fn default() -> Self {
        Self::new(GradientStops::default())
    }
}

impl RecolorController {
    pub fn new(stops: GradientStops) -> Self {
        Self {
            stops,
            axis: HeightAxis::Y,
            domain: HEIGHT_DOMAIN,
            registered: Vec::new(),
        }
    }

    /// Registers a scene object as gradient-colored. Every mesh of the object
    /// participates in subsequent recolor passes.
    pub fn register(&mut self, object_index: usize) {
        if !self.registered.contains(&object_index) {
            self.registered.push(object_index);
        }
    }

    pub fn registered(&self) -> &[usize] {
        &self.registered
    }

    pub fn stops(&self) -> &GradientStops {
        &self.stops
    }

    /// Sets the midpoint stop ("Island Color"). Callers follow up with
    /// [`apply`](Self::apply).
    pub fn set_mid(&mut self, color: Color) {
        self.stops.mid = color;
    }

    pub fn set_bottom(&mut self, color: Color) {
        self.stops.bottom = color;
    }

    /// Resynthesizes and replaces the color buffer of every registered mesh.
    ///
    /// Meshes without position data are skipped, not errors. Applying twice
    /// with unchanged stops produces byte-identical buffers.
    pub fn apply(&self, scene: &mut Scene) -> RecolorStats {
        let mut stats = RecolorStats::default();

        for &index in &self.registered {
            let Some(object) = scene.get_object_mut(index) else {
                continue;
            };

            for mesh in object.meshes.iter_mut() {
                let positions = mesh.positions();
                if positions.is_empty() {
                    log::debug!("skipping mesh without positions in object {index}");
                    stats.meshes_skipped += 1;
                    continue;
                }

                let colors = synthesize(&positions, self.axis, self.domain, &self.stops);
                mesh.set_colors(&colors);
                stats.meshes_colored += 1;
            }
        }

        stats
    }

    /// Applies the wireframe flag to every registered object, skipping those
    /// whose flag already matches. Returns how many objects changed.
    pub fn apply_wireframe(&self, scene: &mut Scene, enabled: bool) -> usize {
        let mut changed = 0;

        for &index in &self.registered {
            if let Some(object) = scene.get_object_mut(index) {
                if object.wireframe != enabled {
                    object.wireframe = enabled;
                    changed += 1;
                }
            }
        }

        changed
    }
}

/// Cancel-and-reschedule debounce timer.
///
/// Each [`arm`](Self::arm) pushes the deadline out by the quiet window; only
/// the most recent schedule survives. [`poll`](Self::poll) fires at most once
/// per armed window. Time is passed in so frame loops and tests share the
/// same code path.
pub struct Debouncer {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns true exactly once per quiet window, when it has elapsed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::{Mesh, Scene};

    fn quad_mesh() -> Mesh {
        // Four vertices spanning the full height domain.
        let positions = vec![
            0.0, -5.0, 0.0, //
            1.0, 0.0, 0.0, //
            0.0, 5.0, 1.0, //
            1.0, 10.0, 1.0,
        ];
        let normals = vec![0.0, 1.0, 0.0].repeat(4);
        Mesh::new(positions, normals, vec![0, 1, 2, 1, 3, 2])
    }

    fn scene_with_island() -> (Scene, usize) {
        let mut scene = Scene::for_tests();
        let index = scene.add_object_from_meshes("island", vec![quad_mesh()]);
        (scene, index)
    }

    #[test]
    fn apply_colors_every_registered_mesh() {
        let (mut scene, index) = scene_with_island();
        let mut controller = RecolorController::new(GradientStops::default());
        controller.register(index);

        let stats = controller.apply(&mut scene);
        assert_eq!(stats.meshes_colored, 1);
        assert_eq!(stats.meshes_skipped, 0);

        let mesh = &scene.get_object(index).unwrap().meshes[0];
        assert_eq!(mesh.colors().len(), 3 * mesh.vertex_count as usize);
    }

    #[test]
    fn apply_is_idempotent() {
        let (mut scene, index) = scene_with_island();
        let mut controller = RecolorController::new(GradientStops::default());
        controller.register(index);

        controller.apply(&mut scene);
        let first = scene.get_object(index).unwrap().meshes[0].colors();
        controller.apply(&mut scene);
        let second = scene.get_object(index).unwrap().meshes[0].colors();
        assert_eq!(first, second);
    }

    #[test]
    fn changing_a_stop_changes_the_buffer() {
        let (mut scene, index) = scene_with_island();
        let mut controller = RecolorController::new(GradientStops::default());
        controller.register(index);

        controller.apply(&mut scene);
        let before = scene.get_object(index).unwrap().meshes[0].colors();

        controller.set_mid([1.0, 0.0, 0.0]);
        controller.apply(&mut scene);
        let after = scene.get_object(index).unwrap().meshes[0].colors();
        assert_ne!(before, after);
    }

    #[test]
    fn empty_mesh_is_skipped_not_an_error() {
        let mut scene = Scene::for_tests();
        let empty = Mesh::new(Vec::new(), Vec::new(), Vec::new());
        let index = scene.add_object_from_meshes("empty", vec![empty]);

        let mut controller = RecolorController::new(GradientStops::default());
        controller.register(index);

        let stats = controller.apply(&mut scene);
        assert_eq!(stats.meshes_colored, 0);
        assert_eq!(stats.meshes_skipped, 1);
    }

    #[test]
    fn register_deduplicates() {
        let mut controller = RecolorController::new(GradientStops::default());
        controller.register(3);
        controller.register(3);
        assert_eq!(controller.registered(), &[3]);
    }

    #[test]
    fn wireframe_apply_skips_matching_flags() {
        let (mut scene, index) = scene_with_island();
        let _ = scene.add_object_from_meshes("other", vec![quad_mesh()]);
        let mut controller = RecolorController::new(GradientStops::default());
        controller.register(index);

        assert_eq!(controller.apply_wireframe(&mut scene, true), 1);
        // Second apply with the same state is a no-op.
        assert_eq!(controller.apply_wireframe(&mut scene, true), 0);
        // Unregistered object untouched.
        assert!(!scene.get_object(index + 1).unwrap().wireframe);
    }

    #[test]
    fn debounce_coalesces_rapid_toggles() {
        let mut debouncer = Debouncer::new(Duration::from_millis(100));
        let t0 = Instant::now();

        // Five toggles, 20 ms apart: only the last schedule survives.
        for i in 0..5 {
            debouncer.arm(t0 + Duration::from_millis(20 * i));
        }

        assert!(!debouncer.poll(t0 + Duration::from_millis(150)));
        assert!(debouncer.poll(t0 + Duration::from_millis(180)));
        // Fired once; the window is spent.
        assert!(!debouncer.poll(t0 + Duration::from_millis(500)));
    }

    #[test]
    fn debounce_idle_never_fires() {
        let mut debouncer = Debouncer::new(WIREFRAME_DEBOUNCE);
        assert!(!debouncer.is_pending());
        assert!(!debouncer.poll(Instant::now()));
    }
}
