use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use cgmath::Vector3;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes},
};

use crate::gfx::{
    camera::{
        camera_controller::CameraController, camera_utils::CameraManager, orbit_camera::OrbitCamera,
    },
    rendering::render_engine::RenderEngine,
    scene::Scene,
};
use crate::gradient::{Debouncer, RecolorController, WIREFRAME_DEBOUNCE};
use crate::island::{BirdFlock, IslandGroup};
use crate::settings::{SceneSettings, SettingsChanges};
use crate::ui::{settings_panel, UiManager};

pub struct SkerryApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    scene: Scene,
    settings: SceneSettings,
    recolor: RecolorController,
    wireframe_debounce: Debouncer,
    group: IslandGroup,
    birds: BirdFlock,
    last_frame: Instant,
}

impl SkerryApp {
    /// Create a new application with an empty scene and default settings
    pub fn new() -> Self {
        let event_loop = EventLoop::new().expect("Failed to create event loop");

        let mut camera = OrbitCamera::new(40.0, 0.3, 0.0, Vector3::new(0.0, 0.0, 0.0), 1.0);
        camera.bounds.min_distance = Some(5.0);
        let controller = CameraController::new(0.005, 0.1);

        let camera_manager = CameraManager::new(camera, controller);
        let scene = Scene::new(camera_manager);

        Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                window: None,
                render_engine: None,
                ui_manager: None,
                scene,
                settings: SceneSettings::default(),
                recolor: RecolorController::default(),
                wireframe_debounce: Debouncer::new(WIREFRAME_DEBOUNCE),
                group: IslandGroup::new(),
                birds: BirdFlock::empty(),
                last_frame: Instant::now(),
            },
        }
    }

    /// Mutable access to the scene and its controllers, for setup before `run`
    pub fn world_mut(
        &mut self,
    ) -> (
        &mut Scene,
        &mut RecolorController,
        &mut IslandGroup,
        &mut BirdFlock,
    ) {
        let state = &mut self.app_state;
        (
            &mut state.scene,
            &mut state.recolor,
            &mut state.group,
            &mut state.birds,
        )
    }

    /// Run the application (consumes self and starts the event loop)
    pub fn run(mut self) -> anyhow::Result<()> {
        let event_loop = self
            .event_loop
            .take()
            .context("event loop already consumed")?;
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop.run_app(&mut self.app_state)?;
        Ok(())
    }
}

impl Default for SkerryApp {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    fn redraw(&mut self) {
        let Some(render_engine) = self.render_engine.as_mut() else {
            return;
        };
        let Some(window) = self.window.as_ref() else {
            return;
        };
        let Some(ui_manager) = self.ui_manager.as_mut() else {
            return;
        };

        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;

        let settings = &mut self.settings;
        let mut changes = SettingsChanges::default();
        ui_manager.update_logic(window, |ui| {
            changes = settings_panel(ui, settings);
        });

        if changes.colors_changed {
            self.recolor.set_mid(settings.island_color);
            self.recolor.set_bottom(settings.bottom_color);
            self.recolor.apply(&mut self.scene);
        }
        if changes.height_changed {
            self.group.set_height(settings.island_height);
        }
        if changes.wireframe_toggled {
            self.wireframe_debounce.arm(now);
        }
        if self.wireframe_debounce.poll(now) {
            self.recolor
                .apply_wireframe(&mut self.scene, settings.wireframe);
        }

        if settings.spin {
            self.group.spin(dt);
        }
        self.group.sync(&mut self.scene);
        self.birds.update(&mut self.scene, dt);

        self.scene.update();
        render_engine.update(self.scene.camera_manager.camera.uniform);
        self.scene.update_all_transforms(render_engine.queue());
        self.scene.flush_dirty_colors(render_engine.queue());

        render_engine.render_frame_with_ui(
            &self.scene,
            |device, queue, encoder, color_attachment| {
                ui_manager.render_display_only(device, queue, encoder, color_attachment);
            },
        );
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Ok(window) = event_loop.create_window(
            WindowAttributes::default()
                .with_title("skerry")
                .with_inner_size(winit::dpi::LogicalSize::new(1200, 800)),
        ) {
            let window_handle = Arc::new(window);
            self.window = Some(window_handle.clone());

            let (width, height) = window_handle.inner_size().into();

            let window_clone = window_handle.clone();
            let renderer = pollster::block_on(async move {
                RenderEngine::new(window_clone, width, height).await
            });

            self.scene
                .camera_manager
                .camera
                .resize_projection(width, height);
            self.scene
                .init_gpu_resources(renderer.device(), renderer.queue());

            let mut ui_manager = UiManager::new(
                renderer.device(),
                renderer.queue(),
                renderer.surface_format(),
                &window_handle,
            );
            ui_manager.update_display_size(width, height);

            self.ui_manager = Some(ui_manager);
            self.render_engine = Some(renderer);
            self.last_frame = Instant::now();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        // UI gets first crack at every window event
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            let ui_event: winit::event::Event<()> = winit::event::Event::WindowEvent {
                window_id,
                event: event.clone(),
            };
            if ui_manager.handle_input(window, &ui_event) {
                window.request_redraw();
                return;
            }
        }

        match event {
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => {
                if matches!(
                    key_event.physical_key,
                    winit::keyboard::PhysicalKey::Code(winit::keyboard::KeyCode::Escape)
                ) {
                    event_loop.exit();
                    return;
                }

                let ui_wants_keyboard = self
                    .ui_manager
                    .as_ref()
                    .is_some_and(|ui| ui.context.io().want_capture_keyboard);
                if !ui_wants_keyboard {
                    self.scene.camera_manager.process_keyboard_event(&key_event);
                }
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.scene
                    .camera_manager
                    .camera
                    .resize_projection(width, height);
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
                if let Some(ui_manager) = self.ui_manager.as_mut() {
                    ui_manager.update_display_size(width, height);
                }
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: winit::event::DeviceEvent,
    ) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        if let Some(ui_manager) = self.ui_manager.as_ref() {
            let io = ui_manager.context.io();
            if io.want_capture_mouse || io.want_capture_keyboard {
                return;
            }
        }

        self.scene.camera_manager.process_event(&event, window);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
