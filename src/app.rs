use cgmath::Vector3;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes},
};

use crate::assets::AssetLoader;
use crate::gfx::{
    camera::{CameraController, CameraManager, OrbitCamera},
    render_backend::{NullBackend, RenderBackend},
    scene::Scene,
};
use crate::interaction::{ControllerConfig, SelectionController};
use crate::ui::InfoPanel;

/// Builds the host's renderer once the window exists
pub type BackendFactory = Box<dyn FnOnce(Arc<Window>) -> Box<dyn RenderBackend>>;

/// Per-frame scene hook, e.g. for rig animation
pub type FrameCallback = Box<dyn FnMut(&mut Scene)>;

/// The viewer application
///
/// Owns the winit event loop and the per-scene state: scene graph, camera
/// rig, selection controller, info panel, and asset loader. Configure it,
/// then call [`run`](Self::run) to hand control to the event loop.
pub struct VitrineApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
    backend_factory: Option<BackendFactory>,
    frame_callback: Option<FrameCallback>,
}

struct AppState {
    window: Option<Arc<Window>>,
    backend: Box<dyn RenderBackend>,
    backend_factory: Option<BackendFactory>,
    frame_callback: Option<FrameCallback>,
    scene: Scene,
    camera_manager: CameraManager,
    controller: SelectionController,
    panel: InfoPanel,
    loader: AssetLoader,
    cursor_position: (f32, f32),
}

impl VitrineApp {
    /// Create a new viewer with default settings
    pub fn new() -> Self {
        let event_loop = EventLoop::new().expect("Failed to create event loop");

        let mut camera = OrbitCamera::new(6.0, 0.4, 0.2, Vector3::new(0.0, 0.0, 0.0), 1.0);
        camera.bounds.min_distance = Some(1.1);
        let controller = CameraController::new(0.005, 0.1);
        let camera_manager = CameraManager::new(camera, controller);

        Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                window: None,
                backend: Box::new(NullBackend),
                backend_factory: None,
                frame_callback: None,
                scene: Scene::new(),
                camera_manager,
                controller: SelectionController::new(ControllerConfig::default()),
                panel: InfoPanel::new("", ""),
                loader: AssetLoader::new(),
                cursor_position: (0.0, 0.0),
            },
            backend_factory: None,
            frame_callback: None,
        }
    }

    /// Install the renderer factory, called once the window exists
    pub fn set_backend_factory<F>(&mut self, factory: F)
    where
        F: FnOnce(Arc<Window>) -> Box<dyn RenderBackend> + 'static,
    {
        self.backend_factory = Some(Box::new(factory));
    }

    /// Install a per-frame scene hook, run before the frame update
    pub fn set_frame_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&mut Scene) + 'static,
    {
        self.frame_callback = Some(Box::new(callback));
    }

    /// Replace the selection controller (scene presets return configured ones)
    pub fn set_selection_controller(&mut self, controller: SelectionController) {
        self.app_state.controller = controller;
    }

    /// Replace the camera rig
    pub fn set_camera_manager(&mut self, camera_manager: CameraManager) {
        self.app_state.camera_manager = camera_manager;
    }

    pub fn scene(&self) -> &Scene {
        &self.app_state.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.app_state.scene
    }

    pub fn loader_mut(&mut self) -> &mut AssetLoader {
        &mut self.app_state.loader
    }

    /// Scene and loader together, for presets that populate both
    pub fn scene_and_loader_mut(&mut self) -> (&mut Scene, &mut AssetLoader) {
        (&mut self.app_state.scene, &mut self.app_state.loader)
    }

    pub fn panel_mut(&mut self) -> &mut InfoPanel {
        &mut self.app_state.panel
    }

    /// Run the application (consumes self and starts the event loop)
    pub fn run(mut self) -> anyhow::Result<()> {
        let _ = env_logger::try_init();

        self.app_state.backend_factory = self.backend_factory.take();
        self.app_state.frame_callback = self.frame_callback.take();

        let event_loop = self
            .event_loop
            .take()
            .ok_or_else(|| anyhow::anyhow!("event loop already consumed"))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop.run_app(&mut self.app_state)?;
        Ok(())
    }
}

impl Default for VitrineApp {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Ok(window) = event_loop.create_window(
            WindowAttributes::default().with_inner_size(winit::dpi::LogicalSize::new(1200, 800)),
        ) {
            let window_handle = Arc::new(window);
            self.window = Some(window_handle.clone());

            let (width, height) = window_handle.inner_size().into();
            self.camera_manager.camera.resize_projection(width, height);

            if let Some(factory) = self.backend_factory.take() {
                self.backend = factory(window_handle);
            }
            self.backend.resize(width, height);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: winit::event::WindowEvent,
    ) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if matches!(
                    event.physical_key,
                    winit::keyboard::PhysicalKey::Code(winit::keyboard::KeyCode::Escape)
                ) {
                    event_loop.exit();
                    return;
                }
                self.camera_manager.process_keyboard_event(&event);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_position = (position.x as f32, position.y as f32);
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                let size = window.inner_size();
                let outcome = self.controller.handle_click(
                    self.cursor_position,
                    (size.width as f32, size.height as f32),
                    &mut self.scene,
                    &mut self.camera_manager,
                    &mut self.panel,
                );
                log::trace!("click outcome: {:?}", outcome);
                window.request_redraw();
            }
            WindowEvent::MouseWheel { .. } => {
                // Any scroll releases focus; the zoom itself arrives as a
                // device event and goes through the camera controller
                self.controller
                    .release(&mut self.scene, &mut self.camera_manager, &mut self.panel);
                window.request_redraw();
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.camera_manager.camera.resize_projection(width, height);
                self.backend.resize(width, height);
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                // Install whatever loads finished since the last frame
                for asset in self.loader.poll_completed() {
                    asset.install(&mut self.scene);
                }

                // A dismissed info panel releases exactly like wheel input
                self.controller.poll_panel(
                    &mut self.scene,
                    &mut self.camera_manager,
                    &mut self.panel,
                );

                if let Some(callback) = self.frame_callback.as_mut() {
                    callback(&mut self.scene);
                }

                self.controller
                    .update_frame(&mut self.scene, &mut self.camera_manager);

                self.backend
                    .render_frame(&self.scene, &self.camera_manager.camera);
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

        self.camera_manager.process_event(&event, window);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
