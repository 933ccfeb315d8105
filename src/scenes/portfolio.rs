//! Portfolio gallery scene
//!
//! A backdrop, a floor, a spinning ring, and twenty numbered display units,
//! all loaded asynchronously. The ring is the toggle unit for the gallery's
//! point light; unit "1" additionally opens the info panel when focused.

use std::f32::consts::PI;
use std::path::Path;

use cgmath::Vector3;

use crate::assets::{AssetLoader, LoadRequest};
use crate::gfx::camera::{CameraController, CameraManager, OrbitCamera};
use crate::gfx::scene::{Light, Scene, Selectable};
use crate::interaction::{ControllerConfig, SelectionController};

/// Base spin rate for the decorative ring, radians per frame
const RING_SPIN: f32 = 0.01;

/// Populates the portfolio scene, queues its loads, and returns the
/// configured interaction controller
///
/// Assets are looked up under `asset_dir`: `main.obj` (backdrop),
/// `ring.obj`, `sphere.obj`, `floor.obj`, and `1.obj` through `20.obj`.
/// Backdrop and floor opt out of picking; everything else is selectable.
pub fn portfolio(
    scene: &mut Scene,
    loader: &mut AssetLoader,
    asset_dir: &Path,
) -> SelectionController {
    scene.add_light(
        Light::point("showcase", [1.0, 1.0, 1.0], 40.0, 70.0)
            .with_position(Vector3::new(0.0, 5.0, 0.0)),
    );

    loader.request(
        LoadRequest::new(asset_dir.join("main.obj"), "main").with_selectable(Selectable::No),
    );
    loader.request(
        LoadRequest::new(asset_dir.join("ring.obj"), "ring")
            .with_selectable(Selectable::Yes)
            .with_spin(Vector3::new(0.5 * RING_SPIN, 0.0, 0.7 * RING_SPIN)),
    );
    loader.request(
        LoadRequest::new(asset_dir.join("sphere.obj"), "sphere").with_selectable(Selectable::Yes),
    );
    loader.request(
        LoadRequest::new(asset_dir.join("floor.obj"), "floor")
            .with_selectable(Selectable::No)
            .with_position(Vector3::new(0.0, -0.1, 0.0)),
    );

    for i in 1..=20 {
        loader.request(
            LoadRequest::new(asset_dir.join(format!("{i}.obj")), &i.to_string())
                .with_selectable(Selectable::Yes),
        );
    }

    SelectionController::new(ControllerConfig {
        toggle_unit: Some("ring".to_string()),
        toggle_light: Some("showcase".to_string()),
        info_unit: Some("1".to_string()),
        ..Default::default()
    })
}

/// Camera rig for the portfolio: high orbit, clamped close to the gallery
pub fn portfolio_camera(aspect: f32) -> CameraManager {
    let mut camera = OrbitCamera::new(8.0, PI / 4.0, 0.0, Vector3::new(0.0, 0.0, 0.0), aspect);
    camera.bounds.min_distance = Some(2.0);
    camera.bounds.max_distance = Some(8.0);
    camera.bounds.min_pitch = 0.0;
    camera.bounds.max_pitch = PI / 4.0;

    let controller = CameraController::new(0.005, 0.1);
    CameraManager::new(camera, controller)
}
