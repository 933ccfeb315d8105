//! # Scene Presets
//!
//! Ready-made showcase scenes:
//!
//! - [`vase`] - a static flower-vase assembly loaded from model files
//! - [`portfolio`] - a gallery of selectable numbered units with a spinning
//!   ring that toggles the gallery light and an info unit that opens the
//!   overlay panel
//! - [`soldier`] - a procedural toy-soldier figure that walks in place,
//!   with a clickable hat
//!
//! Each preset populates a [`Scene`](crate::gfx::scene::Scene) (and queues
//! loader requests where models are involved); the ones with interactions
//! also hand back a configured
//! [`SelectionController`](crate::interaction::SelectionController).

pub mod portfolio;
pub mod soldier;
pub mod vase;

pub use portfolio::{portfolio, portfolio_camera};
pub use soldier::{soldier, soldier_controller, SoldierRig};
pub use vase::vase;

use crate::gfx::camera::{CameraController, CameraManager, OrbitCamera};
use cgmath::{Vector3, Zero};

/// Default camera for the table-top presets: slightly above, looking at
/// the origin
pub fn display_camera(aspect: f32) -> CameraManager {
    // Eye roughly at (0, 3, 6)
    let distance = 45.0_f32.sqrt();
    let pitch = (3.0_f32 / 6.0).atan();
    let camera = OrbitCamera::new(distance, pitch, 0.0, Vector3::zero(), aspect);
    let controller = CameraController::new(0.005, 0.1);
    CameraManager::new(camera, controller)
}
