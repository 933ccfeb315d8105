//! Rendering seam
//!
//! The viewer does not draw anything itself: each frame it hands the scene
//! and camera to whatever [`RenderBackend`] the host installed. This keeps
//! the scene, picking, and interaction layers independent of any particular
//! graphics API.

use crate::gfx::camera::OrbitCamera;
use crate::gfx::scene::Scene;

/// A host-provided renderer driven once per frame
///
/// Implementations receive the scene after the per-frame update has run, so
/// spinner rotations and the smoothed field-of-view are already current.
pub trait RenderBackend {
    /// Surface size changed; only the output target is affected
    fn resize(&mut self, width: u32, height: u32);

    /// Draw one frame of the scene from the camera's point of view
    fn render_frame(&mut self, scene: &Scene, camera: &OrbitCamera);
}

/// Backend that draws nothing
///
/// Default until the host installs a real renderer; also what headless runs
/// and tests use, since every other part of the viewer works without a GPU.
pub struct NullBackend;

impl RenderBackend for NullBackend {
    fn resize(&mut self, _width: u32, _height: u32) {}

    fn render_frame(&mut self, _scene: &Scene, _camera: &OrbitCamera) {}
}
