// src/lib.rs
//! Vitrine
//!
//! An interactive 3D showcase viewer built on winit: scene hierarchy with
//! inherited selectability, orbit camera with smoothed zoom, mouse ray
//! picking, asynchronous model loading, and a click-to-focus selection
//! system. Rendering is delegated to a host-installed backend.

pub mod app;
pub mod assets;
pub mod gfx;
pub mod interaction;
pub mod prelude;
pub mod scenes;
pub mod ui;

// Re-export main types for convenience
pub use app::VitrineApp;

/// Creates a default viewer application instance
pub fn default() -> VitrineApp {
    VitrineApp::new()
}
