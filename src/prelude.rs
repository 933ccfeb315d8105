//! # Vitrine Prelude
//!
//! This module provides a convenient way to import commonly used types from
//! the viewer. It's designed to reduce boilerplate imports in typical
//! applications.
//!
//! ## Usage
//!
//! ```rust
//! use vitrine::prelude::*;
//! ```
//!
//! This brings all essential types into scope, allowing you to write:
//!
//! ```no_run
//! use vitrine::prelude::*;
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut app = vitrine::default();
//!
//!     let (scene, loader) = app.scene_and_loader_mut();
//!     let controller = portfolio(scene, loader, Path::new("assets/portfolio"));
//!     app.set_selection_controller(controller);
//!     app.run()
//! }
//! ```

// Re-export core application types
pub use crate::app::VitrineApp;
pub use crate::default;

// Re-export scene and graphics types
pub use crate::gfx::camera::{Camera, CameraController, CameraManager, OrbitCamera};
pub use crate::gfx::geometry::{
    generate_cube, generate_cylinder, generate_plane, generate_sphere, GeometryData,
};
pub use crate::gfx::picking::{Aabb, PickResult, Ray, ScenePicker};
pub use crate::gfx::render_backend::{NullBackend, RenderBackend};
pub use crate::gfx::resources::material::{Material, MaterialId, MaterialManager};
pub use crate::gfx::scene::{Light, LightKind, Mesh, Node, NodeId, Scene, Selectable};

// Re-export the interaction layer
pub use crate::interaction::{
    ClickOutcome, ControllerConfig, FocusState, SelectionController,
};

// Re-export asset loading and UI types
pub use crate::assets::{AssetError, AssetLoader, LoadRequest, LoadedAsset};
pub use crate::ui::InfoPanel;

// Re-export scene presets
pub use crate::scenes::{portfolio, soldier, soldier_controller, vase, SoldierRig};

// Re-export common external dependencies
pub use cgmath::{Deg, InnerSpace, Vector3, Zero};
