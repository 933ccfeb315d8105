//! # Procedural Geometry Generation
//!
//! This module provides functions to generate common 3D primitive shapes
//! procedurally, eliminating the need for model files for basic shapes.
//! All shapes are Y-up and centered at the origin.
//!
//! ## Supported Primitives
//!
//! - **Cube**: Unit cube
//! - **Sphere**: UV sphere with configurable resolution
//! - **Plane**: Flat ground plane with configurable size and subdivisions
//! - **Cylinder**: Capped cylinder along the Y axis
//!
//! ## Usage
//!
//! ```rust
//! use vitrine::gfx::geometry::{generate_cylinder, generate_sphere};
//!
//! // A limb: thin cylinder with a sphere for the hand
//! let limb = generate_cylinder(0.15, 1.5, 16).into_mesh();
//! let hand = generate_sphere(16, 16).into_mesh();
//! ```

pub mod primitives;

pub use primitives::*;

use crate::gfx::scene::Mesh;

/// Generated geometry data, convertible into a scene [`Mesh`]
#[derive(Debug, Clone)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Texture coordinates (u, v)
    pub tex_coords: Vec<[f32; 2]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            tex_coords: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Convert into a scene mesh with no material assigned
    pub fn into_mesh(self) -> Mesh {
        Mesh::new(self.vertices, self.normals, self.indices)
    }

    /// Convert into a scene mesh referencing the given material
    pub fn into_mesh_with_material(self, material_id: &str) -> Mesh {
        let mut mesh = self.into_mesh();
        mesh.set_material(material_id);
        mesh
    }
}

impl Default for GeometryData {
    fn default() -> Self {
        Self::new()
    }
}
