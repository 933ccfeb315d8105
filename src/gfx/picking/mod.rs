//! # Object Picking System
//!
//! This module provides 3D object picking using mouse ray-casting. It lets
//! the interaction layer resolve a click on the viewport to the scene nodes
//! under the cursor.
//!
//! ## How it works
//!
//! 1. **Mouse to Ray**: Convert viewport coordinates to a ray in world space
//! 2. **Ray-Node Intersection**: Test the ray against each mesh node's bounding box
//! 3. **Ordering**: Return every hit sorted nearest first
//!
//! ## Usage
//!
//! ```rust,no_run
//! use vitrine::gfx::picking::ScenePicker;
//! # let scene: vitrine::gfx::scene::Scene = unimplemented!();
//! # let camera: vitrine::gfx::camera::OrbitCamera = unimplemented!();
//!
//! let mut picker = ScenePicker::new();
//! let hits = picker.pick_all((400.0, 300.0), (800.0, 600.0), &camera, &scene);
//! if let Some(nearest) = hits.first() {
//!     println!("clicked node {:?}", nearest.node);
//! }
//! ```

use std::collections::HashMap;

use cgmath::{
    ElementWise, EuclideanSpace, InnerSpace, Matrix4, Point3, SquareMatrix, Vector3, Vector4,
    Zero,
};

use crate::gfx::camera::orbit_camera::OrbitCamera;
use crate::gfx::scene::{NodeId, Scene};

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Vector3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Create a new ray
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box for intersection testing
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vector3<f32>,
    /// Maximum corner of the bounding box
    pub max: Vector3<f32>,
}

impl Aabb {
    /// Create a new bounding box
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// Create a bounding box from a set of vertices
    pub fn from_vertices(vertices: &[[f32; 3]]) -> Self {
        if vertices.is_empty() {
            return Self::new(Vector3::zero(), Vector3::zero());
        }

        let mut min = Vector3::new(vertices[0][0], vertices[0][1], vertices[0][2]);
        let mut max = min;

        for vertex in vertices.iter().skip(1) {
            let v = Vector3::new(vertex[0], vertex[1], vertex[2]);
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            min.z = min.z.min(v.z);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
            max.z = max.z.max(v.z);
        }

        Self::new(min, max)
    }

    /// Center point of the box
    pub fn center(&self) -> Vector3<f32> {
        (self.min + self.max) * 0.5
    }

    /// Smallest box enclosing both boxes
    pub fn union(&self, other: &Aabb) -> Self {
        Self::new(
            Vector3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            Vector3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        )
    }

    /// Test ray intersection using the slab method
    ///
    /// Returns the distance to the entry point, or the exit point when the
    /// ray starts inside the box, or `None` on a miss.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inv_dir = Vector3::new(
            1.0 / ray.direction.x,
            1.0 / ray.direction.y,
            1.0 / ray.direction.z,
        );

        let t_min = (self.min - ray.origin).mul_element_wise(inv_dir);
        let t_max = (self.max - ray.origin).mul_element_wise(inv_dir);

        let t1 = Vector3::new(
            t_min.x.min(t_max.x),
            t_min.y.min(t_max.y),
            t_min.z.min(t_max.z),
        );
        let t2 = Vector3::new(
            t_min.x.max(t_max.x),
            t_min.y.max(t_max.y),
            t_min.z.max(t_max.z),
        );

        let t_near = t1.x.max(t1.y.max(t1.z));
        let t_far = t2.x.min(t2.y.min(t2.z));

        if t_near <= t_far && t_far >= 0.0 {
            Some(if t_near >= 0.0 { t_near } else { t_far })
        } else {
            None
        }
    }

    /// Apply a transformation matrix to the box
    ///
    /// Transforms all 8 corners and returns the axis-aligned bounds of the
    /// result.
    pub fn transform(&self, matrix: &Matrix4<f32>) -> Self {
        let corners = [
            Vector3::new(self.min.x, self.min.y, self.min.z),
            Vector3::new(self.max.x, self.min.y, self.min.z),
            Vector3::new(self.min.x, self.max.y, self.min.z),
            Vector3::new(self.min.x, self.min.y, self.max.z),
            Vector3::new(self.max.x, self.max.y, self.min.z),
            Vector3::new(self.max.x, self.min.y, self.max.z),
            Vector3::new(self.min.x, self.max.y, self.max.z),
            Vector3::new(self.max.x, self.max.y, self.max.z),
        ];

        let mut transformed_corners = Vec::with_capacity(8);
        for corner in &corners {
            let homogeneous = Vector4::new(corner.x, corner.y, corner.z, 1.0);
            let transformed = matrix * homogeneous;
            transformed_corners.push([
                transformed.x / transformed.w,
                transformed.y / transformed.w,
                transformed.z / transformed.w,
            ]);
        }

        Self::from_vertices(&transformed_corners)
    }
}

/// Result of a picking operation
#[derive(Debug, Clone)]
pub struct PickResult {
    /// The mesh node the ray hit
    pub node: NodeId,
    /// Distance from the ray origin to the intersection point
    pub distance: f32,
    /// World space intersection point
    pub intersection_point: Vector3<f32>,
}

/// Scene picker for mouse selection
///
/// Caches each mesh node's local-space bounding box; mesh geometry is
/// immutable after insertion, so cached entries only need invalidating if a
/// node's mesh is replaced wholesale.
pub struct ScenePicker {
    cached_aabbs: HashMap<NodeId, Aabb>,
}

impl ScenePicker {
    /// Create a new scene picker
    pub fn new() -> Self {
        Self {
            cached_aabbs: HashMap::new(),
        }
    }

    /// Convert viewport coordinates to a world-space ray
    ///
    /// Viewport coordinates are mapped to normalized device coordinates and
    /// unprojected through the inverse view-projection matrix.
    pub fn screen_to_ray(
        &self,
        screen_pos: (f32, f32),
        screen_size: (f32, f32),
        camera: &OrbitCamera,
    ) -> Ray {
        let (mouse_x, mouse_y) = screen_pos;
        let (screen_width, screen_height) = screen_size;

        // Normalized device coordinates (-1 to 1), Y flipped
        let ndc_x = (2.0 * mouse_x) / screen_width - 1.0;
        let ndc_y = 1.0 - (2.0 * mouse_y) / screen_height;

        let eye = Point3::from_vec(camera.eye);
        let target = Point3::from_vec(camera.target);
        let view_matrix = Matrix4::look_at_rh(eye, target, camera.up);
        let proj_matrix = cgmath::perspective(camera.fovy, camera.aspect, camera.znear, camera.zfar);

        let view_proj_matrix = proj_matrix * view_matrix;
        let inv_view_proj = view_proj_matrix
            .invert()
            .unwrap_or_else(|| Matrix4::from_scale(1.0));

        // Unproject the near and far plane points at this NDC coordinate
        let near_point = Vector4::new(ndc_x, ndc_y, -1.0, 1.0);
        let far_point = Vector4::new(ndc_x, ndc_y, 1.0, 1.0);

        let world_near = inv_view_proj * near_point;
        let world_far = inv_view_proj * far_point;

        let near_3d = Vector3::new(
            world_near.x / world_near.w,
            world_near.y / world_near.w,
            world_near.z / world_near.w,
        );
        let far_3d = Vector3::new(
            world_far.x / world_far.w,
            world_far.y / world_far.w,
            world_far.z / world_far.w,
        );

        let direction = (far_3d - near_3d).normalize();
        Ray::new(near_3d, direction)
    }

    /// Pick every mesh node under the given viewport coordinate
    ///
    /// Returns hits ordered nearest first. Invisible nodes and nodes
    /// without geometry are skipped; a scene still waiting on asset loads
    /// simply produces fewer candidates.
    pub fn pick_all(
        &mut self,
        screen_pos: (f32, f32),
        screen_size: (f32, f32),
        camera: &OrbitCamera,
        scene: &Scene,
    ) -> Vec<PickResult> {
        let ray = self.screen_to_ray(screen_pos, screen_size, camera);

        let mut results = Vec::new();

        for (id, node) in scene.iter_nodes() {
            if !node.visible {
                continue;
            }
            let Some(mesh) = &node.mesh else {
                continue;
            };
            if mesh.positions.is_empty() {
                continue;
            }

            let aabb = match self.cached_aabbs.get(&id) {
                Some(cached) => *cached,
                None => {
                    let aabb = Aabb::from_vertices(&mesh.positions);
                    self.cached_aabbs.insert(id, aabb);
                    aabb
                }
            };

            let world_aabb = aabb.transform(&scene.world_transform(id));

            if let Some(distance) = world_aabb.intersect_ray(&ray) {
                results.push(PickResult {
                    node: id,
                    distance,
                    intersection_point: ray.point_at(distance),
                });
            }
        }

        results.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results
    }

    /// Invalidate all cached bounding boxes
    pub fn invalidate_cache(&mut self) {
        self.cached_aabbs.clear();
    }

    /// Invalidate the cached bounding box for a specific node
    pub fn invalidate_node(&mut self, node: NodeId) {
        self.cached_aabbs.remove(&node);
    }
}

impl Default for ScenePicker {
    fn default() -> Self {
        Self::new()
    }
}
