use cgmath::{Matrix4, Rad, Vector3, Zero};

use crate::gfx::resources::material::MaterialId;

/// Stable handle to a node stored in a [`Scene`](super::Scene) arena.
///
/// Nodes are append-only for the lifetime of a scene, so a `NodeId` stays
/// valid once issued and can be used to key side-tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Raw arena index of this node
    pub fn index(self) -> usize {
        self.0
    }
}

/// Tri-state selectability flag, inherited down the hierarchy
///
/// A node is pickable only if no node on its ancestor chain (itself
/// included) is explicitly `No`. `Unset` defers to the ancestors and
/// defaults to selectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selectable {
    #[default]
    Unset,
    Yes,
    No,
}

/// Triangle mesh attached to a node
///
/// Geometry is immutable after creation; appearance changes go through the
/// material ID so they can be swapped and restored without touching vertex
/// data.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    pub material_id: Option<MaterialId>,
}

impl Mesh {
    pub fn new(positions: Vec<[f32; 3]>, normals: Vec<[f32; 3]>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            normals,
            indices,
            material_id: None,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Assigns a material by ID
    pub fn set_material(&mut self, id: &str) {
        self.material_id = Some(id.to_string());
    }

    /// Calculate smooth per-vertex normals from face geometry
    ///
    /// Used when a model file carries no normals of its own.
    pub fn calculate_face_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
        let mut normals = vec![[0.0f32; 3]; positions.len()];
        let mut counts = vec![0u32; positions.len()];

        for triangle in indices.chunks(3) {
            let i0 = triangle[0] as usize;
            let i1 = triangle[1] as usize;
            let i2 = triangle[2] as usize;

            let v0 = positions[i0];
            let v1 = positions[i1];
            let v2 = positions[i2];

            let edge1 = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
            let edge2 = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];

            let face_normal = [
                edge1[1] * edge2[2] - edge1[2] * edge2[1],
                edge1[2] * edge2[0] - edge1[0] * edge2[2],
                edge1[0] * edge2[1] - edge1[1] * edge2[0],
            ];

            for &vertex_idx in &[i0, i1, i2] {
                normals[vertex_idx][0] += face_normal[0];
                normals[vertex_idx][1] += face_normal[1];
                normals[vertex_idx][2] += face_normal[2];
                counts[vertex_idx] += 1;
            }
        }

        for (i, normal) in normals.iter_mut().enumerate() {
            if counts[i] > 0 {
                for component in normal.iter_mut() {
                    *component /= counts[i] as f32;
                }
                let length =
                    (normal[0].powi(2) + normal[1].powi(2) + normal[2].powi(2)).sqrt();
                if length > 0.0 {
                    for component in normal.iter_mut() {
                        *component /= length;
                    }
                }
            }
        }

        normals
    }
}

/// A single node in the scene hierarchy
///
/// Carries identity, a parent back-link (traversal only, never owning), an
/// ordered child list, an inherited selectability flag, a local transform,
/// and optionally a mesh and a per-frame spin increment for decorative
/// animation.
pub struct Node {
    pub name: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub selectable: Selectable,
    /// Local translation relative to the parent
    pub translation: Vector3<f32>,
    /// Local XYZ Euler rotation in radians
    pub rotation: Vector3<f32>,
    /// Uniform local scale
    pub scale: f32,
    pub mesh: Option<Mesh>,
    /// Per-frame rotation increment for continuously animated nodes
    pub spin: Option<Vector3<f32>>,
    pub visible: bool,
}

impl Node {
    /// Create a node with an identity transform and no mesh
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parent: None,
            children: Vec::new(),
            selectable: Selectable::Unset,
            translation: Vector3::zero(),
            rotation: Vector3::zero(),
            scale: 1.0,
            mesh: None,
            spin: None,
            visible: true,
        }
    }

    /// Builder pattern: attach a mesh
    pub fn with_mesh(mut self, mesh: Mesh) -> Self {
        self.mesh = Some(mesh);
        self
    }

    /// Builder pattern: set the selectability flag
    pub fn with_selectable(mut self, selectable: Selectable) -> Self {
        self.selectable = selectable;
        self
    }

    /// Builder pattern: set the local translation
    pub fn with_translation(mut self, translation: Vector3<f32>) -> Self {
        self.translation = translation;
        self
    }

    /// Builder pattern: set the local rotation (XYZ Euler, radians)
    pub fn with_rotation(mut self, rotation: Vector3<f32>) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder pattern: set the uniform scale
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Builder pattern: set a per-frame spin increment
    pub fn with_spin(mut self, spin: Vector3<f32>) -> Self {
        self.spin = Some(spin);
        self
    }

    /// Parent back-link, if any
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Ordered child list
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Local transform matrix: translation * rotation (Z·Y·X) * scale
    pub fn local_transform(&self) -> Matrix4<f32> {
        let t = Matrix4::from_translation(self.translation);
        let r = Matrix4::from_angle_z(Rad(self.rotation.z))
            * Matrix4::from_angle_y(Rad(self.rotation.y))
            * Matrix4::from_angle_x(Rad(self.rotation.x));
        let s = Matrix4::from_scale(self.scale);
        t * r * s
    }
}
