use cgmath::{Matrix4, SquareMatrix};

use crate::gfx::picking::Aabb;
use crate::gfx::resources::material::MaterialManager;

use super::light::Light;
use super::node::{Node, NodeId, Selectable};

/// Main scene: node hierarchy, lights, and materials
///
/// Nodes are stored in an append-only arena and addressed by [`NodeId`].
/// Top-level nodes (those with no parent) are the selectable units click
/// interactions resolve to. The arena never frees nodes, so IDs handed out
/// to callers stay valid for the scene's lifetime — a frame rendered while
/// asset loads are still in flight simply sees fewer nodes.
pub struct Scene {
    nodes: Vec<Node>,
    root_children: Vec<NodeId>,
    pub lights: Vec<Light>,
    pub material_manager: MaterialManager,
}

impl Scene {
    /// Creates an empty scene with a default material
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root_children: Vec::new(),
            lights: Vec::new(),
            material_manager: MaterialManager::new(),
        }
    }

    /// Adds a top-level node (a selectable unit) and returns its ID
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.nodes[id.0].parent = None;
        self.root_children.push(id);
        id
    }

    /// Adds a node as a child of `parent` and returns its ID
    pub fn add_child(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.nodes[id.0].parent = Some(parent);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Looks up a node; absent IDs resolve to `None` rather than panicking
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Mutable node lookup
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Number of nodes in the arena
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// IDs of the top-level nodes directly under the scene root
    pub fn units(&self) -> &[NodeId] {
        &self.root_children
    }

    /// Iterates over every `(id, node)` pair in the arena
    pub fn iter_nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Finds the first top-level unit with the given name
    pub fn find_unit(&self, name: &str) -> Option<NodeId> {
        self.root_children
            .iter()
            .copied()
            .find(|id| self.nodes[id.0].name == name)
    }

    /// Walks the ancestor chain starting at `id` itself, root last
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut current = self.node(id).map(|_| id);
        std::iter::from_fn(move || {
            let here = current?;
            current = self.nodes[here.0].parent;
            Some(here)
        })
    }

    /// Whether a node may be picked
    ///
    /// A node is selectable only if no node on its ancestor chain (itself
    /// included) explicitly opts out; `Unset` inherits and defaults to
    /// selectable.
    pub fn is_selectable(&self, id: NodeId) -> bool {
        self.ancestors(id)
            .all(|a| self.nodes[a.0].selectable != Selectable::No)
    }

    /// Resolves the top-level unit containing `id`
    ///
    /// Walks parent back-links until the node directly under the scene root.
    pub fn selectable_unit_root(&self, id: NodeId) -> Option<NodeId> {
        self.ancestors(id).last()
    }

    /// Collects `id` and every descendant in depth-first order
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = match self.node(id) {
            Some(_) => vec![id],
            None => Vec::new(),
        };
        while let Some(current) = stack.pop() {
            out.push(current);
            for &child in self.nodes[current.0].children.iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// World transform of a node: ancestor locals composed root-down
    pub fn world_transform(&self, id: NodeId) -> Matrix4<f32> {
        let mut transform = Matrix4::identity();
        let chain: Vec<NodeId> = self.ancestors(id).collect();
        for &ancestor in chain.iter().rev() {
            transform = transform * self.nodes[ancestor.0].local_transform();
        }
        transform
    }

    /// World-space bounding box of a node and its descendants
    ///
    /// Union of each descendant mesh's AABB taken through its world
    /// transform. Returns `None` when the subtree has no mesh yet, which
    /// callers treat as "nothing to focus on".
    pub fn world_bounds(&self, id: NodeId) -> Option<Aabb> {
        let mut bounds: Option<Aabb> = None;
        for descendant in self.descendants(id) {
            let node = &self.nodes[descendant.0];
            let Some(mesh) = &node.mesh else {
                continue;
            };
            if mesh.positions.is_empty() {
                continue;
            }
            let local = Aabb::from_vertices(&mesh.positions);
            let world = local.transform(&self.world_transform(descendant));
            bounds = Some(match bounds {
                Some(b) => b.union(&world),
                None => world,
            });
        }
        bounds
    }

    /// Adds a light and returns its index
    pub fn add_light(&mut self, light: Light) -> usize {
        self.lights.push(light);
        self.lights.len() - 1
    }

    /// Finds a light by name
    pub fn light(&self, name: &str) -> Option<&Light> {
        self.lights.iter().find(|l| l.name == name)
    }

    /// Mutable light lookup by name
    pub fn light_mut(&mut self, name: &str) -> Option<&mut Light> {
        self.lights.iter_mut().find(|l| l.name == name)
    }

    /// Advances every spinner node by its per-frame increment
    ///
    /// Deliberately not normalized by elapsed time: the reference behavior
    /// is a fixed increment per rendered frame.
    pub fn advance_spinners(&mut self) {
        for node in self.nodes.iter_mut() {
            if let Some(spin) = node.spin {
                node.rotation += spin;
            }
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::generate_cube;
    use cgmath::Vector3;

    fn cube_node(name: &str) -> Node {
        Node::new(name).with_mesh(generate_cube().into_mesh())
    }

    #[test]
    fn explicit_no_beats_descendant_flags() {
        let mut scene = Scene::new();
        let unit = scene.add_node(Node::new("backdrop").with_selectable(Selectable::No));
        let child = scene.add_child(unit, Node::new("panel").with_selectable(Selectable::Yes));
        let grandchild = scene.add_child(child, cube_node("panel-mesh"));

        assert!(!scene.is_selectable(unit));
        assert!(!scene.is_selectable(child));
        assert!(!scene.is_selectable(grandchild));
    }

    #[test]
    fn unset_defaults_to_selectable() {
        let mut scene = Scene::new();
        let unit = scene.add_node(Node::new("exhibit"));
        let child = scene.add_child(unit, cube_node("shell"));

        assert!(scene.is_selectable(unit));
        assert!(scene.is_selectable(child));
    }

    #[test]
    fn unit_root_resolves_from_deep_descendants() {
        let mut scene = Scene::new();
        let unit = scene.add_node(Node::new("exhibit"));
        let mid = scene.add_child(unit, Node::new("assembly"));
        let leaf = scene.add_child(mid, cube_node("bolt"));

        assert_eq!(scene.selectable_unit_root(leaf), Some(unit));
        assert_eq!(scene.selectable_unit_root(unit), Some(unit));
    }

    #[test]
    fn world_bounds_follow_translation() {
        let mut scene = Scene::new();
        let unit = scene.add_node(Node::new("exhibit").with_translation(Vector3::new(3.0, 0.0, 0.0)));
        scene.add_child(unit, cube_node("shell"));

        let bounds = scene.world_bounds(unit).expect("subtree has a mesh");
        let center = bounds.center();
        assert!((center.x - 3.0).abs() < 1e-5);
        assert!(center.y.abs() < 1e-5);
        assert!(center.z.abs() < 1e-5);
    }

    #[test]
    fn world_bounds_of_meshless_subtree_is_none() {
        let mut scene = Scene::new();
        let unit = scene.add_node(Node::new("placeholder"));
        assert!(scene.world_bounds(unit).is_none());
    }

    #[test]
    fn spinners_advance_by_fixed_increment() {
        let mut scene = Scene::new();
        let plain = scene.add_node(cube_node("static"));
        let spinner = scene.add_node(
            cube_node("ring").with_spin(Vector3::new(0.005, 0.0, 0.007)),
        );

        scene.advance_spinners();
        scene.advance_spinners();

        let ring = scene.node(spinner).unwrap();
        assert!((ring.rotation.x - 0.010).abs() < 1e-6);
        assert!((ring.rotation.z - 0.014).abs() < 1e-6);
        assert_eq!(scene.node(plain).unwrap().rotation, Vector3::new(0.0, 0.0, 0.0));
    }
}
