//! Selection highlight
//!
//! Highlighting swaps every mesh in the selected unit over to a cloned
//! material with a raised emissive, remembering the original assignment in
//! a side-table so deselection is an exact restore.

use std::collections::HashMap;

use crate::gfx::resources::material::MaterialId;
use crate::gfx::scene::{NodeId, Scene};

/// Side-table of pre-highlight material assignments, keyed by mesh node
///
/// The table is transient controller state, not part of the nodes: entries
/// are written when a highlight is applied and drained when it is removed.
/// A first save is never overwritten, so re-applying a highlight cannot
/// capture a highlight clone as an "original".
pub struct HighlightTable {
    saved: HashMap<NodeId, Option<MaterialId>>,
}

impl HighlightTable {
    pub fn new() -> Self {
        Self {
            saved: HashMap::new(),
        }
    }

    /// Number of meshes currently carrying a highlight
    pub fn len(&self) -> usize {
        self.saved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.saved.is_empty()
    }

    /// Applies the highlight to every mesh in `unit`'s subtree
    ///
    /// Each mesh's current material is cloned, given the highlight emissive,
    /// registered under a node-derived ID, and assigned in place of the
    /// original.
    pub fn apply(&mut self, scene: &mut Scene, unit: NodeId, emissive: [f32; 3], intensity: f32) {
        for id in scene.descendants(unit) {
            let Some(mesh) = scene.node(id).and_then(|n| n.mesh.as_ref()) else {
                continue;
            };
            let original = mesh.material_id.clone();

            let mut clone = scene
                .material_manager
                .get_material_for_mesh(original.as_ref())
                .clone();
            clone.emissive = emissive;
            clone.emissive_intensity = intensity;

            let highlight_id = format!("{}#highlight-{}", clone.name, id.index());
            scene.material_manager.insert_material(&highlight_id, clone);

            if let Some(mesh) = scene.node_mut(id).and_then(|n| n.mesh.as_mut()) {
                mesh.set_material(&highlight_id);
            }

            self.saved.entry(id).or_insert(original);
        }
    }

    /// Restores every saved assignment and clears the table
    ///
    /// Meshes without a saved entry are left untouched. The highlight
    /// clones are dropped from the material manager on the way out.
    pub fn restore(&mut self, scene: &mut Scene) {
        for (id, original) in self.saved.drain() {
            let current = scene
                .node(id)
                .and_then(|n| n.mesh.as_ref())
                .and_then(|m| m.material_id.clone());

            if let Some(current_id) = current {
                if Some(&current_id) != original.as_ref() {
                    scene.material_manager.remove_material(&current_id);
                }
            }

            if let Some(mesh) = scene.node_mut(id).and_then(|n| n.mesh.as_mut()) {
                mesh.material_id = original;
            }
        }
    }
}

impl Default for HighlightTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::generate_cube;
    use crate::gfx::resources::material::Material;
    use crate::gfx::scene::Node;

    fn scene_with_painted_cube() -> (Scene, NodeId, NodeId) {
        let mut scene = Scene::new();
        scene
            .material_manager
            .add_material(Material::new("lacquer", [0.6, 0.1, 0.1, 1.0], 0.0, 0.7));

        let unit = scene.add_node(Node::new("exhibit"));
        let shell = scene.add_child(
            unit,
            Node::new("shell").with_mesh(generate_cube().into_mesh_with_material("lacquer")),
        );
        (scene, unit, shell)
    }

    #[test]
    fn round_trip_restores_original_ids() {
        let (mut scene, unit, shell) = scene_with_painted_cube();
        let mut table = HighlightTable::new();

        table.apply(&mut scene, unit, [1.0, 1.0, 0.0], 0.6);

        let highlighted = scene.node(shell).unwrap().mesh.as_ref().unwrap();
        let highlight_id = highlighted.material_id.clone().unwrap();
        assert_ne!(highlight_id, "lacquer");
        let resolved = scene
            .material_manager
            .get_material_for_mesh(Some(&highlight_id));
        assert_eq!(resolved.emissive, [1.0, 1.0, 0.0]);
        assert_eq!(resolved.emissive_intensity, 0.6);

        table.restore(&mut scene);

        let restored = scene.node(shell).unwrap().mesh.as_ref().unwrap();
        assert_eq!(restored.material_id.as_deref(), Some("lacquer"));
        // The clone is gone and the original is untouched
        assert!(!scene.material_manager.contains(&highlight_id));
        let original = scene
            .material_manager
            .get_material(&"lacquer".to_string())
            .unwrap();
        assert_eq!(original.emissive_intensity, 0.0);
    }

    #[test]
    fn reapply_keeps_first_saved_original() {
        let (mut scene, unit, shell) = scene_with_painted_cube();
        let mut table = HighlightTable::new();

        table.apply(&mut scene, unit, [1.0, 1.0, 0.0], 0.6);
        table.apply(&mut scene, unit, [1.0, 1.0, 0.0], 0.6);
        table.restore(&mut scene);

        let restored = scene.node(shell).unwrap().mesh.as_ref().unwrap();
        assert_eq!(restored.material_id.as_deref(), Some("lacquer"));
    }

    #[test]
    fn meshless_nodes_are_skipped() {
        let mut scene = Scene::new();
        let unit = scene.add_node(Node::new("pending"));
        let mut table = HighlightTable::new();

        table.apply(&mut scene, unit, [1.0, 1.0, 0.0], 0.6);
        assert!(table.is_empty());
        table.restore(&mut scene);
    }
}
