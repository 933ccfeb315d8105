//! Toy-soldier scene
//!
//! A figure assembled entirely from procedural primitives: cylinder body
//! and limbs, sphere head and hands, and a two-piece hat. The limbs hang
//! from pivot nodes at the shoulders and hips so the walk cycle is a simple
//! rotation swing. Only the hat responds to clicks; every other body part
//! opts out of picking.

use cgmath::Vector3;

use crate::gfx::geometry::{generate_cylinder, generate_plane, generate_sphere};
use crate::gfx::scene::{Node, NodeId, Scene, Selectable};
use crate::gfx::resources::material::Material;
use crate::interaction::{ControllerConfig, SelectionController};

// Figure measurements
const BODY_HEIGHT: f32 = 2.0;
const BODY_RADIUS: f32 = 0.5;
const HEAD_RADIUS: f32 = 0.4;
const LIMB_RADIUS: f32 = 0.15;
const LIMB_HEIGHT: f32 = 1.5;
const HAND_RADIUS: f32 = 0.18;

/// Walk-cycle phase advance per rendered frame
const WALK_STEP: f32 = 0.033;

/// Handles to the soldier's animated pivot nodes
///
/// Keeps the walk cycle's phase and the four limb pivots; everything else
/// about the figure lives in the scene.
pub struct SoldierRig {
    pub root: NodeId,
    pub left_arm_pivot: NodeId,
    pub right_arm_pivot: NodeId,
    pub left_leg_pivot: NodeId,
    pub right_leg_pivot: NodeId,
    phase: f32,
}

impl SoldierRig {
    /// Advances the walk cycle one frame
    ///
    /// Arms and legs swing in opposition by `sin(phase) * 0.6`. Pivots that
    /// are not in the scene are skipped.
    pub fn advance(&mut self, scene: &mut Scene) {
        self.phase += WALK_STEP;
        let swing = self.phase.sin() * 0.6;

        let targets = [
            (self.left_arm_pivot, swing),
            (self.right_arm_pivot, -swing),
            (self.left_leg_pivot, -swing),
            (self.right_leg_pivot, swing),
        ];
        for (id, angle) in targets {
            if let Some(node) = scene.node_mut(id) {
                node.rotation.x = angle;
            }
        }
    }
}

/// Builds the toy-soldier figure and returns its rig
pub fn soldier(scene: &mut Scene) -> SoldierRig {
    register_materials(scene);

    scene.add_node(
        Node::new("ground")
            .with_selectable(Selectable::No)
            .with_mesh(generate_plane(10.0, 10.0, 1, 1).into_mesh()),
    );

    let root = scene.add_node(Node::new("soldier"));

    // ----- BODY -----
    scene.add_child(
        root,
        Node::new("body")
            .with_selectable(Selectable::No)
            .with_mesh(
                generate_cylinder(BODY_RADIUS, BODY_HEIGHT, 32)
                    .into_mesh_with_material("uniform-red"),
            ),
    );

    // ----- HAT (the clickable part) -----
    scene.add_child(
        root,
        Node::new("hat-brim")
            .with_selectable(Selectable::Yes)
            .with_translation(Vector3::new(
                0.0,
                BODY_HEIGHT / 2.0 + HEAD_RADIUS + 0.25,
                0.0,
            ))
            .with_mesh(
                generate_cylinder(HEAD_RADIUS + 0.1, 0.05, 32).into_mesh_with_material("hat-black"),
            ),
    );
    scene.add_child(
        root,
        Node::new("hat-top")
            .with_selectable(Selectable::Yes)
            .with_translation(Vector3::new(
                0.0,
                BODY_HEIGHT / 2.0 + HEAD_RADIUS + 0.5,
                0.0,
            ))
            .with_mesh(
                generate_cylinder(HEAD_RADIUS - 0.1, 0.5, 32).into_mesh_with_material("hat-black"),
            ),
    );

    // ----- HEAD -----
    scene.add_child(
        root,
        Node::new("head")
            .with_selectable(Selectable::No)
            .with_translation(Vector3::new(0.0, BODY_HEIGHT / 2.0 + HEAD_RADIUS, 0.0))
            .with_scale(HEAD_RADIUS)
            .with_mesh(generate_sphere(32, 32).into_mesh_with_material("skin")),
    );

    // ----- ARMS + HANDS (pivots at the shoulders) -----
    let left_arm_pivot = limb(
        scene,
        root,
        "left-arm",
        Vector3::new(-(BODY_RADIUS + LIMB_RADIUS), BODY_HEIGHT / 2.0, 0.0),
        "uniform-red",
        true,
    );
    let right_arm_pivot = limb(
        scene,
        root,
        "right-arm",
        Vector3::new(BODY_RADIUS + LIMB_RADIUS, BODY_HEIGHT / 2.0, 0.0),
        "uniform-red",
        true,
    );

    // ----- LEGS (pivots at the hips) -----
    let left_leg_pivot = limb(
        scene,
        root,
        "left-leg",
        Vector3::new(-BODY_RADIUS / 2.0, -BODY_HEIGHT / 2.0, 0.0),
        "trouser-blue",
        false,
    );
    let right_leg_pivot = limb(
        scene,
        root,
        "right-leg",
        Vector3::new(BODY_RADIUS / 2.0, -BODY_HEIGHT / 2.0, 0.0),
        "trouser-blue",
        false,
    );

    SoldierRig {
        root,
        left_arm_pivot,
        right_arm_pivot,
        left_leg_pivot,
        right_leg_pivot,
        phase: 0.0,
    }
}

/// Controller for the soldier scene: clicking the hat focuses the figure
/// and opens the greeting panel
pub fn soldier_controller() -> SelectionController {
    SelectionController::new(ControllerConfig {
        info_unit: Some("soldier".to_string()),
        ..Default::default()
    })
}

/// Adds a limb pivot with its cylinder, plus a hand sphere for arms
fn limb(
    scene: &mut Scene,
    root: NodeId,
    name: &str,
    shoulder: Vector3<f32>,
    material: &str,
    with_hand: bool,
) -> NodeId {
    let pivot = scene.add_child(
        root,
        Node::new(&format!("{name}-pivot"))
            .with_selectable(Selectable::No)
            .with_translation(shoulder),
    );
    let segment = scene.add_child(
        pivot,
        Node::new(name)
            .with_translation(Vector3::new(0.0, -LIMB_HEIGHT / 2.0, 0.0))
            .with_mesh(
                generate_cylinder(LIMB_RADIUS, LIMB_HEIGHT, 16).into_mesh_with_material(material),
            ),
    );
    if with_hand {
        scene.add_child(
            segment,
            Node::new(&format!("{name}-hand"))
                .with_translation(Vector3::new(0.0, -LIMB_HEIGHT / 2.0 - HAND_RADIUS, 0.0))
                .with_scale(HAND_RADIUS)
                .with_mesh(generate_sphere(16, 16).into_mesh_with_material("skin-warm")),
        );
    }
    pivot
}

fn register_materials(scene: &mut Scene) {
    let manager = &mut scene.material_manager;
    if !manager.contains("uniform-red") {
        manager.add_material(Material::new("uniform-red", [1.0, 0.0, 0.0, 1.0], 0.0, 0.5));
    }
    if !manager.contains("skin") {
        manager.add_material(Material::new("skin", [1.0, 0.867, 0.667, 1.0], 0.0, 0.5));
    }
    if !manager.contains("skin-warm") {
        manager.add_material(Material::new("skin-warm", [1.0, 0.8, 0.667, 1.0], 0.0, 0.5));
    }
    if !manager.contains("trouser-blue") {
        manager.add_material(Material::new("trouser-blue", [0.267, 0.267, 1.0, 1.0], 0.0, 0.5));
    }
    if !manager.contains("hat-black") {
        manager.add_material(Material::new("hat-black", [0.0, 0.0, 0.0, 1.0], 0.0, 0.5));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_hat_is_clickable() {
        let mut scene = Scene::new();
        let rig = soldier(&mut scene);

        let root = scene.node(rig.root).unwrap();
        let by_name = |name: &str| {
            root.children()
                .iter()
                .copied()
                .find(|&id| scene.node(id).unwrap().name == name)
                .unwrap()
        };

        assert!(scene.is_selectable(by_name("hat-brim")));
        assert!(scene.is_selectable(by_name("hat-top")));
        assert!(!scene.is_selectable(by_name("body")));
        assert!(!scene.is_selectable(by_name("head")));
        assert!(!scene.is_selectable(rig.left_arm_pivot));
    }

    #[test]
    fn walk_cycle_swings_limbs_in_opposition() {
        let mut scene = Scene::new();
        let mut rig = soldier(&mut scene);

        rig.advance(&mut scene);

        let left_arm = scene.node(rig.left_arm_pivot).unwrap().rotation.x;
        let right_arm = scene.node(rig.right_arm_pivot).unwrap().rotation.x;
        let left_leg = scene.node(rig.left_leg_pivot).unwrap().rotation.x;

        assert!(left_arm > 0.0);
        assert!((left_arm + right_arm).abs() < 1e-6);
        assert!((left_arm + left_leg).abs() < 1e-6);
    }

    #[test]
    fn advance_skips_pivots_from_another_scene() {
        let mut populated = Scene::new();
        let mut rig = soldier(&mut populated);

        // A scene still waiting on its nodes has nothing to animate
        let mut empty = Scene::new();
        rig.advance(&mut empty);
        assert_eq!(empty.node_count(), 0);
    }

    #[test]
    fn hat_click_resolves_to_the_soldier_unit() {
        let mut scene = Scene::new();
        let rig = soldier(&mut scene);
        let hat = scene
            .node(rig.root)
            .unwrap()
            .children()
            .iter()
            .copied()
            .find(|&id| scene.node(id).unwrap().name == "hat-top")
            .unwrap();

        assert_eq!(scene.selectable_unit_root(hat), Some(rig.root));
    }
}
