//! Selection and focus control
//!
//! The click → pick → highlight → focus state machine. One controller
//! instance serves one scene; all of its state lives here rather than in
//! globals, so independent scenes cannot contaminate each other.

use cgmath::{Deg, Vector3};

use crate::gfx::camera::CameraManager;
use crate::gfx::picking::ScenePicker;
use crate::gfx::scene::{NodeId, Scene};
use crate::ui::InfoPanel;

use super::highlight::HighlightTable;

/// Focus target used when nothing is selected
pub const WORLD_CENTER: Vector3<f32> = Vector3 {
    x: 0.0,
    y: 0.0,
    z: 0.0,
};

/// Tuning and unit designation for a [`SelectionController`]
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Field-of-view while nothing is focused
    pub default_fovy: Deg<f32>,
    /// Field-of-view to ease toward while a unit is focused
    pub zoom_fovy: Deg<f32>,
    /// Emissive color applied to highlighted meshes
    pub highlight_emissive: [f32; 3],
    /// Emissive intensity applied to highlighted meshes
    pub highlight_intensity: f32,
    /// Name of the unit whose click flips a light instead of selecting
    pub toggle_unit: Option<String>,
    /// Name of the light the toggle unit controls
    pub toggle_light: Option<String>,
    /// Name of the unit whose selection also opens the info panel
    pub info_unit: Option<String>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            default_fovy: Deg(75.0),
            zoom_fovy: Deg(35.0),
            highlight_emissive: [1.0, 1.0, 0.0],
            highlight_intensity: 0.6,
            toggle_unit: None,
            toggle_light: None,
            info_unit: None,
        }
    }
}

/// Interaction states of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusState {
    /// Free orbiting; clicks pick
    Idle,
    /// A unit holds the camera; clicks are ignored until release
    Focused,
}

/// What a click ended up doing
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// Click arrived while focus-locked and was dropped
    Ignored,
    /// Nothing under the cursor
    Miss,
    /// The hit subtree opted out of picking
    NotSelectable,
    /// The toggle unit flipped its light; carries the new visibility
    LightToggled(bool),
    /// A unit was selected and the camera is easing toward it
    Focused { unit: NodeId, info_opened: bool },
}

/// The pick-select-highlight-focus state machine
///
/// Owns the selection, the highlight side-table, and the picker cache for
/// one scene. The camera rig and scene are passed into each transition
/// rather than stored, so a controller can be built before either exists.
pub struct SelectionController {
    config: ControllerConfig,
    state: FocusState,
    selected: Option<NodeId>,
    highlight: HighlightTable,
    picker: ScenePicker,
}

impl SelectionController {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            state: FocusState::Idle,
            selected: None,
            highlight: HighlightTable::new(),
            picker: ScenePicker::new(),
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn state(&self) -> FocusState {
        self.state
    }

    pub fn is_focused(&self) -> bool {
        self.state == FocusState::Focused
    }

    /// Currently selected unit, if any
    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    /// Number of meshes currently carrying the highlight
    pub fn highlighted_mesh_count(&self) -> usize {
        self.highlight.len()
    }

    /// Handles a primary-button click at viewport coordinates
    ///
    /// Resolves the nearest pick to its top-level unit and either flips the
    /// toggle light, focuses the unit (optionally opening the info panel),
    /// or does nothing, per the rules in the module docs. No-ops entirely
    /// while focus-locked.
    pub fn handle_click(
        &mut self,
        screen_pos: (f32, f32),
        screen_size: (f32, f32),
        scene: &mut Scene,
        camera: &mut CameraManager,
        panel: &mut InfoPanel,
    ) -> ClickOutcome {
        if self.state == FocusState::Focused {
            return ClickOutcome::Ignored;
        }

        let hits = self
            .picker
            .pick_all(screen_pos, screen_size, &camera.camera, scene);
        let Some(nearest) = hits.first() else {
            return ClickOutcome::Miss;
        };

        if !scene.is_selectable(nearest.node) {
            return ClickOutcome::NotSelectable;
        }

        let Some(unit) = scene.selectable_unit_root(nearest.node) else {
            return ClickOutcome::Miss;
        };
        let unit_name = scene
            .node(unit)
            .map(|n| n.name.clone())
            .unwrap_or_default();

        // Undo the previous highlight before anything else happens
        if self.selected.take().is_some() {
            self.highlight.restore(scene);
        }

        if self.config.toggle_unit.as_deref() == Some(unit_name.as_str()) {
            let visible = self.flip_toggle_light(scene);
            return ClickOutcome::LightToggled(visible);
        }

        self.highlight.apply(
            scene,
            unit,
            self.config.highlight_emissive,
            self.config.highlight_intensity,
        );
        self.selected = Some(unit);

        let center = scene
            .world_bounds(unit)
            .map(|bounds| bounds.center())
            .unwrap_or(WORLD_CENTER);
        camera.camera.set_focus_target(center);
        camera.camera.set_target_fovy(self.config.zoom_fovy);
        self.state = FocusState::Focused;
        camera.controller.set_rotate_pan_enabled(false);

        let info_opened = self.config.info_unit.as_deref() == Some(unit_name.as_str());
        if info_opened {
            panel.open();
        }

        log::debug!("focused unit '{}'", unit_name);
        ClickOutcome::Focused { unit, info_opened }
    }

    /// Releases any focus and selection
    ///
    /// Wheel input and panel dismissal both land here. Safe to call from
    /// any state, any number of times: the camera targets are re-asserted
    /// and the highlight restore only touches saved entries.
    pub fn release(
        &mut self,
        scene: &mut Scene,
        camera: &mut CameraManager,
        panel: &mut InfoPanel,
    ) {
        camera.camera.set_focus_target(WORLD_CENTER);
        camera.camera.set_target_fovy(self.config.default_fovy);
        self.state = FocusState::Idle;
        camera.controller.set_rotate_pan_enabled(true);

        if self.selected.take().is_some() {
            self.highlight.restore(scene);
        }

        panel.close();
    }

    /// Converts a pending panel dismissal into a release
    ///
    /// Called once per frame by the application shell.
    pub fn poll_panel(
        &mut self,
        scene: &mut Scene,
        camera: &mut CameraManager,
        panel: &mut InfoPanel,
    ) {
        if panel.take_dismissed() {
            self.release(scene, camera, panel);
        }
    }

    /// Per-frame update, run in every state
    ///
    /// Eases the camera field-of-view toward its target and advances the
    /// decorative spinner nodes. Units that have not finished loading are
    /// simply absent from the arena and cost nothing.
    pub fn update_frame(&mut self, scene: &mut Scene, camera: &mut CameraManager) {
        camera.camera.update_zoom();
        scene.advance_spinners();
    }

    fn flip_toggle_light(&mut self, scene: &mut Scene) -> bool {
        let Some(light_name) = &self.config.toggle_light else {
            return false;
        };
        match scene.light_mut(light_name) {
            Some(light) => {
                light.visible = !light.visible;
                log::debug!("light '{}' toggled: {}", light.name, light.visible);
                light.visible
            }
            None => {
                log::warn!("toggle light '{}' is not in the scene", light_name);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::{CameraController, OrbitCamera};
    use crate::gfx::geometry::generate_cube;
    use crate::gfx::resources::material::Material;
    use crate::gfx::scene::{Light, Node, Selectable};
    use cgmath::{InnerSpace, Zero};

    const VIEWPORT: (f32, f32) = (800.0, 600.0);
    const CENTER: (f32, f32) = (400.0, 300.0);
    const CORNER: (f32, f32) = (1.0, 1.0);

    /// Camera at (x, 0, 6) looking down -Z at (x, 0, 0)
    fn camera_at(x: f32) -> CameraManager {
        let camera = OrbitCamera::new(6.0, 0.0, 0.0, Vector3::new(x, 0.0, 0.0), 800.0 / 600.0);
        CameraManager::new(camera, CameraController::new(0.005, 0.1))
    }

    /// Adds a unit with a painted cube shell at (x, 0, 0)
    fn add_cube_unit(scene: &mut Scene, name: &str, x: f32, material: &str) -> (NodeId, NodeId) {
        if !scene.material_manager.contains(material) {
            scene
                .material_manager
                .add_material(Material::new(material, [0.5, 0.5, 0.8, 1.0], 0.0, 0.6));
        }
        let unit =
            scene.add_node(Node::new(name).with_translation(Vector3::new(x, 0.0, 0.0)));
        let shell = scene.add_child(
            unit,
            Node::new("shell").with_mesh(generate_cube().into_mesh_with_material(material)),
        );
        (unit, shell)
    }

    /// Portfolio-style rig: unit "7" at origin, ring at x=3, info unit "1"
    /// at x=-3, a floor that opted out of picking, and the toggle light.
    fn showcase() -> (Scene, SelectionController, InfoPanel) {
        let mut scene = Scene::new();
        add_cube_unit(&mut scene, "7", 0.0, "porcelain");
        add_cube_unit(&mut scene, "ring", 3.0, "brass");
        add_cube_unit(&mut scene, "1", -3.0, "porcelain");
        scene.add_light(
            Light::point("showcase", [1.0, 1.0, 1.0], 40.0, 70.0)
                .with_position(Vector3::new(0.0, 5.0, 0.0)),
        );

        let controller = SelectionController::new(ControllerConfig {
            toggle_unit: Some("ring".to_string()),
            toggle_light: Some("showcase".to_string()),
            info_unit: Some("1".to_string()),
            ..Default::default()
        });
        let panel = InfoPanel::new("hola", "");
        (scene, controller, panel)
    }

    fn shell_material(scene: &Scene, shell: NodeId) -> Option<String> {
        scene
            .node(shell)
            .and_then(|n| n.mesh.as_ref())
            .and_then(|m| m.material_id.clone())
    }

    #[test]
    fn click_selects_highlights_and_focuses() {
        let (mut scene, mut controller, mut panel) = showcase();
        let mut camera = camera_at(0.0);
        let unit = scene.find_unit("7").unwrap();

        let outcome =
            controller.handle_click(CENTER, VIEWPORT, &mut scene, &mut camera, &mut panel);

        assert_eq!(
            outcome,
            ClickOutcome::Focused {
                unit,
                info_opened: false
            }
        );
        assert_eq!(controller.state(), FocusState::Focused);
        assert_eq!(controller.selected(), Some(unit));
        assert_eq!(camera.camera.target_fovy, Deg(35.0));
        assert!(!camera.controller.enable_rotate);
        assert!(!camera.controller.enable_pan);
        // Focus target is the unit's bounding-box center
        assert!(camera.camera.target.magnitude() < 1e-4);
        assert_eq!(controller.highlighted_mesh_count(), 1);
    }

    #[test]
    fn wheel_release_undoes_everything() {
        let (mut scene, mut controller, mut panel) = showcase();
        let mut camera = camera_at(0.0);
        let shell = scene.node(scene.find_unit("7").unwrap()).unwrap().children()[0];
        let original = shell_material(&scene, shell);

        controller.handle_click(CENTER, VIEWPORT, &mut scene, &mut camera, &mut panel);
        let highlighted = shell_material(&scene, shell);
        assert_ne!(highlighted, original);

        controller.release(&mut scene, &mut camera, &mut panel);

        assert_eq!(controller.state(), FocusState::Idle);
        assert_eq!(controller.selected(), None);
        assert_eq!(camera.camera.target_fovy, Deg(75.0));
        assert!(camera.controller.enable_rotate);
        assert!(camera.controller.enable_pan);
        assert!(camera.camera.target.is_zero());
        // Materials restored to the reference originals
        assert_eq!(shell_material(&scene, shell), original);
        assert!(!scene
            .material_manager
            .contains(highlighted.as_deref().unwrap()));
    }

    #[test]
    fn release_is_idempotent() {
        let (mut scene, mut controller, mut panel) = showcase();
        let mut camera = camera_at(0.0);

        controller.handle_click(CENTER, VIEWPORT, &mut scene, &mut camera, &mut panel);
        controller.release(&mut scene, &mut camera, &mut panel);

        let state_after_one = (
            controller.state(),
            controller.selected(),
            camera.camera.target_fovy,
            camera.controller.enable_rotate,
        );

        controller.release(&mut scene, &mut camera, &mut panel);

        assert_eq!(
            (
                controller.state(),
                controller.selected(),
                camera.camera.target_fovy,
                camera.controller.enable_rotate,
            ),
            state_after_one
        );
    }

    #[test]
    fn at_most_one_unit_highlighted_across_selections() {
        let (mut scene, mut controller, mut panel) = showcase();
        let seven_shell = scene.node(scene.find_unit("7").unwrap()).unwrap().children()[0];
        let one_shell = scene.node(scene.find_unit("1").unwrap()).unwrap().children()[0];
        let seven_original = shell_material(&scene, seven_shell);

        let mut camera = camera_at(0.0);
        controller.handle_click(CENTER, VIEWPORT, &mut scene, &mut camera, &mut panel);
        assert_eq!(controller.highlighted_mesh_count(), 1);

        controller.release(&mut scene, &mut camera, &mut panel);

        // Aim at the info unit and select it
        let mut camera = camera_at(-3.0);
        controller.handle_click(CENTER, VIEWPORT, &mut scene, &mut camera, &mut panel);

        assert_eq!(controller.highlighted_mesh_count(), 1);
        assert_eq!(shell_material(&scene, seven_shell), seven_original);
        assert_ne!(
            shell_material(&scene, one_shell).as_deref(),
            Some("porcelain")
        );
    }

    #[test]
    fn clicks_are_ignored_while_focused() {
        let (mut scene, mut controller, mut panel) = showcase();
        let mut camera = camera_at(0.0);

        controller.handle_click(CENTER, VIEWPORT, &mut scene, &mut camera, &mut panel);
        let selected = controller.selected();

        let outcome =
            controller.handle_click(CENTER, VIEWPORT, &mut scene, &mut camera, &mut panel);

        assert_eq!(outcome, ClickOutcome::Ignored);
        assert_eq!(controller.selected(), selected);
    }

    #[test]
    fn toggle_unit_is_ignored_while_focused() {
        let (mut scene, mut controller, mut panel) = showcase();
        let mut camera = camera_at(0.0);
        controller.handle_click(CENTER, VIEWPORT, &mut scene, &mut camera, &mut panel);

        let mut camera = camera_at(3.0);
        let outcome =
            controller.handle_click(CENTER, VIEWPORT, &mut scene, &mut camera, &mut panel);

        assert_eq!(outcome, ClickOutcome::Ignored);
        assert!(scene.light("showcase").unwrap().visible);
    }

    #[test]
    fn empty_space_click_is_a_miss() {
        let (mut scene, mut controller, mut panel) = showcase();
        let mut camera = camera_at(0.0);

        let outcome =
            controller.handle_click(CORNER, VIEWPORT, &mut scene, &mut camera, &mut panel);

        assert_eq!(outcome, ClickOutcome::Miss);
        assert_eq!(controller.state(), FocusState::Idle);
        assert_eq!(controller.selected(), None);
    }

    #[test]
    fn non_selectable_subtree_is_inert() {
        let mut scene = Scene::new();
        let unit = scene.add_node(
            Node::new("floor")
                .with_selectable(Selectable::No),
        );
        // Even an explicit Yes below the opt-out stays unpickable
        let shell = scene.add_child(
            unit,
            Node::new("tiles")
                .with_selectable(Selectable::Yes)
                .with_mesh(generate_cube().into_mesh()),
        );
        let mut controller = SelectionController::new(ControllerConfig::default());
        let mut panel = InfoPanel::new("hola", "");
        let mut camera = camera_at(0.0);
        let before = shell_material(&scene, shell);

        let outcome =
            controller.handle_click(CENTER, VIEWPORT, &mut scene, &mut camera, &mut panel);

        assert_eq!(outcome, ClickOutcome::NotSelectable);
        assert_eq!(controller.state(), FocusState::Idle);
        assert_eq!(controller.selected(), None);
        assert_eq!(shell_material(&scene, shell), before);
        assert_eq!(camera.camera.target_fovy, Deg(75.0));
    }

    #[test]
    fn toggle_unit_flips_light_and_never_selects() {
        let (mut scene, mut controller, mut panel) = showcase();
        let mut camera = camera_at(3.0);
        assert!(scene.light("showcase").unwrap().visible);

        let first =
            controller.handle_click(CENTER, VIEWPORT, &mut scene, &mut camera, &mut panel);
        assert_eq!(first, ClickOutcome::LightToggled(false));
        assert_eq!(controller.state(), FocusState::Idle);
        assert_eq!(controller.selected(), None);

        let second =
            controller.handle_click(CENTER, VIEWPORT, &mut scene, &mut camera, &mut panel);
        assert_eq!(second, ClickOutcome::LightToggled(true));
        assert_eq!(controller.state(), FocusState::Idle);
        assert_eq!(controller.selected(), None);
        // Back where it started
        assert!(scene.light("showcase").unwrap().visible);
        assert_eq!(controller.highlighted_mesh_count(), 0);
    }

    #[test]
    fn info_unit_opens_panel_and_dismissal_releases() {
        let (mut scene, mut controller, mut panel) = showcase();
        let mut camera = camera_at(-3.0);
        let unit = scene.find_unit("1").unwrap();

        let outcome =
            controller.handle_click(CENTER, VIEWPORT, &mut scene, &mut camera, &mut panel);

        assert_eq!(
            outcome,
            ClickOutcome::Focused {
                unit,
                info_opened: true
            }
        );
        assert!(panel.is_visible());
        assert_eq!(controller.state(), FocusState::Focused);

        // Closing the panel behaves exactly like wheel input
        panel.dismiss();
        controller.poll_panel(&mut scene, &mut camera, &mut panel);

        assert_eq!(controller.state(), FocusState::Idle);
        assert_eq!(controller.selected(), None);
        assert!(!panel.is_visible());
        assert_eq!(camera.camera.target_fovy, Deg(75.0));
        assert!(camera.controller.enable_rotate);
    }

    #[test]
    fn update_frame_eases_fovy_and_spins_decorations() {
        let (mut scene, mut controller, mut panel) = showcase();
        let mut camera = camera_at(0.0);
        let spinner = scene.add_node(
            Node::new("halo")
                .with_mesh(generate_cube().into_mesh())
                .with_translation(Vector3::new(0.0, 8.0, 0.0))
                .with_spin(Vector3::new(0.005, 0.0, 0.007)),
        );

        controller.handle_click(CENTER, VIEWPORT, &mut scene, &mut camera, &mut panel);
        let fovy_before = camera.camera.fovy.0;

        controller.update_frame(&mut scene, &mut camera);

        assert!(camera.camera.fovy.0 < fovy_before);
        let halo = scene.node(spinner).unwrap();
        assert!((halo.rotation.x - 0.005).abs() < 1e-6);
    }
}
