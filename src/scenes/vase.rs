//! Flower-vase scene
//!
//! Four model loads and a two-light rig; nothing here is interactive, the
//! pieces simply assemble as their loads complete.

use std::f32::consts::PI;
use std::path::Path;

use cgmath::{InnerSpace, Vector3};

use crate::assets::{AssetLoader, LoadRequest};
use crate::gfx::scene::{Light, Scene};

/// Populates the flower-vase scene and queues its model loads
///
/// Assets are looked up as `vase.obj`, `stem.obj`, `flower.obj`, and
/// `accent.obj` under `asset_dir`. Each piece sits at the origin, turned to
/// face the camera.
pub fn vase(scene: &mut Scene, loader: &mut AssetLoader, asset_dir: &Path) {
    scene.add_light(Light::ambient("fill", [1.0, 1.0, 1.0], 0.6));
    scene.add_light(
        Light::directional("key", [1.0, 1.0, 1.0], 1.0)
            .with_position(Vector3::new(5.0, 5.0, 5.0))
            .with_direction(Vector3::new(-5.0, -5.0, -5.0).normalize()),
    );

    for name in ["vase", "stem", "flower", "accent"] {
        loader.request(
            LoadRequest::new(asset_dir.join(format!("{name}.obj")), name)
                .with_rotation(Vector3::new(0.0, PI, 0.0)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queues_four_pieces_and_two_lights() {
        let mut scene = Scene::new();
        let mut loader = AssetLoader::new();

        vase(&mut scene, &mut loader, Path::new("/nonexistent"));

        assert_eq!(loader.in_flight(), 4);
        assert!(scene.light("fill").is_some());
        assert!(scene.light("key").is_some());
        // Nothing is in the arena until loads land
        assert_eq!(scene.node_count(), 0);
    }
}
