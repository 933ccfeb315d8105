//! # Asset Loading
//!
//! Asynchronous OBJ/MTL model loading. Each [`LoadRequest`] runs on its own
//! worker thread and reports back over a channel; the application shell
//! polls [`AssetLoader::poll_completed`] once per frame and installs
//! whatever has finished. Loads complete in no particular order and a frame
//! may render before, during, or after any of them — the scene simply grows
//! as results arrive.
//!
//! A failed load is logged and abandoned. There is no retry and no way to
//! cancel a request in flight.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use cgmath::{Vector3, Zero};
use thiserror::Error;

use crate::gfx::resources::material::Material;
use crate::gfx::scene::{Mesh, Node, NodeId, Scene, Selectable};

/// Errors a single load request can end with
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to load model {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: tobj::LoadError,
    },
    #[error("model {path} contains no geometry")]
    Empty { path: String },
}

/// One named asset to load and where to put it
#[derive(Debug, Clone)]
pub struct LoadRequest {
    pub path: PathBuf,
    /// Name for the unit node the asset is installed under
    pub name: String,
    pub selectable: Selectable,
    pub position: Vector3<f32>,
    /// XYZ Euler rotation in radians
    pub rotation: Vector3<f32>,
    /// Per-frame spin increment for decorative units
    pub spin: Option<Vector3<f32>>,
}

impl LoadRequest {
    pub fn new(path: impl Into<PathBuf>, name: &str) -> Self {
        Self {
            path: path.into(),
            name: name.to_string(),
            selectable: Selectable::Unset,
            position: Vector3::zero(),
            rotation: Vector3::zero(),
            spin: None,
        }
    }

    /// Builder pattern: set the selectability of the installed unit
    pub fn with_selectable(mut self, selectable: Selectable) -> Self {
        self.selectable = selectable;
        self
    }

    /// Builder pattern: set the installed unit's position
    pub fn with_position(mut self, position: Vector3<f32>) -> Self {
        self.position = position;
        self
    }

    /// Builder pattern: set the installed unit's rotation (XYZ Euler, radians)
    pub fn with_rotation(mut self, rotation: Vector3<f32>) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder pattern: give the installed unit a per-frame spin
    pub fn with_spin(mut self, spin: Vector3<f32>) -> Self {
        self.spin = Some(spin);
        self
    }
}

/// A parsed model ready to be installed into a scene
///
/// Produced on a worker thread; owns its data outright until
/// [`install`](Self::install) hands it to the scene.
pub struct LoadedAsset {
    request: LoadRequest,
    materials: Vec<Material>,
    meshes: Vec<(String, Mesh)>,
}

impl LoadedAsset {
    /// Installs the asset as a new top-level unit and returns its ID
    ///
    /// Materials already present in the scene keep their existing
    /// definition; new ones are registered by name.
    pub fn install(self, scene: &mut Scene) -> NodeId {
        for material in self.materials {
            if !scene.material_manager.contains(&material.name) {
                scene.material_manager.add_material(material);
            }
        }

        let mut unit = Node::new(&self.request.name)
            .with_selectable(self.request.selectable)
            .with_translation(self.request.position)
            .with_rotation(self.request.rotation);
        if let Some(spin) = self.request.spin {
            unit = unit.with_spin(spin);
        }
        let unit = scene.add_node(unit);

        for (name, mesh) in self.meshes {
            scene.add_child(unit, Node::new(&name).with_mesh(mesh));
        }

        unit
    }

    pub fn name(&self) -> &str {
        &self.request.name
    }
}

struct LoadCompletion {
    name: String,
    result: Result<LoadedAsset, AssetError>,
}

/// Fire-and-forget model loader
///
/// Requests fan out to worker threads; completions funnel back through an
/// `mpsc` channel and are drained on the render thread. The loader never
/// touches the scene itself.
pub struct AssetLoader {
    sender: Sender<LoadCompletion>,
    receiver: Receiver<LoadCompletion>,
    in_flight: usize,
}

impl AssetLoader {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            in_flight: 0,
        }
    }

    /// Starts loading an asset in the background
    pub fn request(&mut self, request: LoadRequest) {
        let sender = self.sender.clone();
        self.in_flight += 1;
        log::debug!("loading asset '{}' from {}", request.name, request.path.display());
        thread::spawn(move || {
            let name = request.name.clone();
            let result = load_obj_asset(request);
            // A closed receiver means the viewer is gone; nothing to deliver to
            let _ = sender.send(LoadCompletion { name, result });
        });
    }

    /// Drains every completion that has arrived since the last poll
    ///
    /// Failed loads are reported here — one error line each — and dropped;
    /// the scene keeps whatever loaded successfully.
    pub fn poll_completed(&mut self) -> Vec<LoadedAsset> {
        let mut ready = Vec::new();
        while let Ok(completion) = self.receiver.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            match completion.result {
                Ok(asset) => {
                    log::info!("asset '{}' loaded", completion.name);
                    ready.push(asset);
                }
                Err(err) => {
                    log::error!("failed to load asset '{}': {}", completion.name, err);
                }
            }
        }
        ready
    }

    /// Number of requests still running
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight == 0
    }
}

impl Default for AssetLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses an OBJ/MTL pair into meshes and materials
///
/// Runs on a worker thread. Materials come from the MTL file where one
/// exists; meshes without usable normals get smooth normals computed from
/// their faces.
fn load_obj_asset(request: LoadRequest) -> Result<LoadedAsset, AssetError> {
    let path_display = request.path.display().to_string();

    let (models, materials) = tobj::load_obj(
        &request.path,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
    )
    .map_err(|source| AssetError::Load {
        path: path_display.clone(),
        source,
    })?;

    let materials = materials.unwrap_or_else(|_| {
        log::debug!("no MTL file found for {}, using default materials", path_display);
        Vec::new()
    });

    let mut converted = Vec::new();
    for (i, mtl) in materials.iter().enumerate() {
        let material_name = if mtl.name.is_empty() {
            format!("material_{}", i)
        } else {
            mtl.name.clone()
        };

        let diffuse = mtl.diffuse.unwrap_or([0.8, 0.8, 0.8]);
        let material = Material::new(
            &material_name,
            [
                diffuse[0],
                diffuse[1],
                diffuse[2],
                mtl.dissolve.unwrap_or(1.0), // Alpha from dissolve
            ],
            0.0, // MTL has no direct metallic value
            1.0 - (mtl.shininess.unwrap_or(32.0) / 128.0).clamp(0.0, 1.0), // Shininess to roughness
        );
        converted.push(material);
    }

    let mut meshes = Vec::new();
    for model in models.iter() {
        let mesh = &model.mesh;
        if mesh.positions.is_empty() {
            continue;
        }

        let positions: Vec<[f32; 3]> = mesh
            .positions
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();

        let normals: Vec<[f32; 3]> =
            if !mesh.normals.is_empty() && mesh.normals.len() == mesh.positions.len() {
                mesh.normals
                    .chunks_exact(3)
                    .map(|c| [c[0], c[1], c[2]])
                    .collect()
            } else {
                Mesh::calculate_face_normals(&positions, &mesh.indices)
            };

        let mut our_mesh = Mesh::new(positions, normals, mesh.indices.clone());
        if let Some(material_id) = mesh.material_id {
            if material_id < converted.len() {
                our_mesh.set_material(&converted[material_id].name);
            }
        }

        let mesh_name = if model.name.is_empty() {
            format!("{}-{}", request.name, meshes.len())
        } else {
            model.name.clone()
        };
        meshes.push((mesh_name, our_mesh));
    }

    if meshes.is_empty() {
        return Err(AssetError::Empty { path: path_display });
    }

    Ok(LoadedAsset {
        request,
        materials: converted,
        meshes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::{Duration, Instant};

    fn drain_loader(loader: &mut AssetLoader) -> Vec<LoadedAsset> {
        let mut ready = Vec::new();
        let deadline = Instant::now() + Duration::from_secs(5);
        while loader.in_flight() > 0 && Instant::now() < deadline {
            ready.extend(loader.poll_completed());
            thread::sleep(Duration::from_millis(5));
        }
        ready.extend(loader.poll_completed());
        ready
    }

    fn temp_obj(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("vitrine-{}-{}.obj", name, std::process::id()));
        fs::write(&path, contents).expect("temp file is writable");
        path
    }

    #[test]
    fn loaded_asset_installs_as_a_unit() {
        let path = temp_obj(
            "triangle",
            "v 0.0 0.0 0.0\nv 1.0 0.0 0.0\nv 0.0 1.0 0.0\nf 1 2 3\n",
        );

        let mut loader = AssetLoader::new();
        loader.request(
            LoadRequest::new(&path, "exhibit")
                .with_selectable(Selectable::Yes)
                .with_position(Vector3::new(0.0, -0.1, 0.0)),
        );

        let ready = drain_loader(&mut loader);
        assert_eq!(ready.len(), 1);
        assert!(loader.is_idle());

        let mut scene = Scene::new();
        let unit = ready.into_iter().next().unwrap().install(&mut scene);

        let node = scene.node(unit).unwrap();
        assert_eq!(node.name, "exhibit");
        assert_eq!(node.selectable, Selectable::Yes);
        assert_eq!(node.translation, Vector3::new(0.0, -0.1, 0.0));
        assert_eq!(node.children().len(), 1);

        let shell = scene.node(node.children()[0]).unwrap();
        let mesh = shell.mesh.as_ref().unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn missing_file_is_reported_and_dropped() {
        let mut loader = AssetLoader::new();
        loader.request(LoadRequest::new("/definitely/not/here.obj", "ghost"));

        let ready = drain_loader(&mut loader);
        assert!(ready.is_empty());
        assert!(loader.is_idle());
    }

    #[test]
    fn geometry_free_model_is_an_error() {
        let path = temp_obj("pointless", "v 0.0 0.0 0.0\n");

        let mut loader = AssetLoader::new();
        loader.request(LoadRequest::new(&path, "empty"));

        let ready = drain_loader(&mut loader);
        assert!(ready.is_empty());

        let _ = fs::remove_file(path);
    }

    #[test]
    fn completions_supersede_nothing_and_share_the_scene() {
        // Two independent loads landing in either order both install
        let path_a = temp_obj(
            "unit-a",
            "v 0.0 0.0 0.0\nv 1.0 0.0 0.0\nv 0.0 1.0 0.0\nf 1 2 3\n",
        );
        let path_b = temp_obj(
            "unit-b",
            "v 0.0 0.0 1.0\nv 1.0 0.0 1.0\nv 0.0 1.0 1.0\nf 1 2 3\n",
        );

        let mut loader = AssetLoader::new();
        loader.request(LoadRequest::new(&path_a, "a"));
        loader.request(LoadRequest::new(&path_b, "b"));

        let ready = drain_loader(&mut loader);
        assert_eq!(ready.len(), 2);

        let mut scene = Scene::new();
        for asset in ready {
            asset.install(&mut scene);
        }
        assert_eq!(scene.units().len(), 2);
        assert!(scene.find_unit("a").is_some());
        assert!(scene.find_unit("b").is_some());

        let _ = fs::remove_file(path_a);
        let _ = fs::remove_file(path_b);
    }
}
