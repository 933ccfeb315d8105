//! Material system
//!
//! Provides material definitions and centralized management. Materials are
//! stored in [`MaterialManager`] and meshes reference them by ID, so the same
//! material can be shared between any number of nodes and swapped without
//! touching geometry.

use std::collections::HashMap;

/// Material ID for referencing materials
pub type MaterialId = String;

/// Material definition with PBR-style properties
///
/// Materials are stored centrally in [`MaterialManager`] and shared between
/// nodes. The emissive channel doubles as the selection highlight: the
/// interaction layer clones a material and raises its emissive values rather
/// than mutating the original.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub base_color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            base_color: [0.8, 0.8, 0.8, 1.0],
            metallic: 0.0,
            roughness: 0.5,
            emissive: [0.0, 0.0, 0.0],
            emissive_intensity: 0.0,
        }
    }
}

impl Material {
    /// Creates a new material with basic PBR properties
    ///
    /// # Arguments
    /// * `name` - Unique name for this material
    /// * `base_color` - RGBA base color
    /// * `metallic` - Metallic factor (0.0 = dielectric, 1.0 = metallic)
    /// * `roughness` - Surface roughness (0.0 = mirror, 1.0 = rough)
    pub fn new(name: &str, base_color: [f32; 4], metallic: f32, roughness: f32) -> Self {
        Self {
            name: name.to_string(),
            base_color,
            metallic: metallic.clamp(0.0, 1.0),
            roughness: roughness.clamp(0.0, 1.0),
            emissive: [0.0, 0.0, 0.0],
            emissive_intensity: 0.0,
        }
    }

    /// Builder pattern: Set base color from RGB values
    pub fn with_color(mut self, r: f32, g: f32, b: f32) -> Self {
        self.base_color = [r, g, b, self.base_color[3]];
        self
    }

    /// Builder pattern: Set alpha transparency
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.base_color[3] = alpha.clamp(0.0, 1.0);
        self
    }

    /// Builder pattern: Set metallic factor
    pub fn with_metallic(mut self, metallic: f32) -> Self {
        self.metallic = metallic.clamp(0.0, 1.0);
        self
    }

    /// Builder pattern: Set roughness factor
    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness.clamp(0.0, 1.0);
        self
    }

    /// Builder pattern: Set emissive color and intensity
    pub fn with_emission(mut self, r: f32, g: f32, b: f32, intensity: f32) -> Self {
        self.emissive = [r, g, b];
        self.emissive_intensity = intensity;
        self
    }
}

/// Manages all materials in the scene
///
/// Centralized storage for all materials. Nodes reference materials by ID
/// rather than storing material data directly, so restoring a mesh to its
/// pre-highlight material is a matter of restoring the ID.
pub struct MaterialManager {
    materials: HashMap<MaterialId, Material>,
    default_material_id: MaterialId,
}

impl MaterialManager {
    /// Creates a new material manager with a default material
    pub fn new() -> Self {
        let mut manager = Self {
            materials: HashMap::new(),
            default_material_id: "default".to_string(),
        };

        manager
            .materials
            .insert("default".to_string(), Material::default());

        manager
    }

    /// Adds a material to the library, keyed by its name
    pub fn add_material(&mut self, material: Material) {
        self.materials.insert(material.name.clone(), material);
    }

    /// Registers a material under an explicit ID
    ///
    /// Used for derived materials (highlight clones) whose ID differs from
    /// the source material's name.
    pub fn insert_material(&mut self, id: &str, material: Material) {
        self.materials.insert(id.to_string(), material);
    }

    /// Removes a material by ID, returning it if present
    ///
    /// The default material cannot be removed.
    pub fn remove_material(&mut self, id: &MaterialId) -> Option<Material> {
        if *id == self.default_material_id {
            return None;
        }
        self.materials.remove(id)
    }

    /// Gets a material by ID
    pub fn get_material(&self, id: &MaterialId) -> Option<&Material> {
        self.materials.get(id)
    }

    /// Gets a mutable material by ID
    pub fn get_material_mut(&mut self, id: &MaterialId) -> Option<&mut Material> {
        self.materials.get_mut(id)
    }

    /// Returns true if a material with this ID exists
    pub fn contains(&self, id: &str) -> bool {
        self.materials.contains_key(id)
    }

    /// Gets the default material
    pub fn get_default_material(&self) -> &Material {
        self.materials
            .get(&self.default_material_id)
            .expect("default material is always present")
    }

    /// Gets material for a mesh with fallback to default
    ///
    /// This is the main lookup used while drawing or inspecting a mesh,
    /// handling the cases where the mesh has no material assigned or the
    /// assigned material doesn't exist.
    pub fn get_material_for_mesh(&self, material_id: Option<&MaterialId>) -> &Material {
        match material_id {
            Some(id) => self
                .get_material(id)
                .unwrap_or_else(|| self.get_default_material()),
            None => self.get_default_material(),
        }
    }

    /// Creates a new material and adds it to the library
    ///
    /// # Returns
    /// Mutable reference to the created material
    pub fn create_material(&mut self, name: &str) -> &mut Material {
        let material = Material::new(name, [0.8, 0.8, 0.8, 1.0], 0.0, 0.5);
        self.materials.insert(name.to_string(), material);
        self.materials.get_mut(name).expect("just inserted")
    }

    /// Lists all material IDs
    pub fn list_materials(&self) -> Vec<&MaterialId> {
        self.materials.keys().collect()
    }
}

impl Default for MaterialManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_material_falls_back_to_default() {
        let manager = MaterialManager::new();
        let missing = "does-not-exist".to_string();
        assert_eq!(
            manager.get_material_for_mesh(Some(&missing)).name,
            "Default"
        );
        assert_eq!(manager.get_material_for_mesh(None).name, "Default");
    }

    #[test]
    fn default_material_cannot_be_removed() {
        let mut manager = MaterialManager::new();
        assert!(manager.remove_material(&"default".to_string()).is_none());
        assert!(manager.contains("default"));
    }

    #[test]
    fn derived_ids_are_independent_of_names() {
        let mut manager = MaterialManager::new();
        let clone = Material::new("brass", [0.8, 0.6, 0.2, 1.0], 1.0, 0.3)
            .with_emission(1.0, 1.0, 0.0, 0.6);
        manager.insert_material("brass#highlight", clone);

        assert!(manager.contains("brass#highlight"));
        assert!(!manager.contains("brass"));
        let removed = manager.remove_material(&"brass#highlight".to_string());
        assert_eq!(removed.map(|m| m.name), Some("brass".to_string()));
    }
}
