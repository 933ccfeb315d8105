//! Light definitions for the scene

use cgmath::{Vector3, Zero};

/// Kind of light source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind {
    /// Uniform fill light with no position or direction
    Ambient,
    /// Sun-like light shining along a direction
    Directional,
    /// Omnidirectional light with an attenuation range
    Point,
}

/// A named light source
///
/// Lights live beside the node arena rather than inside it; the interaction
/// layer flips `visible` on a designated light when the toggle unit is
/// clicked.
#[derive(Debug, Clone)]
pub struct Light {
    pub name: String,
    pub kind: LightKind,
    pub color: [f32; 3],
    pub intensity: f32,
    /// World-space position (point lights)
    pub position: Vector3<f32>,
    /// Normalized direction (directional lights)
    pub direction: Vector3<f32>,
    /// Attenuation range (point lights)
    pub range: f32,
    pub visible: bool,
}

impl Light {
    /// Uniform ambient fill
    pub fn ambient(name: &str, color: [f32; 3], intensity: f32) -> Self {
        Self {
            name: name.to_string(),
            kind: LightKind::Ambient,
            color,
            intensity,
            position: Vector3::zero(),
            direction: Vector3::new(0.0, -1.0, 0.0),
            range: f32::INFINITY,
            visible: true,
        }
    }

    /// Directional light shining from `position` toward the origin
    pub fn directional(name: &str, color: [f32; 3], intensity: f32) -> Self {
        Self {
            name: name.to_string(),
            kind: LightKind::Directional,
            color,
            intensity,
            position: Vector3::zero(),
            direction: Vector3::new(0.0, -1.0, 0.0),
            range: f32::INFINITY,
            visible: true,
        }
    }

    /// Point light with an attenuation range
    pub fn point(name: &str, color: [f32; 3], intensity: f32, range: f32) -> Self {
        Self {
            name: name.to_string(),
            kind: LightKind::Point,
            color,
            intensity,
            position: Vector3::zero(),
            direction: Vector3::new(0.0, -1.0, 0.0),
            range,
            visible: true,
        }
    }

    /// Builder pattern: set the world-space position
    pub fn with_position(mut self, position: Vector3<f32>) -> Self {
        self.position = position;
        self
    }

    /// Builder pattern: set the direction
    pub fn with_direction(mut self, direction: Vector3<f32>) -> Self {
        self.direction = direction;
        self
    }
}
