//! Scene types for the path tracer.
//!
//! The scene is plain data: a list of spheres and a list of materials,
//! bound together by index. The renderer only ever reads it; mutation
//! happens between render calls, and index validity is checked at the
//! editing/loading boundary via [`Scene::validate`], never in the hot path.

use std::path::Path;

use glint_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading or validating a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scene decoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("sphere {sphere} references material {material_index}, but the scene has {material_count} materials")]
    MaterialIndexOutOfRange {
        sphere: usize,
        material_index: usize,
        material_count: usize,
    },

    #[error("sphere {sphere} has non-positive radius {radius}")]
    NonPositiveRadius { sphere: usize, radius: f32 },
}

pub type SceneResult<T> = Result<T, SceneError>;

/// A surface material.
///
/// Channel values are conceptually in [0, 1] but are not clamped at rest;
/// the renderer clamps the final displayed estimate instead.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Material {
    /// Diffuse reflectance color, attenuating light at each bounce
    pub albedo: Vec3,

    /// Scatter roughness: 1 = fully diffuse, 0 = mirror reflection
    pub roughness: f32,

    /// Emission color (RGB, for light-emitting surfaces)
    pub emission_color: Vec3,

    /// Emission strength multiplier applied to `emission_color`
    pub emission_power: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            albedo: Vec3::splat(0.8),
            roughness: 1.0,
            emission_color: Vec3::ZERO,
            emission_power: 0.0,
        }
    }
}

impl Material {
    /// Create a new diffuse material with the given albedo.
    pub fn new(albedo: Vec3) -> Self {
        Self {
            albedo,
            ..Default::default()
        }
    }

    /// Make this material emissive.
    pub fn with_emission(mut self, color: Vec3, power: f32) -> Self {
        self.emission_color = color;
        self.emission_power = power;
        self
    }

    /// Set the scatter roughness.
    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness;
        self
    }

    /// Effective emitted radiance: emission color scaled by its strength.
    #[inline]
    pub fn emission(&self) -> Vec3 {
        self.emission_color * self.emission_power
    }

    /// Check if this material contributes light on its own.
    pub fn is_emissive(&self) -> bool {
        self.emission_power != 0.0 && self.emission_color.length_squared() > 0.0
    }
}

/// A sphere primitive.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Sphere {
    /// Center position in world space
    pub center: Vec3,

    /// Radius, must be > 0
    pub radius: f32,

    /// Index into [`Scene::materials`]
    pub material_index: usize,
}

impl Default for Sphere {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            radius: 0.5,
            material_index: 0,
        }
    }
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material_index: usize) -> Self {
        Self {
            center,
            radius,
            material_index,
        }
    }
}

/// A complete scene: ordered spheres and ordered materials.
///
/// Invariant at render time: every sphere's `material_index` is a valid
/// index into `materials`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Scene {
    pub spheres: Vec<Sphere>,
    pub materials: Vec<Material>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a material to the scene and return its index.
    pub fn add_material(&mut self, material: Material) -> usize {
        let index = self.materials.len();
        self.materials.push(material);
        index
    }

    /// Add a sphere to the scene.
    pub fn add_sphere(&mut self, sphere: Sphere) {
        self.spheres.push(sphere);
    }

    /// Check the cross-references the renderer relies on.
    ///
    /// The renderer indexes materials unchecked in its hot path, so every
    /// mutation surface must leave the scene in a state where this passes.
    pub fn validate(&self) -> SceneResult<()> {
        for (index, sphere) in self.spheres.iter().enumerate() {
            if sphere.material_index >= self.materials.len() {
                return Err(SceneError::MaterialIndexOutOfRange {
                    sphere: index,
                    material_index: sphere.material_index,
                    material_count: self.materials.len(),
                });
            }
            if sphere.radius <= 0.0 {
                return Err(SceneError::NonPositiveRadius {
                    sphere: index,
                    radius: sphere.radius,
                });
            }
        }
        Ok(())
    }

    /// Parse a scene from a JSON string and validate it.
    pub fn from_json_str(json: &str) -> SceneResult<Self> {
        let scene: Scene = serde_json::from_str(json)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Load and validate a scene from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> SceneResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serialize the scene to pretty-printed JSON.
    pub fn to_json_string(&self) -> SceneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
