//! Glint Core - scene data for the CPU path tracer.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `Sphere`, `Material`
//! - **Scene files**: JSON (de)serialization with load-time validation
//!
//! # Example
//!
//! ```ignore
//! use glint_core::Scene;
//!
//! let scene = Scene::load("scene.json")?;
//! println!("Loaded {} spheres, {} materials",
//!     scene.spheres.len(),
//!     scene.materials.len());
//! ```

pub mod scene;

// Re-export commonly used types
pub use scene::{Material, Scene, SceneError, SceneResult, Sphere};
