//! Glint Renderer - progressive CPU path tracing.
//!
//! A Monte Carlo path tracer over implicit spheres. Each call to
//! [`Renderer::render`] computes one radiance sample per pixel and folds it
//! into a running per-pixel average, so the image refines as frames
//! accumulate.

mod camera;
mod integrator;
mod intersect;
mod renderer;
mod sampler;
mod sink;

pub use camera::{Camera, PerspectiveCamera};
pub use integrator::integrate;
pub use intersect::{trace_ray, HitPayload};
pub use renderer::{to_rgba, RenderSettings, Renderer};
pub use sampler::Sampler;
pub use sink::{CpuImage, ImageSink};

/// Re-export math types used in the public API
pub use glint_math::{Ray, Vec3, Vec4};
