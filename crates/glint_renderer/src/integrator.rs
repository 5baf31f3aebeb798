//! Per-pixel light transport.

use glint_core::Scene;
use glint_math::{Ray, Vec3, Vec4};

use crate::{trace_ray, RenderSettings, Sampler};

/// Compute one RGBA radiance sample for a pixel.
///
/// Walks the primary ray through up to `settings.max_bounces` surface
/// interactions. Each hit adds the surface's emitted radiance weighted by
/// the path throughput, then attenuates the throughput by the surface
/// albedo. A miss ends the path, contributing `settings.sky_color` (if one
/// is configured) weighted by the throughput.
pub fn integrate(
    scene: &Scene,
    primary: Ray,
    pixel_index: u32,
    frame_index: u32,
    settings: &RenderSettings,
) -> Vec4 {
    let mut ray = primary;
    let mut light = Vec3::ZERO;
    let mut throughput = Vec3::ONE;
    let mut sampler = Sampler::for_pixel(pixel_index, frame_index);

    for bounce in 0..settings.max_bounces {
        sampler.advance(bounce);

        let Some(hit) = trace_ray(&ray, scene) else {
            if let Some(sky) = settings.sky_color {
                light += sky * throughput;
            }
            break;
        };

        let sphere = &scene.spheres[hit.object_index];
        let material = &scene.materials[sphere.material_index];

        light += material.emission() * throughput;
        throughput *= material.albedo;

        // Bias the new origin off the surface so the next trace cannot
        // immediately re-hit it.
        ray.origin = hit.world_position + hit.world_normal * settings.normal_bias;
        ray.direction = scatter(ray.direction, hit.world_normal, material.roughness, &mut sampler);
    }

    light.extend(1.0)
}

/// Pick the next bounce direction.
///
/// roughness 1 is the hemisphere-perturbed diffuse scatter
/// (normal + unit-sphere sample), roughness 0 the mirror reflection;
/// in between the two are blended.
fn scatter(incoming: Vec3, normal: Vec3, roughness: f32, sampler: &mut Sampler) -> Vec3 {
    let diffuse = normal + sampler.unit_sphere();
    let reflected = reflect(incoming, normal);
    let direction = reflected.lerp(diffuse, roughness.clamp(0.0, 1.0));

    // Degenerate when the sphere sample cancels the blend exactly.
    if direction.length_squared() < 1e-8 {
        normal
    } else {
        direction.normalize()
    }
}

/// Reflect a vector about a normal.
#[inline]
fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}
