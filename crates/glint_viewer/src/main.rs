//! Headless progressive render host.
//!
//! Drives the renderer for a number of accumulated frames and writes the
//! result to a PNG. Usage:
//!
//! ```text
//! glint_viewer [scene.json] [frames]
//! ```
//!
//! Without a scene file a built-in demo scene is rendered.

use anyhow::{Context, Result};
use glint_core::{Material, Scene, Sphere};
use glint_math::Vec3;
use glint_renderer::{CpuImage, PerspectiveCamera, Renderer};
use rand::Rng;
use std::time::Instant;

const WIDTH: u32 = 800;
const HEIGHT: u32 = 450;
const OUTPUT_PATH: &str = "output.png";

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let scene = match args.next() {
        Some(path) => Scene::load(&path).with_context(|| format!("loading scene {path}"))?,
        None => demo_scene(),
    };
    let frames: u32 = match args.next() {
        Some(count) => count.parse().context("frame count must be an integer")?,
        None => 100,
    };

    log::info!(
        "rendering {} spheres / {} materials at {WIDTH}x{HEIGHT} for {frames} frames",
        scene.spheres.len(),
        scene.materials.len()
    );

    let mut camera = PerspectiveCamera::new(45.0, 0.1, 100.0)
        .with_position(Vec3::new(0.0, 1.0, 7.0))
        .looking_at(Vec3::new(0.0, 0.0, 0.0));
    camera.resize(WIDTH, HEIGHT);

    let mut renderer = Renderer::new(CpuImage::new());
    renderer.on_resize(WIDTH, HEIGHT);

    let start = Instant::now();
    for frame in 1..=frames {
        let frame_start = Instant::now();
        renderer.render(&scene, &camera);
        log::debug!("frame {frame}/{frames} in {:?}", frame_start.elapsed());
    }
    log::info!("rendered {frames} frames in {:?}", start.elapsed());

    save_png(renderer.sink(), OUTPUT_PATH)
        .with_context(|| format!("writing {OUTPUT_PATH}"))?;
    log::info!("saved {OUTPUT_PATH}");

    Ok(())
}

/// A lit demo scene: matte centerpiece, emissive sun, ground sphere and a
/// field of small randomized spheres.
fn demo_scene() -> Scene {
    let mut scene = Scene::new();

    let matte = scene.add_material(Material::new(Vec3::new(1.0, 0.0, 1.0)));
    let ground = scene.add_material(Material::new(Vec3::new(0.2, 0.3, 1.0)));
    let sun = scene.add_material(
        Material::new(Vec3::new(0.8, 0.5, 0.2)).with_emission(Vec3::new(0.8, 0.5, 0.2), 8.0),
    );

    scene.add_sphere(Sphere::new(Vec3::ZERO, 1.0, matte));
    scene.add_sphere(Sphere::new(Vec3::new(0.0, -101.0, 0.0), 100.0, ground));
    scene.add_sphere(Sphere::new(Vec3::new(12.0, 6.0, -16.0), 8.0, sun));

    let mut rng = rand::thread_rng();
    for index in 0..12 {
        let albedo = Vec3::new(rng.gen(), rng.gen(), rng.gen());
        let material = scene.add_material(
            Material::new(albedo).with_roughness(0.5 + 0.5 * rng.gen::<f32>()),
        );

        let angle = index as f32 / 12.0 * std::f32::consts::TAU;
        let distance = 2.5 + 2.0 * rng.gen::<f32>();
        let radius = 0.2 + 0.2 * rng.gen::<f32>();
        scene.add_sphere(Sphere::new(
            Vec3::new(
                angle.cos() * distance,
                radius - 1.0,
                angle.sin() * distance,
            ),
            radius,
            material,
        ));
    }

    scene
}

/// Write the packed RGBA buffer out as a PNG.
///
/// Pixels are little-endian RGBA (byte 0 = red), so the byte view of the
/// buffer is already in the layout the encoder wants.
fn save_png(frame: &CpuImage, path: &str) -> Result<()> {
    let mut bytes = Vec::with_capacity(frame.pixels().len() * 4);
    for pixel in frame.pixels() {
        bytes.extend_from_slice(&pixel.to_le_bytes());
    }

    image::save_buffer(
        path,
        &bytes,
        frame.width(),
        frame.height(),
        image::ColorType::Rgba8,
    )?;
    Ok(())
}
