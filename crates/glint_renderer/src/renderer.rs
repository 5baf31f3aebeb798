//! Frame accumulation and render orchestration.

use glint_core::Scene;
use glint_math::{Ray, Vec3, Vec4};
use rayon::prelude::*;

use crate::{integrate, Camera, ImageSink};

/// Knobs of the light-transport loop and the accumulation behavior.
#[derive(Debug, Clone, Copy)]
pub struct RenderSettings {
    /// Fold each frame into a running average instead of replacing it
    pub accumulate: bool,

    /// Upper bound on surface interactions per path
    pub max_bounces: u32,

    /// Offset applied along the normal when re-originating a bounced ray,
    /// so the new ray cannot re-hit the surface it just left
    pub normal_bias: f32,

    /// Radiance contributed by rays that leave the scene. `None` means a
    /// miss contributes nothing, which is what progressive global
    /// illumination wants; a solid color approximates an environment for
    /// direct-lighting-style looks.
    pub sky_color: Option<Vec3>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            accumulate: true,
            max_bounces: 5,
            normal_bias: 1e-4,
            sky_color: None,
        }
    }
}

/// Pack a clamped [0, 1] RGBA color into a 32-bit pixel, red in the low
/// byte.
pub fn to_rgba(color: Vec4) -> u32 {
    let r = (color.x * 255.0) as u32;
    let g = (color.y * 255.0) as u32;
    let b = (color.z * 255.0) as u32;
    let a = (color.w * 255.0) as u32;

    (a << 24) | (b << 16) | (g << 8) | r
}

/// Progressive renderer: owns the output and accumulation buffers and the
/// sink the finished frames are published to.
///
/// Each [`Renderer::render`] call produces one sample per pixel and
/// publishes the running per-pixel average. The scene and camera are
/// borrowed per call and never stored.
pub struct Renderer<S: ImageSink> {
    sink: S,
    settings: RenderSettings,

    width: u32,
    height: u32,
    frame_index: u32,

    /// Packed RGBA output, width * height
    image_data: Vec<u32>,
    /// Linear radiance sums, width * height
    accumulation: Vec<Vec4>,
}

impl<S: ImageSink> Renderer<S> {
    /// Create a renderer publishing to `sink`. The buffers start at 0x0;
    /// call [`Renderer::on_resize`] before rendering.
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            settings: RenderSettings::default(),
            width: 0,
            height: 0,
            frame_index: 1,
            image_data: Vec::new(),
            accumulation: Vec::new(),
        }
    }

    /// Replace the render settings wholesale.
    pub fn with_settings(mut self, settings: RenderSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut RenderSettings {
        &mut self.settings
    }

    pub fn frame_index(&self) -> u32 {
        self.frame_index
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Force the next render to start a fresh accumulation.
    pub fn reset_frame_index(&mut self) {
        self.frame_index = 1;
    }

    /// Adopt new viewport dimensions.
    ///
    /// Reallocates both buffers and resizes the sink. No-op when the size
    /// is unchanged or either dimension is zero; a real resize also resets
    /// the frame index, because the accumulated history belongs to the old
    /// buffer.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::debug!("ignoring resize to {width}x{height}");
            return;
        }
        if self.width == width && self.height == height {
            return;
        }

        log::debug!(
            "resizing {}x{} -> {width}x{height}",
            self.width,
            self.height
        );

        self.width = width;
        self.height = height;

        let pixel_count = width as usize * height as usize;
        self.image_data = vec![0; pixel_count];
        self.accumulation = vec![Vec4::ZERO; pixel_count];

        self.sink.resize(width, height);
        self.frame_index = 1;
    }

    /// Render one frame: a sample per pixel, folded into the running
    /// average and published to the sink.
    pub fn render(&mut self, scene: &Scene, camera: &dyn Camera) {
        let width = self.width as usize;
        let pixel_count = width * self.height as usize;
        if pixel_count == 0 {
            log::warn!("render skipped: zero-sized viewport");
            return;
        }

        let directions = camera.ray_directions();
        if directions.len() != pixel_count {
            log::warn!(
                "render skipped: camera supplies {} ray directions for {} pixels",
                directions.len(),
                pixel_count
            );
            return;
        }

        if self.frame_index == 1 {
            self.accumulation.fill(Vec4::ZERO);
        }

        let origin = camera.position();
        let frame_index = self.frame_index;
        let settings = self.settings;

        // Row-parallel dispatch. Each task owns disjoint slices of the two
        // buffers, so pixel writes need no synchronization; rayon joins
        // every row before we publish below.
        self.image_data
            .par_chunks_mut(width)
            .zip(self.accumulation.par_chunks_mut(width))
            .enumerate()
            .for_each(|(y, (row, accumulated))| {
                for x in 0..width {
                    let pixel_index = y * width + x;
                    let ray = Ray::new(origin, directions[pixel_index]);

                    let sample =
                        integrate(scene, ray, pixel_index as u32, frame_index, &settings);
                    accumulated[x] += sample;

                    let color = accumulated[x] / frame_index as f32;
                    row[x] = to_rgba(color.clamp(Vec4::ZERO, Vec4::ONE));
                }
            });

        self.sink.present(&self.image_data);

        if self.settings.accumulate {
            self.frame_index += 1;
        } else {
            self.frame_index = 1;
        }
    }
}
