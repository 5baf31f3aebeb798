//! Camera interface and a perspective implementation.
//!
//! The renderer consumes a camera only through [`Camera`]: a world-space
//! origin and one precomputed ray direction per pixel in row-major order.
//! [`PerspectiveCamera`] rebuilds its cached direction array whenever the
//! viewport size or the pose changes, so hosts must call `resize` before
//! rendering at a new size.

use glint_math::{Mat4, Vec3, Vec4};

/// Ray-generation interface consumed by the renderer.
pub trait Camera {
    /// World-space ray origin.
    fn position(&self) -> Vec3;

    /// One unit ray direction per pixel, row-major, matching the viewport
    /// the camera was last resized to.
    fn ray_directions(&self) -> &[Vec3];
}

/// A pinhole perspective camera with a cached per-pixel direction array.
pub struct PerspectiveCamera {
    vertical_fov: f32,
    near_clip: f32,
    far_clip: f32,

    position: Vec3,
    forward: Vec3,

    width: u32,
    height: u32,

    // Cached derived state, rebuilt on resize or pose change
    inverse_projection: Mat4,
    inverse_view: Mat4,
    ray_directions: Vec<Vec3>,
}

const WORLD_UP: Vec3 = Vec3::Y;

impl PerspectiveCamera {
    /// Create a camera with the given vertical field of view (degrees) and
    /// clip planes. The viewport starts at 0x0; call
    /// [`PerspectiveCamera::resize`] before rendering.
    pub fn new(vertical_fov: f32, near_clip: f32, far_clip: f32) -> Self {
        let mut camera = Self {
            vertical_fov,
            near_clip,
            far_clip,
            position: Vec3::new(0.0, 0.0, 6.0),
            forward: Vec3::NEG_Z,
            width: 0,
            height: 0,
            inverse_projection: Mat4::IDENTITY,
            inverse_view: Mat4::IDENTITY,
            ray_directions: Vec::new(),
        };
        camera.recompute_view();
        camera
    }

    /// Set the camera position.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.set_position(position);
        self
    }

    /// Aim the camera at a target point.
    pub fn looking_at(mut self, target: Vec3) -> Self {
        self.look_at(target);
        self
    }

    /// Move the camera, keeping its orientation.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.recompute_view();
        self.recompute_ray_directions();
    }

    /// Turn the camera toward a target point.
    pub fn look_at(&mut self, target: Vec3) {
        self.forward = (target - self.position).normalize();
        self.recompute_view();
        self.recompute_ray_directions();
    }

    /// Update the viewport size, rebuilding the cached direction array.
    ///
    /// No-op when the size is unchanged or either dimension is zero.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if self.width == width && self.height == height {
            return;
        }

        self.width = width;
        self.height = height;
        self.recompute_projection();
        self.recompute_ray_directions();
    }

    fn recompute_projection(&mut self) {
        let aspect = self.width as f32 / self.height as f32;
        let projection = Mat4::perspective_rh(
            self.vertical_fov.to_radians(),
            aspect,
            self.near_clip,
            self.far_clip,
        );
        self.inverse_projection = projection.inverse();
    }

    fn recompute_view(&mut self) {
        let view = Mat4::look_to_rh(self.position, self.forward, WORLD_UP);
        self.inverse_view = view.inverse();
    }

    fn recompute_ray_directions(&mut self) {
        let pixel_count = self.width as usize * self.height as usize;
        if pixel_count == 0 {
            return;
        }

        let mut directions = Vec::with_capacity(pixel_count);
        for y in 0..self.height {
            for x in 0..self.width {
                // NDC coordinate of the pixel center; row 0 is the top
                // scanline.
                let u = (x as f32 + 0.5) / self.width as f32 * 2.0 - 1.0;
                let v = 1.0 - (y as f32 + 0.5) / self.height as f32 * 2.0;

                let target = self.inverse_projection * Vec4::new(u, v, 1.0, 1.0);
                let view_direction = (target.truncate() / target.w).normalize();
                let world_direction = (self.inverse_view * view_direction.extend(0.0)).truncate();

                directions.push(world_direction);
            }
        }

        self.ray_directions = directions;
    }
}

impl Camera for PerspectiveCamera {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn ray_directions(&self) -> &[Vec3] {
        &self.ray_directions
    }
}
