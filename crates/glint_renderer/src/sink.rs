//! Destination for finished frames.

/// Receives the packed RGBA output of each rendered frame.
///
/// The renderer calls `resize` whenever its own buffers change dimensions,
/// always before the next `present`.
pub trait ImageSink {
    /// Adopt new output dimensions.
    fn resize(&mut self, width: u32, height: u32);

    /// Receive a finished frame of `width * height` packed RGBA pixels
    /// (byte 0 = red).
    fn present(&mut self, pixels: &[u32]);
}

/// An in-memory sink holding the most recently presented frame.
#[derive(Debug, Default, Clone)]
pub struct CpuImage {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl CpuImage {
    /// Create an empty image.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The last presented frame, row-major.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }
}

impl ImageSink for CpuImage {
    fn resize(&mut self, width: u32, height: u32) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels = vec![0; width as usize * height as usize];
    }

    fn present(&mut self, pixels: &[u32]) {
        if pixels.len() != self.pixels.len() {
            log::warn!(
                "dropping presented frame: {} pixels for a {}x{} image",
                pixels.len(),
                self.width,
                self.height
            );
            return;
        }
        self.pixels.copy_from_slice(pixels);
    }
}
