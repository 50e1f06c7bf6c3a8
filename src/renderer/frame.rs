//! Off-screen RGBA frame buffer plus the 1-D wall z-buffer.
//!
//! Both are owned by the renderer and overwritten in place every frame.

/// Background value written to every byte on [`FrameBuffer::clear`].
pub const CLEAR_BYTE: u8 = 255;

#[derive(Clone, Debug, Default)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    /// RGBA8, row-major, stride 4.
    pixels: Vec<u8>,
    /// Nearest wall depth per column; `+inf` where no wall was hit.
    depth: Vec<f64>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let mut fb = Self::default();
        fb.resize(width, height);
        fb.clear();
        fb
    }

    /// Reallocate only when the resolution actually changed.
    pub fn resize(&mut self, width: usize, height: usize) {
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.pixels.resize(width * height * 4, CLEAR_BYTE);
            self.depth.resize(width, f64::INFINITY);
        }
    }

    pub fn clear(&mut self) {
        self.pixels.fill(CLEAR_BYTE);
        self.depth.fill(f64::INFINITY);
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height, "({x},{y}) off frame");
        (y * self.width + x) * 4
    }

    #[inline(always)]
    pub fn get(&self, x: usize, y: usize) -> [u8; 4] {
        let i = self.index(x, y);
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    #[inline(always)]
    pub fn put(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        let i = self.index(x, y);
        self.pixels[i..i + 4].copy_from_slice(&rgba);
    }

    /// `dst = src * alpha + dst * (1 - alpha)` on RGB; destination alpha is kept.
    #[inline]
    pub fn blend(&mut self, x: usize, y: usize, src: [u8; 4], alpha: f64) {
        let i = self.index(x, y);
        for (dst, &s) in self.pixels[i..i + 3].iter_mut().zip(&src[..3]) {
            *dst = (s as f64 * alpha + *dst as f64 * (1.0 - alpha)) as u8;
        }
    }

    #[inline(always)]
    pub fn depth(&self, x: usize) -> f64 {
        self.depth[x]
    }

    #[inline(always)]
    pub fn set_depth(&mut self, x: usize, d: f64) {
        self.depth[x] = d;
    }

    pub fn depths(&self) -> &[f64] {
        &self.depth
    }
}
