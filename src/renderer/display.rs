//! Window-sized presentation surface (`0x00RRGGBB`, the minifb format) and
//! the handful of 2-D primitives the minimap needs.

use glam::IVec2;

use super::frame::FrameBuffer;
use crate::world::pack_rgb;

/// Pixel format of the display surface.
pub type Rgb = u32;

pub struct Display {
    width: usize,
    height: usize,
    resolution: f64,
    buf: Vec<Rgb>,
}

impl Display {
    /// `resolution` scales the off-screen frame relative to the window.
    pub fn new(width: usize, height: usize, resolution: f64) -> Self {
        Self {
            width,
            height,
            resolution,
            buf: vec![0; width * height],
        }
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
    pub fn buffer(&self) -> &[Rgb] {
        &self.buf
    }

    /// Frame-buffer size: `floor(window * resolution)`, at least 1x1.
    pub fn screen_size(&self) -> (usize, usize) {
        let scale = |n: usize| ((n as f64 * self.resolution).floor() as usize).max(1);
        (scale(self.width), scale(self.height))
    }

    pub fn clear(&mut self, col: Rgb) {
        self.buf.fill(col);
    }

    /// Nearest-neighbour stretch of `fb` over the whole surface.
    pub fn blit_scaled(&mut self, fb: &FrameBuffer) {
        let (fw, fh) = (fb.width(), fb.height());
        if fw == 0 || fh == 0 {
            return;
        }
        for dy in 0..self.height {
            let sy = dy * fh / self.height;
            let row = &mut self.buf[dy * self.width..(dy + 1) * self.width];
            for (dx, px) in row.iter_mut().enumerate() {
                let [r, g, b, _] = fb.get(dx * fw / self.width, sy);
                *px = pack_rgb(r, g, b);
            }
        }
    }

    /// Clipped single-pixel write.
    #[inline]
    pub fn put(&mut self, x: i32, y: i32, col: Rgb) {
        if (0..self.width as i32).contains(&x) && (0..self.height as i32).contains(&y) {
            self.buf[y as usize * self.width + x as usize] = col;
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.buf[y * self.width + x]
    }

    /// Filled rectangle `[min, max)`, clipped to the surface.
    pub fn fill_rect(&mut self, min: IVec2, max: IVec2, col: Rgb) {
        let x0 = min.x.clamp(0, self.width as i32) as usize;
        let x1 = max.x.clamp(0, self.width as i32) as usize;
        let y0 = min.y.clamp(0, self.height as i32) as usize;
        let y1 = max.y.clamp(0, self.height as i32) as usize;
        if x0 >= x1 {
            return;
        }
        for y in y0..y1 {
            self.buf[y * self.width + x0..y * self.width + x1].fill(col);
        }
    }

    /// Integer Bresenham, both end points inclusive.
    pub fn draw_line(&mut self, from: IVec2, to: IVec2, col: Rgb) {
        let (mut x0, mut y0) = (from.x, from.y);
        let (x1, y1) = (to.x, to.y);
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.put(x0, y0, col);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Outline of the rectangle with corners `min` and `max` (inclusive).
    pub fn stroke_rect(&mut self, min: IVec2, max: IVec2, col: Rgb) {
        let tr = IVec2::new(max.x, min.y);
        let bl = IVec2::new(min.x, max.y);
        self.draw_line(min, tr, col);
        self.draw_line(tr, max, col);
        self.draw_line(max, bl, col);
        self.draw_line(bl, min, col);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_size_truncates() {
        let d = Display::new(1280, 800, 0.3);
        assert_eq!(d.screen_size(), (384, 240));
        let tiny = Display::new(2, 2, 0.1);
        assert_eq!(tiny.screen_size(), (1, 1));
    }

    #[test]
    fn blit_is_nearest_neighbour() {
        let mut fb = FrameBuffer::new(2, 1);
        fb.put(0, 0, [255, 0, 0, 255]);
        fb.put(1, 0, [0, 0, 255, 255]);
        let mut d = Display::new(4, 2, 0.5);
        d.blit_scaled(&fb);
        assert_eq!(d.buffer(), &[0xFF0000u32, 0xFF0000, 0x0000FF, 0x0000FF].repeat(2)[..]);
    }

    #[test]
    fn line_hits_both_ends_and_clips() {
        let mut d = Display::new(5, 5, 1.0);
        d.draw_line(IVec2::new(0, 0), IVec2::new(4, 2), 7);
        assert_eq!(d.get(0, 0), 7);
        assert_eq!(d.get(4, 2), 7);
        assert_eq!(d.buffer().iter().filter(|&&p| p == 7).count(), 5);
        // runs off the surface without panicking
        d.draw_line(IVec2::new(-3, 2), IVec2::new(9, 2), 1);
        assert!((0..5).all(|x| d.get(x, 2) == 1));
    }

    #[test]
    fn rects_fill_and_stroke() {
        let mut d = Display::new(6, 6, 1.0);
        d.fill_rect(IVec2::new(-1, 1), IVec2::new(2, 3), 3);
        assert_eq!(d.buffer().iter().filter(|&&p| p == 3).count(), 4);
        d.clear(0);
        d.stroke_rect(IVec2::new(1, 1), IVec2::new(4, 4), 9);
        assert_eq!(d.get(1, 1), 9);
        assert_eq!(d.get(4, 4), 9);
        assert_eq!(d.get(2, 2), 0);
        assert_eq!(d.buffer().iter().filter(|&&p| p == 9).count(), 12);
    }
}
