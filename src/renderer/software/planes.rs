//! Floor / ceiling pass (inverse perspective mapping).
//!
//! For screen row `y` in the lower half the floor is seen at distance
//!
//! ```text
//! sz = H - y - 1                  (row counted from the bottom)
//! b  = bp / (H/2 - sz) * (H/2) / NEAR
//! ```
//!
//! where `bp` is the distance from the eye to a near-plane edge. The world
//! span for that row runs from `pos + norm(p1 - pos) * b` to the same along
//! `p2`. The ceiling is the same span drawn into the mirrored row `sz`.

use glam::DVec2;

use super::{Software, Surface, resolve, scale_texel};
use crate::world::{Paint, Player, Scene, TextureBank, consts::NEAR_CLIPPING_PLANE};

/// Shade one surface sample at world point `t`.
#[inline]
fn surface_texel(paint: Paint, t: DVec2, brightness: f64, bank: &TextureBank) -> [u8; 4] {
    match resolve(paint, bank) {
        Surface::Flat(c) => c.brightness(brightness).to_rgba8(),
        Surface::Image(tex) => {
            let f = t - t.floor();
            scale_texel(tex.sample(f.x, f.y), brightness)
        }
    }
}

impl Software {
    pub(super) fn draw_planes(&mut self, scene: &Scene, player: &Player, bank: &TextureBank) {
        let (w, h) = (self.frame.width(), self.frame.height());
        let pos = player.position;
        let (p1, p2) = player.fov();
        let pz = h as f64 * 0.5;
        let bp = (p1 - pos).length();
        let dir1 = (p1 - pos).normalize_or_zero();
        let dir2 = (p2 - pos).normalize_or_zero();

        for y in h / 2..h {
            let sz = h - y - 1;
            let ap = pz - sz as f64;
            let b = (bp / ap) * pz / NEAR_CLIPPING_PLANE;
            let t1 = pos + dir1 * b;
            let t2 = pos + dir2 * b;

            for x in 0..w {
                let t = t1.lerp(t2, x as f64 / w as f64);
                // true distance here, unlike the walls
                let brightness = 1.0 / pos.distance_squared(t).sqrt();

                let floor = surface_texel(scene.floor_at(t), t, brightness, bank);
                self.frame.put(x, y, floor);
                let ceiling = surface_texel(scene.ceiling_at(t), t, brightness, bank);
                self.frame.put(x, sz, ceiling);
            }
        }
    }
}
