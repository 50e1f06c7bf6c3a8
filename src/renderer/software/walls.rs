//! Wall pass: one ray per screen column.

use glam::DVec2;

use super::{Software, Surface, darken_texel, resolve};
use crate::world::{Block, Paint, Player, Scene, TextureBank, cast_ray, consts::EPSILON};

/// Texture column for a hit at `point` inside `cell`.
///
/// A hit sitting on a vertical grid line struck an x-facing face, so the
/// texture runs along y there; everywhere else it runs along x.
#[inline]
pub(crate) fn wall_u(point: DVec2, cell: DVec2) -> f64 {
    let t = point - cell;
    if (t.x.abs() < EPSILON || (t.x - 1.0).abs() < EPSILON) && t.y > 0.0 {
        t.y
    } else {
        t.x
    }
}

impl Software {
    pub(super) fn draw_walls(&mut self, scene: &Scene, player: &Player, bank: &TextureBank) {
        let (w, h) = (self.frame.width(), self.frame.height());
        let h_f = h as f64;
        let (r1, r2) = player.fov();
        let forward = player.forward();

        for x in 0..w {
            let target = r1.lerp(r2, x as f64 / w as f64);
            let cast = cast_ray(scene, player.position, target);
            if !cast.hit {
                continue;
            }

            // axis-projected, not euclidean: no fisheye
            let depth = (cast.point - player.position).dot(forward);
            if depth <= 0.0 {
                continue;
            }
            self.frame.set_depth(x, depth);

            let paint = match scene.block_at(cast.cell) {
                Some(Block::Flat(c)) => Paint::Flat(c),
                Some(Block::Textured(id)) => Paint::Textured(id),
                _ => continue,
            };

            let strip = h_f / depth;
            let strip_px = strip.ceil();
            let top = ((h_f - strip) * 0.5).floor();
            // only the rows that land on screen
            let first = (-top).max(0.0) as usize;
            let last = (h_f - top).min(strip_px).max(0.0) as usize;

            match resolve(paint, bank) {
                Surface::Flat(color) => {
                    let rgba = color.brightness(1.0 / depth).to_rgba8();
                    for dy in first..last {
                        self.frame.put(x, (top as i64 + dy as i64) as usize, rgba);
                    }
                }
                Surface::Image(tex) => {
                    let u = wall_u(cast.point, cast.cell.as_dvec2());
                    for dy in first..last {
                        let v = dy as f64 / strip_px;
                        let texel = tex.sample(u, v);
                        self.frame
                            .put(x, (top as i64 + dy as i64) as usize, darken_texel(texel, depth));
                    }
                }
            }
        }
    }
}
