//! ---------------------------------------------------------------------------
//! Classic software (CPU) raycaster
//!
//! * Renders into an RGBA [`FrameBuffer`] at the reduced screen resolution.
//! * Pass order: floor/ceiling, then walls (which fill the z-buffer), then
//!   sprites (which read it). Later passes simply overwrite earlier ones.
//! ---------------------------------------------------------------------------

mod planes;
mod sprites;
mod walls;

use crate::{
    renderer::{Renderer, View, frame::FrameBuffer},
    world::{Color, Paint, Texture, TextureBank},
};

/// Column-by-column raycasting back-end.
#[derive(Default)]
pub struct Software {
    frame: FrameBuffer,
}

impl Software {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }
}

/*──────────────────────── Renderer trait impl ────────────────────────*/
impl Renderer for Software {
    fn begin_frame(&mut self, w: usize, h: usize) {
        // (re)allocate if resolution changed
        self.frame.resize(w, h);
        self.frame.clear();
    }

    fn draw_view(&mut self, view: &View<'_>) {
        self.draw_planes(view.scene, view.player, view.bank);
        self.draw_walls(view.scene, view.player, view.bank);
        self.draw_sprites(view.player, view.sprites, view.bank);
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&FrameBuffer),
    {
        submit(&self.frame);
    }
}

/*──────────────────────── shared helpers ─────────────────────────────*/

/// Resolve a paint slot to either a colour or a texture.
///
/// A dangling id degrades to the missing-texture colour instead of failing
/// the frame.
enum Surface<'a> {
    Flat(Color),
    Image(&'a Texture),
}

fn resolve(paint: Paint, bank: &TextureBank) -> Surface<'_> {
    match paint {
        Paint::Flat(c) => Surface::Flat(c),
        Paint::Textured(id) => match bank.texture(id) {
            Ok(tex) => Surface::Image(tex),
            Err(_) => Surface::Flat(Color::purple()),
        },
    }
}

/// Multiply the RGB of an 8-bit texel by `factor`; truncating, clamped.
#[inline(always)]
fn scale_texel(texel: [u8; 4], factor: f64) -> [u8; 4] {
    let ch = |c: u8| (c as f64 * factor).clamp(0.0, 255.0) as u8;
    [ch(texel[0]), ch(texel[1]), ch(texel[2]), texel[3]]
}

/// Divide the RGB of an 8-bit texel by `depth`; truncating, clamped.
///
/// Not the same bytes as `scale_texel(t, 1.0 / depth)`: the reciprocal
/// rounds first, which can push a quotient across an integer boundary.
#[inline(always)]
fn darken_texel(texel: [u8; 4], depth: f64) -> [u8; 4] {
    let ch = |c: u8| (c as f64 / depth).clamp(0.0, 255.0) as u8;
    [ch(texel[0]), ch(texel[1]), ch(texel[2]), texel[3]]
}

/*──────────────────────────────── Tests ───────────────────────────────*/
