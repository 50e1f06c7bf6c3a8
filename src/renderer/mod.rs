//! Rendering abstraction layer.
//!
//! *The rest of the engine never touches a pixel buffer directly.*
//! It describes what is visible as a [`View`] and hands it to a type that
//! implements [`Renderer`]; [`render_frame`] then presents the result on a
//! [`Display`] and draws the minimap on top.
//!
//! * Back-ends render at the reduced screen resolution.
//! * A helper blanket-impl [`RendererExt`] adds `draw_frame` so call-sites
//!   stay short.

pub mod display;
pub mod frame;
pub mod minimap;
pub mod software;

pub use display::{Display, Rgb};
pub use frame::FrameBuffer;
pub use minimap::Minimap;
pub use software::Software;

use log::trace;

use crate::world::{Player, Scene, Sprite, TextureBank};

/// Everything one frame depends on; borrowed, never mutated.
#[derive(Clone, Copy)]
pub struct View<'a> {
    pub scene: &'a Scene,
    pub player: &'a Player,
    pub sprites: &'a [Sprite],
    pub bank: &'a TextureBank,
}

/// A renderer that owns an internal scratch buffer for the whole frame.
///
/// `end_frame` hands the finished buffer to a user-supplied closure.
pub trait Renderer {
    /// (Re)allocate internal scratch for the requested resolution and clear it.
    fn begin_frame(&mut self, width: usize, height: usize);

    /// Rasterise floor, ceiling, walls and sprites of `view`.
    fn draw_view(&mut self, view: &View<'_>);

    /// Finish the frame and **loan** the finished buffer to `submit`.
    ///
    /// `submit` is run exactly once per frame.
    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&FrameBuffer);
}

/// Convenience blanket-impl with a one-liner `draw_frame` adaptor.
pub trait RendererExt: Renderer {
    fn draw_frame<F>(&mut self, width: usize, height: usize, view: &View<'_>, submit: F)
    where
        F: FnOnce(&FrameBuffer),
    {
        self.begin_frame(width, height);
        self.draw_view(view);
        self.end_frame(submit);
    }
}
impl<T: Renderer + ?Sized> RendererExt for T {}

/// Render entry point, called once per tick by the frame driver.
///
/// Renders `view` at the display's screen resolution, stretches it over the
/// display and overlays the minimap. `dt` is the time since the previous
/// frame in seconds.
pub fn render_frame<R: Renderer>(
    renderer: &mut R,
    display: &mut Display,
    minimap: &Minimap,
    view: &View<'_>,
    dt: f64,
) {
    let (w, h) = display.screen_size();
    renderer.draw_frame(w, h, view, |fb| display.blit_scaled(fb));
    minimap.draw(display, view.scene, view.player);
    if dt > 0.0 {
        trace!("frame {:.2} ms ({:.0} fps)", dt * 1000.0, 1.0 / dt);
    }
}

/// HUD frame-rate readout, `FPS: N`, for a frame that took `dt` seconds.
pub fn fps_label(dt: f64) -> Option<String> {
    (dt > 0.0).then(|| format!("FPS: {}", (1.0 / dt).round()))
}
