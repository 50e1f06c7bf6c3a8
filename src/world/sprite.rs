use glam::DVec2;

use super::texture::TextureId;

/// Camera-facing billboard standing on the floor at `position`.
///
/// `scale` = 1.0 makes it as tall as a wall at the same depth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub texture: TextureId,
    pub position: DVec2,
    pub scale: f64,
}

impl Sprite {
    pub fn new(texture: TextureId, position: DVec2, scale: f64) -> Self {
        Self {
            texture,
            position,
            scale,
        }
    }
}
