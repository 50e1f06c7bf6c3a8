mod color;
pub mod consts;
mod map_file;
mod player;
pub mod raycast;
mod scene;
mod sprite;
mod texture;

pub use color::{Color, channel_to_u8, pack_rgb};
pub use map_file::{MapDef, MapError, load_map, parse_map};
pub use player::Player;
pub use raycast::{RayCast, cast_ray, hitting_cell, ray_step, snap_to_grid};
pub use scene::{Block, Scene, SurfaceRule};
pub use sprite::Sprite;
pub use texture::{Paint, Texture, TextureBank, TextureError, TextureId};

#[cfg(test)]
pub(crate) mod testutil {
    use super::{Block, Color, Scene};

    /// `n`×`n` room with a one-cell-thick white wall ring.
    pub fn room(n: usize) -> Scene {
        let wall = Block::Flat(Color::white());
        let rows = (0..n)
            .map(|y| {
                (0..n)
                    .map(|x| {
                        if x == 0 || y == 0 || x == n - 1 || y == n - 1 {
                            wall
                        } else {
                            Block::Empty
                        }
                    })
                    .collect()
            })
            .collect();
        Scene::new(rows)
    }
}
