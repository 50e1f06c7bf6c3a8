//! Top-down HUD overlay drawn straight onto the [`Display`].
//!
//! Map units are scaled so one cell is `0.02 * display width` pixels and the
//! map is offset by `0.015 * display size` from the top-left corner.

use glam::{DVec2, IVec2};

use super::display::{Display, Rgb};
use crate::world::{Block, Player, Scene, TextureBank, TextureId, consts::PLAYER_SIZE};

const BACKGROUND: Rgb = 0x00_00_00;
const GRID_LINE: Rgb = 0x30_30_30;
const PLAYER_MARKER: Rgb = 0xFF_00_FF;
const FOV_CONE: Rgb = 0xFF_FF_00;

/// Minimap painter with a cached placeholder colour per texture.
pub struct Minimap {
    placeholders: Vec<Rgb>,
}

impl Minimap {
    /// Average every texture once; the bank is frozen before the loop starts.
    pub fn new(bank: &TextureBank) -> Self {
        let placeholders = (0..bank.len())
            .map(|id| {
                bank.texture(id as TextureId)
                    .map(|t| t.mean_color().to_rgb_u32())
                    .unwrap_or(GRID_LINE)
            })
            .collect();
        Self { placeholders }
    }

    fn cell_color(&self, block: Block) -> Option<Rgb> {
        match block {
            Block::Empty => None,
            Block::Flat(c) => Some(c.to_rgb_u32()),
            Block::Textured(id) => Some(
                self.placeholders
                    .get(id as usize)
                    .copied()
                    .unwrap_or(GRID_LINE),
            ),
        }
    }

    pub fn draw(&self, display: &mut Display, scene: &Scene, player: &Player) {
        let t = Transform::for_display(display);
        let (gw, gh) = (scene.width() as i32, scene.height() as i32);

        display.fill_rect(t.cell(IVec2::ZERO), t.cell(IVec2::new(gw, gh)), BACKGROUND);

        for y in 0..gh {
            for x in 0..gw {
                let cell = IVec2::new(x, y);
                if let Some(col) = scene.block_at(cell).and_then(|b| self.cell_color(b)) {
                    display.fill_rect(t.cell(cell), t.cell(cell + IVec2::ONE), col);
                }
            }
        }

        for x in 0..=gw {
            display.draw_line(t.cell(IVec2::new(x, 0)), t.cell(IVec2::new(x, gh)), GRID_LINE);
        }
        for y in 0..=gh {
            display.draw_line(t.cell(IVec2::new(0, y)), t.cell(IVec2::new(gw, y)), GRID_LINE);
        }

        let half = DVec2::splat(PLAYER_SIZE * 0.5);
        display.stroke_rect(
            t.point(player.position - half),
            t.point(player.position + half),
            PLAYER_MARKER,
        );

        let (near1, near2) = player.fov();
        let eye = t.point(player.position);
        let (n1, n2) = (t.point(near1), t.point(near2));
        display.draw_line(n1, n2, FOV_CONE);
        display.draw_line(eye, n1, FOV_CONE);
        display.draw_line(eye, n2, FOV_CONE);
    }
}

/// Map space -> display pixels.
#[derive(Clone, Copy, Debug)]
struct Transform {
    origin: DVec2,
    scale: f64,
}

impl Transform {
    fn for_display(display: &Display) -> Self {
        let size = DVec2::new(display.width() as f64, display.height() as f64);
        Self {
            origin: size * 0.015,
            scale: size.x * 0.02,
        }
    }

    #[inline]
    fn point(&self, p: DVec2) -> IVec2 {
        (self.origin + p * self.scale).floor().as_ivec2()
    }

    #[inline]
    fn cell(&self, c: IVec2) -> IVec2 {
        self.point(c.as_dvec2())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Color, Texture, testutil::room};

    #[test]
    fn transform_scales_with_width() {
        let d = Display::new(1000, 500, 1.0);
        let t = Transform::for_display(&d);
        assert_eq!(t.point(DVec2::ZERO), IVec2::new(15, 7));
        assert_eq!(t.cell(IVec2::new(2, 1)), IVec2::new(55, 27));
    }

    #[test]
    fn draws_walls_grid_and_player() {
        let scene = room(5);
        let bank = TextureBank::new();
        let player = Player::new(DVec2::new(2.5, 2.5), 0.0);
        let mut d = Display::new(1000, 500, 1.0);
        d.clear(0x123456);
        Minimap::new(&bank).draw(&mut d, &scene, &player);

        // wall cell (0,0) spans pixels 15..35 x 7..27; its inside is white
        assert_eq!(d.get(25, 17), 0xFF_FF_FF);
        // open cell (1,1) stays black
        assert_eq!(d.get(45, 37), BACKGROUND);
        // grid line at x = 1 cell
        assert_eq!(d.get(35, 40), GRID_LINE);
        // player marker corner at (2.25, 2.25) -> (60, 52)
        assert_eq!(d.get(60, 52), PLAYER_MARKER);
        // near-plane chord in front of the eye (65, 57) sits on x = 67
        assert_eq!(d.get(67, 57), FOV_CONE);
        // outside the map untouched
        assert_eq!(d.get(900, 400), 0x123456);
    }

    #[test]
    fn textured_cells_use_mean_colour() {
        let mut bank = TextureBank::new();
        let id = bank
            .insert("t", Texture::solid("t", 2, 2, [0, 128, 255, 255]).unwrap())
            .unwrap();
        let map = Minimap::new(&bank);
        assert_eq!(map.cell_color(Block::Textured(id)), Some(0x00_80_FF));
        assert_eq!(map.cell_color(Block::Flat(Color::red())), Some(0xFF_00_00));
        assert_eq!(map.cell_color(Block::Empty), None);
    }
}
