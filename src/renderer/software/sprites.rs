use glam::DVec2;
use log::trace;

use super::Software;
use crate::world::{
    Player, Sprite, TextureBank,
    consts::{COS_HALF_FOV, NEAR_CLIPPING_PLANE},
};

/// Screen placement of one billboard, recomputed every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct VisSprite {
    /// Centre column, clamped to the screen.
    pub center_x: f64,
    /// Axis-projected depth, compared against the wall z-buffer.
    pub depth: f64,
    /// Side of the on-screen square in pixels.
    pub size: f64,
    /// Row of the floor line at `depth`; the sprite stands on it.
    pub bottom: f64,
}

/// Project `sprite` into a `w x h` screen, or `None` when it is too close
/// or outside the view cone.
pub(crate) fn project_sprite(
    player: &Player,
    (p1, p2): (DVec2, DVec2),
    sprite: &Sprite,
    w: usize,
    h: usize,
) -> Option<VisSprite> {
    let sp = sprite.position - player.position;
    let dist = sp.length();
    if dist <= NEAR_CLIPPING_PLANE {
        return None;
    }

    let forward = player.forward();
    let cos_angle = (sp.dot(forward) / dist).min(1.0);
    if cos_angle < *COS_HALF_FOV {
        return None;
    }

    // where the eye->sprite line crosses the near plane
    let projected = player.position + sp / dist * (NEAR_CLIPPING_PLANE / cos_angle);
    let t = p1.distance(projected) / p1.distance(p2);

    let (w_f, h_f) = (w as f64, h as f64);
    let depth = sp.dot(forward);
    Some(VisSprite {
        center_x: (t * w_f).clamp(0.0, w_f - 1.0),
        depth,
        size: h_f / depth * sprite.scale,
        bottom: (h_f + h_f / depth) * 0.5,
    })
}

impl Software {
    /// Sprites are composited in list order; only walls occlude them.
    pub(super) fn draw_sprites(&mut self, player: &Player, sprites: &[Sprite], bank: &TextureBank) {
        let (w, h) = (self.frame.width(), self.frame.height());
        let fov = player.fov();

        for sprite in sprites {
            let Some(vis) = project_sprite(player, fov, sprite, w, h) else {
                continue;
            };
            let Ok(tex) = bank.texture(sprite.texture) else {
                trace!("sprite texture {} missing, skipped", sprite.texture);
                continue;
            };
            if vis.size <= 0.0 {
                continue;
            }

            let left = vis.center_x - vis.size * 0.5;
            let top = vis.bottom - vis.size;
            let x0 = left.floor().max(0.0) as usize;
            let x1 = (left + vis.size).ceil().clamp(0.0, w as f64) as usize;
            let y0 = top.floor().max(0.0) as usize;
            let y1 = vis.bottom.ceil().clamp(0.0, h as f64) as usize;

            for x in x0..x1 {
                if self.frame.depth(x) <= vis.depth {
                    continue;
                }
                let u = (x as f64 - left) / vis.size;
                if !(0.0..1.0).contains(&u) {
                    continue;
                }
                for y in y0..y1 {
                    let v = (y as f64 - top) / vis.size;
                    if !(0.0..1.0).contains(&v) {
                        continue;
                    }
                    let texel = tex.sample(u, v);
                    if texel[3] == 0 {
                        continue;
                    }
                    self.frame.blend(x, y, texel, texel[3] as f64 / 255.0);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Renderer;
    use crate::world::{Block, Color, Scene, Texture, TextureId, testutil::room};

    const W: usize = 40;
    const H: usize = 20;

    fn red_bank() -> (TextureBank, TextureId) {
        let mut bank = TextureBank::new();
        let id = bank
            .insert("red", Texture::solid("red", 4, 4, [255, 0, 0, 255]).unwrap())
            .unwrap();
        (bank, id)
    }

    fn render(scene: &Scene, player: &Player, sprites: &[Sprite], bank: &TextureBank) -> Software {
        let mut sw = Software::new();
        sw.begin_frame(W, H);
        sw.draw_planes(scene, player, bank);
        sw.draw_walls(scene, player, bank);
        sw.draw_sprites(player, sprites, bank);
        sw
    }

    #[test]
    fn straight_ahead_projects_to_centre() {
        let player = Player::new(DVec2::new(5.0, 5.5), 0.0);
        let sprite = Sprite::new(0, DVec2::new(7.0, 5.5), 1.0);
        let vis = project_sprite(&player, player.fov(), &sprite, W, H).unwrap();
        assert!((vis.center_x - 20.0).abs() < 1e-9);
        assert!((vis.depth - 2.0).abs() < 1e-12);
        assert!((vis.size - 10.0).abs() < 1e-9);
        assert!((vis.bottom - 15.0).abs() < 1e-9);
    }

    #[test]
    fn culled_when_behind_or_too_close() {
        let player = Player::new(DVec2::new(5.0, 5.0), 0.0);
        let fov = player.fov();
        let behind = Sprite::new(0, DVec2::new(3.0, 5.0), 1.0);
        let beside = Sprite::new(0, DVec2::new(5.0, 7.0), 1.0);
        let touching = Sprite::new(0, DVec2::new(5.05, 5.0), 1.0);
        assert!(project_sprite(&player, fov, &behind, W, H).is_none());
        assert!(project_sprite(&player, fov, &beside, W, H).is_none());
        assert!(project_sprite(&player, fov, &touching, W, H).is_none());
    }

    #[test]
    fn cone_edges_map_to_screen_edges() {
        let player = Player::new(DVec2::new(5.0, 5.0), 0.0);
        // 40 degrees towards -y lands left of centre, +y right
        let left = Sprite::new(0, player.position + DVec2::from_angle(-0.7) * 3.0, 1.0);
        let right = Sprite::new(0, player.position + DVec2::from_angle(0.7) * 3.0, 1.0);
        let l = project_sprite(&player, player.fov(), &left, W, H).unwrap();
        let r = project_sprite(&player, player.fov(), &right, W, H).unwrap();
        assert!(l.center_x < 20.0 && r.center_x > 20.0);
        assert!((l.center_x + r.center_x - 40.0).abs() < 1e-6);
    }

    #[test]
    fn visible_sprite_covers_wall() {
        let scene = room(10);
        let (bank, id) = red_bank();
        let player = Player::new(DVec2::new(5.0, 5.5), 0.0);
        let sw = render(&scene, &player, &[Sprite::new(id, DVec2::new(7.0, 5.5), 1.0)], &bank);
        // rows 5..15 around column 20
        assert_eq!(sw.frame().get(20, 10), [255, 0, 0, 255]);
        assert_eq!(sw.frame().get(20, 5)[..3], [255, 0, 0]);
        assert_ne!(sw.frame().get(20, 4)[..3], [255, 0, 0]);
    }

    #[test]
    fn sprite_behind_wall_changes_nothing() {
        let mut scene_rows = vec![vec![Block::Empty; 10]; 10];
        for i in 0..10 {
            scene_rows[0][i] = Block::Flat(Color::white());
            scene_rows[9][i] = Block::Flat(Color::white());
            scene_rows[i][0] = Block::Flat(Color::white());
            scene_rows[i][9] = Block::Flat(Color::white());
        }
        // pillar between the player and the sprite
        scene_rows[5][7] = Block::Flat(Color::green());
        let scene = Scene::new(scene_rows);

        let (bank, id) = red_bank();
        let player = Player::new(DVec2::new(5.0, 5.5), 0.0);
        let bare = render(&scene, &player, &[], &bank);
        let with = render(&scene, &player, &[Sprite::new(id, DVec2::new(8.5, 5.5), 1.0)], &bank);
        assert_eq!(bare.frame().pixels(), with.frame().pixels());
    }

    #[test]
    fn transparent_texels_are_skipped() {
        let scene = room(10);
        let mut bank = TextureBank::new();
        let id = bank
            .insert("ghost", Texture::solid("ghost", 2, 2, [0, 255, 0, 0]).unwrap())
            .unwrap();
        let player = Player::new(DVec2::new(5.0, 5.5), 0.0);
        let bare = render(&scene, &player, &[], &bank);
        let with = render(&scene, &player, &[Sprite::new(id, DVec2::new(7.0, 5.5), 1.0)], &bank);
        assert_eq!(bare.frame().pixels(), with.frame().pixels());
    }

    #[test]
    fn later_sprites_paint_over_earlier_ones() {
        let scene = room(10);
        let mut bank = TextureBank::new();
        let red = bank
            .insert("r", Texture::solid("r", 2, 2, [255, 0, 0, 255]).unwrap())
            .unwrap();
        let blue = bank
            .insert("b", Texture::solid("b", 2, 2, [0, 0, 255, 255]).unwrap())
            .unwrap();
        let player = Player::new(DVec2::new(5.0, 5.5), 0.0);
        // blue is farther but listed last: no depth sort between sprites
        let sprites = [
            Sprite::new(red, DVec2::new(6.5, 5.5), 1.0),
            Sprite::new(blue, DVec2::new(7.0, 5.5), 1.0),
        ];
        let sw = render(&scene, &player, &sprites, &bank);
        assert_eq!(sw.frame().get(20, 10), [0, 0, 255, 255]);
    }
}
