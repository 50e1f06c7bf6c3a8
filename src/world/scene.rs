use glam::{DVec2, IVec2};
use log::debug;
use smallvec::SmallVec;

use super::color::Color;
use super::texture::{Paint, TextureId};

/// Content of one grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Block {
    #[default]
    Empty,
    Flat(Color),
    Textured(TextureId),
}

impl Block {
    #[inline(always)]
    pub fn is_solid(self) -> bool {
        !matches!(self, Block::Empty)
    }
}

impl From<Paint> for Block {
    fn from(p: Paint) -> Self {
        match p {
            Paint::Flat(c) => Block::Flat(c),
            Paint::Textured(id) => Block::Textured(id),
        }
    }
}

/// Floor / ceiling checkerboard keyed by `(floor(x) + floor(y)) mod 2`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceRule {
    pub even: Paint,
    pub odd: Paint,
}

impl SurfaceRule {
    pub fn checker(even: Paint, odd: Paint) -> Self {
        Self { even, odd }
    }

    /// One paint on every tile (a global floor texture).
    pub fn uniform(paint: Paint) -> Self {
        Self {
            even: paint,
            odd: paint,
        }
    }

    pub fn default_floor() -> Self {
        Self::checker(
            Paint::Flat(Color::dark_grey()),
            Paint::Flat(Color::light_grey()),
        )
    }

    pub fn default_ceiling() -> Self {
        Self::checker(Paint::Flat(Color::red()), Paint::Flat(Color::blue()))
    }

    #[inline]
    pub fn at(&self, p: DVec2) -> Paint {
        let parity = (p.x.floor() as i64 + p.y.floor() as i64).rem_euclid(2);
        if parity == 0 { self.even } else { self.odd }
    }
}

/// Row-major tile grid, immutable after construction.
///
/// ```text
/// width  = longest row
/// height = number of rows
/// cells.len() == width * height   (short rows padded with Empty)
/// ```
#[derive(Clone, Debug)]
pub struct Scene {
    cells: Vec<Block>,
    width: usize,
    height: usize,
    floor: SurfaceRule,
    ceiling: SurfaceRule,
}

impl Scene {
    /// Build from a jagged 2-D literal with the default checkerboards.
    pub fn new(rows: Vec<Vec<Block>>) -> Self {
        let height = rows.len();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);

        let mut cells = Vec::with_capacity(width * height);
        for mut row in rows {
            row.resize(width, Block::Empty);
            cells.append(&mut row);
        }

        debug!(
            "scene {width}x{height}, {} solid cells",
            cells.iter().filter(|b| b.is_solid()).count()
        );

        Self {
            cells,
            width,
            height,
            floor: SurfaceRule::default_floor(),
            ceiling: SurfaceRule::default_ceiling(),
        }
    }

    pub fn with_surfaces(mut self, floor: SurfaceRule, ceiling: SurfaceRule) -> Self {
        self.floor = floor;
        self.ceiling = ceiling;
        self
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
    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width as f64, self.height as f64)
    }
    #[inline]
    pub fn cells(&self) -> &[Block] {
        &self.cells
    }

    /// `0 <= x < width && 0 <= y < height`.
    #[inline]
    pub fn contains(&self, p: DVec2) -> bool {
        0.0 <= p.x && p.x < self.width as f64 && 0.0 <= p.y && p.y < self.height as f64
    }

    /// `None` outside the grid, `Some(Block::Empty)` for an open cell.
    #[inline]
    pub fn block(&self, p: DVec2) -> Option<Block> {
        if !self.contains(p) {
            return None;
        }
        let fp = p.floor();
        Some(self.cells[fp.y as usize * self.width + fp.x as usize])
    }

    #[inline]
    pub fn block_at(&self, cell: IVec2) -> Option<Block> {
        self.block(cell.as_dvec2())
    }

    /// Out-of-grid points are open void, not walls.
    #[inline]
    pub fn is_wall(&self, p: DVec2) -> bool {
        self.block(p).is_some_and(Block::is_solid)
    }

    #[inline]
    pub fn floor_at(&self, p: DVec2) -> Paint {
        self.floor.at(p)
    }

    #[inline]
    pub fn ceiling_at(&self, p: DVec2) -> Paint {
        self.ceiling.at(p)
    }

    /// Cells spanned by the corners of a square footprint of side `size`
    /// centred at `center` (top-left corner cell ..= bottom-right corner cell).
    pub fn covered_cells(center: DVec2, size: f64) -> SmallVec<[IVec2; 4]> {
        let half = DVec2::splat(size * 0.5);
        let top_left = (center - half).floor().as_ivec2();
        let bottom_right = (center + half).floor().as_ivec2();

        let mut out = SmallVec::new();
        for x in top_left.x..=bottom_right.x {
            for y in top_left.y..=bottom_right.y {
                out.push(IVec2::new(x, y));
            }
        }
        out
    }

    /// Broad-phase collision: only the corner-spanned cells are tested.
    ///
    /// Cells outside the grid count as blocked here, so the player stays
    /// inside the map even though rays treat the outside as open.
    pub fn valid_position(&self, candidate: DVec2, size: f64) -> bool {
        Self::covered_cells(candidate, size)
            .into_iter()
            .all(|cell| matches!(self.block_at(cell), Some(Block::Empty)))
    }
}
