//! Grid traversal ("DDA"-style) ray caster.
//!
//! A ray is the line through two points. Every [`ray_step`] extrapolates it
//! to the next vertical **or** horizontal grid line, whichever is nearer, so
//! the walk visits each cell the ray passes through exactly once.
//!
//! Points that land exactly on a grid line are owned by the cell being
//! *entered*; that is what the `EPSILON` nudges below decide.

use glam::{DVec2, IVec2};

use super::consts::{EPSILON, FAR_CLIPPING_PLANE, MAX_RAY_STEPS};
use super::scene::{Block, Scene};

/// `Math.sign`-style sign: zero stays zero (unlike `f64::signum`).
#[inline(always)]
fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Next integer grid coordinate past `x` in the direction of `dx`.
///
/// ```text
/// dx > 0  ->  ceil(x + eps)
/// dx < 0  ->  floor(x - eps)
/// dx == 0 ->  x
/// ```
#[inline]
pub fn snap_to_grid(x: f64, dx: f64) -> f64 {
    if dx > 0.0 {
        (x + EPSILON).ceil()
    } else if dx < 0.0 {
        (x - EPSILON).floor()
    } else {
        x
    }
}

/// Cell the segment `p1 -> p2` is entering at `p2`.
#[inline]
pub fn hitting_cell(p1: DVec2, p2: DVec2) -> IVec2 {
    let d = p2 - p1;
    IVec2::new(
        (p2.x + sign(d.x) * EPSILON).floor() as i32,
        (p2.y + sign(d.y) * EPSILON).floor() as i32,
    )
}

/// Advance the ray through `p1`, `p2` to the next grid-line crossing.
pub fn ray_step(p1: DVec2, p2: DVec2) -> DVec2 {
    let d = p2 - p1;
    if d.x == 0.0 {
        // vertical ray: only y can cross a line
        return DVec2::new(p2.x, snap_to_grid(p2.y, d.y));
    }

    let k = d.y / d.x;
    let c = p1.y - k * p1.x;

    let x3 = snap_to_grid(p2.x, d.x);
    let mut p3 = DVec2::new(x3, k * x3 + c);

    if k != 0.0 {
        let y3 = snap_to_grid(p2.y, d.y);
        let across = DVec2::new((y3 - c) / k, y3);
        // corner tie-break is by distance, never by axis
        if p2.distance_squared(across) < p2.distance_squared(p3) {
            p3 = across;
        }
    }
    p3
}

/// Outcome of one [`cast_ray`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayCast {
    /// Last point reached: the wall hit point, or where the walk gave up.
    pub point: DVec2,
    /// Cell owning `point` along the travel direction.
    pub cell: IVec2,
    /// `false` when the far plane was reached without meeting a wall.
    pub hit: bool,
}

/// Walk from `origin` through `target` until a solid cell is entered or the
/// far clipping plane is passed.
///
/// Cells outside the scene are open void: only the distance cap stops a ray
/// that leaves the grid.
pub fn cast_ray(scene: &Scene, origin: DVec2, target: DVec2) -> RayCast {
    let far_sq = FAR_CLIPPING_PLANE * FAR_CLIPPING_PLANE;
    let (mut p1, mut p2) = (origin, target);

    for _ in 0..MAX_RAY_STEPS {
        if origin.distance_squared(p2) >= far_sq {
            break;
        }
        let cell = hitting_cell(p1, p2);
        if scene.block_at(cell).is_some_and(Block::is_solid) {
            return RayCast {
                point: p2,
                cell,
                hit: true,
            };
        }
        let p3 = ray_step(p1, p2);
        p1 = p2;
        p2 = p3;
    }

    RayCast {
        point: p2,
        cell: hitting_cell(p1, p2),
        hit: false,
    }
}
