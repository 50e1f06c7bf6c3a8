use glam::DVec2;

use super::consts::{FOV, NEAR_CLIPPING_PLANE};

/// Player pose in map space.
///
/// * `direction` is the heading in radians (0 = +X, increasing towards +Y).
/// * The FOV edge points are derived on demand, never stored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Player {
    pub position: DVec2,
    pub direction: f64,
    pub velocity: DVec2,
}

impl Player {
    pub fn new(position: DVec2, direction: f64) -> Self {
        Self {
            position,
            direction,
            velocity: DVec2::ZERO,
        }
    }

    /// Unit vector along the heading.
    #[inline(always)]
    pub fn forward(&self) -> DVec2 {
        DVec2::from_angle(self.direction)
    }

    /// The two ends `(p1, p2)` of the near-plane segment.
    ///
    /// ```text
    /// l  = tan(FOV/2) * NEAR
    /// p  = position + forward * NEAR
    /// p1 = p - perp(p - position).norm() * l
    /// p2 = p + perp(p - position).norm() * l
    /// ```
    pub fn fov(&self) -> (DVec2, DVec2) {
        let l = (FOV * 0.5).tan() * NEAR_CLIPPING_PLANE;
        let p = self.position + self.forward() * NEAR_CLIPPING_PLANE;
        let side = (p - self.position).perp().normalize_or_zero() * l;
        (p - side, p + side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn forward_is_unit() {
        let p = Player::new(DVec2::ZERO, 0.3);
        assert!((p.forward().length() - 1.0).abs() < 1e-12);
        assert!((Player::new(DVec2::ZERO, 0.0).forward() - DVec2::X).length() < 1e-12);
    }

    #[test]
    fn fov_edges_straddle_heading() {
        let p = Player::new(DVec2::new(5.0, 5.0), 0.0);
        let (p1, p2) = p.fov();
        assert!((p1 - DVec2::new(5.1, 4.9)).length() < 1e-12);
        assert!((p2 - DVec2::new(5.1, 5.1)).length() < 1e-12);
        // centre of the near plane is straight ahead
        assert!((p1.lerp(p2, 0.5) - DVec2::new(5.1, 5.0)).length() < 1e-12);
    }

    #[test]
    fn fov_rotates_with_direction() {
        let p = Player::new(DVec2::ZERO, FRAC_PI_2);
        let (p1, p2) = p.fov();
        // facing +Y: p1 is on the +X side, p2 on the -X side
        assert!(p1.x > 0.0 && p2.x < 0.0);
        assert!((p1.y - NEAR_CLIPPING_PLANE).abs() < 1e-12);
        // 90 degree cone: edges at 45 degrees off the heading
        let cos = p1.normalize().dot(p.forward());
        assert!((cos - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-9);
    }
}
