//! Player kinematics: keys -> velocity -> collision-checked position.
//!
//! Pure function of `(scene, player, controls, dt)`; the caller owns the
//! `Player` and swaps in the returned pose.

use std::f64::consts::FRAC_PI_2;

use glam::DVec2;

use super::input::Controls;
use crate::world::Player;
use crate::world::Scene;
use crate::world::consts::{PLAYER_SIZE, PLAYER_SPEED, TURN_RATE};

/// Desired velocity and turn rate for the held keys at heading `direction`.
fn desired_motion(direction: f64, controls: Controls) -> (DVec2, f64) {
    let forward = DVec2::from_angle(direction);
    // -90 degrees from the heading
    let left = DVec2::from_angle(direction - FRAC_PI_2);

    let mut velocity = DVec2::ZERO;
    let mut angular = 0.0;

    if controls.contains(Controls::FORWARD) {
        velocity += forward * PLAYER_SPEED;
    }
    if controls.contains(Controls::BACKWARD) {
        velocity -= forward * PLAYER_SPEED;
    }
    if controls.contains(Controls::STRAFE_LEFT) {
        velocity += left * PLAYER_SPEED;
    }
    if controls.contains(Controls::STRAFE_RIGHT) {
        velocity -= left * PLAYER_SPEED;
    }
    if controls.contains(Controls::TURN_LEFT) {
        angular -= TURN_RATE;
    }
    if controls.contains(Controls::TURN_RIGHT) {
        angular += TURN_RATE;
    }
    (velocity, angular)
}

/// Advance `player` by `dt` seconds.
///
/// Velocity is derived from the heading at the start of the frame, then the
/// heading turns, then x and y are moved one axis at a time. An axis whose
/// move would overlap a wall is left unchanged, so the player slides along
/// walls instead of sticking to them.
pub fn update_player(scene: &Scene, player: &Player, controls: Controls, dt: f64) -> Player {
    let (velocity, angular) = desired_motion(player.direction, controls);

    let mut next = *player;
    next.velocity = velocity;
    next.direction += angular * dt;

    let step = velocity * dt;

    let try_x = DVec2::new(next.position.x + step.x, next.position.y);
    if scene.valid_position(try_x, PLAYER_SIZE) {
        next.position.x = try_x.x;
    }

    let try_y = DVec2::new(next.position.x, next.position.y + step.y);
    if scene.valid_position(try_y, PLAYER_SIZE) {
        next.position.y = try_y.y;
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::testutil::room;

    fn close(a: DVec2, b: DVec2) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn idle_player_stays_put() {
        let scene = room(10);
        let p = Player::new(DVec2::new(5.0, 5.0), 0.4);
        let next = update_player(&scene, &p, Controls::empty(), 0.5);
        assert_eq!(next.position, p.position);
        assert_eq!(next.direction, p.direction);
        assert_eq!(next.velocity, DVec2::ZERO);
    }

    #[test]
    fn forward_moves_along_heading() {
        let scene = room(10);
        let p = Player::new(DVec2::new(5.0, 5.0), 0.0);
        let next = update_player(&scene, &p, Controls::FORWARD, 0.1);
        assert!(close(next.position, DVec2::new(5.0 + PLAYER_SPEED * 0.1, 5.0)));
        assert!(close(next.velocity, DVec2::new(PLAYER_SPEED, 0.0)));

        let back = update_player(&scene, &p, Controls::BACKWARD, 0.1);
        assert!(close(back.position, DVec2::new(5.0 - PLAYER_SPEED * 0.1, 5.0)));
    }

    #[test]
    fn strafing_is_perpendicular() {
        let scene = room(10);
        let p = Player::new(DVec2::new(5.0, 5.0), 0.0);
        // facing +x, left is -y
        let left = update_player(&scene, &p, Controls::STRAFE_LEFT, 0.1);
        assert!(close(left.position, DVec2::new(5.0, 5.0 - PLAYER_SPEED * 0.1)));
        let right = update_player(&scene, &p, Controls::STRAFE_RIGHT, 0.1);
        assert!(close(right.position, DVec2::new(5.0, 5.0 + PLAYER_SPEED * 0.1)));
        let both = update_player(&scene, &p, Controls::STRAFE_LEFT | Controls::STRAFE_RIGHT, 0.1);
        assert!(close(both.position, p.position));
    }

    #[test]
    fn turning_scales_with_dt() {
        let scene = room(10);
        let p = Player::new(DVec2::new(5.0, 5.0), 1.0);
        let l = update_player(&scene, &p, Controls::TURN_LEFT, 0.25);
        let r = update_player(&scene, &p, Controls::TURN_RIGHT, 0.25);
        assert!((l.direction - (1.0 - TURN_RATE * 0.25)).abs() < 1e-12);
        assert!((r.direction - (1.0 + TURN_RATE * 0.25)).abs() < 1e-12);
        assert_eq!(l.position, p.position);
    }

    #[test]
    fn velocity_uses_heading_before_turn() {
        let scene = room(10);
        let p = Player::new(DVec2::new(5.0, 5.0), 0.0);
        let next = update_player(&scene, &p, Controls::FORWARD | Controls::TURN_RIGHT, 0.1);
        assert!(close(next.velocity, DVec2::new(PLAYER_SPEED, 0.0)));
        assert!(next.direction > 0.0);
    }

    #[test]
    fn blocked_axis_slides_along_wall() {
        let scene = room(10);
        // hugging the east wall (cells x=9), heading diagonally into it
        let p = Player::new(DVec2::new(8.7, 5.0), std::f64::consts::FRAC_PI_4);
        let next = update_player(&scene, &p, Controls::FORWARD, 0.1);
        assert_eq!(next.position.x, 8.7);
        assert!(next.position.y > 5.0);
    }

    #[test]
    fn walls_are_never_entered() {
        let scene = room(10);
        let mut p = Player::new(DVec2::new(5.0, 5.0), 0.3);
        for _ in 0..200 {
            p = update_player(&scene, &p, Controls::FORWARD | Controls::TURN_LEFT, 0.05);
            assert!(scene.valid_position(p.position, PLAYER_SIZE), "{:?}", p.position);
        }
    }

    #[test]
    fn zero_dt_is_a_no_op() {
        let scene = room(10);
        let p = Player::new(DVec2::new(5.0, 5.0), 2.0);
        let next = update_player(&scene, &p, Controls::all(), 0.0);
        assert_eq!(next.position, p.position);
        assert_eq!(next.direction, p.direction);
    }
}
