use once_cell::sync::Lazy;

/// Horizontal field of view (radians).
pub const FOV: f64 = std::f64::consts::FRAC_PI_2;

/// Outward nudge used when snapping to grid lines.
pub const EPSILON: f64 = 1e-6;

/// Side of the player's square collision footprint (map units).
pub const PLAYER_SIZE: f64 = 0.5;

/// Walk speed in map units per second.
pub const PLAYER_SPEED: f64 = 2.5;

/// Turn rate in radians per second.
pub const TURN_RATE: f64 = std::f64::consts::PI / PLAYER_SPEED;

pub const NEAR_CLIPPING_PLANE: f64 = 0.1;
pub const FAR_CLIPPING_PLANE: f64 = 10.0;

/// Upper bound on grid steps for one ray. A segment of length `FAR` crosses
/// at most `2 * (FAR + 1)` grid lines and every line may take two snaps.
pub const MAX_RAY_STEPS: usize = 4 * (FAR_CLIPPING_PLANE as usize + 1) + 4;

/// `cos(FOV / 2)`, the sprite view-cone bound.
pub static COS_HALF_FOV: Lazy<f64> = Lazy::new(|| (FOV * 0.5).cos());
