//! First-person raycaster over a uniform tile grid.
//!
//! * [`world`] – scene grid, player pose, textures and the grid ray caster.
//! * [`sim`] – per-frame input snapshot and collision-checked movement.
//! * [`renderer`] – software wall / floor / sprite passes and the minimap.

pub mod renderer;
pub mod sim;
pub mod world;
