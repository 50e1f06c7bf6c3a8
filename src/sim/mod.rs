mod clock;
mod input;
mod movement;

pub use clock::FrameClock;
pub use input::Controls;
pub use movement::update_player;
