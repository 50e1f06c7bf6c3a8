use bitflags::bitflags;

bitflags! {
    /// Snapshot of the movement keys, sampled once per frame.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Controls: u8 {
        const FORWARD      = 0x01;
        const BACKWARD     = 0x02;
        const STRAFE_LEFT  = 0x04;
        const STRAFE_RIGHT = 0x08;
        const TURN_LEFT    = 0x10;
        const TURN_RIGHT   = 0x20;
    }
}
