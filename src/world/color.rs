/// Floating-point RGBA colour, channels nominally in `0.0 ..= 1.0`.
///
/// Channels are **not** clamped on construction; brightness scaling may push
/// them above 1.0 and [`Color::to_rgba8`] is where clamping happens.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn red() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0)
    }
    pub const fn green() -> Self {
        Self::new(0.0, 1.0, 0.0, 1.0)
    }
    pub const fn blue() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }
    pub const fn yellow() -> Self {
        Self::new(1.0, 1.0, 0.0, 1.0)
    }
    pub const fn magenta() -> Self {
        Self::new(1.0, 0.0, 1.0, 1.0)
    }
    pub const fn cyan() -> Self {
        Self::new(0.0, 1.0, 1.0, 1.0)
    }
    /// "Missing texture" placeholder.
    pub const fn purple() -> Self {
        Self::new(1.0, 0.0, 1.0, 1.0)
    }
    pub const fn white() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }
    pub const fn black() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }
    pub const fn dark_grey() -> Self {
        Self::new(0.2, 0.2, 0.2, 1.0)
    }
    pub const fn light_grey() -> Self {
        Self::new(0.3, 0.3, 0.3, 1.0)
    }

    /// Build from a packed `0xRRGGBB` value (alpha = 1).
    pub fn from_hex(rgb: u32) -> Self {
        let ch = |shift: u32| ((rgb >> shift) & 0xFF) as f64 / 255.0;
        Self::new(ch(16), ch(8), ch(0), 1.0)
    }

    /// Look up one of the named constructors (`"red"`, `"dark_grey"`, ...).
    pub fn by_name(name: &str) -> Option<Self> {
        let c = match name {
            "red" => Self::red(),
            "green" => Self::green(),
            "blue" => Self::blue(),
            "yellow" => Self::yellow(),
            "magenta" => Self::magenta(),
            "cyan" => Self::cyan(),
            "purple" => Self::purple(),
            "white" => Self::white(),
            "black" => Self::black(),
            "dark_grey" => Self::dark_grey(),
            "light_grey" => Self::light_grey(),
            _ => return None,
        };
        Some(c)
    }

    /// Scale r/g/b by `factor`; alpha is left untouched.
    #[inline]
    pub fn brightness(self, factor: f64) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor, self.a)
    }

    /// 8-bit channels via `floor(c * 255)`, clamped to `0..=255`.
    #[inline]
    pub fn to_rgba8(self) -> [u8; 4] {
        [
            channel_to_u8(self.r),
            channel_to_u8(self.g),
            channel_to_u8(self.b),
            channel_to_u8(self.a),
        ]
    }

    /// Packed `0x00RRGGBB` for the display surface.
    #[inline]
    pub fn to_rgb_u32(self) -> u32 {
        let [r, g, b, _] = self.to_rgba8();
        pack_rgb(r, g, b)
    }
}

/// Truncating conversion; the explicit clamp covers brightness factors > 1.
#[inline]
pub fn channel_to_u8(c: f64) -> u8 {
    (c * 255.0).floor().clamp(0.0, 255.0) as u8
}

#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brightness_keeps_alpha() {
        let c = Color::new(0.5, 0.25, 1.0, 0.75).brightness(0.5);
        assert_eq!(c, Color::new(0.25, 0.125, 0.5, 0.75));
    }

    #[test]
    fn to_rgba8_truncates() {
        // 0.3 * 255 = 76.5 -> 76, not 77
        assert_eq!(Color::light_grey().to_rgba8(), [76, 76, 76, 255]);
        assert_eq!(Color::dark_grey().to_rgba8(), [51, 51, 51, 255]);
    }

    #[test]
    fn overbright_channels_clamp() {
        let c = Color::new(0.8, 0.1, 0.0, 1.0).brightness(4.0);
        assert_eq!(c.to_rgba8(), [255, 102, 0, 255]);
        assert_eq!(Color::new(-0.5, 0.0, 0.0, 1.0).to_rgba8()[0], 0);
    }

    #[test]
    fn hex_and_names() {
        assert_eq!(Color::from_hex(0x303030).to_rgb_u32(), 0x30_30_30);
        assert_eq!(Color::by_name("purple"), Some(Color::purple()));
        assert_eq!(Color::by_name("chartreuse"), None);
    }
}
