use std::fmt;

/// Linear RGBA colour with straight (non-premultiplied) alpha, each channel in 0..=1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build from 8-bit channels, e.g. `Rgba::from_u8(30, 58, 95, 0.2)`.
    pub fn from_u8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a.clamp(0.0, 1.0),
        }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`. Returns `None` for anything else.
    pub fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#')?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok();
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            3 => {
                let (r, g, b) = (nibble(0)?, nibble(1)?, nibble(2)?);
                Some(Self::from_u8(r * 17, g * 17, b * 17, 1.0))
            }
            6 => Some(Self::from_u8(byte(0)?, byte(2)?, byte(4)?, 1.0)),
            8 => Some(Self::from_u8(
                byte(0)?,
                byte(2)?,
                byte(4)?,
                byte(6)? as f32 / 255.0,
            )),
            _ => None,
        }
    }

    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        Rgba {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    pub fn max_channel_delta(self, other: Rgba) -> f32 {
        (self.r - other.r)
            .abs()
            .max((self.g - other.g).abs())
            .max((self.b - other.b).abs())
            .max((self.a - other.a).abs())
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl fmt::Display for Rgba {
    /// CSS `rgba(...)` notation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ch = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        write!(
            f,
            "rgba({}, {}, {}, {:.3})",
            ch(self.r),
            ch(self.g),
            ch(self.b),
            self.a.clamp(0.0, 1.0)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_hex() {
        let short = Rgba::parse_hex("#fff").unwrap();
        assert_eq!(short, Rgba::new(1.0, 1.0, 1.0, 1.0));

        let brand = Rgba::parse_hex("#00A8E8").unwrap();
        assert_eq!(brand.to_string(), "rgba(0, 168, 232, 1.000)");

        let translucent = Rgba::parse_hex("#1e3a5f80").unwrap();
        assert!((translucent.a - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(Rgba::parse_hex("00A8E8"), None);
        assert_eq!(Rgba::parse_hex("#00A8E"), None);
        assert_eq!(Rgba::parse_hex("#zzzzzz"), None);
        assert_eq!(Rgba::parse_hex("#é1"), None);
    }

    #[test]
    fn lerp_clamps_parameter() {
        let a = Rgba::TRANSPARENT;
        let b = Rgba::new(1.0, 1.0, 1.0, 1.0);
        assert_eq!(a.lerp(b, 2.0), b);
        assert_eq!(a.lerp(b, -1.0), a);
    }
}
