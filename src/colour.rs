use serde::{Deserialize, Deserializer};

/// A colour, expressed in RGB or CMYK colour spaces
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Colour {
    /// DeviceRGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceCMYK colour; c, m, y, and k range from 0.0 to 1.0
    CMYK { c: f32, m: f32, y: f32, k: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0.0 to 1.0
    pub fn new_rgb(r: f32, g: f32, b: f32) -> Colour {
        Colour::RGB { r, g, b }
    }

    /// Create a new colour in the RGB space. r, g, and b range from 0 to 255
    pub fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::RGB {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Create a new colour in the Gray space, g ranges from 0.0 to 1.0
    pub fn new_grey(g: f32) -> Colour {
        Colour::Grey { g }
    }

    /// Parse a `#RRGGBB` (or `RRGGBB`) hex string into an RGB colour
    pub fn from_hex(hex: &str) -> Option<Colour> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Colour::new_rgb_bytes(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl<T: Into<f32>> From<(T, T, T)> for Colour {
    fn from(c: (T, T, T)) -> Self {
        Colour::RGB {
            r: c.0.into(),
            g: c.1.into(),
            b: c.2.into(),
        }
    }
}

impl<'de> Deserialize<'de> for Colour {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Colour::from_hex(&hex)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid hex colour `{hex}`")))
    }
}

/// A colour together with an opacity, as used for fills and strokes
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Paint {
    pub colour: Colour,
    /// 0.0 is fully transparent, 1.0 is fully opaque
    pub alpha: f32,
}

impl Paint {
    pub fn new(colour: Colour, alpha: f32) -> Paint {
        Paint {
            colour,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    pub fn is_opaque(&self) -> bool {
        self.alpha >= 1.0
    }

    /// Key used to share one graphics state object between every use of the
    /// same opacity
    pub(crate) fn alpha_key(&self) -> u16 {
        (self.alpha.clamp(0.0, 1.0) * 1000.0).round() as u16
    }
}

impl From<Colour> for Paint {
    fn from(colour: Colour) -> Self {
        Paint { colour, alpha: 1.0 }
    }
}

/// A list of pre-defined colour constants
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    pub const WHITE: Colour = Colour::Grey { g: 1.0 };
    /// Neutral grey used for skill chips
    pub const CHIP_GREY: Colour = Colour::RGB {
        r: 0.75,
        g: 0.75,
        b: 0.75,
    };
}
