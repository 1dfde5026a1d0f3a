//! RGBA colour type
//!
//! Colours are stored straight (not premultiplied), 8 bits per channel.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Fully transparent black (the empty surface)
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// Opaque black
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    /// Opaque white
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Unlit segment overlay: black at 2.5% opacity
    pub const DIM_BACKLIGHT: Color = Color::rgba(0, 0, 0, 6);

    /// Create an opaque colour
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a colour with alpha
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Check if the colour fully covers what is beneath it
    pub const fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Parse a CSS-style hex colour
    ///
    /// Accepts `#rgb`, `#rrggbb` and `#rrggbbaa` (the `#` is optional).
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        match hex.len() {
            3 => {
                let mut channels = [0u8; 3];
                for (i, c) in hex.bytes().enumerate() {
                    let v = hex_digit(c)?;
                    channels[i] = v << 4 | v;
                }
                Some(Color::rgb(channels[0], channels[1], channels[2]))
            }
            6 => Some(Color::rgb(
                hex_byte(&hex[0..2])?,
                hex_byte(&hex[2..4])?,
                hex_byte(&hex[4..6])?,
            )),
            8 => Some(Color::rgba(
                hex_byte(&hex[0..2])?,
                hex_byte(&hex[2..4])?,
                hex_byte(&hex[4..6])?,
                hex_byte(&hex[6..8])?,
            )),
            _ => None,
        }
    }

    /// Composite this colour over `dst` (source-over)
    pub fn over(self, dst: Color) -> Color {
        if self.a == 255 || dst.a == 0 {
            return self;
        }
        if self.a == 0 {
            return dst;
        }

        let sa = self.a as u32;
        // Destination contribution, scaled to 0..=255 × 255
        let da = dst.a as u32 * (255 - sa);
        let out_a_x255 = sa * 255 + da;

        let channel = |s: u8, d: u8| -> u8 {
            let v = (s as u32 * sa * 255 + d as u32 * da + out_a_x255 / 2) / out_a_x255;
            v.min(255) as u8
        };

        Color {
            r: channel(self.r, dst.r),
            g: channel(self.g, dst.g),
            b: channel(self.b, dst.b),
            a: ((out_a_x255 + 127) / 255).min(255) as u8,
        }
    }

    /// Blend this colour onto an opaque background and drop the alpha
    pub fn flatten(self, background: Color) -> Color {
        let bg = Color { a: 255, ..background };
        self.over(bg)
    }
}

fn hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

fn hex_byte(s: &str) -> Option<u8> {
    let bytes = s.as_bytes();
    Some(hex_digit(bytes[0])? << 4 | hex_digit(bytes[1])?)
}
