use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{QuoteError, QuoteResult};

/// Absolute 0-based index of a frame inside one output video.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FrameIndex(pub u64);

/// Output frame dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameSize {
    /// Create a validated, non-empty frame size.
    pub fn new(width: u32, height: u32) -> QuoteResult<Self> {
        if width == 0 || height == 0 {
            return Err(QuoteError::validation("frame width/height must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Number of pixels in a frame of this size.
    pub fn pixel_count(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }
}

/// Opaque 8-bit RGB color.
///
/// Deserializes from either `[r, g, b]` or `"#RRGGBB"`; always serializes as an array.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Build a color from channel values.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as an `[r, g, b]` array.
    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Channels as an opaque `[r, g, b, 255]` array.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }

    /// Parse `#RRGGBB` (the leading `#` is optional, case-insensitive).
    pub fn parse_hex(s: &str) -> QuoteResult<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if s.len() != 6 || !s.is_ascii() {
            return Err(QuoteError::validation(format!(
                "hex color must be #RRGGBB, got \"{s}\""
            )));
        }

        fn hex_byte(pair: &str) -> QuoteResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| QuoteError::validation(format!("invalid hex byte \"{pair}\"")))
        }

        Ok(Self::new(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        ))
    }

    fn from_components(v: &[i64]) -> QuoteResult<Self> {
        if v.len() != 3 {
            return Err(QuoteError::validation(
                "rgb color must have exactly 3 components ([r, g, b])",
            ));
        }
        let channel = |c: i64| -> QuoteResult<u8> {
            u8::try_from(c).map_err(|_| {
                QuoteError::validation(format!("color component {c} is outside [0, 255]"))
            })
        };
        Ok(Self::new(channel(v[0])?, channel(v[1])?, channel(v[2])?))
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb8 {
    type Err = QuoteError;

    /// Accepts `#RRGGBB` or a comma-separated `r,g,b` triple.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.contains(',') {
            let parts = s
                .split(',')
                .map(|p| {
                    p.trim().parse::<i64>().map_err(|_| {
                        QuoteError::validation(format!("invalid color component \"{}\"", p.trim()))
                    })
                })
                .collect::<QuoteResult<Vec<_>>>()?;
            return Self::from_components(&parts);
        }
        Self::parse_hex(s)
    }
}

impl Serialize for Rgb8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_array().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Rgb8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Arr(Vec<i64>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => Self::parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::Arr(v) => Self::from_components(&v).map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
