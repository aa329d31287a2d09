//! Pixel colour values.
//!
//! A `Colour` carries three channels, plus an alpha channel when the pixel
//! it was sampled from (or the hex string it was parsed from) has one.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SplitError};

/// An RGB or RGBA colour value.
///
/// Serializes as its hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: Option<u8>,
}

impl Colour {
    /// Create a colour with an alpha channel.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a: Some(a) }
    }

    /// Create a colour without an alpha channel.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: None }
    }

    /// Black, used to fill canvases when nothing else is known.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Build a colour from a raw channel slice (3 or 4 channels).
    pub fn from_channels(channels: &[u8]) -> Option<Self> {
        match *channels {
            [r, g, b] => Some(Self::rgb(r, g, b)),
            [r, g, b, a] => Some(Self::rgba(r, g, b, a)),
            _ => None,
        }
    }

    /// Parse a hex colour string.
    ///
    /// Supports formats:
    /// - `#RGB` (3 digits, expanded to 6)
    /// - `#RGBA` (4 digits, expanded to 8)
    /// - `#RRGGBB` (6 digits)
    /// - `#RRGGBBAA` (8 digits)
    ///
    /// The 3 and 6 digit forms produce a colour without alpha.
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);

        if !hex.is_ascii() {
            return Err(invalid_hex(s));
        }

        match hex.len() {
            3 | 4 => {
                let mut digits = [0u8; 4];
                for (i, c) in hex.chars().enumerate() {
                    let d = parse_hex_digit(c)?;
                    digits[i] = d << 4 | d;
                }
                let [r, g, b, a] = digits;
                if hex.len() == 3 {
                    Ok(Self::rgb(r, g, b))
                } else {
                    Ok(Self::rgba(r, g, b, a))
                }
            }
            6 | 8 => {
                let r = parse_hex_byte(&hex[0..2])?;
                let g = parse_hex_byte(&hex[2..4])?;
                let b = parse_hex_byte(&hex[4..6])?;
                if hex.len() == 6 {
                    Ok(Self::rgb(r, g, b))
                } else {
                    Ok(Self::rgba(r, g, b, parse_hex_byte(&hex[6..8])?))
                }
            }
            _ => Err(invalid_hex(s)),
        }
    }

    /// The first three channels.
    pub fn to_rgb(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Whether the colour carries an alpha channel.
    pub fn has_alpha(self) -> bool {
        self.a.is_some()
    }

    /// Drop the alpha channel.
    pub fn without_alpha(self) -> Self {
        Self::rgb(self.r, self.g, self.b)
    }

    /// Channel-wise equality over the channels both colours carry.
    ///
    /// Alpha only takes part when both sides have it.
    pub fn matches(self, other: Colour) -> bool {
        if self.to_rgb() != other.to_rgb() {
            return false;
        }
        match (self.a, other.a) {
            (Some(a), Some(b)) => a == b,
            _ => true,
        }
    }
}

impl FromStr for Colour {
    type Err = SplitError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Colour {
    type Error = SplitError;

    fn try_from(s: String) -> Result<Self> {
        Self::from_hex(&s)
    }
}

impl From<Colour> for String {
    fn from(colour: Colour) -> Self {
        colour.to_string()
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.a {
            None => write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b),
            Some(a) => write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, a),
        }
    }
}

fn invalid_hex(s: &str) -> SplitError {
    SplitError::Parse {
        message: format!("Invalid hex colour: {}", s),
        help: Some("Use #RGB, #RGBA, #RRGGBB, or #RRGGBBAA format".to_string()),
    }
}

/// Parse a single hex digit.
fn parse_hex_digit(c: char) -> Result<u8> {
    c.to_digit(16)
        .map(|d| d as u8)
        .ok_or_else(|| SplitError::Parse {
            message: format!("Invalid hex digit: {}", c),
            help: None,
        })
}

/// Parse a two-character hex byte.
fn parse_hex_byte(s: &str) -> Result<u8> {
    u8::from_str_radix(s, 16).map_err(|_| SplitError::Parse {
        message: format!("Invalid hex byte: {}", s),
        help: None,
    })
}
