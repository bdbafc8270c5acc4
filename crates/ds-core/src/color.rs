//! CSS-style colors as used by the toolbar color pickers and snapshots.
//!
//! Accepted forms: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`, `rgb(r, g, b)`
//! and `rgba(r, g, b, a)` with `a` in `0.0..=1.0`. Colors always emit as
//! lowercase hex so snapshots are canonical.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use winnow::ascii::{digit1, space0};
use winnow::combinator::alt;
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::take_while;

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color `{0}`")]
pub struct ColorParseError(pub String);

fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse hex digits, with or without a leading `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();
        let pair = |i: usize| -> Option<u8> { Some(hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?) };

        match bytes.len() {
            3 | 4 => {
                let mut ch = [255u8; 4];
                for (i, &byte) in bytes.iter().enumerate() {
                    ch[i] = hex_val(byte)? * 17;
                }
                Some(Self::rgba(ch[0], ch[1], ch[2], ch[3]))
            }
            6 => Some(Self::rgb(pair(0)?, pair(2)?, pair(4)?)),
            8 => Some(Self::rgba(pair(0)?, pair(2)?, pair(4)?, pair(6)?)),
            _ => None,
        }
    }

    /// Lowercase `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Parse any accepted color form. Surrounding whitespace is ignored.
    pub fn parse(s: &str) -> Result<Self, ColorParseError> {
        let mut input = s.trim();
        let color = parse_color(&mut input).map_err(|_| ColorParseError(s.to_string()))?;
        if !input.is_empty() {
            return Err(ColorParseError(s.to_string()));
        }
        Ok(color)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::parse(&s).map_err(serde::de::Error::custom)
    }
}

// ─── Parsers ─────────────────────────────────────────────────────────────

fn parse_color(input: &mut &str) -> ModalResult<Color> {
    alt((parse_hex_color, parse_rgb_function)).parse_next(input)
}

fn parse_hex_color(input: &mut &str) -> ModalResult<Color> {
    let _ = '#'.parse_next(input)?;
    let digits: &str = take_while(1..=8, |c: char| c.is_ascii_hexdigit()).parse_next(input)?;
    Color::from_hex(digits).ok_or_else(|| ErrMode::Backtrack(ContextError::new()))
}

/// `rgb(r, g, b)` / `rgba(r, g, b, a)`.
fn parse_rgb_function(input: &mut &str) -> ModalResult<Color> {
    let has_alpha = alt(("rgba".value(true), "rgb".value(false))).parse_next(input)?;
    let _ = (space0, '(', space0).parse_next(input)?;
    let r = parse_channel(input)?;
    parse_comma(input)?;
    let g = parse_channel(input)?;
    parse_comma(input)?;
    let b = parse_channel(input)?;
    let a = if has_alpha {
        parse_comma(input)?;
        parse_alpha(input)?
    } else {
        255
    };
    let _ = (space0, ')').parse_next(input)?;
    Ok(Color::rgba(r, g, b, a))
}

fn parse_comma(input: &mut &str) -> ModalResult<()> {
    (space0, ',', space0).void().parse_next(input)
}

fn parse_channel(input: &mut &str) -> ModalResult<u8> {
    digit1.try_map(|s: &str| s.parse::<u8>()).parse_next(input)
}

fn parse_alpha(input: &mut &str) -> ModalResult<u8> {
    take_while(1.., |c: char| c.is_ascii_digit() || c == '.')
        .try_map(|s: &str| s.parse::<f32>())
        .verify(|a: &f32| (0.0..=1.0).contains(a))
        .map(|a: f32| (a * 255.0).round() as u8)
        .parse_next(input)
}
