//! Note color parsing, validation, and derived styles.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::consts::{NOTE_BACKGROUND_ALPHA, NOTE_PALETTE};

/// An RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Parse `#rrggbb` or `rrggbb` (any case) into RGB channels.
///
/// Returns `None` for anything else, including the short `#rgb` form.
#[must_use]
pub fn parse_hex_rgb(raw: &str) -> Option<Rgb> {
    let hex = raw.strip_prefix('#').unwrap_or(raw);
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
    match (channel(0), channel(2), channel(4)) {
        (Ok(r), Ok(g), Ok(b)) => Some(Rgb { r, g, b }),
        _ => None,
    }
}

/// A validated note color, kept in canonical lowercase `#rrggbb` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexColor(Rgb);

impl HexColor {
    /// Validate a user-supplied color. Invalid input yields `None` and must
    /// never reach note state.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        parse_hex_rgb(raw).map(Self)
    }

    /// Pick a palette color uniformly at random.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::palette(rng.random_range(0..NOTE_PALETTE.len()))
    }

    /// Palette entry `index`, wrapping around.
    #[must_use]
    pub fn palette(index: usize) -> Self {
        let raw = NOTE_PALETTE[index % NOTE_PALETTE.len()];
        Self(parse_hex_rgb(raw).unwrap_or(Rgb { r: 0x81, g: 0xdd, b: 0xe9 }))
    }

    #[must_use]
    pub fn rgb(self) -> Rgb {
        self.0
    }

    /// CSS `rgba()` of this color at the given opacity.
    #[must_use]
    pub fn rgba(self, alpha: f64) -> String {
        let Rgb { r, g, b } = self.0;
        format!("rgba({r}, {g}, {b}, {alpha})")
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self::palette(0)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Rgb { r, g, b } = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Stored colors that fail validation fall back to the first palette entry.
impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw).unwrap_or_else(|| {
            tracing::warn!(color = %raw, "stored note color is invalid; using default");
            Self::default()
        }))
    }
}

/// Inline style derived from a note's color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteStyle {
    /// Solid border color, `#rrggbb`.
    pub border_color: String,
    /// Same color at [`NOTE_BACKGROUND_ALPHA`] opacity.
    pub background_color: String,
}

impl NoteStyle {
    #[must_use]
    pub fn for_color(color: HexColor) -> Self {
        Self {
            border_color: color.to_string(),
            background_color: color.rgba(NOTE_BACKGROUND_ALPHA),
        }
    }
}
