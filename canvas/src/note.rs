//! Note model: ids, geometry, content, and sparse updates.
//!
//! Notes are stored on the wire with CSS pixel strings (`"120px"`) for
//! position and size, matching what the browser host writes into element
//! styles. In memory every coordinate is an `f64` in canvas space.
//!
//! Ids have the form `note_<n>`. The counter for a canvas is recomputed on
//! load from the highest existing suffix, so ids are never reused while the
//! canvas stays loaded.

#[cfg(test)]
#[path = "note_test.rs"]
mod note_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::color::{HexColor, NoteStyle};
use crate::consts::{MAX_NOTE_HEIGHT, MAX_NOTE_WIDTH, MIN_NOTE_HEIGHT, MIN_NOTE_WIDTH, NOTE_ID_PREFIX};
use crate::transform::Point;

/// Identifier of a note within one canvas (`note_<n>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoteId(pub u64);

/// Error returned when a string is not a `note_<n>` id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid note id: {0}")]
pub struct ParseNoteIdError(pub String);

impl NoteId {
    /// Next free id after `existing`: highest suffix plus one, or `note_0`
    /// when there are no notes. `None` when the highest id is `u64::MAX`.
    #[must_use]
    pub fn next_after<'a>(existing: impl IntoIterator<Item = &'a NoteId>) -> Option<NoteId> {
        match existing.into_iter().max() {
            Some(highest) => highest.successor(),
            None => Some(NoteId(0)),
        }
    }

    /// The id after this one, if there is one.
    #[must_use]
    pub fn successor(self) -> Option<NoteId> {
        self.0.checked_add(1).map(NoteId)
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{NOTE_ID_PREFIX}{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = ParseNoteIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix(NOTE_ID_PREFIX).ok_or_else(|| ParseNoteIdError(s.to_owned()))?;
        digits.parse::<u64>().map(NoteId).map_err(|_| ParseNoteIdError(s.to_owned()))
    }
}

impl Serialize for NoteId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NoteId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Serde helpers for CSS pixel strings (`"12.5px"`).
///
/// Reading is lenient: bare numbers and unit-less strings are accepted, and
/// anything unparseable reads as `0`.
mod px {
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn format(value: f64) -> String {
        format!("{value}px")
    }

    pub fn parse(value: &Value) -> Option<f64> {
        let parsed = match value {
            Value::Number(n) => n.as_f64()?,
            Value::String(s) => match s.trim().trim_end_matches("px").trim().parse::<f64>() {
                Ok(v) => v,
                Err(_) => return None,
            },
            _ => return None,
        };
        parsed.is_finite().then_some(parsed)
    }

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(parse(&value).unwrap_or(0.0))
    }

    pub mod option {
        use serde::{Deserialize, Deserializer, Serializer};
        use serde_json::Value;

        #[allow(clippy::ref_option)]
        pub fn serialize<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
            match value {
                Some(v) => serializer.serialize_str(&super::format(*v)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
            let value = Option::<Value>::deserialize(deserializer)?;
            Ok(value.as_ref().and_then(super::parse))
        }
    }
}

/// Clamp a requested note size into the resizable range.
#[must_use]
pub fn clamp_size(width: f64, height: f64) -> (f64, f64) {
    (width.clamp(MIN_NOTE_WIDTH, MAX_NOTE_WIDTH), height.clamp(MIN_NOTE_HEIGHT, MAX_NOTE_HEIGHT))
}

/// Strip trailing empty paragraphs (`<p><br></p>`, `<p></p>`) the rich-text
/// editor leaves behind, along with whitespace between them.
#[must_use]
pub fn trim_trailing_empty_paragraphs(content: &str) -> &str {
    let mut rest = content;
    loop {
        let trimmed = rest.trim_end();
        let stripped = trimmed
            .strip_suffix("<p><br></p>")
            .or_else(|| trimmed.strip_suffix("<p></p>"));
        match stripped {
            Some(shorter) => rest = shorter,
            None => return rest,
        }
    }
}

/// One sticky note as held in memory and persisted in the store blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    /// Rich-text markup from the editor widget. May be empty.
    #[serde(default)]
    pub content: String,
    /// Canvas-space y of the top edge.
    #[serde(default, with = "px")]
    pub top: f64,
    /// Canvas-space x of the left edge.
    #[serde(default, with = "px")]
    pub left: f64,
    #[serde(default, with = "px::option", skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, with = "px::option", skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default)]
    pub color: HexColor,
}

impl Note {
    /// A new, empty note with its top-left corner at `position`.
    #[must_use]
    pub fn new(id: NoteId, position: Point, color: HexColor) -> Self {
        Self {
            id,
            content: String::new(),
            top: position.y,
            left: position.x,
            width: None,
            height: None,
            color,
        }
    }

    pub fn set_position(&mut self, top: f64, left: f64) {
        self.top = top;
        self.left = left;
    }

    /// Set an explicit size, clamped to the resizable range. Non-finite
    /// requests are ignored.
    pub fn set_size(&mut self, width: f64, height: f64) {
        if !width.is_finite() || !height.is_finite() {
            return;
        }
        let (w, h) = clamp_size(width, height);
        self.width = Some(w);
        self.height = Some(h);
    }

    pub fn set_color(&mut self, color: HexColor) {
        self.color = color;
    }

    /// Commit editor content, dropping trailing empty paragraphs.
    pub fn set_content(&mut self, content: &str) {
        self.content = trim_trailing_empty_paragraphs(content).to_owned();
    }

    /// Inline style derived from the note color.
    #[must_use]
    pub fn style(&self) -> NoteStyle {
        NoteStyle::for_color(self.color)
    }

    /// Apply a sparse update. Only present fields change.
    pub fn apply(&mut self, update: &NoteUpdate) {
        if let Some(top) = update.top {
            self.top = top;
        }
        if let Some(left) = update.left {
            self.left = left;
        }
        if let Some((w, h)) = update.size {
            self.set_size(w, h);
        }
        if let Some(color) = update.color {
            self.color = color;
        }
        if let Some(ref content) = update.content {
            self.set_content(content);
        }
    }
}

/// Sparse update for a note. Colors are already validated by construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteUpdate {
    pub top: Option<f64>,
    pub left: Option<f64>,
    /// Requested `(width, height)`, clamped on apply.
    pub size: Option<(f64, f64)>,
    pub color: Option<HexColor>,
    pub content: Option<String>,
}
