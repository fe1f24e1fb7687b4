//! SVG paths linking two notes.

#[cfg(test)]
#[path = "connector_test.rs"]
mod connector_test;

use crate::consts::{CONNECTOR_CURVE_PX, MIN_NOTE_HEIGHT, MIN_NOTE_WIDTH};
use crate::note::Note;
use crate::transform::Point;

/// Canvas-space box of a note.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Box of a note. Notes never resized use the minimum size.
    #[must_use]
    pub fn of_note(note: &Note) -> Self {
        Self {
            left: note.left,
            top: note.top,
            width: note.width.unwrap_or(MIN_NOTE_WIDTH),
            height: note.height.unwrap_or(MIN_NOTE_HEIGHT),
        }
    }

    #[must_use]
    pub fn right_middle(&self) -> Point {
        Point::new(self.left + self.width, self.top + self.height / 2.0)
    }

    #[must_use]
    pub fn left_middle(&self) -> Point {
        Point::new(self.left, self.top + self.height / 2.0)
    }
}

/// Cubic Bézier `d` attribute from the right edge of `from` to the left edge
/// of `to`, with control points pulled out horizontally.
///
/// Each end sits at the vertical middle of its own note. Earlier browser
/// builds used the height of `from` for both ends, so paths to a note of a
/// different height land at a different y than they used to.
#[must_use]
pub fn connector_path(from: &Rect, to: &Rect) -> String {
    let a = from.right_middle();
    let b = to.left_middle();
    format!(
        "M{},{} C{},{} {},{} {},{}",
        a.x,
        a.y,
        a.x + CONNECTOR_CURVE_PX,
        a.y,
        b.x - CONNECTOR_CURVE_PX,
        b.y,
        b.x,
        b.y
    )
}
