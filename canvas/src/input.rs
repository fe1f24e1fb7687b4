//! Input model: pointer targets, buttons, and the gesture state machine.
//!
//! The host reports raw pointer, wheel, touch, and editor events together
//! with what was under the pointer. `InputState` tracks the gesture in
//! progress between press and release so the engine can compute deltas and
//! decide when to persist.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::note::NoteId;
use crate::transform::Point;

/// What the pointer went down on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Empty canvas background.
    Canvas,
    /// The body of a note.
    Note(NoteId),
    /// The resize handle of a note.
    ResizeHandle(NoteId),
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger touch).
    Primary,
    /// Middle mouse button.
    Middle,
    /// Right mouse button.
    Secondary,
}

/// UI state visible to the host renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    /// Note whose controls (color picker, delete) are showing.
    pub controls_for: Option<NoteId>,
    /// Note whose rich-text editor has focus.
    pub editing: Option<NoteId>,
}

/// Gesture in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture; waiting for the next press.
    #[default]
    Idle,
    /// Dragging the canvas background.
    Panning {
        /// Screen position at the previous event.
        last_screen: Point,
    },
    /// Moving a note.
    DraggingNote {
        id: NoteId,
        /// Screen position at the previous event.
        last_screen: Point,
        /// Whether the note actually moved, so a plain click does not save.
        moved: bool,
    },
    /// Resizing a note from its bottom-right handle.
    ResizingNote {
        id: NoteId,
        /// Screen position where the resize started.
        start_screen: Point,
        /// Canvas-space size at the start of the resize.
        orig_width: f64,
        orig_height: f64,
        moved: bool,
    },
    /// Two-finger pinch zoom.
    Pinching {
        /// Finger distance at the previous event, in screen pixels.
        last_distance: f64,
    },
}

impl InputState {
    /// Whether a note is being dragged or resized.
    #[must_use]
    pub fn is_note_gesture(&self) -> bool {
        matches!(self, Self::DraggingNote { .. } | Self::ResizingNote { .. })
    }
}
