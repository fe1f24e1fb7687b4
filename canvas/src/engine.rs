//! Application state and every operation the host can invoke.
//!
//! `EngineCore` owns the active canvas (its live notes and transform), the
//! note-id counter, the gesture state machine, and the persistence
//! controller. It has no browser dependencies so it can be driven from
//! tests and the CLI; the browser wrapper lives in [`crate::web`].
//!
//! Every mutation is followed by a synchronous full save. Explicit operations
//! return save failures to the caller; gesture handlers log them and keep the
//! change in memory, since there is nobody to hand the error to mid-drag.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use rand::Rng;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::color::{HexColor, NoteStyle};
use crate::consts::{BUTTON_ZOOM_STEP, MIN_NOTE_HEIGHT, MIN_NOTE_WIDTH};
use crate::document::{CanvasDocument, clean_title, sanitize_title};
use crate::error::EngineError;
use crate::input::{Button, InputState, Target, UiState};
use crate::note::{Note, NoteId, NoteUpdate};
use crate::persistence::{Persistence, PersistenceConfig};
use crate::prompt::UserPrompt;
use crate::store::KeyValueStore;
use crate::transform::{Point, Transform, ZoomDelta};

/// Prompt text shown when asking for a new canvas name.
pub const NEW_CANVAS_PROMPT: &str = "Enter a new canvas name:";

/// Changes the host has to reflect in the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "camelCase")]
pub enum Action {
    /// Re-apply the container transform.
    TransformChanged(Transform),
    /// Move a note element.
    NoteMoved { id: NoteId, top: f64, left: f64 },
    /// Resize a note element.
    NoteResized { id: NoteId, width: f64, height: f64 },
    /// Show controls for one note, or hide all of them.
    ShowControls(Option<NoteId>),
    /// Change the canvas cursor.
    SetCursor(&'static str),
}

/// Core application state, independent of the DOM.
pub struct EngineCore<S> {
    persistence: Persistence<S>,
    active: Option<String>,
    doc: CanvasDocument,
    /// `None` once every id has been handed out.
    next_id: Option<NoteId>,
    pub ui: UiState,
    pub input: InputState,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl<S: KeyValueStore> EngineCore<S> {
    #[must_use]
    pub fn new(store: S, config: PersistenceConfig) -> Self {
        Self {
            persistence: Persistence::new(store, config),
            active: None,
            doc: CanvasDocument::default(),
            next_id: Some(NoteId(0)),
            ui: UiState::default(),
            input: InputState::default(),
            viewport_width: 0.0,
            viewport_height: 0.0,
        }
    }

    // --- Queries ---

    /// Names of every stored canvas.
    #[must_use]
    pub fn canvas_names(&self) -> Vec<String> {
        self.persistence.load_all().names().map(str::to_owned).collect()
    }

    /// Name of the active canvas, if any.
    #[must_use]
    pub fn active_canvas(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Live notes and transform of the active canvas.
    #[must_use]
    pub fn document(&self) -> &CanvasDocument {
        &self.doc
    }

    #[must_use]
    pub fn transform(&self) -> Transform {
        self.doc.transform
    }

    #[must_use]
    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.doc.note(id)
    }

    /// Id the next created note will get.
    #[must_use]
    pub fn next_note_id(&self) -> Option<NoteId> {
        self.next_id
    }

    #[must_use]
    pub fn note_style(&self, id: NoteId) -> Option<NoteStyle> {
        self.doc.note(id).map(Note::style)
    }

    #[must_use]
    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    /// Update the viewport size (CSS pixels) used to center new notes.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    // --- Saving ---

    /// Persist the active canvas. No-op when no canvas is active.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] if the write is rejected.
    pub fn save(&mut self) -> Result<(), EngineError> {
        self.save_as(None)
    }

    /// Persist the active canvas, moving it to `new_name` first when that
    /// differs from the current name. The rename and the content update go
    /// out in the same write.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] if the write is rejected; the active
    /// name is left unchanged in that case.
    pub fn save_as(&mut self, new_name: Option<&str>) -> Result<(), EngineError> {
        let Some(active) = self.active.as_deref() else {
            return Ok(());
        };
        let target = new_name.unwrap_or(active);

        let mut canvases = self.persistence.load_all();
        if target != active {
            canvases.rename(active, target);
        }
        canvases.insert(target, self.doc.clone());
        self.persistence.write_all(&canvases)?;

        if target != active {
            info!(from = %active, to = %target, "canvas renamed");
            self.active = Some(target.to_owned());
        }
        Ok(())
    }

    fn save_logged(&mut self) {
        if let Err(e) = self.save() {
            error!(error = %e, code = e.error_code(), "save failed; change kept in memory only");
        }
    }

    // --- Canvas lifecycle ---

    /// Make `name` the active canvas, replacing the live notes and transform
    /// with the stored ones. A name with nothing stored starts empty and is
    /// written on the spot.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] if the initializing save fails.
    pub fn switch_to(&mut self, name: &str) -> Result<(), EngineError> {
        let stored = self.persistence.load_all().get(name).cloned().unwrap_or_default();
        self.activate(name, stored);
        info!(canvas = %name, notes = self.doc.notes.len(), "canvas loaded");
        self.save()
    }

    fn activate(&mut self, name: &str, mut doc: CanvasDocument) {
        doc.transform = doc.transform.sanitized();
        self.next_id = doc.next_note_id();
        self.doc = doc;
        self.active = Some(name.to_owned());
        self.ui = UiState::default();
        self.input = InputState::Idle;
    }

    fn deactivate(&mut self) {
        self.active = None;
        self.doc = CanvasDocument::default();
        self.next_id = Some(NoteId(0));
        self.ui = UiState::default();
        self.input = InputState::Idle;
    }

    /// Ask for a name and make that canvas active, starting it empty when the
    /// name is new.
    ///
    /// The current canvas is saved first. An empty or cancelled answer leaves
    /// the previous canvas active and untouched and returns `Ok(None)`. A name
    /// that already exists opens that canvas with its stored notes.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] if either save fails.
    pub fn create_canvas(&mut self, prompt: &mut dyn UserPrompt) -> Result<Option<String>, EngineError> {
        self.save()?;

        let Some(name) = prompt.prompt(NEW_CANVAS_PROMPT).as_deref().and_then(clean_title) else {
            debug!("new canvas cancelled");
            return Ok(None);
        };

        let existing = self.persistence.load_all().get(&name).cloned();
        if existing.is_some() {
            warn!(canvas = %name, "a canvas with this name already exists; opening it");
        }
        self.activate(&name, existing.unwrap_or_default());
        self.save()?;
        info!(canvas = %name, "canvas created");
        Ok(Some(name))
    }

    /// Rename the active canvas from a user-typed title. Restricted
    /// characters are stripped and an empty title becomes the fallback.
    /// Returns the name actually used.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoActiveCanvas`] without an active canvas, or
    /// [`EngineError::Store`] if the write fails.
    pub fn rename_active(&mut self, title: &str) -> Result<String, EngineError> {
        if self.active.is_none() {
            return Err(EngineError::NoActiveCanvas);
        }
        let name = sanitize_title(title);
        self.save_as(Some(&name))?;
        Ok(name)
    }

    /// Delete a stored canvas after the user confirms. Returns whether
    /// anything was deleted. Deleting the active canvas clears it and resets
    /// the note-id counter.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] if the write fails; nothing is cleared
    /// in that case.
    pub fn delete_canvas(&mut self, name: &str, prompt: &mut dyn UserPrompt) -> Result<bool, EngineError> {
        let mut canvases = self.persistence.load_all();
        if !canvases.contains(name) {
            return Ok(false);
        }
        if !prompt.confirm(&format!("Are you sure you want to delete your canvas \"{name}\"?")) {
            return Ok(false);
        }

        canvases.remove(name);
        self.persistence.write_all(&canvases)?;
        if self.active.as_deref() == Some(name) {
            self.deactivate();
        }
        info!(canvas = %name, "canvas deleted");
        Ok(true)
    }

    // --- Notes ---

    fn require_active(&self) -> Result<(), EngineError> {
        if self.active.is_some() { Ok(()) } else { Err(EngineError::NoActiveCanvas) }
    }

    /// Create a note at the center of the viewport with a random palette color.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoActiveCanvas`] or
    /// [`EngineError::NoteIdsExhausted`] (nothing is created in either case),
    /// or [`EngineError::Store`] if the save fails.
    pub fn create_note<R: Rng>(&mut self, rng: &mut R) -> Result<NoteId, EngineError> {
        self.require_active()?;
        let id = self.next_id.ok_or(EngineError::NoteIdsExhausted)?;
        let position = self.doc.transform.viewport_center(self.viewport_width, self.viewport_height);
        self.doc.notes.push(Note::new(id, position, HexColor::random(rng)));
        self.next_id = id.successor();
        debug!(note = %id, left = position.x, top = position.y, "note created");
        self.save()?;
        Ok(id)
    }

    /// Delete a note. Unknown ids are a no-op returning `false`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] if the save fails.
    pub fn delete_note(&mut self, id: NoteId) -> Result<bool, EngineError> {
        if self.doc.remove_note(id).is_none() {
            return Ok(false);
        }
        if self.ui.controls_for == Some(id) {
            self.ui.controls_for = None;
        }
        if self.ui.editing == Some(id) {
            self.ui.editing = None;
        }
        self.save()?;
        Ok(true)
    }

    /// Apply a sparse update to a note and save.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoteNotFound`] or [`EngineError::Store`].
    pub fn update_note(&mut self, id: NoteId, update: &NoteUpdate) -> Result<(), EngineError> {
        let note = self.doc.note_mut(id).ok_or(EngineError::NoteNotFound(id))?;
        note.apply(update);
        self.save()
    }

    /// Recolor a note. The color is validated before anything changes.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidColor`] for anything but `#?rrggbb`,
    /// [`EngineError::NoteNotFound`], or [`EngineError::Store`].
    pub fn set_note_color(&mut self, id: NoteId, raw: &str) -> Result<HexColor, EngineError> {
        let color = HexColor::parse(raw).ok_or_else(|| EngineError::InvalidColor(raw.to_owned()))?;
        self.update_note(id, &NoteUpdate { color: Some(color), ..Default::default() })?;
        Ok(color)
    }

    /// Place a note at a canvas-space position.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoteNotFound`] or [`EngineError::Store`].
    pub fn move_note(&mut self, id: NoteId, top: f64, left: f64) -> Result<(), EngineError> {
        self.update_note(id, &NoteUpdate { top: Some(top), left: Some(left), ..Default::default() })
    }

    /// Resize a note; the size is clamped. Returns the size actually applied.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoteNotFound`] or [`EngineError::Store`].
    pub fn resize_note(&mut self, id: NoteId, width: f64, height: f64) -> Result<(f64, f64), EngineError> {
        self.update_note(id, &NoteUpdate { size: Some((width, height)), ..Default::default() })?;
        let note = self.doc.note(id).ok_or(EngineError::NoteNotFound(id))?;
        Ok((note.width.unwrap_or(MIN_NOTE_WIDTH), note.height.unwrap_or(MIN_NOTE_HEIGHT)))
    }

    /// Commit editor content for a note (called on every keystroke).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoteNotFound`] or [`EngineError::Store`].
    pub fn set_note_content(&mut self, id: NoteId, content: &str) -> Result<(), EngineError> {
        self.update_note(id, &NoteUpdate { content: Some(content.to_owned()), ..Default::default() })
    }

    // --- Transform ---

    /// Pan by a screen-space delta and save.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] if the save fails.
    pub fn pan(&mut self, dx: f64, dy: f64) -> Result<Transform, EngineError> {
        self.doc.transform.pan(dx, dy);
        self.save()?;
        Ok(self.doc.transform)
    }

    /// Zoom and save.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] if the save fails.
    pub fn zoom(&mut self, delta: ZoomDelta, anchor: Option<Point>) -> Result<Transform, EngineError> {
        self.doc.transform.zoom(delta, anchor);
        self.save()?;
        Ok(self.doc.transform)
    }

    /// Zoom-in button.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] if the save fails.
    pub fn zoom_in(&mut self) -> Result<Transform, EngineError> {
        self.zoom(ZoomDelta::Step(BUTTON_ZOOM_STEP), None)
    }

    /// Zoom-out button.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] if the save fails.
    pub fn zoom_out(&mut self) -> Result<Transform, EngineError> {
        self.zoom(ZoomDelta::Step(-BUTTON_ZOOM_STEP), None)
    }

    // --- Input events ---

    /// Pointer pressed on `target` at screen position `screen`.
    pub fn on_pointer_down(&mut self, target: Target, screen: Point, button: Button) -> Vec<Action> {
        if self.active.is_none() || button == Button::Secondary || self.input.is_note_gesture() {
            return Vec::new();
        }
        match target {
            Target::Canvas => {
                self.ui.controls_for = None;
                self.input = InputState::Panning { last_screen: screen };
                vec![Action::ShowControls(None), Action::SetCursor("grabbing")]
            }
            Target::Note(id) => {
                if self.ui.editing == Some(id) || self.doc.note(id).is_none() {
                    return Vec::new();
                }
                self.input = InputState::DraggingNote { id, last_screen: screen, moved: false };
                Vec::new()
            }
            Target::ResizeHandle(id) => {
                let Some(note) = self.doc.note(id) else {
                    return Vec::new();
                };
                self.input = InputState::ResizingNote {
                    id,
                    start_screen: screen,
                    orig_width: note.width.unwrap_or(MIN_NOTE_WIDTH),
                    orig_height: note.height.unwrap_or(MIN_NOTE_HEIGHT),
                    moved: false,
                };
                Vec::new()
            }
        }
    }

    /// Pointer moved to screen position `screen`.
    pub fn on_pointer_move(&mut self, screen: Point) -> Vec<Action> {
        match self.input {
            InputState::Panning { last_screen } => {
                self.doc.transform.pan(screen.x - last_screen.x, screen.y - last_screen.y);
                self.input = InputState::Panning { last_screen: screen };
                self.save_logged();
                vec![Action::TransformChanged(self.doc.transform)]
            }
            InputState::DraggingNote { id, last_screen, .. } => {
                if self.ui.editing == Some(id) {
                    return Vec::new();
                }
                let transform = self.doc.transform;
                let Some(note) = self.doc.note_mut(id) else {
                    self.input = InputState::Idle;
                    return Vec::new();
                };
                note.left += transform.screen_dist_to_canvas(screen.x - last_screen.x);
                note.top += transform.screen_dist_to_canvas(screen.y - last_screen.y);
                let (top, left) = (note.top, note.left);
                self.input = InputState::DraggingNote { id, last_screen: screen, moved: true };
                vec![Action::NoteMoved { id, top, left }]
            }
            InputState::ResizingNote { id, start_screen, orig_width, orig_height, .. } => {
                let transform = self.doc.transform;
                let Some(note) = self.doc.note_mut(id) else {
                    self.input = InputState::Idle;
                    return Vec::new();
                };
                note.set_size(
                    orig_width + transform.screen_dist_to_canvas(screen.x - start_screen.x),
                    orig_height + transform.screen_dist_to_canvas(screen.y - start_screen.y),
                );
                let (width, height) = (note.width.unwrap_or(orig_width), note.height.unwrap_or(orig_height));
                self.input = InputState::ResizingNote { id, start_screen, orig_width, orig_height, moved: true };
                vec![Action::NoteResized { id, width, height }]
            }
            InputState::Idle | InputState::Pinching { .. } => Vec::new(),
        }
    }

    /// Pointer released. Finished drags and resizes are saved once; a press
    /// and release without movement on a note shows its controls.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        let state = std::mem::take(&mut self.input);
        match state {
            InputState::Panning { .. } => vec![Action::SetCursor("default")],
            InputState::DraggingNote { id, moved: true, .. } | InputState::ResizingNote { id, moved: true, .. } => {
                debug!(note = %id, "note gesture finished");
                self.save_logged();
                Vec::new()
            }
            InputState::DraggingNote { id, moved: false, .. } => {
                if self.ui.editing.is_some() {
                    return Vec::new();
                }
                self.ui.controls_for = Some(id);
                vec![Action::ShowControls(Some(id))]
            }
            InputState::ResizingNote { .. } | InputState::Pinching { .. } | InputState::Idle => Vec::new(),
        }
    }

    /// Pointer left the canvas: an in-progress pan stops.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        if matches!(self.input, InputState::Panning { .. }) {
            self.input = InputState::Idle;
            return vec![Action::SetCursor("default")];
        }
        Vec::new()
    }

    /// Wheel tick over the canvas.
    pub fn on_wheel(&mut self, delta_y: f64) -> Vec<Action> {
        if self.active.is_none() || self.input.is_note_gesture() || self.ui.editing.is_some() {
            return Vec::new();
        }
        self.doc.transform.wheel(delta_y);
        self.save_logged();
        vec![Action::TransformChanged(self.doc.transform)]
    }

    /// Touch started with `touches` on screen. Two fingers on the canvas
    /// begin a pinch; one finger behaves like a primary press.
    pub fn on_touch_start(&mut self, target: Target, touches: &[Point]) -> Vec<Action> {
        match touches {
            [a, b] if target == Target::Canvas && self.active.is_some() && !self.input.is_note_gesture() => {
                self.input = InputState::Pinching { last_distance: a.distance(*b) };
                Vec::new()
            }
            [only] => self.on_pointer_down(target, *only, Button::Primary),
            _ => Vec::new(),
        }
    }

    /// Touch moved. Pinches zoom by the ratio of successive finger distances.
    pub fn on_touch_move(&mut self, touches: &[Point]) -> Vec<Action> {
        match (self.input, touches) {
            (InputState::Pinching { last_distance }, [a, b]) => {
                let distance = a.distance(*b);
                if last_distance > 0.0 {
                    self.doc.transform.zoom(ZoomDelta::Pinch(distance / last_distance), None);
                }
                self.input = InputState::Pinching { last_distance: distance };
                self.save_logged();
                vec![Action::TransformChanged(self.doc.transform)]
            }
            (InputState::Pinching { .. }, _) => Vec::new(),
            (_, [only]) => self.on_pointer_move(*only),
            _ => Vec::new(),
        }
    }

    /// All touches lifted.
    pub fn on_touch_end(&mut self) -> Vec<Action> {
        self.on_pointer_up()
    }

    /// A note's rich-text editor gained focus.
    pub fn on_editor_focus(&mut self, id: NoteId) {
        self.ui.editing = Some(id);
    }

    /// A note's rich-text editor lost focus.
    pub fn on_editor_blur(&mut self, id: NoteId) {
        if self.ui.editing == Some(id) {
            self.ui.editing = None;
        }
    }
}
