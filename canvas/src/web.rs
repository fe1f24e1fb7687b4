//! Browser bindings.
//!
//! `Engine` wraps [`EngineCore`] with `localStorage` persistence and the
//! window's `confirm` / `prompt` / `alert` dialogs. Structured results cross
//! the boundary as JSON strings; the page owns the DOM and applies the
//! returned [`Action`]s.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::Serialize;
use tracing::warn;
use wasm_bindgen::prelude::*;

use crate::connector::{Rect, connector_path};
use crate::engine::{Action, EngineCore};
use crate::error::EngineError;
use crate::input::{Button, Target};
use crate::note::NoteId;
use crate::persistence::PersistenceConfig;
use crate::prompt::UserPrompt;
use crate::store::LocalStorage;
use crate::transform::Point;

const NO_CANVAS_ALERT: &str = "Please select or create a canvas first!";

/// `window.confirm` / `window.prompt`. A missing window or a throwing dialog
/// counts as declined.
struct WindowPrompt;

impl UserPrompt for WindowPrompt {
    fn confirm(&mut self, message: &str) -> bool {
        let Some(window) = web_sys::window() else {
            return false;
        };
        window.confirm_with_message(message).unwrap_or(false)
    }

    fn prompt(&mut self, message: &str) -> Option<String> {
        web_sys::window().and_then(|w| w.prompt_with_message(message).unwrap_or(None))
    }
}

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.alert_with_message(message) {
            warn!(error = ?e, "alert failed");
        }
    }
}

fn js_err(e: &EngineError) -> JsValue {
    JsValue::from_str(&format!("{}: {e}", e.error_code()))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| js_err(&EngineError::Serialize(e)))
}

fn parse_id(raw: &str) -> Result<NoteId, JsValue> {
    raw.parse().map_err(|e| JsValue::from_str(&format!("{e}")))
}

fn parse_target(kind: &str, note_id: Option<String>) -> Result<Target, JsValue> {
    match (kind, note_id.as_deref()) {
        ("note", Some(id)) => Ok(Target::Note(parse_id(id)?)),
        ("resize", Some(id)) => Ok(Target::ResizeHandle(parse_id(id)?)),
        ("canvas", _) => Ok(Target::Canvas),
        _ => Err(JsValue::from_str(&format!("unknown pointer target: {kind}"))),
    }
}

fn button_from_dom(button: i16) -> Button {
    match button {
        1 => Button::Middle,
        2 => Button::Secondary,
        _ => Button::Primary,
    }
}

/// Touch coordinates arrive flattened as `[x0, y0, x1, y1, ...]`.
fn touches_from_flat(flat: &[f64]) -> Vec<Point> {
    flat.chunks_exact(2).map(|pair| Point::new(pair[0], pair[1])).collect()
}

/// The canvas engine as seen from the page.
#[wasm_bindgen]
pub struct Engine {
    core: EngineCore<LocalStorage>,
    rng: SmallRng,
}

#[wasm_bindgen]
impl Engine {
    /// Bind to `localStorage` under `storage_key` (default `solidifyCanvas`).
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(storage_key: Option<String>) -> Engine {
        let config = storage_key.map_or_else(PersistenceConfig::default, |storage_key| PersistenceConfig { storage_key });
        Self {
            core: EngineCore::new(LocalStorage::new(), config),
            rng: SmallRng::seed_from_u64(js_sys::Date::now().to_bits()),
        }
    }

    #[wasm_bindgen(js_name = setViewport)]
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.core.set_viewport(width, height);
    }

    // --- Canvases ---

    /// JSON array of stored canvas names.
    #[wasm_bindgen(js_name = canvasNames)]
    pub fn canvas_names(&self) -> Result<String, JsValue> {
        to_json(&self.core.canvas_names())
    }

    #[wasm_bindgen(js_name = activeCanvas)]
    #[must_use]
    pub fn active_canvas(&self) -> Option<String> {
        self.core.active_canvas().map(str::to_owned)
    }

    #[wasm_bindgen(js_name = switchTo)]
    pub fn switch_to(&mut self, name: &str) -> Result<(), JsValue> {
        self.core.switch_to(name).map_err(|e| js_err(&e))
    }

    /// Prompt for a name and start a new canvas. Returns the name, or
    /// `undefined` when the user cancelled.
    #[wasm_bindgen(js_name = createCanvas)]
    pub fn create_canvas(&mut self) -> Result<Option<String>, JsValue> {
        self.core.create_canvas(&mut WindowPrompt).map_err(|e| js_err(&e))
    }

    #[wasm_bindgen(js_name = renameActive)]
    pub fn rename_active(&mut self, title: &str) -> Result<String, JsValue> {
        self.core.rename_active(title).map_err(|e| js_err(&e))
    }

    #[wasm_bindgen(js_name = deleteCanvas)]
    pub fn delete_canvas(&mut self, name: &str) -> Result<bool, JsValue> {
        self.core.delete_canvas(name, &mut WindowPrompt).map_err(|e| js_err(&e))
    }

    /// Live notes and transform of the active canvas as JSON.
    #[wasm_bindgen(js_name = documentJson)]
    pub fn document_json(&self) -> Result<String, JsValue> {
        to_json(self.core.document())
    }

    /// CSS `transform` for the note container.
    #[wasm_bindgen(js_name = transformCss)]
    #[must_use]
    pub fn transform_css(&self) -> String {
        self.core.transform().css()
    }

    // --- Notes ---

    /// Add a note at the viewport center. Without an active canvas the user
    /// is alerted and `undefined` is returned.
    #[wasm_bindgen(js_name = createNote)]
    pub fn create_note(&mut self) -> Result<Option<String>, JsValue> {
        match self.core.create_note(&mut self.rng) {
            Ok(id) => Ok(Some(id.to_string())),
            Err(EngineError::NoActiveCanvas) => {
                alert(NO_CANVAS_ALERT);
                Ok(None)
            }
            Err(e) => Err(js_err(&e)),
        }
    }

    #[wasm_bindgen(js_name = deleteNote)]
    pub fn delete_note(&mut self, id: &str) -> Result<bool, JsValue> {
        self.core.delete_note(parse_id(id)?).map_err(|e| js_err(&e))
    }

    /// Returns the normalized `#rrggbb` color.
    #[wasm_bindgen(js_name = setNoteColor)]
    pub fn set_note_color(&mut self, id: &str, color: &str) -> Result<String, JsValue> {
        let color = self.core.set_note_color(parse_id(id)?, color).map_err(|e| js_err(&e))?;
        Ok(color.to_string())
    }

    #[wasm_bindgen(js_name = setNoteContent)]
    pub fn set_note_content(&mut self, id: &str, html: &str) -> Result<(), JsValue> {
        self.core.set_note_content(parse_id(id)?, html).map_err(|e| js_err(&e))
    }

    /// `{borderColor, backgroundColor}` for a note as JSON.
    #[wasm_bindgen(js_name = noteStyleJson)]
    pub fn note_style_json(&self, id: &str) -> Result<Option<String>, JsValue> {
        match self.core.note_style(parse_id(id)?) {
            Some(style) => Ok(Some(to_json(&style)?)),
            None => Ok(None),
        }
    }

    /// SVG path linking two notes, or `undefined` if either is missing.
    #[wasm_bindgen(js_name = connectorPath)]
    pub fn connector_path(&self, from: &str, to: &str) -> Result<Option<String>, JsValue> {
        let (from, to) = (parse_id(from)?, parse_id(to)?);
        Ok(match (self.core.note(from), self.core.note(to)) {
            (Some(a), Some(b)) => Some(connector_path(&Rect::of_note(a), &Rect::of_note(b))),
            _ => None,
        })
    }

    // --- Zoom buttons ---

    #[wasm_bindgen(js_name = zoomIn)]
    pub fn zoom_in(&mut self) -> Result<String, JsValue> {
        self.core.zoom_in().map(|t| t.css()).map_err(|e| js_err(&e))
    }

    #[wasm_bindgen(js_name = zoomOut)]
    pub fn zoom_out(&mut self) -> Result<String, JsValue> {
        self.core.zoom_out().map(|t| t.css()).map_err(|e| js_err(&e))
    }

    // --- Input events; each returns a JSON array of actions ---

    /// `target` is `"canvas"`, `"note"`, or `"resize"`; the latter two need
    /// `note_id`. `button` is the DOM `MouseEvent.button`.
    #[wasm_bindgen(js_name = onPointerDown)]
    pub fn on_pointer_down(
        &mut self,
        target: &str,
        note_id: Option<String>,
        x: f64,
        y: f64,
        button: i16,
    ) -> Result<String, JsValue> {
        let target = parse_target(target, note_id)?;
        actions_json(&self.core.on_pointer_down(target, Point::new(x, y), button_from_dom(button)))
    }

    #[wasm_bindgen(js_name = onPointerMove)]
    pub fn on_pointer_move(&mut self, x: f64, y: f64) -> Result<String, JsValue> {
        actions_json(&self.core.on_pointer_move(Point::new(x, y)))
    }

    #[wasm_bindgen(js_name = onPointerUp)]
    pub fn on_pointer_up(&mut self) -> Result<String, JsValue> {
        actions_json(&self.core.on_pointer_up())
    }

    #[wasm_bindgen(js_name = onPointerLeave)]
    pub fn on_pointer_leave(&mut self) -> Result<String, JsValue> {
        actions_json(&self.core.on_pointer_leave())
    }

    #[wasm_bindgen(js_name = onWheel)]
    pub fn on_wheel(&mut self, delta_y: f64) -> Result<String, JsValue> {
        actions_json(&self.core.on_wheel(delta_y))
    }

    #[wasm_bindgen(js_name = onTouchStart)]
    pub fn on_touch_start(&mut self, target: &str, note_id: Option<String>, touches: &[f64]) -> Result<String, JsValue> {
        let target = parse_target(target, note_id)?;
        actions_json(&self.core.on_touch_start(target, &touches_from_flat(touches)))
    }

    #[wasm_bindgen(js_name = onTouchMove)]
    pub fn on_touch_move(&mut self, touches: &[f64]) -> Result<String, JsValue> {
        actions_json(&self.core.on_touch_move(&touches_from_flat(touches)))
    }

    #[wasm_bindgen(js_name = onTouchEnd)]
    pub fn on_touch_end(&mut self) -> Result<String, JsValue> {
        actions_json(&self.core.on_touch_end())
    }

    #[wasm_bindgen(js_name = onEditorFocus)]
    pub fn on_editor_focus(&mut self, id: &str) -> Result<(), JsValue> {
        self.core.on_editor_focus(parse_id(id)?);
        Ok(())
    }

    #[wasm_bindgen(js_name = onEditorBlur)]
    pub fn on_editor_blur(&mut self, id: &str) -> Result<(), JsValue> {
        self.core.on_editor_blur(parse_id(id)?);
        Ok(())
    }
}

fn actions_json(actions: &[Action]) -> Result<String, JsValue> {
    to_json(actions)
}
