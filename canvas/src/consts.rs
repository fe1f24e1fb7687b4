//! Shared numeric and string constants for the canvas crate.

// ── Zoom ────────────────────────────────────────────────────────

/// Smallest allowed zoom factor.
pub const MIN_SCALE: f64 = 0.3;

/// Largest allowed zoom factor.
pub const MAX_SCALE: f64 = 3.0;

/// Additive zoom step for the zoom-in / zoom-out buttons.
pub const BUTTON_ZOOM_STEP: f64 = 0.1;

/// Additive zoom step per wheel event.
pub const WHEEL_ZOOM_STEP: f64 = 0.008;

/// Extra multiplicative nudge applied to every pinch ratio.
pub const PINCH_SMOOTHING: f64 = 0.002;

// ── Notes ───────────────────────────────────────────────────────

/// Prefix of every note id (`note_<n>`).
pub const NOTE_ID_PREFIX: &str = "note_";

/// Resizable note width bounds in canvas pixels.
pub const MIN_NOTE_WIDTH: f64 = 250.0;
pub const MAX_NOTE_WIDTH: f64 = 800.0;

/// Resizable note height bounds in canvas pixels.
pub const MIN_NOTE_HEIGHT: f64 = 150.0;
pub const MAX_NOTE_HEIGHT: f64 = 600.0;

/// Palette new notes pick from: blue, yellow, green, purple, pink, red, orange.
pub const NOTE_PALETTE: [&str; 7] = ["#81dde9", "#e7e981", "#7edd9a", "#a081e9", "#d281e9", "#e98181", "#e9be81"];

/// Opacity of the note background relative to its border color.
pub const NOTE_BACKGROUND_ALPHA: f64 = 0.1;

// ── Canvases ────────────────────────────────────────────────────

/// Key the whole canvas mapping is stored under.
pub const DEFAULT_STORAGE_KEY: &str = "solidifyCanvas";

/// Title given to a canvas renamed to an empty string.
pub const FALLBACK_CANVAS_TITLE: &str = "My Canvas";

/// Characters stripped from canvas titles.
pub const RESTRICTED_TITLE_CHARS: [char; 7] = ['\n', '\r', '>', '<', '"', '\'', '`'];

// ── Connectors ──────────────────────────────────────────────────

/// Horizontal distance of connector control points from their endpoints.
pub const CONNECTOR_CURVE_PX: f64 = 100.0;
