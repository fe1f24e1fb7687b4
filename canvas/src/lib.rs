//! Sticky-note canvas engine.
//!
//! Named canvases of sticky notes on a pannable, zoomable surface, persisted
//! as one JSON blob in a key-value store. The core is plain Rust so it can be
//! driven from tests and the `stickyboard` CLI; on `wasm32` the [`web`]
//! module exposes it to the page, which owns the DOM and applies the
//! returned [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Testable [`engine::EngineCore`]: canvas lifecycle, notes, gestures |
//! | [`document`] | Canvas documents, the name-keyed collection, title cleanup |
//! | [`note`] | Note model, `note_<n>` ids, pixel-string geometry |
//! | [`transform`] | Pan/zoom transform and coordinate conversions |
//! | [`color`] | Hex colors, the note palette, derived note styles |
//! | [`connector`] | SVG paths linking two notes |
//! | [`input`] | Pointer targets and the gesture state machine |
//! | [`persistence`] | Whole-blob load and save over a store |
//! | [`store`] | Key-value store trait, in-memory and `localStorage` backends |
//! | [`prompt`] | Confirm/prompt dialogs supplied by the host |
//! | [`error`] | Store and engine error types |
//! | [`consts`] | Zoom limits, note size bounds, palette, storage key |

pub mod color;
pub mod connector;
pub mod consts;
pub mod document;
pub mod engine;
pub mod error;
pub mod input;
pub mod note;
pub mod persistence;
pub mod prompt;
pub mod store;
pub mod transform;
#[cfg(target_arch = "wasm32")]
pub mod web;
