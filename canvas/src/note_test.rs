#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

fn note_at(n: u64, left: f64, top: f64) -> Note {
    Note::new(NoteId(n), Point::new(left, top), HexColor::default())
}

// =============================================================
// NoteId
// =============================================================

#[test]
fn id_displays_with_prefix() {
    assert_eq!(NoteId(12).to_string(), "note_12");
}

#[test]
fn id_parses_prefixed_integer() {
    assert_eq!("note_5".parse::<NoteId>(), Ok(NoteId(5)));
}

#[test]
fn id_rejects_malformed_strings() {
    for raw in ["note_", "note_x", "5", "note-5", "note_-1", "", "Note_5"] {
        assert!(raw.parse::<NoteId>().is_err(), "{raw} should not parse");
    }
}

#[test]
fn next_id_is_highest_plus_one() {
    let ids = [NoteId(0), NoteId(3), NoteId(5)];
    assert_eq!(NoteId::next_after(&ids), Some(NoteId(6)));
}

#[test]
fn next_id_ignores_order() {
    let ids = [NoteId(9), NoteId(2), NoteId(4)];
    assert_eq!(NoteId::next_after(&ids), Some(NoteId(10)));
}

#[test]
fn next_id_for_empty_set_is_zero() {
    let ids: [NoteId; 0] = [];
    assert_eq!(NoteId::next_after(&ids), Some(NoteId(0)));
}

#[test]
fn next_id_after_max_is_none() {
    let ids = [NoteId(3), NoteId(u64::MAX)];
    assert_eq!(NoteId::next_after(&ids), None);
    assert_eq!(NoteId(u64::MAX).successor(), None);
    assert_eq!(NoteId(41).successor(), Some(NoteId(42)));
}

// =============================================================
// Geometry
// =============================================================

#[test]
fn new_note_uses_point_as_top_left() {
    let note = note_at(1, 200.0, 150.0);
    assert_eq!(note.left, 200.0);
    assert_eq!(note.top, 150.0);
    assert!(note.width.is_none());
    assert!(note.content.is_empty());
}

#[test]
fn set_position_moves_note() {
    let mut note = note_at(1, 0.0, 0.0);
    note.set_position(30.0, 40.0);
    assert_eq!(note.top, 30.0);
    assert_eq!(note.left, 40.0);
}

#[test]
fn set_size_clamps_both_axes() {
    let mut note = note_at(1, 0.0, 0.0);
    note.set_size(100.0, 1000.0);
    assert_eq!(note.width, Some(MIN_NOTE_WIDTH));
    assert_eq!(note.height, Some(MAX_NOTE_HEIGHT));

    note.set_size(5000.0, 10.0);
    assert_eq!(note.width, Some(MAX_NOTE_WIDTH));
    assert_eq!(note.height, Some(MIN_NOTE_HEIGHT));

    note.set_size(400.0, 300.0);
    assert_eq!(note.width, Some(400.0));
    assert_eq!(note.height, Some(300.0));
}

#[test]
fn set_size_ignores_nan() {
    let mut note = note_at(1, 0.0, 0.0);
    note.set_size(f64::NAN, 200.0);
    assert!(note.width.is_none());
    assert!(note.height.is_none());
}

// =============================================================
// Content
// =============================================================

#[test]
fn trims_trailing_empty_paragraphs() {
    assert_eq!(trim_trailing_empty_paragraphs("<p>hi</p><p><br></p>"), "<p>hi</p>");
    assert_eq!(trim_trailing_empty_paragraphs("<p>hi</p><p><br></p>\n<p></p>  "), "<p>hi</p>");
    assert_eq!(trim_trailing_empty_paragraphs("<p><br></p>"), "");
}

#[test]
fn keeps_inner_empty_paragraphs_and_plain_text() {
    assert_eq!(trim_trailing_empty_paragraphs("<p></p><p>x</p>"), "<p></p><p>x</p>");
    assert_eq!(trim_trailing_empty_paragraphs("plain text "), "plain text ");
    assert_eq!(trim_trailing_empty_paragraphs(""), "");
}

#[test]
fn set_content_stores_trimmed_markup() {
    let mut note = note_at(1, 0.0, 0.0);
    note.set_content("<h1>Title</h1><p><br></p>");
    assert_eq!(note.content, "<h1>Title</h1>");
}

// =============================================================
// Sparse updates
// =============================================================

#[test]
fn apply_only_touches_present_fields() {
    let mut note = note_at(1, 10.0, 20.0);
    note.apply(&NoteUpdate { left: Some(99.0), ..Default::default() });
    assert_eq!(note.left, 99.0);
    assert_eq!(note.top, 20.0);
    assert!(note.width.is_none());
}

#[test]
fn apply_clamps_size_and_sets_color() {
    let mut note = note_at(1, 0.0, 0.0);
    let color = HexColor::parse("#a081e9").unwrap();
    note.apply(&NoteUpdate {
        size: Some((10.0, 10.0)),
        color: Some(color),
        content: Some("<p>a</p><p></p>".into()),
        ..Default::default()
    });
    assert_eq!(note.width, Some(MIN_NOTE_WIDTH));
    assert_eq!(note.height, Some(MIN_NOTE_HEIGHT));
    assert_eq!(note.color, color);
    assert_eq!(note.content, "<p>a</p>");
}

#[test]
fn style_follows_color() {
    let mut note = note_at(1, 0.0, 0.0);
    note.set_color(HexColor::parse("#e98181").unwrap());
    assert_eq!(note.style().background_color, "rgba(233, 129, 129, 0.1)");
}

// =============================================================
// Wire format
// =============================================================

#[test]
fn serializes_positions_as_px_strings() {
    let mut note = note_at(3, 200.0, 12.5);
    note.content = "<p>hi</p>".into();
    let value = serde_json::to_value(&note).unwrap();
    assert_eq!(
        value,
        json!({
            "id": "note_3",
            "content": "<p>hi</p>",
            "top": "12.5px",
            "left": "200px",
            "color": "#81dde9",
        })
    );
}

#[test]
fn serializes_size_when_present() {
    let mut note = note_at(0, 0.0, 0.0);
    note.set_size(300.0, 200.0);
    let value = serde_json::to_value(&note).unwrap();
    assert_eq!(value["width"], "300px");
    assert_eq!(value["height"], "200px");
}

#[test]
fn deserializes_browser_written_note() {
    let note: Note = serde_json::from_value(json!({
        "id": "note_7",
        "content": "<p>x</p>",
        "top": "-40px",
        "left": "310.25px",
        "width": "400px",
        "height": "250px",
        "color": "#E7E981",
    }))
    .unwrap();
    assert_eq!(note.id, NoteId(7));
    assert_eq!(note.top, -40.0);
    assert_eq!(note.left, 310.25);
    assert_eq!(note.width, Some(400.0));
    assert_eq!(note.height, Some(250.0));
    assert_eq!(note.color.to_string(), "#e7e981");
}

#[test]
fn deserialize_fills_missing_fields() {
    let note: Note = serde_json::from_value(json!({ "id": "note_1" })).unwrap();
    assert_eq!(note.top, 0.0);
    assert_eq!(note.left, 0.0);
    assert!(note.content.is_empty());
    assert!(note.width.is_none());
    assert_eq!(note.color, HexColor::default());
}

#[test]
fn deserialize_tolerates_odd_positions() {
    let note: Note = serde_json::from_value(json!({
        "id": "note_1",
        "top": 42,
        "left": "auto",
        "width": null,
    }))
    .unwrap();
    assert_eq!(note.top, 42.0);
    assert_eq!(note.left, 0.0);
    assert!(note.width.is_none());
}

#[test]
fn deserialize_rejects_bad_id() {
    let result = serde_json::from_value::<Note>(json!({ "id": "sticky" }));
    assert!(result.is_err());
}
