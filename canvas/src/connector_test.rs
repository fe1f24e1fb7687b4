#![allow(clippy::float_cmp)]

use super::*;
use crate::color::HexColor;
use crate::note::NoteId;

fn rect(left: f64, top: f64, width: f64, height: f64) -> Rect {
    Rect { left, top, width, height }
}

#[test]
fn path_runs_right_edge_to_left_edge() {
    let a = rect(0.0, 0.0, 250.0, 150.0);
    let b = rect(400.0, 100.0, 250.0, 150.0);
    assert_eq!(connector_path(&a, &b), "M250,75 C350,75 300,175 400,175");
}

#[test]
fn each_end_uses_its_own_height() {
    let a = rect(0.0, 0.0, 100.0, 200.0);
    let b = rect(300.0, 0.0, 100.0, 50.0);
    assert_eq!(connector_path(&a, &b), "M100,100 C200,100 200,25 300,25");
}

#[test]
fn backwards_link_still_curves_outward() {
    let a = rect(500.0, 0.0, 100.0, 100.0);
    let b = rect(0.0, 0.0, 100.0, 100.0);
    assert_eq!(connector_path(&a, &b), "M600,50 C700,50 -100,50 0,50");
}

#[test]
fn fractional_coordinates_are_kept() {
    let a = rect(0.5, 0.0, 10.0, 3.0);
    let b = rect(20.0, 0.0, 10.0, 3.0);
    assert_eq!(connector_path(&a, &b), "M10.5,1.5 C110.5,1.5 -80,1.5 20,1.5");
}

#[test]
fn rect_of_unsized_note_uses_minimum_size() {
    let note = Note::new(NoteId(0), Point::new(10.0, 20.0), HexColor::default());
    let r = Rect::of_note(&note);
    assert_eq!(r.left, 10.0);
    assert_eq!(r.top, 20.0);
    assert_eq!(r.width, MIN_NOTE_WIDTH);
    assert_eq!(r.height, MIN_NOTE_HEIGHT);
}

#[test]
fn rect_of_resized_note_uses_its_size() {
    let mut note = Note::new(NoteId(0), Point::new(0.0, 0.0), HexColor::default());
    note.set_size(300.0, 200.0);
    let r = Rect::of_note(&note);
    assert_eq!((r.width, r.height), (300.0, 200.0));
}
