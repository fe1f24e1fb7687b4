use serde_json::{Value, json};

use super::*;
use crate::document::CanvasDocument;
use crate::note::NoteId;
use crate::store::MemoryStore;

fn persistence_with(raw: &str) -> Persistence<MemoryStore> {
    Persistence::new(MemoryStore::new().with_entry(DEFAULT_STORAGE_KEY, raw), PersistenceConfig::default())
}

#[test]
fn default_key_matches_browser_app() {
    assert_eq!(PersistenceConfig::default().storage_key, "solidifyCanvas");
}

#[test]
fn load_all_on_empty_store_is_empty() {
    let p = Persistence::new(MemoryStore::new(), PersistenceConfig::default());
    assert!(p.load_all().is_empty());
}

#[test]
fn load_all_treats_invalid_json_as_empty() {
    assert!(persistence_with("{not json").load_all().is_empty());
    assert!(persistence_with("[1, 2, 3]").load_all().is_empty());
    assert!(persistence_with("").load_all().is_empty());
}

#[test]
fn load_all_treats_null_as_empty() {
    assert!(persistence_with("null").load_all().is_empty());
}

#[test]
fn load_all_reads_browser_blob() {
    let raw = json!({
        "Ideas": {
            "notes": [
                { "id": "note_0", "content": "<p>a</p>", "top": "10px", "left": "20px", "color": "#81dde9" },
                { "id": "note_3", "content": "", "top": "0px", "left": "0px", "width": "300px", "height": "200px", "color": "#e98181" },
            ],
            "transform": { "translateX": -50, "translateY": 25.5, "scale": 1.4 },
        },
        "Empty": {},
    })
    .to_string();
    let canvases = persistence_with(&raw).load_all();
    assert_eq!(canvases.len(), 2);
    let ideas = canvases.get("Ideas").unwrap();
    assert_eq!(ideas.notes.len(), 2);
    assert_eq!(ideas.next_note_id(), Some(NoteId(4)));
    assert!((ideas.transform.scale - 1.4).abs() < f64::EPSILON);
    assert!(canvases.get("Empty").unwrap().notes.is_empty());
}

#[test]
fn write_all_stores_complete_mapping_under_key() {
    let mut p = Persistence::new(MemoryStore::new(), PersistenceConfig { storage_key: "custom".into() });
    let mut canvases = Canvases::new();
    canvases.insert("A", CanvasDocument::default());
    canvases.insert("B", CanvasDocument::default());
    p.write_all(&canvases).unwrap();

    let raw = p.store().get("custom").unwrap();
    let value: Value = serde_json::from_str(&raw).unwrap();
    assert!(value.get("A").is_some());
    assert!(value.get("B").is_some());
    assert_eq!(p.load_all(), canvases);
}

#[test]
fn write_all_surfaces_store_failure() {
    let mut p = Persistence::new(MemoryStore::rejecting("quota"), PersistenceConfig::default());
    let err = p.write_all(&Canvases::new()).unwrap_err();
    assert_eq!(err.error_code(), "E_STORE");
}
