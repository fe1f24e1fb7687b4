//! Canvas documents and the name-keyed collection persisted as one blob.
//!
//! A `CanvasDocument` is the unit of switching: its notes plus the viewport
//! transform. `Canvases` maps canvas names to documents and is what the
//! persistence layer reads and writes in full.

#[cfg(test)]
#[path = "document_test.rs"]
mod document_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::consts::{FALLBACK_CANVAS_TITLE, RESTRICTED_TITLE_CHARS};
use crate::note::{Note, NoteId};
use crate::transform::Transform;

/// One named workspace: its notes and viewport.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasDocument {
    /// Notes in insertion order.
    #[serde(deserialize_with = "deserialize_notes")]
    pub notes: Vec<Note>,
    pub transform: Transform,
}

/// Notes that fail to parse are dropped individually so one bad entry does
/// not cost the whole canvas. A dropped note is gone from the next save, so
/// its raw value goes into the log.
fn deserialize_notes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Note>, D::Error> {
    let raw = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(raw)) => raw,
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(other) => {
            warn!(notes = %other, "stored notes are not a list; dropping them on next save");
            return Ok(Vec::new());
        }
    };
    let mut notes = Vec::with_capacity(raw.len());
    for value in raw {
        match serde_json::from_value::<Note>(value.clone()) {
            Ok(note) => notes.push(note),
            Err(e) => warn!(error = %e, note = %value, "malformed stored note; dropping it on next save"),
        }
    }
    Ok(notes)
}

impl CanvasDocument {
    /// Id the next created note should get, `None` once ids are exhausted.
    #[must_use]
    pub fn next_note_id(&self) -> Option<NoteId> {
        NoteId::next_after(self.notes.iter().map(|n| &n.id))
    }

    #[must_use]
    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn note_mut(&mut self, id: NoteId) -> Option<&mut Note> {
        self.notes.iter_mut().find(|n| n.id == id)
    }

    /// Remove a note, returning it if it was present.
    pub fn remove_note(&mut self, id: NoteId) -> Option<Note> {
        let idx = self.notes.iter().position(|n| n.id == id)?;
        Some(self.notes.remove(idx))
    }
}

/// All canvases, keyed by name. Serializes as a plain JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Canvases {
    documents: BTreeMap<String, CanvasDocument>,
}

/// Read entry by entry: a document that cannot be read is skipped on its
/// own and the other canvases load normally.
impl<'de> Deserialize<'de> for Canvases {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<BTreeMap<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
        let mut documents = BTreeMap::new();
        for (name, value) in raw {
            if value.is_null() {
                documents.insert(name, CanvasDocument::default());
                continue;
            }
            match serde_json::from_value::<CanvasDocument>(value) {
                Ok(document) => {
                    documents.insert(name, document);
                }
                Err(e) => warn!(canvas = %name, error = %e, "malformed stored canvas; dropping it on next save"),
            }
        }
        Ok(Self { documents })
    }
}

impl Canvases {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CanvasDocument> {
        self.documents.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.documents.contains_key(name)
    }

    /// Insert or replace the document stored under `name`.
    pub fn insert(&mut self, name: impl Into<String>, document: CanvasDocument) {
        self.documents.insert(name.into(), document);
    }

    pub fn remove(&mut self, name: &str) -> Option<CanvasDocument> {
        self.documents.remove(name)
    }

    /// Move the document at `old` to `new`. The old key is gone afterwards;
    /// a document already stored under `new` is replaced. Returns `false`
    /// when there is nothing stored under `old`.
    pub fn rename(&mut self, old: &str, new: &str) -> bool {
        if old == new {
            return self.documents.contains_key(old);
        }
        let Some(document) = self.documents.remove(old) else {
            return false;
        };
        self.documents.insert(new.to_owned(), document);
        true
    }

    /// Canvas names in key order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Strip restricted characters and surrounding whitespace from a typed
/// canvas name. `None` when nothing is left.
#[must_use]
pub fn clean_title(raw: &str) -> Option<String> {
    let cleaned: String = raw.chars().filter(|c| !RESTRICTED_TITLE_CHARS.contains(c)).collect();
    let trimmed = cleaned.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Like [`clean_title`], but an empty result becomes the fallback title.
#[must_use]
pub fn sanitize_title(raw: &str) -> String {
    clean_title(raw).unwrap_or_else(|| FALLBACK_CANVAS_TITLE.to_owned())
}
