//! Transient per-clip note cache

use std::collections::HashMap;

use clipmirror_core::{ClipId, NoteRecord};

/// Named store holding the last raw note list extracted per clip.
/// Cleared at the start of every rebuild, then refilled clip by clip.
#[derive(Debug, Default)]
pub struct NoteStore {
    name: String,
    entries: HashMap<ClipId, Vec<NoteRecord>>,
}

impl NoteStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn insert(&mut self, clip: ClipId, notes: Vec<NoteRecord>) {
        self.entries.insert(clip, notes);
    }

    pub fn get(&self, clip: ClipId) -> Option<&[NoteRecord]> {
        self.entries.get(&clip).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_then_refill() {
        let mut store = NoteStore::new("clip_notes");
        store.insert(ClipId(1), vec![NoteRecord::new(60, 0.0, 1.0, 100.0, false)]);
        assert_eq!(store.len(), 1);

        store.clear();
        assert!(store.is_empty());
        assert!(store.get(ClipId(1)).is_none());
    }
}
