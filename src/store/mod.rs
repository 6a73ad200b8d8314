//! In-memory note storage.
//!
//! Holds every note for the lifetime of the process. All data is lost on restart.

use crate::note::Note;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;

/// Outcome of a rejected store operation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A note with this filename is already stored
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// No note with this filename
    #[error("not found: {0}")]
    NotFound(String),

    /// A writer panicked while holding the lock
    #[error("note store lock poisoned")]
    Poisoned,
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// A stored note plus its insertion sequence, so listings keep creation order
#[derive(Debug)]
struct Entry {
    seq: u64,
    note: Note,
}

#[derive(Debug, Default)]
struct Inner {
    next_seq: u64,
    notes: HashMap<String, Entry>,
}

/// In-memory filename → note map.
///
/// Thread-safe via a single `RwLock` guarding the whole map, so writes are
/// serialized and listings never observe a half-applied mutation.
#[derive(Debug, Default)]
pub struct NoteStore {
    inner: RwLock<Inner>,
}

impl NoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Inner>> {
        self.inner.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Inner>> {
        self.inner.write().map_err(|_| StoreError::Poisoned)
    }

    /// Store a new note under `filename`. Fails if the key is taken.
    pub fn insert(&self, filename: &str, note: Note) -> StoreResult<()> {
        let mut inner = self.write()?;
        if inner.notes.contains_key(filename) {
            return Err(StoreError::DuplicateKey(filename.to_string()));
        }
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.notes.insert(filename.to_string(), Entry { seq, note });
        Ok(())
    }

    /// Snapshot of all notes, in insertion order.
    pub fn get_all(&self) -> StoreResult<Vec<Note>> {
        let inner = self.read()?;
        let mut entries: Vec<&Entry> = inner.notes.values().collect();
        entries.sort_by_key(|e| e.seq);
        Ok(entries.into_iter().map(|e| e.note.clone()).collect())
    }

    /// Get a single note by filename.
    pub fn get(&self, filename: &str) -> StoreResult<Note> {
        self.read()?
            .notes
            .get(filename)
            .map(|e| e.note.clone())
            .ok_or_else(|| StoreError::NotFound(filename.to_string()))
    }

    /// Replace a note's content and refresh its timestamp. Returns the updated note.
    pub fn update(&self, filename: &str, content: &str) -> StoreResult<Note> {
        let mut inner = self.write()?;
        let entry = inner
            .notes
            .get_mut(filename)
            .ok_or_else(|| StoreError::NotFound(filename.to_string()))?;
        entry.note.set_content(content);
        Ok(entry.note.clone())
    }

    /// Remove a note. Returns the record as it was just before removal.
    pub fn delete(&self, filename: &str) -> StoreResult<Note> {
        self.write()?
            .notes
            .remove(filename)
            .map(|e| e.note)
            .ok_or_else(|| StoreError::NotFound(filename.to_string()))
    }

    /// Number of stored notes.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.notes.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}
