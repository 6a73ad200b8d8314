//! Note operations: create, read-all, update, delete

use super::{NoteResult, Operation};
use crate::note::Note;
use crate::store::NoteStore;
use serde::{Deserialize, Serialize};

/// Response for create and update: `{message, note}`
#[derive(Debug, Serialize, Deserialize)]
pub struct NoteMessage {
    pub message: String,
    pub note: Note,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NoteList {
    pub notes: Vec<Note>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NoteDeleted {
    pub message: String,
    pub deleted_note: Note,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateNote {
    pub filename: String,
    pub subject: String,
    pub other_info: String,
    pub content: String,
}

impl Operation for CreateNote {
    const NAME: &'static str = "create_note";
    const FIELDS: &'static [&'static str] = &["filename", "subject", "other_info", "content"];
    type Output = NoteMessage;

    fn execute(self, store: &NoteStore) -> NoteResult<NoteMessage> {
        let note = Note::new(self.filename, self.subject, self.other_info, self.content);
        store.insert(&note.filename, note.clone())?;
        Ok(NoteMessage {
            message: "Note created successfully".to_string(),
            note,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReadNotes;

impl Operation for ReadNotes {
    const NAME: &'static str = "read_notes";
    const FIELDS: &'static [&'static str] = &[];
    type Output = NoteList;

    fn execute(self, store: &NoteStore) -> NoteResult<NoteList> {
        Ok(NoteList {
            notes: store.get_all()?,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateNote {
    pub filename: String,
    pub content: String,
}

impl Operation for UpdateNote {
    const NAME: &'static str = "update_note";
    const FIELDS: &'static [&'static str] = &["filename", "content"];
    type Output = NoteMessage;

    fn execute(self, store: &NoteStore) -> NoteResult<NoteMessage> {
        let note = store.update(&self.filename, &self.content)?;
        Ok(NoteMessage {
            message: "Note updated successfully".to_string(),
            note,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteNote {
    pub filename: String,
}

impl Operation for DeleteNote {
    const NAME: &'static str = "delete_note";
    const FIELDS: &'static [&'static str] = &["filename"];
    type Output = NoteDeleted;

    fn execute(self, store: &NoteStore) -> NoteResult<NoteDeleted> {
        let deleted_note = store.delete(&self.filename)?;
        Ok(NoteDeleted {
            message: "Note deleted successfully".to_string(),
            deleted_note,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::NoteError;

    fn create(store: &NoteStore, filename: &str, content: &str) -> NoteResult<NoteMessage> {
        CreateNote {
            filename: filename.to_string(),
            subject: "s".to_string(),
            other_info: "i".to_string(),
            content: content.to_string(),
        }
        .execute(store)
    }

    #[test]
    fn test_create_returns_input_fields() {
        let store = NoteStore::new();
        let out = create(&store, "a.txt", "hello").unwrap();
        assert_eq!(out.message, "Note created successfully");
        assert_eq!(out.note.filename, "a.txt");
        assert_eq!(out.note.subject, "s");
        assert_eq!(out.note.other_info, "i");
        assert_eq!(out.note.content, "hello");
        assert_eq!(store.get("a.txt").unwrap(), out.note);
    }

    #[test]
    fn test_create_duplicate_is_conflict() {
        let store = NoteStore::new();
        let first = create(&store, "a.txt", "hello").unwrap();

        let err = create(&store, "a.txt", "other").unwrap_err();
        assert!(matches!(err, NoteError::Conflict(_)));
        assert_eq!(err.to_string(), "Note with this filename already exists.");
        assert_eq!(store.get("a.txt").unwrap(), first.note);
    }

    #[test]
    fn test_read_all_is_idempotent() {
        let store = NoteStore::new();
        create(&store, "a.txt", "hello").unwrap();
        create(&store, "b.txt", "world").unwrap();

        let first = ReadNotes.execute(&store).unwrap();
        let second = ReadNotes.execute(&store).unwrap();
        assert_eq!(first.notes.len(), 2);
        assert_eq!(first.notes, second.notes);
    }

    #[test]
    fn test_update_and_delete_missing_are_not_found() {
        let store = NoteStore::new();
        let err = UpdateNote {
            filename: "nope.txt".to_string(),
            content: "x".to_string(),
        }
        .execute(&store)
        .unwrap_err();
        assert!(matches!(err, NoteError::NotFound(_)));

        let err = DeleteNote {
            filename: "nope.txt".to_string(),
        }
        .execute(&store)
        .unwrap_err();
        assert!(matches!(err, NoteError::NotFound(_)));
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_update_then_delete() {
        let store = NoteStore::new();
        let created = create(&store, "a.txt", "hello").unwrap().note;

        let updated = UpdateNote {
            filename: "a.txt".to_string(),
            content: "bye".to_string(),
        }
        .execute(&store)
        .unwrap();
        assert_eq!(updated.message, "Note updated successfully");
        assert_eq!(updated.note.content, "bye");
        assert_eq!(updated.note.subject, created.subject);
        assert!(updated.note.timestamp >= created.timestamp);

        let deleted = DeleteNote {
            filename: "a.txt".to_string(),
        }
        .execute(&store)
        .unwrap();
        assert_eq!(deleted.message, "Note deleted successfully");
        assert_eq!(deleted.deleted_note, updated.note);
        assert!(ReadNotes.execute(&store).unwrap().notes.is_empty());
    }
}
