//! Note repository contract and key-value implementation.
//!
//! # Invariants
//! - `created_at == updated_at` right after `add_note`.
//! - Every applied update refreshes `updated_at` from the clock.

use crate::clock::{id_from, Clock, SystemClock};
use crate::model::note::{NewNote, Note, NotePatch};
use crate::store::{KeyValueStore, RecordStore, RepoResult};
use log::info;

/// Repository interface for note CRUD.
pub trait NoteRepository {
    fn list_notes(&self, owner_id: Option<&str>) -> RepoResult<Vec<Note>>;
    fn add_note(&self, input: NewNote) -> RepoResult<Note>;
    fn update_note(&self, id: &str, patch: NotePatch) -> RepoResult<()>;
    fn delete_note(&self, id: &str) -> RepoResult<()>;
}

/// Note repository persisted in the `notes` collection.
pub struct KvNoteRepository<S: KeyValueStore, C: Clock = SystemClock> {
    records: RecordStore<S>,
    clock: C,
}

impl<S: KeyValueStore> KvNoteRepository<S> {
    pub fn new(backend: S) -> Self {
        Self::with_clock(backend, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> KvNoteRepository<S, C> {
    pub fn with_clock(backend: S, clock: C) -> Self {
        Self {
            records: RecordStore::new(backend),
            clock,
        }
    }
}

impl<S: KeyValueStore, C: Clock> NoteRepository for KvNoteRepository<S, C> {
    fn list_notes(&self, owner_id: Option<&str>) -> RepoResult<Vec<Note>> {
        self.records.list(owner_id)
    }

    fn add_note(&self, input: NewNote) -> RepoResult<Note> {
        let now = self.clock.now();
        let note = self.records.append(input.into_note(id_from(now), now))?;
        info!(
            "event=note_add module=repo status=ok note_id={} tag_count={}",
            note.id,
            note.tags.len()
        );
        Ok(note)
    }

    fn update_note(&self, id: &str, patch: NotePatch) -> RepoResult<()> {
        let applied = self.records.modify::<Note>(id, |note| {
            patch.apply_to(note);
            note.updated_at = self.clock.now();
        })?;
        info!("event=note_update module=repo status=ok note_id={id} applied={applied}");
        Ok(())
    }

    fn delete_note(&self, id: &str) -> RepoResult<()> {
        let removed = self.records.remove::<Note>(id)?;
        info!("event=note_delete module=repo status=ok note_id={id} removed={removed}");
        Ok(())
    }
}
