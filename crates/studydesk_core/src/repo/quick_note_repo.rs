//! Quick-note repository contract and key-value implementation.

use crate::clock::{id_from, Clock, SystemClock};
use crate::model::quick_note::{NewQuickNote, QuickNote};
use crate::store::{KeyValueStore, RecordStore, RepoResult};
use log::info;

/// Repository interface for quick notes. Updates replace content only.
pub trait QuickNoteRepository {
    fn list_quick_notes(&self, owner_id: Option<&str>) -> RepoResult<Vec<QuickNote>>;
    fn add_quick_note(&self, input: NewQuickNote) -> RepoResult<QuickNote>;
    fn update_quick_note(&self, id: &str, content: &str) -> RepoResult<()>;
    fn delete_quick_note(&self, id: &str) -> RepoResult<()>;
}

/// Quick-note repository persisted in the `quickNotes` collection.
pub struct KvQuickNoteRepository<S: KeyValueStore, C: Clock = SystemClock> {
    records: RecordStore<S>,
    clock: C,
}

impl<S: KeyValueStore> KvQuickNoteRepository<S> {
    pub fn new(backend: S) -> Self {
        Self::with_clock(backend, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> KvQuickNoteRepository<S, C> {
    pub fn with_clock(backend: S, clock: C) -> Self {
        Self {
            records: RecordStore::new(backend),
            clock,
        }
    }
}

impl<S: KeyValueStore, C: Clock> QuickNoteRepository for KvQuickNoteRepository<S, C> {
    fn list_quick_notes(&self, owner_id: Option<&str>) -> RepoResult<Vec<QuickNote>> {
        self.records.list(owner_id)
    }

    fn add_quick_note(&self, input: NewQuickNote) -> RepoResult<QuickNote> {
        let now = self.clock.now();
        let quick_note = self
            .records
            .append(input.into_quick_note(id_from(now), now))?;
        info!(
            "event=quick_note_add module=repo status=ok quick_note_id={}",
            quick_note.id
        );
        Ok(quick_note)
    }

    fn update_quick_note(&self, id: &str, content: &str) -> RepoResult<()> {
        let applied = self
            .records
            .modify::<QuickNote>(id, |quick_note| quick_note.content = content.to_string())?;
        info!(
            "event=quick_note_update module=repo status=ok quick_note_id={id} applied={applied}"
        );
        Ok(())
    }

    fn delete_quick_note(&self, id: &str) -> RepoResult<()> {
        let removed = self.records.remove::<QuickNote>(id)?;
        info!(
            "event=quick_note_delete module=repo status=ok quick_note_id={id} removed={removed}"
        );
        Ok(())
    }
}
