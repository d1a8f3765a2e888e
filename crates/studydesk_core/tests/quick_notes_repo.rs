use studydesk_core::model::quick_note::NewQuickNote;
use studydesk_core::repo::quick_note_repo::{KvQuickNoteRepository, QuickNoteRepository};
use studydesk_core::MemoryKeyValueStore;

fn sticky(user_id: &str, content: &str) -> NewQuickNote {
    NewQuickNote {
        user_id: user_id.to_string(),
        content: content.to_string(),
        color: "#bfdbfe".to_string(),
    }
}

#[test]
fn update_changes_content_only() {
    let store = MemoryKeyValueStore::new();
    let repo = KvQuickNoteRepository::new(&store);
    let note = repo.add_quick_note(sticky("u1", "call lab partner")).unwrap();

    repo.update_quick_note(&note.id, "email lab partner").unwrap();

    let stored = repo.list_quick_notes(Some("u1")).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].content, "email lab partner");
    assert_eq!(stored[0].color, note.color);
    assert_eq!(stored[0].created_at, note.created_at);
    assert_eq!(stored[0].id, note.id);
}

#[test]
fn ids_are_unique_and_scoped_listing_works() {
    let store = MemoryKeyValueStore::new();
    let repo = KvQuickNoteRepository::new(&store);
    let first = repo.add_quick_note(sticky("u1", "a")).unwrap();
    let second = repo.add_quick_note(sticky("u2", "b")).unwrap();
    let third = repo.add_quick_note(sticky("u1", "c")).unwrap();

    assert_ne!(first.id, second.id);
    assert_ne!(second.id, third.id);
    assert_eq!(repo.list_quick_notes(Some("u1")).unwrap(), vec![first, third]);
    assert_eq!(repo.list_quick_notes(None).unwrap().len(), 3);
}

#[test]
fn delete_removes_and_repeats_quietly() {
    let store = MemoryKeyValueStore::new();
    let repo = KvQuickNoteRepository::new(&store);
    let note = repo.add_quick_note(sticky("u1", "a")).unwrap();

    repo.update_quick_note("missing", "x").unwrap();
    repo.delete_quick_note(&note.id).unwrap();
    repo.delete_quick_note(&note.id).unwrap();
    assert!(repo.list_quick_notes(None).unwrap().is_empty());
}
