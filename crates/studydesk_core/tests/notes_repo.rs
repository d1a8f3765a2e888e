use chrono::{TimeZone, Utc};
use studydesk_core::model::note::{NewNote, NotePatch};
use studydesk_core::model::parse_tags;
use studydesk_core::repo::note_repo::{KvNoteRepository, NoteRepository};
use studydesk_core::{MemoryKeyValueStore, SteppingClock};

fn lecture_note(user_id: &str) -> NewNote {
    NewNote {
        user_id: user_id.to_string(),
        title: "Week 3".to_string(),
        course: "CS 101".to_string(),
        tags: parse_tags("recursion, stack"),
        content: "# Recursion\nbase case first".to_string(),
    }
}

#[test]
fn add_sets_created_and_updated_to_same_instant() {
    let store = MemoryKeyValueStore::new();
    let start = Utc.with_ymd_and_hms(2025, 2, 3, 10, 0, 0).unwrap();
    let repo = KvNoteRepository::with_clock(&store, SteppingClock::new(start, 60_000));

    let note = repo.add_note(lecture_note("u1")).unwrap();
    assert_eq!(note.created_at, start);
    assert_eq!(note.updated_at, start);
    assert_eq!(note.tags, vec!["recursion", "stack"]);
    assert_eq!(repo.list_notes(Some("u1")).unwrap(), vec![note]);
    assert!(repo.list_notes(Some("u2")).unwrap().is_empty());
}

#[test]
fn every_update_refreshes_updated_at() {
    let store = MemoryKeyValueStore::new();
    let repo = KvNoteRepository::new(&store);
    let note = repo.add_note(lecture_note("u1")).unwrap();

    repo.update_note(
        &note.id,
        NotePatch {
            content: Some("tail calls".to_string()),
            ..NotePatch::default()
        },
    )
    .unwrap();
    let first = repo.list_notes(None).unwrap().remove(0);
    assert!(first.updated_at > note.updated_at);
    assert_eq!(first.created_at, note.created_at);
    assert_eq!(first.title, note.title);
    assert_eq!(first.content, "tail calls");

    repo.update_note(&note.id, NotePatch::default()).unwrap();
    let second = repo.list_notes(None).unwrap().remove(0);
    assert!(second.updated_at > first.updated_at);
    assert_eq!(second.content, "tail calls");
}

#[test]
fn missing_note_update_and_delete_do_nothing() {
    let store = MemoryKeyValueStore::new();
    let repo = KvNoteRepository::new(&store);
    let note = repo.add_note(lecture_note("u1")).unwrap();

    repo.update_note(
        "missing",
        NotePatch {
            title: Some("x".to_string()),
            ..NotePatch::default()
        },
    )
    .unwrap();
    repo.delete_note("missing").unwrap();
    assert_eq!(repo.list_notes(None).unwrap(), vec![note.clone()]);

    repo.delete_note(&note.id).unwrap();
    repo.delete_note(&note.id).unwrap();
    assert!(repo.list_notes(None).unwrap().is_empty());
}
