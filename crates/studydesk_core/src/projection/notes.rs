//! Note search and quick-note colors.

use crate::model::note::Note;

/// Background colors offered for quick notes.
pub const QUICK_NOTE_COLORS: [&str; 8] = [
    "#fef3c7", "#fecaca", "#fed7aa", "#d9f99d", "#a7f3d0", "#bfdbfe", "#ddd6fe", "#fbcfe8",
];

/// Case-insensitive substring match over title, course, tags and content.
///
/// A blank query matches every note.
pub fn search_notes<'a>(notes: &'a [Note], query: &str) -> Vec<&'a Note> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return notes.iter().collect();
    }

    let hit = |text: &str| text.to_lowercase().contains(&needle);
    notes
        .iter()
        .filter(|note| {
            hit(&note.title)
                || hit(&note.course)
                || note.tags.iter().any(|tag| hit(tag))
                || hit(&note.content)
        })
        .collect()
}

/// Deterministic palette pick.
pub fn pick_color(seed: u64) -> &'static str {
    QUICK_NOTE_COLORS[(seed % QUICK_NOTE_COLORS.len() as u64) as usize]
}

#[cfg(test)]
mod tests {
    use super::{pick_color, search_notes, QUICK_NOTE_COLORS};
    use crate::model::note::Note;
    use chrono::{TimeZone, Utc};

    fn note(id: &str, title: &str, course: &str, tags: &[&str], content: &str) -> Note {
        let at = Utc.with_ymd_and_hms(2025, 2, 1, 8, 0, 0).unwrap();
        Note {
            id: id.to_string(),
            user_id: "u1".to_string(),
            title: title.to_string(),
            course: course.to_string(),
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
            content: content.to_string(),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn search_covers_every_text_field() {
        let notes = vec![
            note("1", "Linear Algebra", "MATH 201", &["vectors"], "eigen"),
            note("2", "Essay plan", "ENG 101", &["Draft"], "thesis first"),
            note("3", "Lab", "CHEM", &[], "Titration notes"),
        ];
        let ids = |query: &str| {
            search_notes(&notes, query)
                .into_iter()
                .map(|note| note.id.as_str())
                .collect::<Vec<_>>()
        };

        assert_eq!(ids("algebra"), vec!["1"]);
        assert_eq!(ids("eng"), vec!["2"]);
        assert_eq!(ids("draft"), vec!["2"]);
        assert_eq!(ids("TITRATION"), vec!["3"]);
        assert_eq!(ids("   "), vec!["1", "2", "3"]);
        assert!(ids("physics").is_empty());
    }

    #[test]
    fn pick_color_cycles_through_palette() {
        assert_eq!(pick_color(0), "#fef3c7");
        assert_eq!(pick_color(8), "#fef3c7");
        assert_eq!(pick_color(7), QUICK_NOTE_COLORS[7]);
    }
}
