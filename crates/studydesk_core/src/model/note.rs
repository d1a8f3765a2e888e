//! Course notes with tags and markdown content.

use crate::model::timestamp;
use crate::store::{Collection, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub course: String,
    pub tags: Vec<String>,
    /// Markdown source.
    pub content: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Record for Note {
    const COLLECTION: Collection = Collection::Notes;

    fn id(&self) -> &str {
        &self.id
    }

    fn owner_id(&self) -> &str {
        &self.user_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub user_id: String,
    pub title: String,
    pub course: String,
    pub tags: Vec<String>,
    pub content: String,
}

impl NewNote {
    pub(crate) fn into_note(self, id: String, now: DateTime<Utc>) -> Note {
        Note {
            id,
            user_id: self.user_id,
            title: self.title,
            course: self.course,
            tags: self.tags,
            content: self.content,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial note update. The repository refreshes `updated_at` on every applied patch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub course: Option<String>,
    pub tags: Option<Vec<String>>,
    pub content: Option<String>,
}

impl NotePatch {
    pub fn apply_to(self, note: &mut Note) {
        if let Some(title) = self.title {
            note.title = title;
        }
        if let Some(course) = self.course {
            note.course = course;
        }
        if let Some(tags) = self.tags {
            note.tags = tags;
        }
        if let Some(content) = self.content {
            note.content = content;
        }
    }
}
