//! Sticky quick notes on the dashboard.

use crate::model::timestamp;
use crate::store::{Collection, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickNote {
    pub id: String,
    pub user_id: String,
    pub content: String,
    /// Display hint, e.g. `#fef3c7`.
    pub color: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Record for QuickNote {
    const COLLECTION: Collection = Collection::QuickNotes;

    fn id(&self) -> &str {
        &self.id
    }

    fn owner_id(&self) -> &str {
        &self.user_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuickNote {
    pub user_id: String,
    pub content: String,
    pub color: String,
}

impl NewQuickNote {
    pub(crate) fn into_quick_note(self, id: String, created_at: DateTime<Utc>) -> QuickNote {
        QuickNote {
            id,
            user_id: self.user_id,
            content: self.content,
            color: self.color,
            created_at,
        }
    }
}
