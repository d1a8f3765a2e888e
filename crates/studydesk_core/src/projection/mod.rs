//! Read models derived from repository data.
//!
//! # Responsibility
//! - Turn owned record lists into what dashboard, calendar, kanban and
//!   notes screens render.
//!
//! # Invariants
//! - Everything here is pure: no store access, no clock reads. Callers pass
//!   `today` explicitly.

pub mod board;
pub mod calendar;
pub mod dashboard;
pub mod notes;

pub use board::{columns, KanbanColumn, KANBAN_COLUMNS};
pub use calendar::{month_grid, shift_month, tasks_on, MonthGrid};
pub use dashboard::{
    deadline_label, is_overdue, upcoming_deadlines, DashboardStats, DeadlineLabel,
    UPCOMING_DEADLINE_LIMIT,
};
pub use notes::{pick_color, search_notes, QUICK_NOTE_COLORS};

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::model::task::{Task, TaskCategory, TaskPriority, TaskStatus};
    use chrono::{NaiveDate, TimeZone, Utc};

    pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    pub fn task(id: &str, status: TaskStatus, due: Option<NaiveDate>) -> Task {
        Task {
            id: id.to_string(),
            user_id: "u1".to_string(),
            title: format!("task {id}"),
            description: String::new(),
            category: TaskCategory::Assignments,
            status,
            priority: TaskPriority::Medium,
            due_date: due,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }
}
