//! Dashboard counters and deadline list.

use crate::model::task::{Task, TaskStatus};
use chrono::NaiveDate;

/// Number of entries shown in the upcoming-deadlines card.
pub const UPCOMING_DEADLINE_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub overdue: usize,
}

impl DashboardStats {
    pub fn from_tasks(tasks: &[Task], today: NaiveDate) -> Self {
        tasks.iter().fold(Self::default(), |mut stats, task| {
            stats.total += 1;
            match task.status {
                TaskStatus::InProgress => stats.in_progress += 1,
                TaskStatus::Done => stats.completed += 1,
                TaskStatus::Todo => {}
            }
            if is_overdue(task, today) {
                stats.overdue += 1;
            }
            stats
        })
    }
}

/// An open task whose due date lies strictly before `today`.
pub fn is_overdue(task: &Task, today: NaiveDate) -> bool {
    !task.is_done() && task.due_date.is_some_and(|due| due < today)
}

/// Open tasks with a due date, earliest first, capped at `limit`.
///
/// Ties keep list order.
pub fn upcoming_deadlines(tasks: &[Task], limit: usize) -> Vec<&Task> {
    let mut upcoming = tasks
        .iter()
        .filter(|task| !task.is_done() && task.due_date.is_some())
        .collect::<Vec<_>>();
    upcoming.sort_by_key(|task| task.due_date);
    upcoming.truncate(limit);
    upcoming
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadlineLabel {
    pub text: String,
    pub urgent: bool,
}

pub fn deadline_label(due: NaiveDate, today: NaiveDate) -> DeadlineLabel {
    let days_until = (due - today).num_days();
    let (text, urgent) = match days_until {
        d if d < 0 => ("Overdue".to_string(), true),
        0 => ("Due today".to_string(), true),
        1 => ("Due tomorrow".to_string(), true),
        d if d <= 7 => (format!("{d} days left"), false),
        _ => (due.format("%b %-d, %Y").to_string(), false),
    };
    DeadlineLabel { text, urgent }
}

#[cfg(test)]
mod tests {
    use super::{deadline_label, upcoming_deadlines, DashboardStats};
    use crate::model::task::TaskStatus;
    use crate::projection::fixtures::{date, task};

    #[test]
    fn stats_count_statuses_and_overdue() {
        let today = date(2025, 3, 10);
        let tasks = vec![
            task("1", TaskStatus::Todo, Some(date(2025, 3, 9))),
            task("2", TaskStatus::InProgress, Some(date(2025, 3, 10))),
            task("3", TaskStatus::Done, Some(date(2025, 1, 1))),
            task("4", TaskStatus::Todo, None),
        ];

        let stats = DashboardStats::from_tasks(&tasks, today);
        assert_eq!(
            stats,
            DashboardStats {
                total: 4,
                in_progress: 1,
                completed: 1,
                overdue: 1,
            }
        );
    }

    #[test]
    fn upcoming_skips_done_and_undated_and_sorts_by_due_date() {
        let tasks = vec![
            task("late", TaskStatus::Todo, Some(date(2025, 5, 1))),
            task("done", TaskStatus::Done, Some(date(2025, 1, 1))),
            task("none", TaskStatus::Todo, None),
            task("soon", TaskStatus::InProgress, Some(date(2025, 2, 1))),
        ];

        let ids = upcoming_deadlines(&tasks, 5)
            .into_iter()
            .map(|task| task.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["soon", "late"]);
        assert_eq!(upcoming_deadlines(&tasks, 1).len(), 1);
    }

    #[test]
    fn deadline_labels_follow_distance_to_today() {
        let today = date(2025, 3, 10);
        let label = |due| deadline_label(due, today);

        assert_eq!(label(date(2025, 3, 9)).text, "Overdue");
        assert!(label(date(2025, 3, 9)).urgent);
        assert_eq!(label(today).text, "Due today");
        assert_eq!(label(date(2025, 3, 11)).text, "Due tomorrow");
        assert!(label(date(2025, 3, 11)).urgent);
        assert_eq!(label(date(2025, 3, 17)).text, "7 days left");
        assert!(!label(date(2025, 3, 17)).urgent);
        assert_eq!(label(date(2025, 4, 2)).text, "Apr 2, 2025");
    }
}
