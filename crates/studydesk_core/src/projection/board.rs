//! Kanban columns.

use crate::model::task::{Task, TaskStatus};

/// Column order on the board.
pub const KANBAN_COLUMNS: [TaskStatus; 3] =
    [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KanbanColumn<'a> {
    pub status: TaskStatus,
    pub tasks: Vec<&'a Task>,
}

/// Groups tasks by status, one column per entry of `KANBAN_COLUMNS`.
pub fn columns(tasks: &[Task]) -> Vec<KanbanColumn<'_>> {
    KANBAN_COLUMNS
        .iter()
        .map(|status| KanbanColumn {
            status: *status,
            tasks: tasks.iter().filter(|task| task.status == *status).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::columns;
    use crate::model::task::TaskStatus;
    use crate::projection::fixtures::task;

    #[test]
    fn every_column_is_present_even_when_empty() {
        let tasks = vec![
            task("1", TaskStatus::Done, None),
            task("2", TaskStatus::Todo, None),
            task("3", TaskStatus::Done, None),
        ];
        let board = columns(&tasks);

        assert_eq!(board.len(), 3);
        assert_eq!(board[0].status, TaskStatus::Todo);
        assert_eq!(board[0].tasks.len(), 1);
        assert!(board[1].tasks.is_empty());
        assert_eq!(
            board[2].tasks.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
            vec!["1", "3"]
        );
    }
}
