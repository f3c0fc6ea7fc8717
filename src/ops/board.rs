use serde::Serialize;

use crate::model::task::{KanbanStatus, Task};

/// One kanban column
#[derive(Debug, Clone, Serialize)]
pub struct Column<'a> {
    pub status: KanbanStatus,
    pub tasks: Vec<&'a Task>,
}

/// Whether `task` shows in the column for `status`.
///
/// Completed tasks always show under done whatever their stored status;
/// todo and in-progress only take incomplete tasks with a matching status.
pub fn in_column(task: &Task, status: KanbanStatus) -> bool {
    match status {
        KanbanStatus::Done => task.status == KanbanStatus::Done || task.completed,
        other => task.status == other && !task.completed,
    }
}

/// The three kanban columns (todo, in progress, done), tasks in input order
pub fn columns(tasks: &[Task]) -> Vec<Column<'_>> {
    KanbanStatus::ALL
        .iter()
        .map(|&status| Column {
            status,
            tasks: tasks.iter().filter(|t| in_column(t, status)).collect(),
        })
        .collect()
}
