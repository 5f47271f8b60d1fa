//! Kanban projection of a task collection.

use sd_core::EntityId;
use sd_core::entities::Task;
use sd_core::enums::TaskStatus;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column<'a> {
    pub status: TaskStatus,
    pub tasks: Vec<&'a Task>,
    pub story_points: u32,
}

/// Tasks grouped by status, one column per status in board order.
/// Columns keep the collection's order and are present even when empty.
#[must_use]
pub fn columns<'a, I>(tasks: I) -> Vec<Column<'a>>
where
    I: IntoIterator<Item = &'a Task> + Clone,
{
    TaskStatus::BOARD_COLUMNS
        .iter()
        .map(|&status| {
            let tasks: Vec<&Task> = tasks
                .clone()
                .into_iter()
                .filter(|task| task.status == status)
                .collect();
            Column {
                status,
                story_points: story_point_total(tasks.iter().copied()),
                tasks,
            }
        })
        .collect()
}

/// Tasks with no sprint.
#[must_use]
pub fn backlog(tasks: &[Task]) -> Vec<&Task> {
    tasks.iter().filter(|task| task.is_backlog()).collect()
}

#[must_use]
pub fn in_sprint(tasks: &[Task], sprint: EntityId) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|task| task.sprint == Some(sprint))
        .collect()
}

#[must_use]
pub fn story_point_total<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> u32 {
    tasks.into_iter().map(|task| task.story_points.get()).sum()
}

/// Headline numbers for a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoardSummary {
    pub tasks: usize,
    pub story_points: u32,
    pub completed_points: u32,
    pub active_bugs: usize,
}

#[must_use]
pub fn summarize(tasks: &[Task]) -> BoardSummary {
    BoardSummary {
        tasks: tasks.len(),
        story_points: story_point_total(tasks),
        completed_points: story_point_total(tasks.iter().filter(|task| task.status.is_completed())),
        active_bugs: tasks.iter().map(Task::active_bug_count).sum(),
    }
}
