use chrono::NaiveDateTime;
use tracing::debug;

use crate::model::store::TaskStore;
use crate::model::task::{KanbanStatus, NewTask, Task, TaskPatch};
use crate::model::view::View;

// Lookup misses are not errors here: every mutation reports whether it found
// its task and otherwise leaves the store untouched.

// ---------------------------------------------------------------------------
// Create / update / delete
// ---------------------------------------------------------------------------

/// Insert a new task at the front of the collection. Returns the assigned id.
///
/// Ids are the creation time in epoch milliseconds, bumped past any id
/// already in use.
pub fn add_task(store: &mut TaskStore, new: NewTask, now: NaiveDateTime) -> String {
    let mut millis = now.and_utc().timestamp_millis();
    while store.find_task(&millis.to_string()).is_some() {
        millis += 1;
    }
    let id = millis.to_string();

    debug!(%id, title = %new.title, "adding task");
    store.tasks.insert(0, Task::create(id.clone(), now, new));
    id
}

/// Merge `patch` into the task with `id`.
pub fn update_task(store: &mut TaskStore, id: &str, patch: TaskPatch) -> bool {
    match store.find_task_mut(id) {
        Some(task) => {
            patch.apply(task);
            debug!(%id, "updated task");
            true
        }
        None => false,
    }
}

pub fn delete_task(store: &mut TaskStore, id: &str) -> bool {
    let before = store.tasks.len();
    store.tasks.retain(|t| t.id != id);
    let removed = store.tasks.len() != before;
    if removed {
        debug!(%id, "deleted task");
    }
    removed
}

// ---------------------------------------------------------------------------
// Completion and kanban status
// ---------------------------------------------------------------------------

/// Flip `completed`, keeping the kanban status in step: completing forces
/// `done`; un-completing a `done` task sends it back to `todo`, any other
/// status is left as it was.
pub fn toggle_completion(store: &mut TaskStore, id: &str) -> bool {
    let Some(task) = store.find_task_mut(id) else {
        return false;
    };
    task.completed = !task.completed;
    if task.completed {
        task.status = KanbanStatus::Done;
    } else if task.status == KanbanStatus::Done {
        task.status = KanbanStatus::Todo;
    }
    debug!(%id, completed = task.completed, status = %task.status, "toggled completion");
    true
}

/// Kanban drop: move a task to another column. Only the status changes;
/// `completed` is untouched.
pub fn set_status(store: &mut TaskStore, id: &str, status: KanbanStatus) -> bool {
    update_task(
        store,
        id,
        TaskPatch {
            status: Some(status),
            ..Default::default()
        },
    )
}

// ---------------------------------------------------------------------------
// Ordering and selection
// ---------------------------------------------------------------------------

/// Drag-reorder: move the task `active_id` to the position currently held by
/// `over_id`, shifting the tasks in between.
pub fn move_task(store: &mut TaskStore, active_id: &str, over_id: &str) -> bool {
    if active_id == over_id {
        return false;
    }
    let from = store.tasks.iter().position(|t| t.id == active_id);
    let to = store.tasks.iter().position(|t| t.id == over_id);
    let (Some(from), Some(to)) = (from, to) else {
        return false;
    };
    let task = store.tasks.remove(from);
    store.tasks.insert(to, task);
    debug!(%active_id, from, to, "moved task");
    true
}

pub fn set_view(store: &mut TaskStore, view: View) {
    store.current_view = view;
}
