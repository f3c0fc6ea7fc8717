use super::list::List;
use super::tag::Tag;
use super::task::Task;
use super::view::View;

/// All application state: the three collections plus the focus-session
/// counter and the selected view. Passed explicitly to every operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskStore {
    /// Most recently added first
    pub tasks: Vec<Task>,
    pub lists: Vec<List>,
    pub tags: Vec<Tag>,
    /// Number of completed focus sessions
    pub completed_pomodoros: u32,
    pub current_view: View,
}

impl TaskStore {
    pub fn find_task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn find_task_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    pub fn find_list(&self, id: &str) -> Option<&List> {
        self.lists.iter().find(|l| l.id == id)
    }

    pub fn find_tag(&self, id: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.id == id)
    }
}
