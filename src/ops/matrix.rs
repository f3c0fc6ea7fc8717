use chrono::NaiveDate;
use serde::Serialize;

use crate::model::task::{Priority, Task};
use crate::util::dates::days_after;

/// Tasks due within this many days (or overdue) count as urgent
pub const URGENT_WITHIN_DAYS: u64 = 3;

/// Eisenhower quadrant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Quadrant {
    /// Urgent and important
    Do,
    /// Important, not urgent
    Schedule,
    /// Urgent, not important
    Delegate,
    /// Neither
    Eliminate,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::Do,
        Quadrant::Schedule,
        Quadrant::Delegate,
        Quadrant::Eliminate,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Quadrant::Do => "Urgent & Important (Do)",
            Quadrant::Schedule => "Not Urgent & Important (Schedule)",
            Quadrant::Delegate => "Urgent & Not Important (Delegate)",
            Quadrant::Eliminate => "Not Urgent & Not Important (Eliminate)",
        }
    }

    pub fn of(task: &Task, today: NaiveDate) -> Quadrant {
        match (is_urgent(task, today), is_important(task)) {
            (true, true) => Quadrant::Do,
            (false, true) => Quadrant::Schedule,
            (true, false) => Quadrant::Delegate,
            (false, false) => Quadrant::Eliminate,
        }
    }
}

/// High or medium priority, or tagged `important`
pub fn is_important(task: &Task) -> bool {
    matches!(task.priority, Priority::High | Priority::Medium) || task.has_tag("important")
}

/// Tagged `urgent`, or due on or before today + 3 days (overdue included)
pub fn is_urgent(task: &Task, today: NaiveDate) -> bool {
    task.has_tag("urgent")
        || task
            .due_date
            .is_some_and(|due| due <= days_after(today, URGENT_WITHIN_DAYS))
}

#[derive(Debug, Clone, Serialize)]
pub struct QuadrantTasks<'a> {
    pub quadrant: Quadrant,
    pub tasks: Vec<&'a Task>,
}

/// Categorize the incomplete tasks into the four quadrants (all four are
/// returned, possibly empty, in `Quadrant::ALL` order).
pub fn quadrants(tasks: &[Task], today: NaiveDate) -> Vec<QuadrantTasks<'_>> {
    let mut out: Vec<QuadrantTasks<'_>> = Quadrant::ALL
        .iter()
        .map(|&quadrant| QuadrantTasks {
            quadrant,
            tasks: Vec::new(),
        })
        .collect();
    for task in tasks.iter().filter(|t| !t.completed) {
        let q = Quadrant::of(task, today);
        if let Some(slot) = out.iter_mut().find(|s| s.quadrant == q) {
            slot.tasks.push(task);
        }
    }
    out
}
