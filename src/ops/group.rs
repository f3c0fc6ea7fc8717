use chrono::NaiveDate;
use serde::Serialize;

use crate::model::task::Task;
use crate::util::dates::days_after;

/// Date-relative bucket used by the grouped list (Today / Upcoming views)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Bucket {
    Overdue,
    Today,
    Tomorrow,
    ThisWeek,
    Later,
    NoDate,
}

impl Bucket {
    /// Display order
    pub const ALL: [Bucket; 6] = [
        Bucket::Overdue,
        Bucket::Today,
        Bucket::Tomorrow,
        Bucket::ThisWeek,
        Bucket::Later,
        Bucket::NoDate,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Bucket::Overdue => "Overdue",
            Bucket::Today => "Today",
            Bucket::Tomorrow => "Tomorrow",
            Bucket::ThisWeek => "This Week",
            Bucket::Later => "Later",
            Bucket::NoDate => "No Date",
        }
    }

    /// The first bucket whose condition holds for `task`
    pub fn of(task: &Task, today: NaiveDate) -> Bucket {
        let Some(due) = task.due_date else {
            return Bucket::NoDate;
        };
        if due < today && !task.completed {
            Bucket::Overdue
        } else if due == today {
            Bucket::Today
        } else if due == days_after(today, 1) {
            Bucket::Tomorrow
        } else if due > today && due <= days_after(today, 7) {
            Bucket::ThisWeek
        } else {
            Bucket::Later
        }
    }
}

/// A non-empty bucket with its tasks in input order
#[derive(Debug, Clone)]
pub struct TaskGroup<'a> {
    pub bucket: Bucket,
    pub tasks: Vec<&'a Task>,
}

/// Partition already filtered and sorted tasks into buckets. Empty buckets
/// are omitted; the rest come back in `Bucket::ALL` order.
pub fn group_by_date<'a>(tasks: &[&'a Task], today: NaiveDate) -> Vec<TaskGroup<'a>> {
    let mut groups: Vec<TaskGroup<'a>> = Bucket::ALL
        .iter()
        .map(|&bucket| TaskGroup {
            bucket,
            tasks: Vec::new(),
        })
        .collect();

    for &task in tasks {
        let bucket = Bucket::of(task, today);
        if let Some(group) = groups.iter_mut().find(|g| g.bucket == bucket) {
            group.tasks.push(task);
        }
    }

    groups.retain(|g| !g.tasks.is_empty());
    groups
}
