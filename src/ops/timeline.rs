use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::model::task::Task;
use crate::util::dates::{days_after, days_before};

/// Tasks due on one day of the timeline
#[derive(Debug, Clone)]
pub struct TimelineDay<'a> {
    pub date: NaiveDate,
    pub tasks: Vec<&'a Task>,
}

/// Every day from one day before the earliest due date to one day after the
/// latest, each with its tasks (in input order). Undated tasks are skipped;
/// the result is empty when nothing is dated.
pub fn timeline<'a>(tasks: &[&'a Task]) -> Vec<TimelineDay<'a>> {
    let mut by_date: BTreeMap<NaiveDate, Vec<&'a Task>> = BTreeMap::new();
    for &task in tasks {
        if let Some(due) = task.due_date {
            by_date.entry(due).or_default().push(task);
        }
    }

    let (Some(&min), Some(&max)) = (by_date.keys().next(), by_date.keys().next_back()) else {
        return Vec::new();
    };

    let end = days_after(max, 1);
    let mut days = Vec::new();
    let mut day = days_before(min, 1);
    while day <= end {
        days.push(TimelineDay {
            date: day,
            tasks: by_date.remove(&day).unwrap_or_default(),
        });
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    days
}
