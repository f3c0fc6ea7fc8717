use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::model::task::Task;
use crate::model::view::{SortKey, StatusFilter, View};
use crate::util::dates::days_after;

/// Days ahead (inclusive) covered by the Upcoming view
pub const UPCOMING_DAYS: u64 = 7;

/// The view-level predicate, applied before the status filter
pub fn matches_view(task: &Task, view: &View, today: NaiveDate) -> bool {
    match view {
        View::Today => task.due_date == Some(today),
        View::Upcoming => task
            .due_date
            .is_some_and(|due| today <= due && due <= days_after(today, UPCOMING_DAYS)),
        View::List(id) => task.list == *id,
        View::Tag(id) => task.has_tag(id),
        View::Inbox => task.in_inbox(),
        View::Kanban | View::Matrix | View::Timeline | View::Calendar | View::Pomodoro => true,
    }
}

pub fn matches_status(task: &Task, filter: StatusFilter) -> bool {
    match filter {
        StatusFilter::All => true,
        StatusFilter::Active => !task.completed,
        StatusFilter::Completed => task.completed,
    }
}

/// Select the tasks a view shows, in display order.
///
/// The status filter is skipped for the kanban and matrix views. Sorting is
/// stable, so tasks with equal keys keep their collection order.
pub fn select_tasks<'a>(
    tasks: &'a [Task],
    view: &View,
    filter: StatusFilter,
    sort: SortKey,
    today: NaiveDate,
) -> Vec<&'a Task> {
    let mut selected: Vec<&Task> = tasks
        .iter()
        .filter(|t| matches_view(t, view, today))
        .filter(|t| !view.uses_status_filter() || matches_status(t, filter))
        .collect();
    sort_tasks(&mut selected, sort);
    selected
}

/// Number of tasks in a view before the status filter (header count)
pub fn view_task_count(tasks: &[Task], view: &View, today: NaiveDate) -> usize {
    tasks
        .iter()
        .filter(|t| matches_view(t, view, today))
        .count()
}

pub fn sort_tasks(tasks: &mut [&Task], key: SortKey) {
    match key {
        // Undated tasks go after every dated one
        SortKey::DueDate => tasks.sort_by_key(|t| (t.due_date.is_none(), t.due_date)),
        SortKey::Priority => tasks.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank())),
        SortKey::CreatedAt => tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::Title => tasks.sort_by(|a, b| compare_titles(&a.title, &b.title)),
    }
}

/// Case-insensitive ordering with a case-sensitive tie-break, so `apple`
/// sorts before `Banana` and `a` before `A` deterministically.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::{NewTask, Priority};
    use chrono::NaiveDateTime;
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 22).unwrap()
    }

    fn created(minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 7, 1)
            .unwrap()
            .and_hms_opt(12, minute, 0)
            .unwrap()
    }

    fn task(id: &str, f: impl FnOnce(&mut NewTask)) -> Task {
        let mut new = NewTask::new(format!("task {}", id));
        f(&mut new);
        Task::create(id.into(), created(0), new)
    }

    fn due_in(days: i64) -> Option<NaiveDate> {
        today().checked_add_signed(chrono::Duration::days(days))
    }

    fn ids(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn test_today_view_exact_day() {
        let tasks = vec![
            task("a", |t| t.due_date = due_in(0)),
            task("b", |t| t.due_date = due_in(1)),
            task("c", |_| {}),
        ];
        let out = select_tasks(&tasks, &View::Today, StatusFilter::All, SortKey::DueDate, today());
        assert_eq!(ids(&out), vec!["a"]);
    }

    #[test]
    fn test_upcoming_window_inclusive() {
        let tasks = vec![
            task("yesterday", |t| t.due_date = due_in(-1)),
            task("today", |t| t.due_date = due_in(0)),
            task("week", |t| t.due_date = due_in(7)),
            task("eight", |t| t.due_date = due_in(8)),
            task("none", |_| {}),
        ];
        let out = select_tasks(
            &tasks,
            &View::Upcoming,
            StatusFilter::All,
            SortKey::DueDate,
            today(),
        );
        assert_eq!(ids(&out), vec!["today", "week"]);
    }

    #[test]
    fn test_list_tag_and_inbox_views() {
        let tasks = vec![
            task("work", |t| t.list = "work".into()),
            task("inbox", |_| {}),
            task("blank", |t| t.list = String::new()),
            task("tagged", |t| {
                t.list = "home".into();
                t.tags = vec!["urgent".into()];
            }),
        ];
        let view = |v: View| {
            ids(&select_tasks(&tasks, &v, StatusFilter::All, SortKey::DueDate, today()))
        };
        assert_eq!(view(View::List("work".into())), vec!["work"]);
        assert_eq!(view(View::Tag("urgent".into())), vec!["tagged"]);
        assert_eq!(view(View::Inbox), vec!["inbox", "blank"]);
        assert_eq!(view(View::Timeline).len(), 4);
    }

    #[test]
    fn test_status_filter() {
        let tasks = vec![
            task("open", |_| {}),
            task("closed", |t| t.completed = true),
        ];
        let run = |f| ids(&select_tasks(&tasks, &View::Inbox, f, SortKey::DueDate, today()));
        assert_eq!(run(StatusFilter::All), vec!["open", "closed"]);
        assert_eq!(run(StatusFilter::Active), vec!["open"]);
        assert_eq!(run(StatusFilter::Completed), vec!["closed"]);
    }

    #[test]
    fn test_status_filter_ignored_for_kanban_and_matrix() {
        let tasks = vec![
            task("open", |_| {}),
            task("closed", |t| t.completed = true),
        ];
        for view in [View::Kanban, View::Matrix] {
            let out = select_tasks(&tasks, &view, StatusFilter::Active, SortKey::DueDate, today());
            assert_eq!(out.len(), 2);
        }
    }

    #[test]
    fn test_sort_by_due_date_undated_last() {
        let tasks = vec![
            task("none1", |_| {}),
            task("late", |t| t.due_date = due_in(30)),
            task("none2", |_| {}),
            task("soon", |t| t.due_date = due_in(1)),
            task("past", |t| t.due_date = due_in(-3)),
        ];
        let out = select_tasks(&tasks, &View::Inbox, StatusFilter::All, SortKey::DueDate, today());
        assert_eq!(ids(&out), vec!["past", "soon", "late", "none1", "none2"]);
    }

    #[test]
    fn test_sort_by_priority_descending_stable() {
        let tasks = vec![
            task("low", |t| t.priority = Priority::Low),
            task("none", |_| {}),
            task("high1", |t| t.priority = Priority::High),
            task("medium", |t| t.priority = Priority::Medium),
            task("high2", |t| t.priority = Priority::High),
        ];
        let out = select_tasks(&tasks, &View::Inbox, StatusFilter::All, SortKey::Priority, today());
        assert_eq!(ids(&out), vec!["high1", "high2", "medium", "low", "none"]);
    }

    #[test]
    fn test_sort_by_created_newest_first() {
        let mut tasks = vec![task("old", |_| {}), task("new", |_| {}), task("mid", |_| {})];
        tasks[0].created_at = created(1);
        tasks[1].created_at = created(30);
        tasks[2].created_at = created(15);
        let out = select_tasks(&tasks, &View::Inbox, StatusFilter::All, SortKey::CreatedAt, today());
        assert_eq!(ids(&out), vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_sort_by_title_ignores_case() {
        let tasks = vec![
            task("1", |t| t.title = "banana".into()),
            task("2", |t| t.title = "Cherry".into()),
            task("3", |t| t.title = "apple".into()),
        ];
        let out = select_tasks(&tasks, &View::Inbox, StatusFilter::All, SortKey::Title, today());
        assert_eq!(ids(&out), vec!["3", "1", "2"]);
    }

    #[test]
    fn test_view_count_ignores_status_filter() {
        let tasks = vec![
            task("a", |t| t.due_date = due_in(0)),
            task("b", |t| {
                t.due_date = due_in(0);
                t.completed = true;
            }),
            task("c", |t| t.due_date = due_in(2)),
        ];
        assert_eq!(view_task_count(&tasks, &View::Today, today()), 2);
        assert_eq!(view_task_count(&tasks, &View::Kanban, today()), 3);
    }
}
