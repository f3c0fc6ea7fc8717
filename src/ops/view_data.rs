use chrono::NaiveDate;

use crate::model::store::TaskStore;
use crate::model::task::Task;
use crate::model::view::{SortKey, StatusFilter, View};
use crate::ops::board::{self, Column};
use crate::ops::calendar::{self, MonthGrid};
use crate::ops::filter;
use crate::ops::group::{self, TaskGroup};
use crate::ops::matrix::{self, QuadrantTasks};
use crate::ops::timeline::{self, TimelineDay};

/// What the user has selected for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub view: View,
    pub filter: StatusFilter,
    pub sort: SortKey,
    pub today: NaiveDate,
    /// Month shown by the calendar; defaults to the month of `today`
    pub month: Option<NaiveDate>,
}

/// The data a renderer needs for one view
#[derive(Debug, Clone)]
pub enum ViewData<'a> {
    /// Today / Upcoming: filtered, sorted, bucketed by date
    Grouped(Vec<TaskGroup<'a>>),
    /// Inbox, list and tag views: filtered and sorted
    Flat(Vec<&'a Task>),
    /// Kanban columns over the whole collection, in collection order
    Board(Vec<Column<'a>>),
    /// Eisenhower quadrants over the incomplete tasks
    Matrix(Vec<QuadrantTasks<'a>>),
    Calendar(MonthGrid<'a>),
    Timeline(Vec<TimelineDay<'a>>),
    Pomodoro { completed: u32 },
}

pub fn view_data<'a>(store: &'a TaskStore, sel: &Selection) -> ViewData<'a> {
    match &sel.view {
        View::Kanban => ViewData::Board(board::columns(&store.tasks)),
        View::Matrix => ViewData::Matrix(matrix::quadrants(&store.tasks, sel.today)),
        View::Calendar => ViewData::Calendar(calendar::month_grid(
            &store.tasks,
            sel.month.unwrap_or(sel.today),
        )),
        View::Pomodoro => ViewData::Pomodoro {
            completed: store.completed_pomodoros,
        },
        view => {
            let selected =
                filter::select_tasks(&store.tasks, view, sel.filter, sel.sort, sel.today);
            match view {
                View::Timeline => ViewData::Timeline(timeline::timeline(&selected)),
                v if v.groups_by_date() => {
                    ViewData::Grouped(group::group_by_date(&selected, sel.today))
                }
                _ => ViewData::Flat(selected),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::group::Bucket;
    use crate::ops::seed::seed_store;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 22).unwrap()
    }

    fn selection(view: View) -> Selection {
        Selection {
            view,
            filter: StatusFilter::All,
            sort: SortKey::DueDate,
            today: today(),
            month: None,
        }
    }

    #[test]
    fn test_today_view_is_grouped() {
        let store = seed_store(today());
        let ViewData::Grouped(groups) = view_data(&store, &selection(View::Today)) else {
            panic!("expected grouped data");
        };
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].bucket, Bucket::Today);
        assert_eq!(groups[0].tasks.len(), 2);
    }

    #[test]
    fn test_upcoming_groups_in_order() {
        let store = seed_store(today());
        let ViewData::Grouped(groups) = view_data(&store, &selection(View::Upcoming)) else {
            panic!("expected grouped data");
        };
        let buckets: Vec<Bucket> = groups.iter().map(|g| g.bucket).collect();
        assert_eq!(
            buckets,
            vec![Bucket::Today, Bucket::Tomorrow, Bucket::ThisWeek]
        );
    }

    #[test]
    fn test_list_view_is_flat() {
        let store = seed_store(today());
        let ViewData::Flat(tasks) = view_data(&store, &selection(View::List("work".into()))) else {
            panic!("expected flat data");
        };
        assert_eq!(tasks.len(), 4);
        // undated task sorts last
        assert_eq!(tasks[3].id, "7");
    }

    #[test]
    fn test_board_uses_whole_collection() {
        let store = seed_store(today());
        let mut sel = selection(View::Kanban);
        sel.filter = StatusFilter::Active;
        let ViewData::Board(cols) = view_data(&store, &sel) else {
            panic!("expected board");
        };
        let total: usize = cols.iter().map(|c| c.tasks.len()).sum();
        assert_eq!(total, store.tasks.len());
    }

    #[test]
    fn test_matrix_excludes_completed() {
        let store = seed_store(today());
        let ViewData::Matrix(qs) = view_data(&store, &selection(View::Matrix)) else {
            panic!("expected matrix");
        };
        let total: usize = qs.iter().map(|q| q.tasks.len()).sum();
        assert_eq!(total, 11);
    }

    #[test]
    fn test_pomodoro_and_calendar() {
        let mut store = seed_store(today());
        store.completed_pomodoros = 3;
        assert!(matches!(
            view_data(&store, &selection(View::Pomodoro)),
            ViewData::Pomodoro { completed: 3 }
        ));
        let ViewData::Calendar(grid) = view_data(&store, &selection(View::Calendar)) else {
            panic!("expected calendar");
        };
        assert_eq!((grid.year, grid.month), (2024, 7));
    }
}
