use chrono::{Datelike, Months, NaiveDate};

use crate::model::task::Task;

/// One cell of the month grid; `date` is `None` for padding cells
#[derive(Debug, Clone)]
pub struct DayCell<'a> {
    pub date: Option<NaiveDate>,
    pub tasks: Vec<&'a Task>,
}

/// A month laid out in Sunday-first weeks
#[derive(Debug, Clone)]
pub struct MonthGrid<'a> {
    pub year: i32,
    pub month: u32,
    /// Always a multiple of 7 cells
    pub cells: Vec<DayCell<'a>>,
}

impl<'a> MonthGrid<'a> {
    /// `July 2024`
    pub fn title(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_default()
    }

    pub fn weeks(&self) -> std::slice::Chunks<'_, DayCell<'a>> {
        self.cells.chunks(7)
    }
}

/// Lay out the month containing `month_of`, attaching tasks due on each day.
pub fn month_grid(tasks: &[Task], month_of: NaiveDate) -> MonthGrid<'_> {
    let first = month_of.with_day(1).unwrap_or(month_of);
    let leading = first.weekday().num_days_from_sunday() as usize;

    let mut cells: Vec<DayCell<'_>> = (0..leading).map(|_| empty_cell()).collect();

    let mut day = first;
    while day.month() == first.month() {
        cells.push(DayCell {
            date: Some(day),
            tasks: tasks.iter().filter(|t| t.due_date == Some(day)).collect(),
        });
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }

    while cells.len() % 7 != 0 {
        cells.push(empty_cell());
    }

    MonthGrid {
        year: first.year(),
        month: first.month(),
        cells,
    }
}

/// First day of the month `delta` months away from the month of `date`
pub fn shift_month(date: NaiveDate, delta: i32) -> NaiveDate {
    let first = date.with_day(1).unwrap_or(date);
    let months = Months::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        first.checked_add_months(months)
    } else {
        first.checked_sub_months(months)
    };
    shifted.unwrap_or(first)
}

fn empty_cell<'a>() -> DayCell<'a> {
    DayCell {
        date: None,
        tasks: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::NewTask;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn task(id: &str, due: NaiveDate) -> Task {
        let mut new = NewTask::new(id);
        new.due_date = Some(due);
        Task::create(id.into(), d(2024, 7, 1).and_hms_opt(8, 0, 0).unwrap(), new)
    }

    #[test]
    fn test_july_2024_layout() {
        // July 1st 2024 is a Monday: one leading blank, 31 days, 3 trailing
        let grid = month_grid(&[], d(2024, 7, 18));
        assert_eq!(grid.title(), "July 2024");
        assert_eq!(grid.cells.len(), 35);
        assert!(grid.cells[0].date.is_none());
        assert_eq!(grid.cells[1].date, Some(d(2024, 7, 1)));
        assert_eq!(grid.cells[31].date, Some(d(2024, 7, 31)));
        assert!(grid.cells[32..].iter().all(|c| c.date.is_none()));
        assert_eq!(grid.weeks().count(), 5);
    }

    #[test]
    fn test_month_starting_sunday_has_no_leading_blanks() {
        // September 1st 2024 is a Sunday
        let grid = month_grid(&[], d(2024, 9, 1));
        assert_eq!(grid.cells[0].date, Some(d(2024, 9, 1)));
        assert_eq!(grid.cells.len() % 7, 0);
    }

    #[test]
    fn test_tasks_attached_to_their_day() {
        let tasks = vec![
            task("a", d(2024, 7, 4)),
            task("b", d(2024, 7, 4)),
            task("other-month", d(2024, 8, 4)),
        ];
        let grid = month_grid(&tasks, d(2024, 7, 1));
        let cell = grid
            .cells
            .iter()
            .find(|c| c.date == Some(d(2024, 7, 4)))
            .unwrap();
        assert_eq!(cell.tasks.len(), 2);
        let total: usize = grid.cells.iter().map(|c| c.tasks.len()).sum();
        assert_eq!(total, 2);
    }

    #[test]
    fn test_shift_month() {
        assert_eq!(shift_month(d(2024, 1, 31), 1), d(2024, 2, 1));
        assert_eq!(shift_month(d(2024, 1, 15), -1), d(2023, 12, 1));
        assert_eq!(shift_month(d(2024, 5, 9), 0), d(2024, 5, 1));
    }
}
