use chrono::NaiveDate;
use serde::Serialize;

use crate::model::config::PomodoroConfig;
use crate::model::list::List;
use crate::model::store::TaskStore;
use crate::model::tag::Tag;
use crate::model::task::{Priority, Task};
use crate::ops::calendar::MonthGrid;
use crate::ops::pomodoro::{PomodoroMode, format_clock};
use crate::ops::view_data::ViewData;
use crate::util::dates::{iso, relative_label, short_label};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

/// A rendered view: header plus titled sections of tasks
#[derive(Serialize)]
pub struct ViewJson<'a> {
    pub view: String,
    pub title: String,
    /// Tasks matching the view before the completion filter
    pub count: usize,
    pub sections: Vec<SectionJson<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_pomodoros: Option<u32>,
}

#[derive(Serialize)]
pub struct SectionJson<'a> {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub tasks: Vec<&'a Task>,
}

#[derive(Serialize)]
pub struct PomodoroJson {
    pub completed: u32,
    pub modes: Vec<PomodoroModeJson>,
}

#[derive(Serialize)]
pub struct PomodoroModeJson {
    pub mode: String,
    pub label: &'static str,
    pub seconds: u32,
}

/// Flatten view data into titled sections. `flat_title` names the single
/// section of a flat view.
pub fn sections<'a>(data: &ViewData<'a>, flat_title: &str) -> Vec<SectionJson<'a>> {
    match data {
        ViewData::Flat(tasks) => vec![SectionJson {
            title: flat_title.to_string(),
            date: None,
            tasks: tasks.clone(),
        }],
        ViewData::Grouped(groups) => groups
            .iter()
            .map(|g| SectionJson {
                title: g.bucket.title().to_string(),
                date: None,
                tasks: g.tasks.clone(),
            })
            .collect(),
        ViewData::Board(columns) => columns
            .iter()
            .map(|c| SectionJson {
                title: c.status.label().to_string(),
                date: None,
                tasks: c.tasks.clone(),
            })
            .collect(),
        ViewData::Matrix(quadrants) => quadrants
            .iter()
            .map(|q| SectionJson {
                title: q.quadrant.title().to_string(),
                date: None,
                tasks: q.tasks.clone(),
            })
            .collect(),
        ViewData::Calendar(grid) => grid
            .cells
            .iter()
            .filter_map(|cell| cell.date.map(|date| dated_section(date, &cell.tasks)))
            .collect(),
        ViewData::Timeline(days) => days
            .iter()
            .map(|day| dated_section(day.date, &day.tasks))
            .collect(),
        ViewData::Pomodoro { .. } => Vec::new(),
    }
}

fn dated_section<'a>(date: NaiveDate, tasks: &[&'a Task]) -> SectionJson<'a> {
    SectionJson {
        title: short_label(date),
        date: Some(iso(date)),
        tasks: tasks.to_vec(),
    }
}

pub fn pomodoro_to_json(completed: u32, config: &PomodoroConfig) -> PomodoroJson {
    PomodoroJson {
        completed,
        modes: PomodoroMode::ALL
            .iter()
            .map(|m| PomodoroModeJson {
                mode: m.to_string(),
                label: m.label(),
                seconds: m.duration_secs(config),
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// `[x] 12 Title  due Tomorrow !high #work @urgent`
pub fn format_task_line(task: &Task, today: NaiveDate) -> String {
    let check = if task.completed { 'x' } else { ' ' };
    let mut line = format!("[{}] {} {}", check, task.id, task.title);

    let mut meta = Vec::new();
    if let Some(due) = task.due_date {
        meta.push(format!("due {}", relative_label(due, today)));
    }
    if task.priority != Priority::None {
        meta.push(format!("!{}", task.priority));
    }
    if !task.in_inbox() {
        meta.push(format!("#{}", task.list));
    }
    meta.extend(task.tags.iter().map(|t| format!("@{}", t)));

    if !meta.is_empty() {
        line.push_str("  ");
        line.push_str(&meta.join(" "));
    }
    line
}

/// Task line plus every stored field. List and tag names come from the
/// store; ids it doesn't know are shown as they are.
pub fn format_task_detail(task: &Task, store: &TaskStore, today: NaiveDate) -> Vec<String> {
    let mut lines = vec![format_task_line(task, today)];
    if !task.description.is_empty() {
        lines.push(format!("description: {}", task.description));
    }
    if let Some(due) = task.due_date {
        lines.push(format!("due: {}", iso(due)));
    }
    lines.push(format!("priority: {}", task.priority));
    let list = match store.find_list(&task.list) {
        Some(list) => format!("{} ({})", list.name, list.id),
        None => task.list.clone(),
    };
    lines.push(format!("list: {}", list));
    if !task.tags.is_empty() {
        let tags: Vec<String> = task
            .tags
            .iter()
            .map(|id| match store.find_tag(id) {
                Some(tag) => format!("{} ({})", tag.name, tag.id),
                None => id.clone(),
            })
            .collect();
        lines.push(format!("tags: {}", tags.join(", ")));
    }
    lines.push(format!("status: {}", task.status));
    lines.push(format!(
        "created: {} UTC",
        task.created_at.format("%Y-%m-%d %H:%M")
    ));
    lines
}

pub fn format_view_header(title: &str, count: usize) -> String {
    format!("== {} ({}) ==", title, count)
}

/// Body lines for a view, without the header
pub fn format_view(data: &ViewData<'_>, today: NaiveDate) -> Vec<String> {
    let mut lines = Vec::new();
    match data {
        ViewData::Flat(tasks) => {
            if tasks.is_empty() {
                lines.push("No tasks found".to_string());
            }
            lines.extend(tasks.iter().map(|t| format_task_line(t, today)));
        }
        ViewData::Calendar(grid) => lines.extend(format_month(grid, today)),
        ViewData::Timeline(days) => {
            if days.is_empty() {
                lines.push("No dated tasks".to_string());
            }
            // days with nothing due are left out
            for day in days.iter().filter(|day| !day.tasks.is_empty()) {
                lines.push(format!("-- {} --", relative_label(day.date, today)));
                lines.extend(day.tasks.iter().map(|t| format!("  {}", format_task_line(t, today))));
            }
        }
        ViewData::Pomodoro { completed } => {
            lines.push(format!("Completed focus sessions: {}", completed));
        }
        _ => {
            let secs = sections(data, "");
            if secs.is_empty() {
                lines.push("No tasks found".to_string());
            }
            for sec in secs {
                lines.push(format!("-- {} ({}) --", sec.title, sec.tasks.len()));
                lines.extend(sec.tasks.iter().map(|t| format!("  {}", format_task_line(t, today))));
            }
        }
    }
    lines
}

/// Sunday-first grid of day numbers; `*` marks days with tasks, `<` marks
/// today. The tasks of each marked day follow the grid.
pub fn format_month(grid: &MonthGrid<'_>, today: NaiveDate) -> Vec<String> {
    let mut lines = vec![grid.title(), "Su  Mo  Tu  We  Th  Fr  Sa".to_string()];
    for week in grid.weeks() {
        let row: Vec<String> = week
            .iter()
            .map(|cell| match cell.date {
                Some(date) => {
                    let mark = if date == today {
                        '<'
                    } else if !cell.tasks.is_empty() {
                        '*'
                    } else {
                        ' '
                    };
                    format!("{:>2}{}", date.format("%-d"), mark)
                }
                None => "   ".to_string(),
            })
            .collect();
        lines.push(row.join(" ").trim_end().to_string());
    }
    for cell in &grid.cells {
        if let Some(date) = cell.date
            && !cell.tasks.is_empty()
        {
            lines.push(String::new());
            lines.push(format!("-- {} --", relative_label(date, today)));
            lines.extend(cell.tasks.iter().map(|t| format!("  {}", format_task_line(t, today))));
        }
    }
    lines
}

pub fn format_list_line(list: &List) -> String {
    format!("{:<12} {}", list.id, list.name)
}

pub fn format_tag_line(tag: &Tag) -> String {
    format!("{:<12} {}", tag.id, tag.name)
}

pub fn format_pomodoro(completed: u32, config: &PomodoroConfig) -> Vec<String> {
    let mut lines: Vec<String> = PomodoroMode::ALL
        .iter()
        .map(|m| format!("{:<12} {}", m.label(), format_clock(m.duration_secs(config))))
        .collect();
    lines.push(format!("Completed focus sessions: {}", completed));
    lines
}
