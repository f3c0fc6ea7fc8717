use chrono::{NaiveDate, NaiveDateTime};

use crate::model::store::TaskStore;
use crate::model::task::{INBOX_LIST, NewTask, Priority};
use crate::model::view::View;
use crate::ops::task_ops;
use crate::parse::parse_task_input;

/// Error type for the add flow
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddError {
    #[error("task title cannot be empty")]
    EmptyTitle,
}

/// The add-task form: free text plus the structured fields a user may set
/// explicitly. Explicit fields win over anything parsed from the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickAddForm {
    pub input: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    pub list: String,
    pub tags: Vec<String>,
    /// With the details panel open the text is taken literally as the title
    pub details_open: bool,
}

impl QuickAddForm {
    pub fn new(input: impl Into<String>) -> Self {
        QuickAddForm {
            input: input.into(),
            description: String::new(),
            due_date: None,
            priority: Priority::None,
            list: INBOX_LIST.to_string(),
            tags: Vec::new(),
            details_open: false,
        }
    }

    /// A blank form with the list pre-selected from a list view
    pub fn for_view(input: impl Into<String>, view: &View) -> Self {
        let mut form = QuickAddForm::new(input);
        if let View::List(id) = view {
            form.list = id.clone();
        }
        form
    }
}

/// Trim a title, rejecting one that is blank
pub fn clean_title(raw: &str) -> Result<String, AddError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(AddError::EmptyTitle);
    }
    Ok(title.to_string())
}

fn push_tag(tags: &mut Vec<String>, tag: String) {
    if !tags.contains(&tag) {
        tags.push(tag);
    }
}

/// Resolve the form into the fields of a new task.
///
/// Parsed values only fill fields still at their defaults: an empty due date,
/// `none` priority, the `inbox` list. Parsed tags are appended to the chosen
/// ones; the merged tags keep first occurrences only.
pub fn build_task(form: QuickAddForm, today: NaiveDate) -> Result<NewTask, AddError> {
    let mut new = NewTask {
        title: clean_title(&form.input)?,
        description: form.description,
        due_date: form.due_date,
        priority: form.priority,
        list: form.list,
        ..NewTask::new("")
    };
    for tag in form.tags {
        push_tag(&mut new.tags, tag);
    }

    if !form.details_open {
        let parsed = parse_task_input(&form.input, today);
        new.title = parsed.title;
        if new.due_date.is_none() {
            new.due_date = parsed.due_date;
        }
        if new.priority == Priority::None {
            new.priority = parsed.priority;
        }
        if new.list == INBOX_LIST {
            new.list = parsed.list;
        }
        for tag in parsed.tags {
            push_tag(&mut new.tags, tag);
        }
    }

    if new.title.is_empty() {
        return Err(AddError::EmptyTitle);
    }
    Ok(new)
}

/// Validate the form and insert the task. Returns the new task's id.
pub fn quick_add(
    store: &mut TaskStore,
    form: QuickAddForm,
    today: NaiveDate,
    now: NaiveDateTime,
) -> Result<String, AddError> {
    let new = build_task(form, today)?;
    Ok(task_ops::add_task(store, new, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::KanbanStatus;
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 22).unwrap()
    }

    #[test]
    fn test_parsed_fields_fill_defaults() {
        let new = build_task(
            QuickAddForm::new("Buy milk tomorrow #shopping !high @quick"),
            today(),
        )
        .unwrap();
        assert_eq!(new.title, "Buy milk");
        assert_eq!(new.due_date, NaiveDate::from_ymd_opt(2024, 7, 23));
        assert_eq!(new.priority, Priority::High);
        assert_eq!(new.list, "shopping");
        assert_eq!(new.tags, vec!["quick"]);
        assert!(!new.completed);
        assert_eq!(new.status, KanbanStatus::Todo);
    }

    #[test]
    fn test_explicit_fields_win() {
        let form = QuickAddForm {
            due_date: NaiveDate::from_ymd_opt(2024, 8, 1),
            priority: Priority::Low,
            list: "work".into(),
            ..QuickAddForm::new("Report tomorrow #home !high")
        };
        let new = build_task(form, today()).unwrap();
        assert_eq!(new.title, "Report");
        assert_eq!(new.due_date, NaiveDate::from_ymd_opt(2024, 8, 1));
        assert_eq!(new.priority, Priority::Low);
        assert_eq!(new.list, "work");
    }

    #[test]
    fn test_tags_merged_without_duplicates() {
        let form = QuickAddForm {
            tags: vec!["urgent".into(), "meeting".into()],
            ..QuickAddForm::new("Sync @meeting @project @project")
        };
        let new = build_task(form, today()).unwrap();
        assert_eq!(new.tags, vec!["urgent", "meeting", "project"]);
    }

    #[test]
    fn test_chosen_tags_deduplicated() {
        let form = QuickAddForm {
            tags: vec!["a".into(), "a".into()],
            ..QuickAddForm::new("x @b @a")
        };
        let new = build_task(form, today()).unwrap();
        assert_eq!(new.tags, vec!["a", "b"]);

        let form = QuickAddForm {
            tags: vec!["a".into(), "a".into()],
            details_open: true,
            ..QuickAddForm::new("x")
        };
        assert_eq!(build_task(form, today()).unwrap().tags, vec!["a"]);
    }

    #[test]
    fn test_details_open_skips_parser() {
        let form = QuickAddForm {
            details_open: true,
            ..QuickAddForm::new("  Email #1 customer tomorrow ")
        };
        let new = build_task(form, today()).unwrap();
        assert_eq!(new.title, "Email #1 customer tomorrow");
        assert_eq!(new.due_date, None);
        assert_eq!(new.list, "inbox");
    }

    #[test]
    fn test_list_view_preselects_list() {
        let form = QuickAddForm::for_view("Stretch #work", &View::List("health".into()));
        let new = build_task(form, today()).unwrap();
        // the view's list is an explicit choice, so the parsed list is ignored
        assert_eq!(new.list, "health");
        assert_eq!(new.title, "Stretch");
    }

    #[test]
    fn test_empty_input_rejected() {
        assert_eq!(
            build_task(QuickAddForm::new("   "), today()),
            Err(AddError::EmptyTitle)
        );
    }

    #[test]
    fn test_clean_title() {
        assert_eq!(clean_title("  Reply to Sam "), Ok("Reply to Sam".to_string()));
        assert_eq!(clean_title(""), Err(AddError::EmptyTitle));
        assert_eq!(clean_title(" \t "), Err(AddError::EmptyTitle));
    }

    #[test]
    fn test_metadata_only_input_rejected() {
        let mut store = TaskStore::default();
        let result = quick_add(
            &mut store,
            QuickAddForm::new("tomorrow #work !high"),
            today(),
            today().and_hms_opt(9, 0, 0).unwrap(),
        );
        assert_eq!(result, Err(AddError::EmptyTitle));
        assert!(store.tasks.is_empty());
    }

    #[test]
    fn test_quick_add_inserts() {
        let mut store = TaskStore::default();
        let id = quick_add(
            &mut store,
            QuickAddForm::new("Call mom next week"),
            today(),
            today().and_hms_opt(9, 0, 0).unwrap(),
        )
        .unwrap();
        let task = store.find_task(&id).unwrap();
        assert_eq!(task.title, "Call mom");
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2024, 7, 29));
    }
}
