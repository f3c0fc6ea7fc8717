use chrono::{NaiveDate, NaiveDateTime};

use crate::model::list::List;
use crate::model::store::TaskStore;
use crate::model::tag::Tag;
use crate::model::task::{KanbanStatus, Priority, Task};
use crate::util::dates::{days_after, days_before};

/// The demonstration data set used when no saved state can be loaded.
/// Due dates are relative to `today`.
pub fn seed_store(today: NaiveDate) -> TaskStore {
    TaskStore {
        tasks: seed_tasks(today),
        lists: seed_lists(),
        tags: seed_tags(),
        ..Default::default()
    }
}

pub fn seed_lists() -> Vec<List> {
    vec![
        List::new("inbox", "Inbox", "inbox", "blue"),
        List::new("work", "Work", "briefcase", "green"),
        List::new("personal", "Personal", "user", "purple"),
        List::new("shopping", "Shopping", "shopping-cart", "orange"),
        List::new("health", "Health", "heart", "red"),
        List::new("education", "Education", "book", "yellow"),
    ]
}

pub fn seed_tags() -> Vec<Tag> {
    vec![
        Tag::new("important", "Important", "red"),
        Tag::new("meeting", "Meeting", "blue"),
        Tag::new("project", "Project", "green"),
        Tag::new("urgent", "Urgent", "red"),
        Tag::new("someday", "Someday", "gray"),
        Tag::new("quick", "Quick", "yellow"),
        Tag::new("creative", "Creative", "purple"),
        Tag::new("research", "Research", "blue"),
    ]
}

struct SeedTask {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    due: Option<NaiveDate>,
    priority: Priority,
    list: &'static str,
    tags: &'static [&'static str],
    completed: bool,
    created_at: (i32, u32, u32, u32, u32),
    status: KanbanStatus,
}

pub fn seed_tasks(today: NaiveDate) -> Vec<Task> {
    let yesterday = Some(days_before(today, 1));
    let due_today = Some(today);
    let tomorrow = Some(days_after(today, 1));
    let day_after = Some(days_after(today, 2));
    let next_week = Some(days_after(today, 7));

    let seeds = [
        SeedTask {
            id: "1",
            title: "Complete project proposal",
            description: "Finish the proposal document and send to client for review. Include budget estimates and timeline.",
            due: due_today,
            priority: Priority::High,
            list: "work",
            tags: &["project", "urgent"],
            completed: false,
            created_at: (2024, 7, 20, 9, 0),
            status: KanbanStatus::InProgress,
        },
        SeedTask {
            id: "2",
            title: "Buy groceries",
            description: "Milk, eggs, bread, fruits, vegetables, and snacks for the week",
            due: tomorrow,
            priority: Priority::Medium,
            list: "shopping",
            tags: &["quick"],
            completed: false,
            created_at: (2024, 7, 22, 18, 30),
            status: KanbanStatus::Todo,
        },
        SeedTask {
            id: "3",
            title: "Call mom",
            description: "Discuss family reunion plans and birthday gift ideas",
            due: day_after,
            priority: Priority::Low,
            list: "personal",
            tags: &["important"],
            completed: false,
            created_at: (2024, 7, 21, 14, 15),
            status: KanbanStatus::Todo,
        },
        SeedTask {
            id: "4",
            title: "Prepare for team meeting",
            description: "Gather all reports and prepare presentation slides for quarterly review",
            due: tomorrow,
            priority: Priority::High,
            list: "work",
            tags: &["meeting", "important"],
            completed: false,
            created_at: (2024, 7, 20, 11, 20),
            status: KanbanStatus::Todo,
        },
        SeedTask {
            id: "5",
            title: "Morning run",
            description: "5km around the park - bring water and wireless earbuds",
            due: due_today,
            priority: Priority::Medium,
            list: "health",
            tags: &[],
            completed: true,
            created_at: (2024, 7, 19, 7, 0),
            status: KanbanStatus::Done,
        },
        SeedTask {
            id: "6",
            title: "Schedule dentist appointment",
            description: "Call Dr. Smith's office for a cleaning and check-up",
            due: next_week,
            priority: Priority::Medium,
            list: "health",
            tags: &["important"],
            completed: false,
            created_at: (2024, 7, 23, 10, 0),
            status: KanbanStatus::Todo,
        },
        SeedTask {
            id: "7",
            title: "Respond to non-urgent emails",
            description: "Clear inbox and organize messages into folders",
            due: None,
            priority: Priority::Low,
            list: "work",
            tags: &[],
            completed: false,
            created_at: (2024, 7, 23, 11, 0),
            status: KanbanStatus::Todo,
        },
        SeedTask {
            id: "8",
            title: "Research new programming framework",
            description: "Evaluate pros and cons for the upcoming project",
            due: next_week,
            priority: Priority::Medium,
            list: "education",
            tags: &["research", "project"],
            completed: false,
            created_at: (2024, 7, 22, 15, 30),
            status: KanbanStatus::Todo,
        },
        SeedTask {
            id: "9",
            title: "Pay utility bills",
            description: "Electricity, water, and internet bills due this month",
            due: yesterday,
            priority: Priority::High,
            list: "personal",
            tags: &["urgent"],
            completed: false,
            created_at: (2024, 7, 18, 9, 45),
            status: KanbanStatus::Todo,
        },
        SeedTask {
            id: "10",
            title: "Plan weekend getaway",
            description: "Research destinations, accommodations, and activities",
            due: day_after,
            priority: Priority::Low,
            list: "personal",
            tags: &["creative", "someday"],
            completed: false,
            created_at: (2024, 7, 21, 20, 15),
            status: KanbanStatus::Todo,
        },
        SeedTask {
            id: "11",
            title: "Order new office supplies",
            description: "Notebooks, pens, sticky notes, and printer paper",
            due: tomorrow,
            priority: Priority::Low,
            list: "work",
            tags: &["quick"],
            completed: false,
            created_at: (2024, 7, 23, 14, 20),
            status: KanbanStatus::Todo,
        },
        SeedTask {
            id: "12",
            title: "Update resume",
            description: "Add recent projects and skills",
            due: None,
            priority: Priority::Medium,
            list: "personal",
            tags: &["someday"],
            completed: false,
            created_at: (2024, 7, 19, 16, 40),
            status: KanbanStatus::Todo,
        },
    ];

    seeds.into_iter().map(to_task).collect()
}

fn to_task(seed: SeedTask) -> Task {
    let (y, mo, d, h, mi) = seed.created_at;
    let created_at = NaiveDate::from_ymd_opt(y, mo, d)
        .and_then(|date| date.and_hms_opt(h, mi, 0))
        .unwrap_or(NaiveDateTime::MIN);
    Task {
        id: seed.id.to_string(),
        title: seed.title.to_string(),
        description: seed.description.to_string(),
        due_date: seed.due,
        priority: seed.priority,
        list: seed.list.to_string(),
        tags: seed.tags.iter().map(|t| t.to_string()).collect(),
        completed: seed.completed,
        created_at,
        status: seed.status,
    }
}
