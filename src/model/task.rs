use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::ValueParseError;

/// The list every task falls back to when none is given
pub const INBOX_LIST: &str = "inbox";

/// Task priority. Ordered from most to least important by `rank()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
    #[default]
    None,
}

impl Priority {
    /// Sort weight: high=3, medium=2, low=1, none=0
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
            Priority::None => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
            Priority::None => "none",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ValueParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            "none" => Ok(Priority::None),
            _ => Err(ValueParseError::new("priority", s)),
        }
    }
}

/// Kanban column a task sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum KanbanStatus {
    #[default]
    #[serde(rename = "todo")]
    Todo,
    #[serde(rename = "inProgress")]
    InProgress,
    #[serde(rename = "done")]
    Done,
}

impl KanbanStatus {
    pub const ALL: [KanbanStatus; 3] = [
        KanbanStatus::Todo,
        KanbanStatus::InProgress,
        KanbanStatus::Done,
    ];

    /// Column heading
    pub fn label(self) -> &'static str {
        match self {
            KanbanStatus::Todo => "To Do",
            KanbanStatus::InProgress => "In Progress",
            KanbanStatus::Done => "Done",
        }
    }
}

impl fmt::Display for KanbanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KanbanStatus::Todo => write!(f, "todo"),
            KanbanStatus::InProgress => write!(f, "in-progress"),
            KanbanStatus::Done => write!(f, "done"),
        }
    }
}

impl FromStr for KanbanStatus {
    type Err = ValueParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "todo" => Ok(KanbanStatus::Todo),
            "in-progress" | "inprogress" | "in_progress" => Ok(KanbanStatus::InProgress),
            "done" => Ok(KanbanStatus::Done),
            _ => Err(ValueParseError::new("status", s)),
        }
    }
}

/// A task as stored and persisted.
///
/// The serialized form uses camelCase keys and an empty string for a missing
/// due date, so stored collections stay readable by older data files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, with = "due_date_format")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Priority,
    /// List identifier; empty is treated as the inbox
    #[serde(default)]
    pub list: String,
    /// Tag identifiers
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub completed: bool,
    /// UTC
    #[serde(with = "created_at_format")]
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub status: KanbanStatus,
}

impl Task {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// True when the task belongs to the inbox (explicitly or by having no list)
    pub fn in_inbox(&self) -> bool {
        self.list.is_empty() || self.list == INBOX_LIST
    }

    /// Build a stored task from its creation fields
    pub fn create(id: String, created_at: NaiveDateTime, new: NewTask) -> Self {
        Task {
            id,
            title: new.title,
            description: new.description,
            due_date: new.due_date,
            priority: new.priority,
            list: new.list,
            tags: new.tags,
            completed: new.completed,
            created_at,
            status: new.status,
        }
    }
}

/// Everything needed to create a task; the store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    pub list: String,
    pub tags: Vec<String>,
    pub completed: bool,
    pub status: KanbanStatus,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        NewTask {
            title: title.into(),
            description: String::new(),
            due_date: None,
            priority: Priority::None,
            list: INBOX_LIST.to_string(),
            tags: Vec::new(),
            completed: false,
            status: KanbanStatus::Todo,
        }
    }
}

/// A partial update merged into an existing task. `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    /// `Some(None)` clears the due date
    pub due_date: Option<Option<NaiveDate>>,
    pub priority: Option<Priority>,
    pub list: Option<String>,
    pub tags: Option<Vec<String>>,
    pub completed: Option<bool>,
    pub status: Option<KanbanStatus>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        *self == TaskPatch::default()
    }

    /// Merge the set fields into `task`
    pub fn apply(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(list) = self.list {
            task.list = list;
        }
        if let Some(tags) = self.tags {
            task.tags = tags;
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
    }
}

/// `YYYY-MM-DD`, with `""` standing for no date
mod due_date_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.serialize_str(&d.format(FORMAT).to_string()),
            None => s.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(d)?.unwrap_or_default();
        if raw.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(&raw, FORMAT)
            .map(Some)
            .map_err(D::Error::custom)
    }
}

/// UTC timestamp written as RFC 3339 with a `Z` suffix. Input with another
/// offset is converted; input with no offset is taken as UTC.
mod created_at_format {
    use chrono::{DateTime, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&ts.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(ts.naive_utc());
        }
        raw.parse::<NaiveDateTime>().map_err(D::Error::custom)
    }
}
