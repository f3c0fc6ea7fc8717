use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ValueParseError;
use super::list::List;

/// The active top-level display mode.
///
/// Persisted and accepted on the command line as `inbox`, `today`, …,
/// `list-<id>` or `tag-<id>`; decoded once here so nothing else splits strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum View {
    #[default]
    Inbox,
    Today,
    Upcoming,
    Kanban,
    Timeline,
    Calendar,
    Pomodoro,
    Matrix,
    List(String),
    Tag(String),
}

impl View {
    /// Whether the active/completed filter applies to this view
    pub fn uses_status_filter(&self) -> bool {
        !matches!(self, View::Kanban | View::Matrix)
    }

    /// Whether the list renderer groups this view into date buckets
    pub fn groups_by_date(&self) -> bool {
        matches!(self, View::Today | View::Upcoming)
    }

    /// Header title; list views use the list's display name when known
    pub fn title(&self, lists: &[List]) -> String {
        match self {
            View::Inbox => "Inbox".into(),
            View::Today => "Today".into(),
            View::Upcoming => "Upcoming".into(),
            View::Kanban => "Kanban Board".into(),
            View::Timeline => "Timeline".into(),
            View::Calendar => "Calendar".into(),
            View::Pomodoro => "Pomodoro Timer".into(),
            View::Matrix => "Eisenhower Matrix".into(),
            View::List(id) => lists
                .iter()
                .find(|l| l.id == *id)
                .map(|l| l.name.clone())
                .unwrap_or_else(|| "List".into()),
            View::Tag(id) => format!("Tag: {}", id),
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Inbox => write!(f, "inbox"),
            View::Today => write!(f, "today"),
            View::Upcoming => write!(f, "upcoming"),
            View::Kanban => write!(f, "kanban"),
            View::Timeline => write!(f, "timeline"),
            View::Calendar => write!(f, "calendar"),
            View::Pomodoro => write!(f, "pomodoro"),
            View::Matrix => write!(f, "matrix"),
            View::List(id) => write!(f, "list-{}", id),
            View::Tag(id) => write!(f, "tag-{}", id),
        }
    }
}

impl FromStr for View {
    type Err = ValueParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let view = match s {
            "inbox" => View::Inbox,
            "today" => View::Today,
            "upcoming" => View::Upcoming,
            "kanban" => View::Kanban,
            "timeline" => View::Timeline,
            "calendar" => View::Calendar,
            "pomodoro" => View::Pomodoro,
            "matrix" => View::Matrix,
            _ => match s.split_once('-') {
                Some(("list", id)) if !id.is_empty() => View::List(id.to_string()),
                Some(("tag", id)) if !id.is_empty() => View::Tag(id.to_string()),
                _ => return Err(ValueParseError::new("view", s)),
            },
        };
        Ok(view)
    }
}

impl TryFrom<String> for View {
    type Error = ValueParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<View> for String {
    fn from(view: View) -> Self {
        view.to_string()
    }
}

/// Completion-status filter for list-style views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Active => "Active",
            StatusFilter::Completed => "Completed",
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ValueParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "completed" | "done" => Ok(StatusFilter::Completed),
            _ => Err(ValueParseError::new("filter", s)),
        }
    }
}

/// Sort order for list-style views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    DueDate,
    Priority,
    CreatedAt,
    Title,
}

impl SortKey {
    pub fn label(self) -> &'static str {
        match self {
            SortKey::DueDate => "Due Date",
            SortKey::Priority => "Priority",
            SortKey::CreatedAt => "Date Added",
            SortKey::Title => "Alphabetical",
        }
    }
}

impl FromStr for SortKey {
    type Err = ValueParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "duedate" | "due" => Ok(SortKey::DueDate),
            "priority" => Ok(SortKey::Priority),
            "createdat" | "created" | "added" => Ok(SortKey::CreatedAt),
            "title" | "alpha" | "alphabetical" => Ok(SortKey::Title),
            _ => Err(ValueParseError::new("sort key", s)),
        }
    }
}
