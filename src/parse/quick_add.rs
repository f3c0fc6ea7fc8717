use std::ops::Range;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::model::task::{INBOX_LIST, Priority};
use crate::parse::date::parse_numeric_date;
use crate::util::dates::days_after;

static TOMORROW: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\btomorrow\b").unwrap());
static NEXT_WEEK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bnext week\b").unwrap());
static NUMERIC_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4}-\d{2}-\d{2})|(\d{1,2}/\d{1,2}(/\d{2,4})?)").unwrap()
});
static PRIORITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)!\b(high|medium|low|none)\b").unwrap());
static LIST: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#([A-Za-z0-9_]+)").unwrap());
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@([A-Za-z0-9_]+)").unwrap());
static SPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" +").unwrap());

/// Structured fields pulled out of one line of quick-add text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedInput {
    /// Input with every recognized token removed; may be empty
    pub title: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    /// Lowercased list id, `inbox` when none was given
    pub list: String,
    /// Lowercased tag ids in order of appearance, duplicates kept
    pub tags: Vec<String>,
}

/// Parse quick-add text such as `Buy milk tomorrow #shopping !high @errand`.
///
/// Never fails. Categories are recognized in order (date, priority, list,
/// tags) against the progressively stripped text:
///
/// - date: `tomorrow`, else `next week`, else the first numeric date
///   (`YYYY-MM-DD`, `M/D`, `M/D/YY`, `M/D/YYYY`). A numeric date that isn't a
///   real day is left in the title.
/// - priority: first `!high|!medium|!low|!none`
/// - list: first `#word`; later ones stay in the title
/// - tags: every `@word`
pub fn parse_task_input(input: &str, today: NaiveDate) -> ParsedInput {
    let mut title = input.to_string();
    let mut due_date = None;

    if let Some(m) = TOMORROW.find(&title) {
        due_date = Some(days_after(today, 1));
        title = cut(&title, m.range());
    } else if let Some(m) = NEXT_WEEK.find(&title) {
        due_date = Some(days_after(today, 7));
        title = cut(&title, m.range());
    } else if let Some(m) = NUMERIC_DATE.find(&title)
        && let Some(date) = parse_numeric_date(m.as_str(), today)
    {
        due_date = Some(date);
        title = cut(&title, m.range());
    }

    let mut priority = Priority::None;
    if let Some(caps) = PRIORITY.captures(&title) {
        let whole = caps.get(0).map_or(0..0, |m| m.range());
        priority = caps[1].parse().unwrap_or(Priority::None);
        title = cut(&title, whole);
    }

    let mut list = INBOX_LIST.to_string();
    if let Some(caps) = LIST.captures(&title) {
        let whole = caps.get(0).map_or(0..0, |m| m.range());
        list = caps[1].to_lowercase();
        title = cut(&title, whole);
    }

    let mut tags = Vec::new();
    let tokens: Vec<(String, String)> = TAG
        .captures_iter(&title)
        .map(|caps| (caps[0].to_string(), caps[1].to_lowercase()))
        .collect();
    for (token, tag) in tokens {
        tags.push(tag);
        title = title.replacen(&token, "", 1).trim().to_string();
    }

    ParsedInput {
        title: SPACE_RUN.replace_all(&title, " ").trim().to_string(),
        due_date,
        priority,
        list,
        tags,
    }
}

/// Remove `range` from `s` and trim the result
fn cut(s: &str, range: Range<usize>) -> String {
    format!("{}{}", &s[..range.start], &s[range.end..])
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 22).unwrap()
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_full_example() {
        let parsed = parse_task_input("Buy milk tomorrow at 5pm #shopping !high", today());
        assert_eq!(
            parsed,
            ParsedInput {
                title: "Buy milk at 5pm".into(),
                due_date: Some(d(2024, 7, 23)),
                priority: Priority::High,
                list: "shopping".into(),
                tags: vec![],
            }
        );
    }

    #[test]
    fn test_tags_keep_order() {
        let parsed = parse_task_input("Plan @bob @alice trip #travel", today());
        assert_eq!(parsed.tags, vec!["bob", "alice"]);
        assert_eq!(parsed.list, "travel");
        assert_eq!(parsed.title, "Plan trip");
    }

    #[test]
    fn test_plain_text_gets_defaults() {
        let parsed = parse_task_input("Water the plants", today());
        assert_eq!(parsed.title, "Water the plants");
        assert_eq!(parsed.due_date, None);
        assert_eq!(parsed.priority, Priority::None);
        assert_eq!(parsed.list, "inbox");
        assert!(parsed.tags.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let parsed = parse_task_input("", today());
        assert_eq!(parsed.title, "");
        assert_eq!(parsed.list, "inbox");
    }

    #[test]
    fn test_tomorrow_case_insensitive_whole_word() {
        let parsed = parse_task_input("Call TOMORROW", today());
        assert_eq!(parsed.due_date, Some(d(2024, 7, 23)));
        assert_eq!(parsed.title, "Call");

        let parsed = parse_task_input("Read tomorrowland review", today());
        assert_eq!(parsed.due_date, None);
        assert_eq!(parsed.title, "Read tomorrowland review");
    }

    #[test]
    fn test_next_week() {
        let parsed = parse_task_input("Dentist next week", today());
        assert_eq!(parsed.due_date, Some(d(2024, 7, 29)));
        assert_eq!(parsed.title, "Dentist");
    }

    #[test]
    fn test_tomorrow_wins_over_numeric_date() {
        let parsed = parse_task_input("tomorrow 2024-01-01", today());
        assert_eq!(parsed.due_date, Some(d(2024, 7, 23)));
        assert_eq!(parsed.title, "2024-01-01");
    }

    #[test]
    fn test_iso_date_is_stripped() {
        let parsed = parse_task_input("File taxes 2025-04-15 !medium", today());
        assert_eq!(parsed.due_date, Some(d(2025, 4, 15)));
        assert_eq!(parsed.priority, Priority::Medium);
        assert_eq!(parsed.title, "File taxes");
    }

    #[test]
    fn test_month_day_date() {
        let parsed = parse_task_input("Party 8/15", today());
        assert_eq!(parsed.due_date, Some(d(2024, 8, 15)));
        assert_eq!(parsed.title, "Party");
    }

    #[test]
    fn test_malformed_date_left_in_place() {
        let parsed = parse_task_input("Fix 13/45 bug", today());
        assert_eq!(parsed.due_date, None);
        assert_eq!(parsed.title, "Fix 13/45 bug");
    }

    #[test]
    fn test_only_first_list_consumed() {
        let parsed = parse_task_input("Review #Work notes #home", today());
        assert_eq!(parsed.list, "work");
        assert_eq!(parsed.title, "Review notes #home");
    }

    #[test]
    fn test_priority_case_insensitive_first_only() {
        let parsed = parse_task_input("Ship !LOW it !high", today());
        assert_eq!(parsed.priority, Priority::Low);
        assert_eq!(parsed.title, "Ship it !high");
    }

    #[test]
    fn test_unknown_priority_word_ignored() {
        let parsed = parse_task_input("Ship !highest", today());
        assert_eq!(parsed.priority, Priority::None);
        assert_eq!(parsed.title, "Ship !highest");
    }

    #[test]
    fn test_duplicate_tags_not_deduplicated() {
        let parsed = parse_task_input("@Home sweep @home", today());
        assert_eq!(parsed.tags, vec!["home", "home"]);
        assert_eq!(parsed.title, "sweep");
    }

    #[test]
    fn test_only_metadata_leaves_empty_title() {
        let parsed = parse_task_input("tomorrow #work !high @urgent", today());
        assert_eq!(parsed.title, "");
        assert_eq!(parsed.list, "work");
        assert_eq!(parsed.tags, vec!["urgent"]);
    }

    #[test]
    fn test_whitespace_collapsed() {
        let parsed = parse_task_input("  Pay   rent  @money   now ", today());
        assert_eq!(parsed.title, "Pay rent now");
    }
}
