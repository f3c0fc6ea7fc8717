use chrono::{Days, Local, NaiveDate};

/// The local calendar day
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `date` plus `n` days, clamped at the end of the representable range
pub fn days_after(date: NaiveDate, n: u64) -> NaiveDate {
    date.checked_add_days(Days::new(n)).unwrap_or(NaiveDate::MAX)
}

/// `date` minus `n` days, clamped at the start of the representable range
pub fn days_before(date: NaiveDate, n: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(n)).unwrap_or(NaiveDate::MIN)
}

/// `YYYY-MM-DD`
pub fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `Jul 22`
pub fn short_label(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// `Today`, `Tomorrow`, `Yesterday`, otherwise `Mon, Jul 22`
pub fn relative_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".into()
    } else if date == days_after(today, 1) {
        "Tomorrow".into()
    } else if date == days_before(today, 1) {
        "Yesterday".into()
    } else {
        date.format("%a, %b %-d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_days_after_crosses_month_and_year() {
        assert_eq!(days_after(d(2024, 1, 31), 1), d(2024, 2, 1));
        assert_eq!(days_after(d(2024, 12, 28), 7), d(2025, 1, 4));
        assert_eq!(days_before(d(2024, 3, 1), 1), d(2024, 2, 29));
    }

    #[test]
    fn test_relative_labels() {
        let today = d(2024, 7, 22);
        assert_eq!(relative_label(today, today), "Today");
        assert_eq!(relative_label(d(2024, 7, 23), today), "Tomorrow");
        assert_eq!(relative_label(d(2024, 7, 21), today), "Yesterday");
        assert_eq!(relative_label(d(2024, 7, 25), today), "Thu, Jul 25");
    }

    #[test]
    fn test_short_and_iso_labels() {
        assert_eq!(short_label(d(2024, 7, 5)), "Jul 5");
        assert_eq!(iso(d(2024, 7, 5)), "2024-07-05");
    }
}
