use chrono::{Datelike, NaiveDate};

/// Parse a numeric date token found in free text: `YYYY-MM-DD`, `M/D`,
/// `M/D/YY` or `M/D/YYYY`.
///
/// `M/D` falls in the year of `today`; two-digit years are 20YY.
/// Returns `None` for anything that isn't a real calendar date.
pub fn parse_numeric_date(token: &str, today: NaiveDate) -> Option<NaiveDate> {
    if token.contains('-') {
        return NaiveDate::parse_from_str(token, "%Y-%m-%d").ok();
    }

    let mut parts = token.split('/');
    let month: u32 = parts.next()?.parse().ok()?;
    let day: u32 = parts.next()?.parse().ok()?;
    let year = match parts.next() {
        None => today.year(),
        Some(y) if y.len() == 2 => 2000 + y.parse::<i32>().ok()?,
        Some(y) => y.parse::<i32>().ok()?,
    };
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_iso_date() {
        let today = d(2024, 7, 22);
        assert_eq!(parse_numeric_date("2024-08-01", today), Some(d(2024, 8, 1)));
        assert_eq!(parse_numeric_date("2024-13-01", today), None);
        assert_eq!(parse_numeric_date("2023-02-29", today), None);
    }

    #[test]
    fn test_month_day_uses_current_year() {
        let today = d(2024, 7, 22);
        assert_eq!(parse_numeric_date("8/15", today), Some(d(2024, 8, 15)));
        assert_eq!(parse_numeric_date("12/1", today), Some(d(2024, 12, 1)));
    }

    #[test]
    fn test_month_day_year() {
        let today = d(2024, 7, 22);
        assert_eq!(parse_numeric_date("1/5/25", today), Some(d(2025, 1, 5)));
        assert_eq!(parse_numeric_date("1/5/2026", today), Some(d(2026, 1, 5)));
    }

    #[test]
    fn test_impossible_dates() {
        let today = d(2024, 7, 22);
        assert_eq!(parse_numeric_date("13/45", today), None);
        assert_eq!(parse_numeric_date("2/30", today), None);
        assert_eq!(parse_numeric_date("0/1", today), None);
    }
}
