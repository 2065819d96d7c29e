//! Freeform date parsing (day-first) and the page's display format.

use chrono::{DateTime, NaiveDate, NaiveTime};

use crate::error::DateError;

/// Display layout used on the page, e.g. `Sat 01 Feb 2020`.
pub const DISPLAY_FORMAT: &str = "%a %d %b %Y";

/// Two-digit years below this map to 20xx, the rest to 19xx (POSIX `%y` rule).
const TWO_DIGIT_YEAR_PIVOT: i32 = 69;

const TEXTUAL_FORMATS: &[&str] = &[
    "%d %b %Y",
    "%d %B %Y",
    "%d-%b-%Y",
    "%b %d %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%a %d %b %Y",
    "%a, %d %b %Y",
    "%A %d %B %Y",
    "%A, %d %B %Y",
    "%A %B %d %Y",
    "%A, %B %d, %Y",
    "%a, %b %d, %Y",
];

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"];

/// Parses a freeform date, preferring day-first for ambiguous numeric input.
///
/// `01/02/2020` is 1 February 2020. When the day-first reading is impossible but
/// the month-first one is valid (`12/25/2020`), the month-first reading wins.
/// A four-digit leading field is read as year-month-day, and eight bare digits
/// (`20200201`) as a compact year-month-day. A trailing time of day is accepted
/// and ignored.
///
/// Other accepted layouts are RFC 3339, RFC 2822 and textual months with an
/// optional weekday: `1 Feb 2020`, `Feb 1, 2020`, `Sat 01 Feb 2020`,
/// `Saturday, February 1, 2020`.
pub fn parse_date(text: &str) -> Result<NaiveDate, DateError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DateError::Empty);
    }
    parse_numeric(text)
        .or_else(|| parse_rfc(text))
        .or_else(|| parse_textual(text))
        .ok_or_else(|| DateError::Unrecognized(text.to_string()))
}

/// Formats a date for the page heading.
pub fn display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

fn parse_numeric(text: &str) -> Option<NaiveDate> {
    let (date_part, rest) = text
        .split_once(|c: char| c == 'T' || c.is_whitespace())
        .map(|(date, time)| (date, time.trim()))
        .unwrap_or((text, ""));
    if !rest.is_empty() && !is_time_of_day(rest) {
        return None;
    }

    if date_part.len() == 8 && date_part.bytes().all(|b| b.is_ascii_digit()) {
        let year = date_part[..4].parse().ok()?;
        let month = date_part[4..6].parse().ok()?;
        let day = date_part[6..].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    let fields: Vec<&str> = date_part.split(['/', '-', '.']).collect();
    if fields.len() != 3
        || fields
            .iter()
            .any(|f| f.is_empty() || !f.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }

    if fields[0].len() == 4 {
        let year = fields[0].parse().ok()?;
        let month = fields[1].parse().ok()?;
        let day = fields[2].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    let first: u32 = fields[0].parse().ok()?;
    let second: u32 = fields[1].parse().ok()?;
    let year = expand_year(fields[2])?;
    NaiveDate::from_ymd_opt(year, second, first)
        .or_else(|| NaiveDate::from_ymd_opt(year, first, second))
}

fn expand_year(field: &str) -> Option<i32> {
    let year: i32 = field.parse().ok()?;
    if field.len() <= 2 {
        Some(if year < TWO_DIGIT_YEAR_PIVOT {
            2000 + year
        } else {
            1900 + year
        })
    } else {
        Some(year)
    }
}

fn is_time_of_day(text: &str) -> bool {
    let text = text.trim_end_matches('Z');
    TIME_FORMATS
        .iter()
        .any(|fmt| NaiveTime::parse_from_str(text, fmt).is_ok())
}

fn parse_rfc(text: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(text)
        .or_else(|_| DateTime::parse_from_rfc2822(text))
        .ok()
        .map(|dt| dt.date_naive())
}

fn parse_textual(text: &str) -> Option<NaiveDate> {
    TEXTUAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_first_numeric() {
        assert_eq!(parse_date("01/02/2020").unwrap(), ymd(2020, 2, 1));
        assert_eq!(display_date(parse_date("01/02/2020").unwrap()), "Sat 01 Feb 2020");
        assert_eq!(parse_date("1-2-2020").unwrap(), ymd(2020, 2, 1));
        assert_eq!(parse_date("01.02.2020").unwrap(), ymd(2020, 2, 1));
    }

    #[test]
    fn month_first_when_day_first_impossible() {
        assert_eq!(parse_date("12/25/2020").unwrap(), ymd(2020, 12, 25));
        assert_eq!(display_date(ymd(2020, 12, 25)), "Fri 25 Dec 2020");
    }

    #[test]
    fn iso_and_year_first() {
        assert_eq!(parse_date("2020-02-01").unwrap(), ymd(2020, 2, 1));
        assert_eq!(parse_date("2020/2/1").unwrap(), ymd(2020, 2, 1));
        assert_eq!(parse_date("2020-02-01T10:00:00").unwrap(), ymd(2020, 2, 1));
        assert_eq!(parse_date("2020-02-01T10:00:00+02:00").unwrap(), ymd(2020, 2, 1));
        assert_eq!(parse_date("01/02/2020 18:30").unwrap(), ymd(2020, 2, 1));
    }

    #[test]
    fn two_digit_years_pivot() {
        assert_eq!(parse_date("01/02/20").unwrap(), ymd(2020, 2, 1));
        assert_eq!(parse_date("31/12/99").unwrap(), ymd(1999, 12, 31));
        assert_eq!(display_date(ymd(1999, 12, 31)), "Fri 31 Dec 1999");
    }

    #[test]
    fn textual_dates() {
        assert_eq!(parse_date("1 Feb 2020").unwrap(), ymd(2020, 2, 1));
        assert_eq!(parse_date("1 February 2020").unwrap(), ymd(2020, 2, 1));
        assert_eq!(parse_date("February 1, 2020").unwrap(), ymd(2020, 2, 1));
        assert_eq!(parse_date("Feb 1 2020").unwrap(), ymd(2020, 2, 1));
        assert_eq!(parse_date("Sat 01 Feb 2020").unwrap(), ymd(2020, 2, 1));
        assert_eq!(parse_date("  12 Sep 2019 ").unwrap(), ymd(2019, 9, 12));
        assert_eq!(parse_date("Saturday, February 1, 2020").unwrap(), ymd(2020, 2, 1));
        assert_eq!(parse_date("Saturday February 1 2020").unwrap(), ymd(2020, 2, 1));
    }

    #[test]
    fn compact_year_month_day() {
        assert_eq!(parse_date("20200201").unwrap(), ymd(2020, 2, 1));
        assert_eq!(parse_date("20200201T10:00").unwrap(), ymd(2020, 2, 1));
        assert!(matches!(parse_date("20201301"), Err(DateError::Unrecognized(_))));
        assert!(matches!(parse_date("2020021"), Err(DateError::Unrecognized(_))));
    }

    #[test]
    fn display_round_trips_through_parse() {
        let d = ymd(2019, 9, 12);
        assert_eq!(parse_date(&display_date(d)).unwrap(), d);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_date(""), Err(DateError::Empty));
        assert_eq!(parse_date("   "), Err(DateError::Empty));
        assert!(matches!(parse_date("yesterday"), Err(DateError::Unrecognized(_))));
        assert!(matches!(parse_date("30/02/2020"), Err(DateError::Unrecognized(_))));
        assert!(matches!(parse_date("01/02"), Err(DateError::Unrecognized(_))));
        assert!(matches!(parse_date("01/02/2020 later"), Err(DateError::Unrecognized(_))));
    }
}
