//! Free-text travel-date resolution.
//!
//! Parses relative and absolute date expressions against an anchor date
//! ("current date" from the caller's point of view). Ambiguous years resolve
//! to the least future occurrence: a month/day that has already passed the
//! anchor rolls forward to the next year.

use chrono::{Datelike, Duration, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

static WEEKDAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(next|this)\s+(monday|tuesday|wednesday|thursday|friday|saturday|sunday)")
        .expect("Invalid weekday regex")
});

static MONTH_DAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|jun(?:e)?|jul(?:y)?|aug(?:ust)?|sep(?:tember)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\s+(\d+)(?:st|nd|rd|th)?",
    )
    .expect("Invalid month-day regex")
});

static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(20\d{2})\b").expect("Invalid year regex"));

static NUMERIC_MD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}[/-]\d{1,2}$").expect("Invalid M/D regex"));

static NUMERIC_YMD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}[/-]\d{1,2}[/-]\d{1,2}$").expect("Invalid Y-M-D regex"));

static MONTH_TOKENS: &[&str] = &[
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

static WEEKDAY_TOKENS: &[&str] =
    &["monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday"];

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DateParseError {
    #[error("Could not understand '{0}'. Please provide a date in YYYY-MM-DD format or a clear description like 'May 1st' or 'next Friday'.")]
    Unrecognized(String),

    #[error("Invalid month ({0}). Month must be between 1 and 12.")]
    InvalidMonth(u32),

    #[error("Invalid day ({day}) for month {month}. Day must be between 1 and {last_day}.")]
    InvalidDay { day: u32, month: u32, last_day: u32 },

    #[error("Invalid date: {month_name} {day}, {year}. Please check if this date exists.")]
    NonexistentDate { month_name: String, day: u32, year: i32 },
}

/// A resolved calendar date annotated with its distance from the anchor.
///
/// A negative offset means the text named a date in the past; callers frame
/// that as a warning rather than suppressing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDate {
    pub date: NaiveDate,
    pub offset_days: i64,
}

impl ResolvedDate {
    fn new(date: NaiveDate, anchor: NaiveDate) -> Self {
        Self { date, offset_days: (date - anchor).num_days() }
    }

    /// Human framing of the resolved date relative to its anchor.
    pub fn describe(&self) -> String {
        let formatted = self.date.format("%Y-%m-%d");
        match self.offset_days {
            d if d < 0 => {
                format!("Warning: The date {} is in the past ({} days ago).", formatted, -d)
            }
            0 => format!("Date parsed as today: {}", formatted),
            1 => format!("Date parsed as tomorrow: {}", formatted),
            d if d < 7 => format!(
                "Date parsed as {}: {} ({} days from now)",
                self.date.format("%A"),
                formatted,
                d
            ),
            d if d < 30 => {
                format!("Date parsed as {} ({} days / {} weeks from now)", formatted, d, d / 7)
            }
            d if d < 365 => {
                format!("Date parsed as {} (about {} months from now)", formatted, d / 30)
            }
            d => format!("Date parsed as {} (about {} years from now)", formatted, d / 365),
        }
    }
}

/// Resolve a free-text date expression against the anchor date.
pub fn resolve_date(text: &str, anchor: NaiveDate) -> Result<ResolvedDate, DateParseError> {
    let text = text.trim().to_lowercase();

    // Literal keywords. "next month" is a fixed 30-day offset, a documented
    // approximation rather than calendar-month arithmetic.
    let keyword_offset = match text.as_str() {
        "today" | "now" => Some(0),
        "tomorrow" => Some(1),
        "day after tomorrow" => Some(2),
        "next week" => Some(7),
        "next month" => Some(30),
        _ => None,
    };
    if let Some(days) = keyword_offset {
        return Ok(ResolvedDate::new(anchor + Duration::days(days), anchor));
    }

    // "next Friday" / "this monday".
    if text.contains("next") || text.contains("this") {
        let caps = WEEKDAY_RE.captures(&text).ok_or_else(|| DateParseError::Unrecognized(text.clone()))?;
        let qualifier = &caps[1];
        let target = WEEKDAY_TOKENS
            .iter()
            .position(|w| *w == &caps[2])
            .unwrap_or_default() as i64;

        let mut days_ahead = target - anchor.weekday().num_days_from_monday() as i64;
        if days_ahead <= 0 || qualifier == "next" {
            days_ahead += 7;
        }
        return Ok(ResolvedDate::new(anchor + Duration::days(days_ahead), anchor));
    }

    // "May 1st", "january 15 2026".
    if MONTH_TOKENS.iter().any(|m| text.contains(m)) {
        let caps = MONTH_DAY_RE.captures(&text).ok_or_else(|| DateParseError::Unrecognized(text.clone()))?;
        let month_name = caps[1].to_string();
        let month = MONTH_TOKENS
            .iter()
            .position(|m| *m == &month_name[..3])
            .unwrap_or_default() as u32
            + 1;
        let day: u32 = caps[2].parse().map_err(|_| DateParseError::Unrecognized(text.clone()))?;

        let year = match YEAR_RE.captures(&text) {
            Some(y) => y[1].parse::<i32>().unwrap_or(anchor.year()),
            None => {
                if month < anchor.month() || (month == anchor.month() && day < anchor.day()) {
                    anchor.year() + 1
                } else {
                    anchor.year()
                }
            }
        };

        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or(DateParseError::NonexistentDate { month_name, day, year })?;
        return Ok(ResolvedDate::new(date, anchor));
    }

    // "M/D" or "M-D": day validity is checked against the anchor year's
    // calendar, before any forward-year roll.
    if NUMERIC_MD_RE.is_match(&text) {
        let separator = if text.contains('/') { '/' } else { '-' };
        let mut parts = text.split(separator);
        let month: u32 = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
        let day: u32 = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);

        if !(1..=12).contains(&month) {
            return Err(DateParseError::InvalidMonth(month));
        }
        let last_day = days_in_month(anchor.year(), month);
        if day < 1 || day > last_day {
            return Err(DateParseError::InvalidDay { day, month, last_day });
        }

        let year = if month < anchor.month() || (month == anchor.month() && day < anchor.day()) {
            anchor.year() + 1
        } else {
            anchor.year()
        };
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or(DateParseError::InvalidDay { day, month, last_day })?;
        return Ok(ResolvedDate::new(date, anchor));
    }

    // "YYYY/MM/DD" or "YYYY-MM-DD": fully explicit, no year inference.
    if NUMERIC_YMD_RE.is_match(&text) {
        let separator = if text.contains('-') { '-' } else { '/' };
        let mut parts = text.split(separator);
        let year: i32 = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
        let month: u32 = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
        let day: u32 = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);

        if !(1..=12).contains(&month) {
            return Err(DateParseError::InvalidMonth(month));
        }
        let last_day = days_in_month(year, month);
        if day < 1 || day > last_day {
            return Err(DateParseError::InvalidDay { day, month, last_day });
        }
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or(DateParseError::InvalidDay { day, month, last_day })?;
        return Ok(ResolvedDate::new(date, anchor));
    }

    Err(DateParseError::Unrecognized(text))
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor() -> NaiveDate {
        // A Friday.
        NaiveDate::from_ymd_opt(2025, 5, 16).unwrap()
    }

    #[test]
    fn test_literal_keywords() {
        assert_eq!(resolve_date("today", anchor()).unwrap().offset_days, 0);
        assert_eq!(resolve_date("now", anchor()).unwrap().offset_days, 0);
        assert_eq!(resolve_date("Tomorrow", anchor()).unwrap().offset_days, 1);
        assert_eq!(resolve_date("day after tomorrow", anchor()).unwrap().offset_days, 2);
        assert_eq!(resolve_date("next week", anchor()).unwrap().offset_days, 7);
    }

    #[test]
    fn test_next_month_is_fixed_thirty_days() {
        let resolved = resolve_date("next month", anchor()).unwrap();
        assert_eq!(resolved.offset_days, 30);
        assert_eq!(resolved.date, anchor() + Duration::days(30));
    }

    #[test]
    fn test_next_friday_from_a_friday() {
        // Anchor is a Friday: delta is zero, so both "this" and "next" land
        // exactly one week out.
        let resolved = resolve_date("next friday", anchor()).unwrap();
        assert_eq!(resolved.offset_days, 7);
        assert_eq!(resolved.date.weekday(), chrono::Weekday::Fri);

        let again = resolve_date("next friday", anchor()).unwrap();
        assert_eq!(resolved, again);
    }

    #[test]
    fn test_this_monday_rolls_forward() {
        // Monday already passed this week, so "this monday" means the next one.
        let resolved = resolve_date("this monday", anchor()).unwrap();
        assert_eq!(resolved.date.weekday(), chrono::Weekday::Mon);
        assert_eq!(resolved.offset_days, 3);
    }

    #[test]
    fn test_this_sunday_stays_in_week() {
        let resolved = resolve_date("this sunday", anchor()).unwrap();
        assert_eq!(resolved.offset_days, 2);
    }

    #[test]
    fn test_next_qualifier_always_adds_a_week() {
        // Sunday is still ahead of a Friday anchor, but "next" skips it.
        let resolved = resolve_date("next sunday", anchor()).unwrap();
        assert_eq!(resolved.offset_days, 9);
    }

    #[test]
    fn test_next_without_weekday_fails() {
        assert!(matches!(
            resolve_date("next thing", anchor()),
            Err(DateParseError::Unrecognized(_))
        ));
    }

    #[test]
    fn test_month_name_forms() {
        let resolved = resolve_date("May 20th", anchor()).unwrap();
        assert_eq!(resolved.date, NaiveDate::from_ymd_opt(2025, 5, 20).unwrap());

        let resolved = resolve_date("june 1", anchor()).unwrap();
        assert_eq!(resolved.date, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());

        let resolved = resolve_date("January 15", anchor()).unwrap();
        assert_eq!(resolved.date, NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
    }

    #[test]
    fn test_month_name_with_explicit_year() {
        let resolved = resolve_date("March 3rd 2027", anchor()).unwrap();
        assert_eq!(resolved.date, NaiveDate::from_ymd_opt(2027, 3, 3).unwrap());
    }

    #[test]
    fn test_month_name_passed_rolls_to_next_year() {
        // May 1 is before the May 16 anchor.
        let resolved = resolve_date("may 1st", anchor()).unwrap();
        assert_eq!(resolved.date, NaiveDate::from_ymd_opt(2026, 5, 1).unwrap());
    }

    #[test]
    fn test_month_name_nonexistent_day() {
        assert!(matches!(
            resolve_date("February 30", anchor()),
            Err(DateParseError::NonexistentDate { day: 30, .. })
        ));
    }

    #[test]
    fn test_numeric_md_future_keeps_year() {
        let resolved = resolve_date("6/1", anchor()).unwrap();
        assert_eq!(resolved.date, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
    }

    #[test]
    fn test_numeric_md_passed_rolls_to_next_year() {
        let resolved = resolve_date("3/10", anchor()).unwrap();
        assert_eq!(resolved.date, NaiveDate::from_ymd_opt(2026, 3, 10).unwrap());
    }

    #[test]
    fn test_numeric_md_with_dash() {
        let resolved = resolve_date("12-25", anchor()).unwrap();
        assert_eq!(resolved.date, NaiveDate::from_ymd_opt(2025, 12, 25).unwrap());
    }

    #[test]
    fn test_numeric_md_invalid_month() {
        assert_eq!(resolve_date("13/5", anchor()), Err(DateParseError::InvalidMonth(13)));
    }

    #[test]
    fn test_numeric_md_invalid_day() {
        assert_eq!(
            resolve_date("4/31", anchor()),
            Err(DateParseError::InvalidDay { day: 31, month: 4, last_day: 30 })
        );
    }

    #[test]
    fn test_full_date_forms() {
        let resolved = resolve_date("2025-12-25", anchor()).unwrap();
        assert_eq!(resolved.date, NaiveDate::from_ymd_opt(2025, 12, 25).unwrap());

        let resolved = resolve_date("2026/01/02", anchor()).unwrap();
        assert_eq!(resolved.date, NaiveDate::from_ymd_opt(2026, 1, 2).unwrap());
    }

    #[test]
    fn test_full_date_no_year_inference() {
        // An explicit year in the past is reported, not silently bumped.
        let resolved = resolve_date("2024-06-01", anchor()).unwrap();
        assert!(resolved.offset_days < 0);
        assert!(resolved.describe().starts_with("Warning: The date 2024-06-01 is in the past"));
    }

    #[test]
    fn test_full_date_invalid_day_names_month_length() {
        let err = resolve_date("2025-02-30", anchor()).unwrap_err();
        assert_eq!(err, DateParseError::InvalidDay { day: 30, month: 2, last_day: 28 });
    }

    #[test]
    fn test_leap_year_day_accepted() {
        let resolved = resolve_date("2028-02-29", anchor()).unwrap();
        assert_eq!(resolved.date, NaiveDate::from_ymd_opt(2028, 2, 29).unwrap());
    }

    #[test]
    fn test_unrecognized_text() {
        assert!(matches!(
            resolve_date("whenever works", anchor()),
            Err(DateParseError::Unrecognized(_))
        ));
    }

    #[test]
    fn test_describe_buckets() {
        assert_eq!(
            resolve_date("today", anchor()).unwrap().describe(),
            "Date parsed as today: 2025-05-16"
        );
        assert_eq!(
            resolve_date("tomorrow", anchor()).unwrap().describe(),
            "Date parsed as tomorrow: 2025-05-17"
        );
        assert_eq!(
            resolve_date("this sunday", anchor()).unwrap().describe(),
            "Date parsed as Sunday: 2025-05-18 (2 days from now)"
        );
        assert_eq!(
            resolve_date("next week", anchor()).unwrap().describe(),
            "Date parsed as 2025-05-23 (7 days / 1 weeks from now)"
        );
        assert_eq!(
            resolve_date("2025-08-16", anchor()).unwrap().describe(),
            "Date parsed as 2025-08-16 (about 3 months from now)"
        );
        assert_eq!(
            resolve_date("2027-05-16", anchor()).unwrap().describe(),
            "Date parsed as 2027-05-16 (about 2 years from now)"
        );
    }
}
