//! Date comparison over `YYYY-MM-DD` strings.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

/// Rendering used for every date this crate writes.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Nothing to compare.
    Empty,
    /// Value did not split into exactly three `-`-separated parts.
    Components { count: usize },
    /// A part was not an unsigned integer.
    NotNumeric(String),
    /// Numeric parts that do not name a calendar day.
    OutOfRange { year: u32, month: u32, day: u32 },
}

impl fmt::Display for DateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "no dates given"),
            Self::Components { count } => {
                write!(f, "expected 3 '-'-separated components, found {count}")
            }
            Self::NotNumeric(part) => write!(f, "component '{part}' is not a number"),
            Self::OutOfRange { year, month, day } => {
                write!(f, "{year}-{month}-{day} is not a calendar date")
            }
        }
    }
}

impl std::error::Error for DateError {}

/// Parse a `YYYY-MM-DD` date. Unpadded components (`2020-1-5`) are accepted.
pub fn parse_date(value: &str) -> Result<NaiveDate, DateError> {
    let parts: Vec<&str> = value.trim().split('-').collect();
    if parts.len() != 3 {
        return Err(DateError::Components { count: parts.len() });
    }

    let number = |part: &str| -> Result<u32, DateError> {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DateError::NotNumeric(part.to_string()));
        }
        part.parse::<u32>().map_err(|_| DateError::NotNumeric(part.to_string()))
    };

    let year = number(parts[0])?;
    let month = number(parts[1])?;
    let day = number(parts[2])?;

    // Four-digit years only; the output format has no room for more.
    if !(1..=9999).contains(&year) {
        return Err(DateError::OutOfRange { year, month, day });
    }

    NaiveDate::from_ymd_opt(year as i32, month, day)
        .ok_or(DateError::OutOfRange { year, month, day })
}

/// Render a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Chronological extremes of a set of dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateBounds {
    pub newest: NaiveDate,
    pub oldest: NaiveDate,
}

impl DateBounds {
    /// Extremes of any number of dates; `None` when there are none.
    pub fn of<I>(dates: I) -> Option<Self>
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let mut iter = dates.into_iter();
        let first = iter.next()?;
        Some(iter.fold(
            Self { newest: first, oldest: first },
            |acc, d| Self {
                newest: acc.newest.max(d),
                oldest: acc.oldest.min(d),
            },
        ))
    }
}

/// Parse every value and return the newest and oldest.
pub fn compare_dates<S: AsRef<str>>(values: &[S]) -> Result<DateBounds, DateError> {
    let dates = values
        .iter()
        .map(|v| parse_date(v.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    DateBounds::of(dates).ok_or(DateError::Empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn newer_and_older_of_two() {
        let b = compare_dates(&["2020-01-15", "2019-12-31"]).unwrap();
        assert_eq!(format_date(b.newest), "2020-01-15");
        assert_eq!(format_date(b.oldest), "2019-12-31");
    }

    #[test]
    fn order_does_not_matter() {
        let a = compare_dates(&["2019-12-31", "2020-01-15"]).unwrap();
        let b = compare_dates(&["2020-01-15", "2019-12-31"]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn single_date_is_both_extremes() {
        let b = compare_dates(&["2021-06-30"]).unwrap();
        assert_eq!(b.newest, d("2021-06-30"));
        assert_eq!(b.oldest, d("2021-06-30"));
    }

    #[test]
    fn empty_input_fails() {
        let empty: [&str; 0] = [];
        assert_eq!(compare_dates(&empty).unwrap_err(), DateError::Empty);
    }

    #[test]
    fn invalid_month_and_day_fail() {
        let err = compare_dates(&["2020-13-40"]).unwrap_err();
        assert_eq!(err, DateError::OutOfRange { year: 2020, month: 13, day: 40 });
    }

    #[test]
    fn feb_29_only_in_leap_years() {
        assert!(parse_date("2020-02-29").is_ok());
        assert!(matches!(parse_date("2021-02-29"), Err(DateError::OutOfRange { .. })));
    }

    #[test]
    fn wrong_component_count_fails() {
        assert_eq!(parse_date("2020-01").unwrap_err(), DateError::Components { count: 2 });
        assert_eq!(parse_date("2020/01/15").unwrap_err(), DateError::Components { count: 1 });
        assert_eq!(
            parse_date("2020-01-15-01").unwrap_err(),
            DateError::Components { count: 4 }
        );
    }

    #[test]
    fn non_numeric_component_fails() {
        assert_eq!(
            parse_date("2020-Jan-15").unwrap_err(),
            DateError::NotNumeric("Jan".into())
        );
        assert_eq!(parse_date("2020--15").unwrap_err(), DateError::NotNumeric(String::new()));
        assert_eq!(parse_date("2020-+1-15").unwrap_err(), DateError::NotNumeric("+1".into()));
    }

    #[test]
    fn unpadded_components_render_padded() {
        let date = parse_date("2020-1-5").unwrap();
        assert_eq!(format_date(date), "2020-01-05");
    }

    #[test]
    fn year_zero_rejected() {
        assert!(matches!(parse_date("0000-01-01"), Err(DateError::OutOfRange { .. })));
    }

    #[test]
    fn bounds_over_many() {
        let b = DateBounds::of([d("2020-03-01"), d("2020-05-10"), d("2020-02-20")]).unwrap();
        assert_eq!(b.newest, d("2020-05-10"));
        assert_eq!(b.oldest, d("2020-02-20"));
        assert!(DateBounds::of(Vec::new()).is_none());
    }
}
