use crate::compare::DateBounds;
use crate::error::ReconError;
use crate::model::{GlobalRange, MergedRow};

/// Latest merged start and earliest merged end across every country.
pub fn global_range(rows: &[MergedRow]) -> Result<GlobalRange, ReconError> {
    let starts = DateBounds::of(rows.iter().map(|r| r.start_date)).ok_or(ReconError::EmptyInput)?;
    let ends = DateBounds::of(rows.iter().map(|r| r.end_date)).ok_or(ReconError::EmptyInput)?;

    let range = GlobalRange {
        start_date: starts.newest,
        end_date: ends.oldest,
    };
    if range.is_empty() {
        log::warn!(
            "global range is empty: latest start {} is after earliest end {}",
            range.start_date,
            range.end_date
        );
    }
    Ok(range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn merged(country: &str, start: &str, end: &str) -> MergedRow {
        MergedRow {
            country: country.into(),
            start_date: NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap(),
            end_date: NaiveDate::parse_from_str(end, "%Y-%m-%d").unwrap(),
        }
    }

    #[test]
    fn latest_start_earliest_end() {
        let rows = vec![
            merged("A", "2020-03-01", "2021-01-01"),
            merged("B", "2020-05-10", "2020-12-15"),
            merged("C", "2020-02-20", "2021-06-30"),
        ];
        let g = global_range(&rows).unwrap();
        assert_eq!(g.start_date.to_string(), "2020-05-10");
        assert_eq!(g.end_date.to_string(), "2020-12-15");
    }

    #[test]
    fn single_row_is_its_own_range() {
        let rows = vec![merged("A", "2020-03-01", "2021-01-01")];
        let g = global_range(&rows).unwrap();
        assert_eq!(g.start_date, rows[0].start_date);
        assert_eq!(g.end_date, rows[0].end_date);
    }

    #[test]
    fn empty_input_fails() {
        assert!(matches!(global_range(&[]), Err(ReconError::EmptyInput)));
    }

    #[test]
    fn disjoint_rows_give_empty_window() {
        let rows = vec![
            merged("A", "2020-01-01", "2020-02-01"),
            merged("B", "2020-03-01", "2020-04-01"),
        ];
        let g = global_range(&rows).unwrap();
        assert!(g.is_empty());
    }
}
