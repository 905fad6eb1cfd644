//! Country-name extraction from quote-per-field CSV text.
//!
//! Line-based rather than a full CSV parse: every data line must be a
//! sequence of double-quoted fields, so a line number always maps to one
//! record. Doubled quotes inside a field are unescaped the same way the
//! row loader's CSV reader does.

use crate::error::ReconError;
use crate::model::CountrySet;

/// Collect the distinct country names of one source, read from the header
/// column named `column`.
///
/// The first line is the header. Trailing blank lines are ignored; any other
/// line that is not a run of double-quoted fields is a
/// [`ReconError::MalformedRow`].
pub fn extract_country_set(
    source: &str,
    data: &str,
    column: &str,
) -> Result<CountrySet, ReconError> {
    let data = data.strip_prefix('\u{feff}').unwrap_or(data).trim_end();
    let mut countries = CountrySet::new();

    let mut lines = data.lines();
    let Some(header) = lines.next() else {
        return Ok(countries);
    };
    let country_idx = header_index(source, header, column)?;

    for (idx, raw) in lines.enumerate() {
        let line = idx + 2;
        let text = raw.strip_suffix('\r').unwrap_or(raw);

        let malformed = |reason: String| ReconError::MalformedRow {
            source: source.into(),
            line,
            reason,
        };

        let fields = split_quoted_fields(text)
            .ok_or_else(|| malformed("expected a line of double-quoted fields".into()))?;
        let country = fields
            .into_iter()
            .nth(country_idx)
            .ok_or_else(|| malformed(format!("no '{column}' field")))?;
        if country.is_empty() {
            return Err(malformed("empty country name".into()));
        }

        countries.insert(country);
    }

    log::debug!("{source}: {} distinct countries", countries.len());
    Ok(countries)
}

fn header_index(source: &str, header: &str, column: &str) -> Result<usize, ReconError> {
    let header = header.strip_suffix('\r').unwrap_or(header);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(header.as_bytes());

    let record = match reader.records().next() {
        Some(Ok(record)) => record,
        Some(Err(e)) => {
            return Err(ReconError::MalformedRow {
                source: source.into(),
                line: 1,
                reason: e.to_string(),
            })
        }
        None => csv::StringRecord::new(),
    };

    record
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| ReconError::MissingColumn {
            source: source.into(),
            column: column.into(),
        })
}

/// Split `"a","b ""c""",...` into unescaped fields. `None` if the line is not
/// made up entirely of double-quoted fields separated by commas.
fn split_quoted_fields(line: &str) -> Option<Vec<String>> {
    let mut fields = Vec::new();
    let mut chars = line.chars().peekable();

    loop {
        if chars.next()? != '"' {
            return None;
        }

        let mut field = String::new();
        loop {
            match chars.next()? {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => break,
                c => field.push(c),
            }
        }
        fields.push(field);

        match chars.next() {
            None => return Some(fields),
            Some(',') => {}
            Some(_) => return None,
        }
    }
}

/// Countries present in both sets, in sorted order.
pub fn intersect(a: &CountrySet, b: &CountrySet) -> CountrySet {
    a.intersection(b).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWID: &str = "\
\"Country\",\"Start Date\",\"End Date\"
\"Chile\",\"2020-03-03\",\"2021-05-01\"
\"France\",\"2020-01-24\",\"2021-06-30\"
\"Chile\",\"2020-03-04\",\"2021-05-02\"
";

    #[test]
    fn extracts_first_field_of_each_row() {
        let set = extract_country_set("owid", OWID, "Country").unwrap();
        let names: Vec<&str> = set.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["Chile", "France"]);
    }

    #[test]
    fn header_only_yields_empty_set() {
        let header = "\"Country\",\"Start Date\",\"End Date\"\n";
        assert!(extract_country_set("owid", header, "Country").unwrap().is_empty());
        assert!(extract_country_set("owid", "", "Country").unwrap().is_empty());
    }

    #[test]
    fn crlf_and_trailing_blank_lines_tolerated() {
        let data = "\"Country\",\"Start Date\"\r\n\"Peru\",\"2020-03-06\"\r\n\r\n\n";
        let set = extract_country_set("b", data, "Country").unwrap();
        assert!(set.contains("Peru"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn country_with_comma_kept_whole() {
        let data = "\"Country\",\"Start Date\"\n\"Korea, South\",\"2020-01-22\"\n";
        let set = extract_country_set("b", data, "Country").unwrap();
        assert!(set.contains("Korea, South"));
    }

    #[test]
    fn doubled_quotes_are_unescaped() {
        let data = "\
\"Country\",\"Start Date\"
\"Cote d\"\"Ivoire\",\"2020-03-11\"
\"\"\"\",\"\"
";
        let set = extract_country_set("a", data, "Country").unwrap();
        assert!(set.contains("Cote d\"Ivoire"));
        assert!(set.contains("\""));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn separator_inside_quotes_stays_in_field() {
        let data = "\"Country\",\"Start Date\"\n\"A\"\",\"\"B\",\"2020-03-11\"\n";
        let set = extract_country_set("a", data, "Country").unwrap();
        assert!(set.contains("A\",\"B"));
    }

    #[test]
    fn country_read_from_configured_column() {
        let data = "\"Code\",\"Location\",\"Start Date\"\n\"CL\",\"Chile\",\"2020-03-03\"\n";
        let set = extract_country_set("a", data, "Location").unwrap();
        let names: Vec<&str> = set.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["Chile"]);
    }

    #[test]
    fn unquoted_header_is_accepted() {
        let data = "Code,Location\n\"CL\",\"Chile\"\n";
        let set = extract_country_set("a", data, "Location").unwrap();
        assert!(set.contains("Chile"));
    }

    #[test]
    fn missing_country_column_is_reported() {
        let data = "\"Country\",\"Start Date\"\n\"Peru\",\"2020-03-06\"\n";
        let err = extract_country_set("datahub", data, "Location").unwrap_err();
        match err {
            ReconError::MissingColumn { source, column } => {
                assert_eq!(source, "datahub");
                assert_eq!(column, "Location");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn short_row_is_malformed() {
        let data = "\"Code\",\"Location\"\n\"CL\"\n";
        let err = extract_country_set("a", data, "Location").unwrap_err();
        assert!(matches!(err, ReconError::MalformedRow { line: 2, .. }));
    }

    #[test]
    fn stray_text_after_closing_quote_is_malformed() {
        let data = "\"Country\"\n\"Peru\"x,\"2020\"\n";
        let err = extract_country_set("a", data, "Country").unwrap_err();
        assert!(matches!(err, ReconError::MalformedRow { line: 2, .. }));
    }

    #[test]
    fn unquoted_line_is_malformed_with_line_number() {
        let data = "\"Country\",\"Start Date\"\n\"Peru\",\"2020-03-06\"\nChile,2020-03-03\n";
        let err = extract_country_set("datahub", data, "Country").unwrap_err();
        match err {
            ReconError::MalformedRow { source, line, .. } => {
                assert_eq!(source, "datahub");
                assert_eq!(line, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn interior_blank_line_is_malformed() {
        let data = "\"Country\"\n\"Peru\"\n\n\"Chile\"\n";
        let err = extract_country_set("a", data, "Country").unwrap_err();
        assert!(matches!(err, ReconError::MalformedRow { line: 3, .. }));
    }

    #[test]
    fn empty_country_is_malformed() {
        let data = "\"Country\",\"Start Date\"\n\"\",\"2020-03-06\"\n";
        assert!(extract_country_set("a", data, "Country").is_err());
    }

    #[test]
    fn intersection_is_sorted_and_common_only() {
        let a: CountrySet = ["Peru", "Chile", "Togo"].iter().map(|s| s.to_string()).collect();
        let b: CountrySet = ["Togo", "Chile", "Mali"].iter().map(|s| s.to_string()).collect();
        let common: Vec<String> = intersect(&a, &b).into_iter().collect();
        assert_eq!(common, vec!["Chile".to_string(), "Togo".to_string()]);
        assert!(intersect(&a, &CountrySet::new()).is_empty());
    }
}
