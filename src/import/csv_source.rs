//! CSV reading for import files.
//!
//! The first row is the header; each data row becomes a [`RawRow`] keyed
//! by header name. Empty lines are skipped; a row of empty fields is kept
//! and left for validation to reject. Ragged rows are parse errors.

use csv::{ReaderBuilder, Trim};

use crate::config::{PREVIEW_ROW_LIMIT, REQUIRED_COLUMNS};
use crate::domain::RawRow;

/// Header and data rows of one import file
#[derive(Debug, Clone, Default)]
pub struct ParsedCsv {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl ParsedCsv {
    /// Required columns absent from the header, in canonical order.
    pub fn missing_columns(&self) -> Vec<String> {
        REQUIRED_COLUMNS
            .iter()
            .filter(|column| !self.headers.iter().any(|h| h == *column))
            .map(|column| column.to_string())
            .collect()
    }

    /// The first few rows, as read.
    pub fn preview(&self) -> Vec<RawRow> {
        self.rows.iter().take(PREVIEW_ROW_LIMIT).cloned().collect()
    }
}

/// Parse a whole file; the first malformed record aborts.
pub fn parse_csv(bytes: &[u8]) -> Result<ParsedCsv, csv::Error> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::Headers)
        .from_reader(bytes);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(
            headers
                .iter()
                .cloned()
                .zip(record.iter().map(str::to_string))
                .collect(),
        );
    }

    Ok(ParsedCsv { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_keyed_by_header() {
        let csv = "name,email,department,role,expertise\n\
                   John Smith,john.smith@company.com,Marketing,employee,\"Social Media, Content Creation\"\n";
        let parsed = parse_csv(csv.as_bytes()).unwrap();

        assert_eq!(parsed.headers.len(), 5);
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.rows[0].get("department"), Some("Marketing"));
        assert_eq!(
            parsed.rows[0].get("expertise"),
            Some("Social Media, Content Creation")
        );
        assert!(parsed.missing_columns().is_empty());
    }

    #[test]
    fn blank_lines_are_skipped() {
        let csv = "name,email,department,role\n\nA,a@x.io,Ops,employee\n\n\nB,b@x.io,Ops,expert\n";
        let parsed = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(parsed.rows.len(), 2);
    }

    #[test]
    fn row_of_empty_fields_is_kept() {
        let csv = "name,email,department,role\nA,a@x.io,Ops,employee\n,,,\n";
        let parsed = parse_csv(csv.as_bytes()).unwrap();

        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.rows[1].get("name"), Some(""));
    }

    #[test]
    fn missing_columns_are_listed_in_order() {
        let parsed = parse_csv(b"email,name\nx@y.io,X\n").unwrap();
        assert_eq!(parsed.missing_columns(), vec!["department", "role"]);
    }

    #[test]
    fn header_whitespace_is_ignored() {
        let parsed = parse_csv(b" name , email,department ,role\nA,a@x.io,Ops,employee\n").unwrap();
        assert!(parsed.missing_columns().is_empty());
        assert_eq!(parsed.rows[0].get("name"), Some("A"));
    }

    #[test]
    fn ragged_row_is_a_parse_error() {
        let result = parse_csv(b"name,email,department,role\nA,a@x.io\n");
        assert!(result.is_err());
    }

    #[test]
    fn preview_is_capped() {
        let mut csv = String::from("name,email,department,role\n");
        for i in 0..8 {
            csv.push_str(&format!("U{i},u{i}@x.io,Ops,employee\n"));
        }
        let parsed = parse_csv(csv.as_bytes()).unwrap();

        assert_eq!(parsed.rows.len(), 8);
        assert_eq!(parsed.preview().len(), 5);
        assert_eq!(parsed.preview()[0].get("name"), Some("U0"));
    }
}
