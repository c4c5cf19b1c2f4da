//! Example import file offered to administrators.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::TEMPLATE_FILE_NAME;

/// Header plus five example rows
pub const TEMPLATE_CSV: &str = "name,email,department,role,expertise
John Smith,john.smith@company.com,Marketing,employee,\"Social Media, Content Creation\"
Sarah Chen,sarah.chen@company.com,Data Analytics,expert,\"Excel, Power BI, SQL\"
Mike Johnson,mike.johnson@company.com,Operations,management,\"Leadership, Process Optimization\"
Lisa Thompson,lisa.thompson@company.com,Finance,expert,\"Financial Analysis, Budget Planning\"
David Park,david.park@company.com,Human Resources,management,\"Career Development, Performance Reviews\"";

/// Write the template into `dir`, returning the file path.
pub fn write_template(dir: &Path) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(TEMPLATE_FILE_NAME);
    fs::write(&path, TEMPLATE_CSV)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ImportUserRecord, UserRole};
    use crate::import::parse_csv;

    #[test]
    fn template_rows_are_all_valid() {
        let parsed = parse_csv(TEMPLATE_CSV.as_bytes()).unwrap();
        assert!(parsed.missing_columns().is_empty());
        assert_eq!(parsed.rows.len(), 5);

        let records: Vec<_> = parsed
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| ImportUserRecord::validate_row(row, i + 1).unwrap())
            .collect();

        assert_eq!(records[1].role, UserRole::Expert);
        assert_eq!(records[1].expertise, vec!["Excel", "Power BI", "SQL"]);
    }

    #[test]
    fn template_is_written_under_its_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_template(dir.path()).unwrap();

        assert!(path.ends_with("user_import_template.csv"));
        assert_eq!(fs::read_to_string(path).unwrap(), TEMPLATE_CSV);
    }
}
