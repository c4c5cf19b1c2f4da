//! Import records and the row validation rules shared by client and service.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;
use utoipa::ToSchema;

use crate::config::{
    EXPERTISE_COLUMN, ROLE_ADMIN, ROLE_EMPLOYEE, ROLE_EXPERT, ROLE_MANAGEMENT, VALID_ROLES,
};

static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Roles an imported user can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Employee,
    Expert,
    Management,
    Admin,
}

impl UserRole {
    /// Check if this role may run imports
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Employee => ROLE_EMPLOYEE,
            UserRole::Expert => ROLE_EXPERT,
            UserRole::Management => ROLE_MANAGEMENT,
            UserRole::Admin => ROLE_ADMIN,
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = FieldError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            ROLE_EMPLOYEE => Ok(UserRole::Employee),
            ROLE_EXPERT => Ok(UserRole::Expert),
            ROLE_MANAGEMENT => Ok(UserRole::Management),
            ROLE_ADMIN => Ok(UserRole::Admin),
            other => Err(FieldError::InvalidRole(other.to_string())),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Name is required")]
    MissingName,

    #[error("Email is required")]
    MissingEmail,

    #[error("Department is required")]
    MissingDepartment,

    #[error("Role is required")]
    MissingRole,

    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    #[error("Invalid role \"{0}\". Must be one of: {roles}", roles = VALID_ROLES.join(", "))]
    InvalidRole(String),
}

/// Validation failure for one CSV row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Row {row_number}: {message}")]
pub struct ValidationError {
    /// 1-based data row number; the header row is not counted
    pub row_number: usize,
    pub message: String,
}

impl ValidationError {
    pub fn new(row_number: usize, error: &FieldError) -> Self {
        Self {
            row_number,
            message: error.to_string(),
        }
    }
}

/// One parsed CSV row, keyed by header name in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: Vec<(String, String)>,
}

impl RawRow {
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    /// Raw value of a column, if the column exists.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }
}

impl FromIterator<(String, String)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Serialize for RawRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// A validated, normalized user ready for import.
///
/// Constructed only through the validation functions below, so every
/// instance satisfies the import rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ImportUserRecord {
    #[schema(example = "John Smith")]
    pub name: String,
    #[schema(example = "john.smith@company.com")]
    pub email: String,
    #[schema(example = "Marketing")]
    pub department: String,
    pub role: UserRole,
    #[serde(default)]
    #[schema(example = json!(["Social Media", "Content Creation"]))]
    pub expertise: Vec<String>,
}

impl ImportUserRecord {
    /// Validate a raw CSV row.
    ///
    /// Required fields are checked in the order name, email, department,
    /// role and the first failure is returned.
    pub fn validate_row(row: &RawRow, row_number: usize) -> Result<Self, ValidationError> {
        let expertise = row
            .get(EXPERTISE_COLUMN)
            .map(split_expertise)
            .unwrap_or_default();

        Self::from_fields(
            row.get("name"),
            row.get("email"),
            row.get("department"),
            row.get("role"),
            expertise,
        )
        .map_err(|e| ValidationError::new(row_number, &e))
    }

    /// Validate individual field values.
    pub fn from_fields(
        name: Option<&str>,
        email: Option<&str>,
        department: Option<&str>,
        role: Option<&str>,
        expertise: Vec<String>,
    ) -> Result<Self, FieldError> {
        let name = required(name).ok_or(FieldError::MissingName)?;
        let email = required(email)
            .map(str::to_lowercase)
            .ok_or(FieldError::MissingEmail)?;
        let department = required(department).ok_or(FieldError::MissingDepartment)?;
        let role = required(role).ok_or(FieldError::MissingRole)?;

        if !EMAIL_SHAPE.is_match(&email) {
            return Err(FieldError::InvalidEmail(email));
        }
        let role: UserRole = role.parse()?;

        Ok(Self {
            name: name.to_string(),
            email,
            department: department.to_string(),
            role,
            expertise: clean_expertise(expertise),
        })
    }
}

/// Loosely-typed user as received by the import service.
///
/// The service does not trust the client, so every field is optional and
/// the record is validated again before use.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ImportUserInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub role: Option<String>,
    pub expertise: Option<Vec<String>>,
}

impl ImportUserInput {
    pub fn validate(&self) -> Result<ImportUserRecord, FieldError> {
        ImportUserRecord::from_fields(
            self.name.as_deref(),
            self.email.as_deref(),
            self.department.as_deref(),
            self.role.as_deref(),
            self.expertise.clone().unwrap_or_default(),
        )
    }

    /// Email as sent, for error reporting.
    pub fn email_label(&self) -> &str {
        self.email
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .unwrap_or("Unknown")
    }
}

impl From<ImportUserRecord> for ImportUserInput {
    fn from(record: ImportUserRecord) -> Self {
        Self {
            name: Some(record.name),
            email: Some(record.email),
            department: Some(record.department),
            role: Some(record.role.to_string()),
            expertise: Some(record.expertise),
        }
    }
}

fn required(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn split_expertise(raw: &str) -> Vec<String> {
    clean_expertise(raw.split(',').map(str::to_string).collect())
}

fn clean_expertise(entries: Vec<String>) -> Vec<String> {
    entries
        .into_iter()
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn full_row() -> Vec<(&'static str, &'static str)> {
        vec![
            ("name", "John Smith"),
            ("email", "john.smith@company.com"),
            ("department", "Marketing"),
            ("role", "employee"),
            ("expertise", "Social Media, Content Creation"),
        ]
    }

    #[test]
    fn valid_row_is_normalized() {
        let raw = row(&[
            ("name", "  Sarah Chen "),
            ("email", " Sarah.Chen@Company.COM "),
            ("department", "Data Analytics "),
            ("role", " Expert"),
            ("expertise", "Excel, , Power BI,SQL ,"),
        ]);

        let record = ImportUserRecord::validate_row(&raw, 1).unwrap();

        assert_eq!(record.name, "Sarah Chen");
        assert_eq!(record.email, "sarah.chen@company.com");
        assert_eq!(record.department, "Data Analytics");
        assert_eq!(record.role, UserRole::Expert);
        assert_eq!(record.expertise, vec!["Excel", "Power BI", "SQL"]);
    }

    #[test]
    fn template_row_splits_quoted_expertise() {
        let record = ImportUserRecord::validate_row(&row(&full_row()), 1).unwrap();
        assert_eq!(
            record,
            ImportUserRecord {
                name: "John Smith".to_string(),
                email: "john.smith@company.com".to_string(),
                department: "Marketing".to_string(),
                role: UserRole::Employee,
                expertise: vec!["Social Media".to_string(), "Content Creation".to_string()],
            }
        );
    }

    #[test]
    fn missing_expertise_column_yields_empty_list() {
        let mut pairs = full_row();
        pairs.pop();
        let record = ImportUserRecord::validate_row(&row(&pairs), 1).unwrap();
        assert!(record.expertise.is_empty());
    }

    #[test]
    fn first_missing_field_wins_in_fixed_order() {
        let cases = [
            (vec![("email", "a@b.co")], "Row 4: Name is required"),
            (
                vec![("name", "A"), ("email", "   "), ("department", "")],
                "Row 4: Email is required",
            ),
            (
                vec![("name", "A"), ("email", "a@b.co"), ("role", "admin")],
                "Row 4: Department is required",
            ),
            (
                vec![("name", "A"), ("email", "a@b.co"), ("department", "Ops")],
                "Row 4: Role is required",
            ),
        ];

        for (pairs, expected) in cases {
            let err = ImportUserRecord::validate_row(&row(&pairs), 4).unwrap_err();
            assert_eq!(err.row_number, 4);
            assert_eq!(err.to_string(), expected);
        }
    }

    #[test]
    fn missing_field_reported_before_bad_email() {
        let raw = row(&[("name", "A"), ("email", "not-an-email"), ("role", "admin")]);
        let err = ImportUserRecord::validate_row(&raw, 2).unwrap_err();
        assert_eq!(err.message, "Department is required");
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for email in ["bob@@x", "bob", "bob@x", "bob smith@x.com", "@x.com"] {
            let mut pairs = full_row();
            pairs[1] = ("email", email);
            let err = ImportUserRecord::validate_row(&row(&pairs), 3).unwrap_err();
            assert!(
                err.message.starts_with("Invalid email format"),
                "{email} gave {}",
                err.message
            );
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        let mut pairs = full_row();
        pairs[3] = ("role", "Contractor");
        let err = ImportUserRecord::validate_row(&row(&pairs), 7).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Row 7: Invalid role \"contractor\". Must be one of: employee, expert, management, admin"
        );
    }

    #[test]
    fn role_parsing_ignores_case() {
        assert_eq!("MANAGEMENT".parse::<UserRole>(), Ok(UserRole::Management));
        assert_eq!(" admin ".parse::<UserRole>(), Ok(UserRole::Admin));
        assert!("owner".parse::<UserRole>().is_err());
    }

    #[test]
    fn service_input_reports_email_label() {
        let input = ImportUserInput {
            email: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(input.email_label(), "Unknown");
        assert_eq!(input.validate(), Err(FieldError::MissingName));
    }

    #[test]
    fn raw_row_serializes_in_column_order() {
        let raw = row(&[("name", "A"), ("email", "a@b.co")]);
        let json = serde_json::to_string(&raw).unwrap();
        assert_eq!(json, r#"{"name":"A","email":"a@b.co"}"#);
    }
}
