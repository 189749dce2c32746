//! Parsing helpers for academic import payloads.
//!
//! Spreadsheets exported by the registrar's office encode lists and dates as
//! plain strings (`"2020;2021"`, `"31/12/2020"`, `"2024/1"`). These functions
//! turn them into typed values before anything reaches the database.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::Date;

// ---------------------------------------------------------------------------
// Year lists
// ---------------------------------------------------------------------------

/// Parse a `;`-separated list of years such as `"2020; 2021"`.
///
/// Blank segments are skipped. Any non-numeric segment is a validation error.
pub fn parse_year_list(raw: &str) -> Result<Vec<i32>, CoreError> {
    raw.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i32>()
                .map_err(|_| CoreError::Validation(format!("Invalid year '{s}' in '{raw}'")))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Semesters
// ---------------------------------------------------------------------------

/// Normalize `"2024/1"` to the stored form `"2024.1"`.
pub fn normalize_semester(raw: &str) -> String {
    raw.trim().replace('/', ".")
}

/// Build a semester reference from its parts: `("2024", "1")` -> `"2024.1"`.
pub fn semester_reference(year: &str, semester: &str) -> String {
    format!("{}.{}", year.trim(), semester.trim())
}

/// Split a stored semester reference into `(year, semester)`.
///
/// Returns `None` for values without a `.` separator.
pub fn split_semester(reference: &str) -> Option<(&str, &str)> {
    reference.split_once('.')
}

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

/// Parse a Brazilian `dd/mm/yyyy` date.
pub fn parse_br_date(raw: &str) -> Result<Date, CoreError> {
    Date::parse_from_str(raw.trim(), "%d/%m/%Y")
        .map_err(|_| CoreError::Validation(format!("Invalid date '{raw}', expected dd/mm/yyyy")))
}

/// [`parse_br_date`] for optional export columns; missing or blank is `None`.
pub fn parse_optional_br_date(raw: Option<&str>) -> Result<Option<Date>, CoreError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_br_date(value).map(Some),
    }
}

// ---------------------------------------------------------------------------
// Professors
// ---------------------------------------------------------------------------

/// One professor entry of a discipline offering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Professor {
    pub name: String,
    pub ufmg_id: String,
    pub responsibility: String,
}

impl Professor {
    fn empty() -> Self {
        Self {
            name: String::new(),
            ufmg_id: String::new(),
            responsibility: String::new(),
        }
    }
}

/// Parse the flattened professor column of a discipline export.
///
/// The column holds `name,id,responsibility` triples separated by commas or
/// newlines. Fewer than three parts yields a single empty professor; a
/// trailing incomplete triple is dropped.
pub fn parse_professors(raw: &str) -> Vec<Professor> {
    let flattened = raw.replace('\n', ",").replace(",,", ",");
    let parts: Vec<&str> = flattened.split(',').collect();

    if parts.len() < 3 {
        return vec![Professor::empty()];
    }

    parts
        .chunks_exact(3)
        .map(|c| Professor {
            name: c[0].trim().to_string(),
            ufmg_id: c[1].trim().to_string(),
            responsibility: c[2].trim().to_string(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
