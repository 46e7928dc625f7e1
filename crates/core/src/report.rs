//! Trash report vocabulary and submission validation.
//!
//! A report is an immutable geotagged observation. The hotspot pipeline only
//! needs a narrow projection of it ([`ReportPoint`]); the full row lives in
//! the `db` crate.

use std::fmt;

use serde::Serialize;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Lowest accepted severity.
pub const MIN_SEVERITY: i16 = 1;

/// Highest accepted severity.
pub const MAX_SEVERITY: i16 = 5;

/// Maximum length of a category label.
pub const MAX_CATEGORY_LEN: usize = 64;

/// Label used for reports that carry no category.
pub const UNKNOWN_CATEGORY: &str = "unknown";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The fields of a report the hotspot pipeline works with.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportPoint {
    pub id: DbId,
    pub latitude: f64,
    pub longitude: f64,
    pub category: Option<String>,
    pub severity: i16,
    pub captured_at: Timestamp,
}

/// Category label of a report, with an explicit variant for "no label".
///
/// Blank labels collapse into [`Category::Unknown`] so grouping never has to
/// deal with `None` or empty strings. Serializes as a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum Category {
    Labeled(String),
    Unknown,
}

impl Category {
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(str::trim) {
            Some(l) if !l.is_empty() => Category::Labeled(l.to_string()),
            _ => Category::Unknown,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::Labeled(l) => l,
            Category::Unknown => UNKNOWN_CATEGORY,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        match value {
            Category::Labeled(l) => l,
            Category::Unknown => UNKNOWN_CATEGORY.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a latitude/longitude pair in decimal degrees.
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), CoreError> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(CoreError::Validation(format!(
            "latitude must be between -90 and 90, got {latitude}"
        )));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(CoreError::Validation(format!(
            "longitude must be between -180 and 180, got {longitude}"
        )));
    }
    Ok(())
}

/// Validate a severity against `MIN_SEVERITY..=MAX_SEVERITY`.
pub fn validate_severity(severity: i16) -> Result<(), CoreError> {
    if !(MIN_SEVERITY..=MAX_SEVERITY).contains(&severity) {
        return Err(CoreError::Validation(format!(
            "severity must be between {MIN_SEVERITY} and {MAX_SEVERITY}, got {severity}"
        )));
    }
    Ok(())
}

/// Validate an optional category label. Absent or blank labels are fine.
pub fn validate_category(category: Option<&str>) -> Result<(), CoreError> {
    if let Some(label) = category {
        if label.chars().count() > MAX_CATEGORY_LEN {
            return Err(CoreError::Validation(format!(
                "category must not exceed {MAX_CATEGORY_LEN} characters"
            )));
        }
    }
    Ok(())
}

/// Validate all user-supplied fields of a new report.
pub fn validate_new_report(
    latitude: f64,
    longitude: f64,
    severity: i16,
    category: Option<&str>,
) -> Result<(), CoreError> {
    validate_coordinates(latitude, longitude)?;
    validate_severity(severity)?;
    validate_category(category)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
