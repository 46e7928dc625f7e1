//! Cleanup task completion rules: material breakdown defaults and validation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Destination recorded when the caller does not name one.
pub const DEFAULT_DESTINATION_TYPE: &str = "RECYCLING_CENTER";

/// Maximum length of a destination classification.
const MAX_DESTINATION_LEN: usize = 64;

/// Material breakdown supplied when a task is completed.
///
/// Every field is optional; missing weights count as zero.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MaterialBreakdown {
    pub plastic_weight: Option<f64>,
    pub paper_weight: Option<f64>,
    pub glass_weight: Option<f64>,
    pub metal_weight: Option<f64>,
    pub organic_weight: Option<f64>,
    pub other_weight: Option<f64>,
    pub destination_type: Option<String>,
}

/// A [`MaterialBreakdown`] with defaults applied, ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedMaterials {
    pub plastic_weight: f64,
    pub paper_weight: f64,
    pub glass_weight: f64,
    pub metal_weight: f64,
    pub organic_weight: f64,
    pub other_weight: f64,
    pub destination_type: String,
}

impl ResolvedMaterials {
    pub fn total_weight(&self) -> f64 {
        self.plastic_weight
            + self.paper_weight
            + self.glass_weight
            + self.metal_weight
            + self.organic_weight
            + self.other_weight
    }
}

impl MaterialBreakdown {
    /// Validate the supplied values and fill in defaults.
    pub fn resolve(&self) -> Result<ResolvedMaterials, CoreError> {
        let weight = |value: Option<f64>, name: &str| -> Result<f64, CoreError> {
            let w = value.unwrap_or(0.0);
            if !w.is_finite() || w < 0.0 {
                return Err(CoreError::Validation(format!(
                    "{name} must be a non-negative number, got {w}"
                )));
            }
            Ok(w)
        };

        let destination_type = match self.destination_type.as_deref().map(str::trim) {
            Some(d) if !d.is_empty() => {
                if d.len() > MAX_DESTINATION_LEN {
                    return Err(CoreError::Validation(format!(
                        "destination_type must not exceed {MAX_DESTINATION_LEN} characters"
                    )));
                }
                d.to_string()
            }
            _ => DEFAULT_DESTINATION_TYPE.to_string(),
        };

        Ok(ResolvedMaterials {
            plastic_weight: weight(self.plastic_weight, "plastic_weight")?,
            paper_weight: weight(self.paper_weight, "paper_weight")?,
            glass_weight: weight(self.glass_weight, "glass_weight")?,
            metal_weight: weight(self.metal_weight, "metal_weight")?,
            organic_weight: weight(self.organic_weight, "organic_weight")?,
            other_weight: weight(self.other_weight, "other_weight")?,
            destination_type,
        })
    }
}

/// Human-readable outcome message for a status update.
pub fn status_message(status_name: &str) -> String {
    format!("Cleanup task status updated to {status_name}")
}
