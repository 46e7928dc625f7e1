//! Escalation policy: which hotspots warrant a cleanup task.

use crate::error::CoreError;
use crate::hotspot::Hotspot;

/// Default minimum report count for a hotspot to be considered critical.
pub const DEFAULT_ESCALATION_THRESHOLD: i64 = 5;

/// Report-count threshold for escalating a hotspot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscalationPolicy {
    threshold: i64,
}

impl EscalationPolicy {
    /// Create a policy. The threshold must be at least one.
    pub fn new(threshold: i64) -> Result<Self, CoreError> {
        if threshold < 1 {
            return Err(CoreError::Validation(format!(
                "Escalation threshold must be at least 1, got {threshold}"
            )));
        }
        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> i64 {
        self.threshold
    }

    /// A hotspot is critical when `report_count >= threshold`.
    pub fn is_critical(&self, hotspot: &Hotspot) -> bool {
        hotspot.report_count >= self.threshold
    }

    /// Filter `hotspots` down to the critical ones. Order is preserved but
    /// carries no meaning.
    pub fn critical<'a>(&self, hotspots: &'a [Hotspot]) -> Vec<&'a Hotspot> {
        hotspots.iter().filter(|h| self.is_critical(h)).collect()
    }
}

impl Default for EscalationPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_ESCALATION_THRESHOLD,
        }
    }
}
