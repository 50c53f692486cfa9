use serde::{Deserialize, Serialize};

/// Policy knobs for the triage rubric. Band edges for the individual rules
/// live next to the rules themselves; only the thresholds clinical staff
/// actually tune are configurable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Total score at which a patient joins the high-risk set.
    pub high_risk_threshold: u8,
    /// Temperature at or above which the fever flag is raised.
    pub fever_threshold: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            high_risk_threshold: 4,
            fever_threshold: 99.6,
        }
    }
}
