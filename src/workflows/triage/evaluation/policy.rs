use super::config::RiskConfig;
use super::rules::VitalSigns;
use serde::{Deserialize, Serialize};

/// Report sets a patient can land in. Membership is independent: one patient
/// may appear in all three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBucket {
    HighRisk,
    Fever,
    DataQuality,
}

impl RiskBucket {
    pub const fn label(self) -> &'static str {
        match self {
            RiskBucket::HighRisk => "high_risk",
            RiskBucket::Fever => "fever",
            RiskBucket::DataQuality => "data_quality",
        }
    }
}

pub(crate) fn classify(config: &RiskConfig, total_score: u8, signs: &VitalSigns) -> Vec<RiskBucket> {
    let mut buckets = Vec::new();

    if total_score >= config.high_risk_threshold {
        buckets.push(RiskBucket::HighRisk);
    }
    if signs.fever {
        buckets.push(RiskBucket::Fever);
    }
    if !signs.malformed.is_empty() {
        buckets.push(RiskBucket::DataQuality);
    }

    buckets
}
