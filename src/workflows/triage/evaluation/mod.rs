mod config;
mod policy;
mod rules;

pub use config::RiskConfig;
pub use policy::RiskBucket;

use super::domain::{PatientId, PatientRecord, SignalKind};
use policy::classify;
use serde::{Deserialize, Serialize};

/// Stateless engine applying the triage rubric to one patient at a time.
/// Evaluating the same record twice always produces the same assessment;
/// no running state survives between calls.
pub struct RiskEngine {
    config: RiskConfig,
}

impl RiskEngine {
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    pub fn assess(&self, record: &PatientRecord) -> RiskAssessment {
        let (contributions, total_score, signs) = rules::score_vitals(record, &self.config);

        let buckets = classify(&self.config, total_score, &signs);

        RiskAssessment {
            patient_id: record.patient_id.clone(),
            total_score,
            contributions,
            buckets,
        }
    }
}

impl Default for RiskEngine {
    fn default() -> Self {
        Self::new(RiskConfig::default())
    }
}

/// Discrete per-signal contribution, kept so assessments can be audited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalContribution {
    pub signal: SignalKind,
    pub contribution: u8,
    pub note: String,
}

/// Assessment output for one patient: the cumulative score, the per-signal
/// trail behind it, and the report buckets the patient belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub patient_id: PatientId,
    pub total_score: u8,
    pub contributions: Vec<SignalContribution>,
    pub buckets: Vec<RiskBucket>,
}

impl RiskAssessment {
    pub fn is_high_risk(&self) -> bool {
        self.buckets.contains(&RiskBucket::HighRisk)
    }

    pub fn has_fever(&self) -> bool {
        self.buckets.contains(&RiskBucket::Fever)
    }

    pub fn has_data_quality_issue(&self) -> bool {
        self.buckets.contains(&RiskBucket::DataQuality)
    }
}
