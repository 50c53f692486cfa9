use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::domain::{PatientId, PatientRecord};
use super::evaluation::{RiskAssessment, RiskBucket, RiskEngine};

/// Terminal classification report, serialized in the exact shape the
/// assessment service accepts. Each list preserves input processing order
/// and holds a patient at most once; one patient may appear in several lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriageReport {
    pub high_risk_patients: Vec<PatientId>,
    pub fever_patients: Vec<PatientId>,
    pub data_quality_issues: Vec<PatientId>,
}

impl TriageReport {
    pub fn summary(&self) -> TriageReportSummary {
        TriageReportSummary {
            high_risk: self.high_risk_patients.len(),
            fever: self.fever_patients.len(),
            data_quality: self.data_quality_issues.len(),
        }
    }
}

/// Count view for operator logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TriageReportSummary {
    pub high_risk: usize,
    pub fever: usize,
    pub data_quality: usize,
}

/// Folds per-patient assessments into a [`TriageReport`]. Re-absorbing a
/// patient repeats the scoring work but cannot duplicate set membership.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    report: TriageReport,
    high_risk_seen: HashSet<PatientId>,
    fever_seen: HashSet<PatientId>,
    data_quality_seen: HashSet<PatientId>,
    evaluated: usize,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn absorb(&mut self, assessment: &RiskAssessment) {
        self.evaluated += 1;

        for bucket in &assessment.buckets {
            let (list, seen) = match bucket {
                RiskBucket::HighRisk => (
                    &mut self.report.high_risk_patients,
                    &mut self.high_risk_seen,
                ),
                RiskBucket::Fever => (&mut self.report.fever_patients, &mut self.fever_seen),
                RiskBucket::DataQuality => (
                    &mut self.report.data_quality_issues,
                    &mut self.data_quality_seen,
                ),
            };

            if seen.insert(assessment.patient_id.clone()) {
                list.push(assessment.patient_id.clone());
            }
        }
    }

    /// Number of assessments absorbed, counting repeats.
    pub fn evaluated(&self) -> usize {
        self.evaluated
    }

    pub fn finish(self) -> TriageReport {
        self.report
    }
}

/// Single entry point shared by the fetch pipeline, the CSV path, and the
/// tests: run the engine over every record in order and fold the verdicts.
pub fn build_report<'a, I>(engine: &RiskEngine, records: I) -> TriageReport
where
    I: IntoIterator<Item = &'a PatientRecord>,
{
    let mut builder = ReportBuilder::new();
    for record in records {
        let assessment = engine.assess(record);
        builder.absorb(&assessment);
    }
    builder.finish()
}
