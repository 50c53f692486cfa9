//! Patient risk scoring and report assembly.
//!
//! The scoring core is pure: evaluators read one record each and report
//! outcomes for the engine to combine, the report builder folds engine
//! verdicts into the terminal report, and nothing here performs I/O.

pub mod domain;
pub mod evaluation;
pub mod report;

#[cfg(test)]
mod tests;

pub use domain::{PatientId, PatientRecord, SignalKind, VitalReading};
pub use evaluation::{RiskAssessment, RiskBucket, RiskConfig, RiskEngine, SignalContribution};
pub use report::{build_report, ReportBuilder, TriageReport, TriageReportSummary};
