use crate::workflows::triage::domain::{PatientRecord, VitalReading};
use crate::workflows::triage::evaluation::RiskEngine;

pub(super) fn risk_engine() -> RiskEngine {
    RiskEngine::default()
}

/// Record with clean numeric vitals; pass `None` to leave a signal absent.
pub(super) fn vitals(
    id: &str,
    age: Option<f64>,
    temperature: Option<f64>,
    blood_pressure: Option<&str>,
) -> PatientRecord {
    let mut record = PatientRecord::new(id);
    record.age = age.map(VitalReading::from);
    record.temperature = temperature.map(VitalReading::from);
    record.blood_pressure = blood_pressure.map(VitalReading::from);
    record
}

/// Record whose vitals arrive as raw feed text, the way degraded upstream
/// rows do.
pub(super) fn raw_vitals(
    id: &str,
    age: Option<&str>,
    temperature: Option<&str>,
    blood_pressure: Option<&str>,
) -> PatientRecord {
    let mut record = PatientRecord::new(id);
    record.age = age.map(VitalReading::from);
    record.temperature = temperature.map(VitalReading::from);
    record.blood_pressure = blood_pressure.map(VitalReading::from);
    record
}
