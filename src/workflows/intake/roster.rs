use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::workflows::triage::domain::{parse_date, PatientRecord, VitalReading};

/// Importer for locally exported patient rosters. Blank cells become absent
/// signals; anything non-blank passes through verbatim so that validity
/// stays the scoring engine's decision, not the importer's.
pub struct PatientRosterImporter;

impl PatientRosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<PatientRecord>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<PatientRecord>, RosterImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for (index, row) in csv_reader.deserialize::<RosterRow>().enumerate() {
            let row = row?;
            let record = row.into_record().ok_or(RosterImportError::MissingPatientId {
                // header occupies line 1
                line: index as u64 + 2,
            })?;
            records.push(record);
        }

        Ok(records)
    }
}

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingPatientId { line: u64 },
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read roster export: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
            RosterImportError::MissingPatientId { line } => {
                write!(f, "roster line {} has no patient_id", line)
            }
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
            RosterImportError::MissingPatientId { .. } => None,
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    patient_id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    gender: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    age: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    temperature: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    blood_pressure: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    visit_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    diagnosis: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    medications: Option<String>,
}

impl RosterRow {
    fn into_record(self) -> Option<PatientRecord> {
        let mut record = PatientRecord::new(self.patient_id?);
        record.name = self.name;
        record.gender = self.gender;
        record.age = self.age.map(VitalReading::Text);
        record.temperature = self.temperature.map(VitalReading::Text);
        record.blood_pressure = self.blood_pressure.map(VitalReading::Text);
        record.visit_date = self.visit_date.as_deref().and_then(parse_date);
        record.diagnosis = self.diagnosis;
        record.medications = self.medications;
        Some(record)
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
