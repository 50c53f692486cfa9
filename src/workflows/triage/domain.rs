use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier wrapper for patients; the join key across every report set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatientId(pub String);

impl PatientId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Clinical signals subject to independent scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SignalKind {
    Age,
    Temperature,
    BloodPressure,
}

impl SignalKind {
    pub const fn label(self) -> &'static str {
        match self {
            SignalKind::Age => "age",
            SignalKind::Temperature => "temperature",
            SignalKind::BloodPressure => "blood_pressure",
        }
    }
}

/// Raw vital cell as served upstream. The assessment feed mixes numbers,
/// numeric strings, junk strings, and outright absent fields, so the record
/// keeps whatever arrived and leaves validity to the evaluators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VitalReading {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl VitalReading {
    /// Numeric view of the reading, accepting numeric strings like "45".
    pub fn as_number(&self) -> Option<f64> {
        match self {
            VitalReading::Number(value) => Some(*value).filter(|v| v.is_finite()),
            VitalReading::Text(raw) => raw.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            VitalReading::Other(_) => None,
        }
    }

    /// Textual view, used by the blood-pressure format rules.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            VitalReading::Text(raw) => Some(raw.as_str()),
            _ => None,
        }
    }
}

impl From<f64> for VitalReading {
    fn from(value: f64) -> Self {
        VitalReading::Number(value)
    }
}

impl From<&str> for VitalReading {
    fn from(value: &str) -> Self {
        VitalReading::Text(value.to_string())
    }
}

/// One patient row as decoded from the upstream feed or a CSV export.
/// Only the identifier and the three vitals participate in scoring; the
/// remaining fields ride along for operator-facing output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub patient_id: PatientId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub age: Option<VitalReading>,
    #[serde(default)]
    pub temperature: Option<VitalReading>,
    #[serde(default)]
    pub blood_pressure: Option<VitalReading>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub visit_date: Option<NaiveDate>,
    #[serde(default)]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub medications: Option<String>,
}

impl PatientRecord {
    /// Bare record with every vital absent; tests and importers fill it in.
    pub fn new(patient_id: impl Into<String>) -> Self {
        Self {
            patient_id: PatientId(patient_id.into()),
            name: None,
            gender: None,
            age: None,
            temperature: None,
            blood_pressure: None,
            visit_date: None,
            diagnosis: None,
            medications: None,
        }
    }
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_date))
}

/// Accepts the date shapes the feed has been seen emitting; anything else
/// is treated as absent rather than failing the whole page.
pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc().date());
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_parses_numeric_strings() {
        assert_eq!(VitalReading::from(" 98.6 ").as_number(), Some(98.6));
        assert_eq!(VitalReading::from(37.0).as_number(), Some(37.0));
        assert_eq!(VitalReading::from("N/A").as_number(), None);
        assert_eq!(
            VitalReading::Other(serde_json::json!({"unexpected": true})).as_number(),
            None
        );
    }

    #[test]
    fn record_decodes_dirty_feed_row() {
        let row = serde_json::json!({
            "patient_id": "DEMO001",
            "name": "Test Patient",
            "age": "fifty",
            "temperature": 98.2,
            "blood_pressure": "150/",
            "visit_date": "2024-02-18",
        });

        let record: PatientRecord = serde_json::from_value(row).expect("row decodes");
        assert_eq!(record.patient_id.as_str(), "DEMO001");
        assert_eq!(record.age.as_ref().and_then(VitalReading::as_number), None);
        assert_eq!(
            record.temperature.as_ref().and_then(VitalReading::as_number),
            Some(98.2)
        );
        assert_eq!(
            record.visit_date,
            NaiveDate::from_ymd_opt(2024, 2, 18)
        );
    }

    #[test]
    fn unparseable_visit_date_becomes_absent() {
        let row = serde_json::json!({
            "patient_id": "DEMO002",
            "visit_date": "not a date",
        });

        let record: PatientRecord = serde_json::from_value(row).expect("row decodes");
        assert_eq!(record.visit_date, None);
    }
}
