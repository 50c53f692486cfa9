use super::super::domain::{PatientRecord, SignalKind, VitalReading};
use super::config::RiskConfig;
use super::SignalContribution;

const AGE_MIDDLE_MIN: f64 = 40.0;
const AGE_MIDDLE_MAX: f64 = 65.0;

const TEMP_NORMAL_MAX: f64 = 99.5;
const TEMP_MILD_MIN: f64 = 99.6;
const TEMP_MILD_MAX: f64 = 100.9;
const TEMP_HIGH_MIN: f64 = 101.0;

const SYSTOLIC_HIGH_MIN: i64 = 140;
const DIASTOLIC_HIGH_MIN: i64 = 90;
const SYSTOLIC_ELEVATED_MIN: i64 = 130;
const SYSTOLIC_ELEVATED_MAX: i64 = 139;
const DIASTOLIC_ELEVATED_MIN: i64 = 80;
const DIASTOLIC_ELEVATED_MAX: i64 = 89;
const SYSTOLIC_RAISED_MIN: i64 = 120;
const SYSTOLIC_RAISED_MAX: i64 = 129;

/// Cross-signal observations the bucket policy consumes alongside the score.
pub(crate) struct VitalSigns {
    pub fever: bool,
    pub malformed: Vec<SignalKind>,
}

/// Result of running one signal rule over one patient. Quality failure and
/// scoring are orthogonal: a malformed reading contributes zero and never
/// blocks the other signals.
pub(crate) struct SignalOutcome {
    pub contribution: u8,
    pub fever: bool,
    pub malformed: bool,
    pub note: String,
}

impl SignalOutcome {
    fn scored(contribution: u8, note: String) -> Self {
        Self {
            contribution,
            fever: false,
            malformed: false,
            note,
        }
    }

    fn malformed(note: &str) -> Self {
        Self {
            contribution: 0,
            fever: false,
            malformed: true,
            note: note.to_string(),
        }
    }
}

pub(crate) fn score_vitals(
    record: &PatientRecord,
    config: &RiskConfig,
) -> (Vec<SignalContribution>, u8, VitalSigns) {
    let mut contributions = Vec::with_capacity(3);
    let mut total_score: u8 = 0;
    let mut signs = VitalSigns {
        fever: false,
        malformed: Vec::new(),
    };

    let outcomes = [
        (SignalKind::Age, score_age(record.age.as_ref())),
        (
            SignalKind::Temperature,
            score_temperature(record.temperature.as_ref(), config),
        ),
        (
            SignalKind::BloodPressure,
            score_blood_pressure(record.blood_pressure.as_ref()),
        ),
    ];

    for (signal, outcome) in outcomes {
        total_score += outcome.contribution;
        signs.fever |= outcome.fever;
        if outcome.malformed {
            signs.malformed.push(signal);
        }
        contributions.push(SignalContribution {
            signal,
            contribution: outcome.contribution,
            note: outcome.note,
        });
    }

    (contributions, total_score, signs)
}

/// Age rule: under 40 scores 0, 40-65 scores 1, over 65 scores 2. The value
/// must parse as a positive number; zero and below count as unusable data.
pub(crate) fn score_age(reading: Option<&VitalReading>) -> SignalOutcome {
    let age = match reading.and_then(VitalReading::as_number) {
        Some(value) if value > 0.0 => value,
        _ => return SignalOutcome::malformed("age missing or not a positive number"),
    };

    if (AGE_MIDDLE_MIN..=AGE_MIDDLE_MAX).contains(&age) {
        SignalOutcome::scored(1, format!("age {age} in 40-65 band"))
    } else if age > AGE_MIDDLE_MAX {
        SignalOutcome::scored(2, format!("age {age} above 65"))
    } else {
        SignalOutcome::scored(0, format!("age {age} under 40"))
    }
}

/// Temperature rule. A reading of exactly zero is valid data. The band table
/// matches the assessment service's scoring bit-for-bit, gaps included:
/// exactly 99.6 and the span from 100.9 up to (but excluding) 101 both score
/// 0 while still raising the fever flag.
pub(crate) fn score_temperature(
    reading: Option<&VitalReading>,
    config: &RiskConfig,
) -> SignalOutcome {
    let temperature = match reading.and_then(VitalReading::as_number) {
        Some(value) => value,
        None => return SignalOutcome::malformed("temperature missing or not a number"),
    };

    let fever = temperature >= config.fever_threshold;

    let (contribution, note) = if temperature > TEMP_MILD_MIN && temperature < TEMP_MILD_MAX {
        (1, format!("temperature {temperature} mildly elevated"))
    } else if temperature <= TEMP_NORMAL_MAX {
        (0, format!("temperature {temperature} in normal band"))
    } else if temperature >= TEMP_HIGH_MIN {
        (2, format!("temperature {temperature} high"))
    } else {
        (0, format!("temperature {temperature} on band edge"))
    };

    SignalOutcome {
        contribution,
        fever,
        malformed: false,
        note,
    }
}

/// Blood-pressure rule over a "systolic/diastolic" reading. The format is
/// strict: exactly two components, each a plain integer. Over integer inputs
/// the four bands are total; the trailing zero arm is the documented default
/// for anything that slips past them.
pub(crate) fn score_blood_pressure(reading: Option<&VitalReading>) -> SignalOutcome {
    let raw = match reading.and_then(VitalReading::as_text) {
        Some(value) => value,
        None => return SignalOutcome::malformed("blood pressure missing"),
    };

    let mut parts = raw.split('/');
    let (systolic, diastolic) = match (parts.next(), parts.next(), parts.next()) {
        (Some(systolic), Some(diastolic), None) => {
            match (
                systolic.trim().parse::<i64>(),
                diastolic.trim().parse::<i64>(),
            ) {
                (Ok(systolic), Ok(diastolic)) => (systolic, diastolic),
                _ => {
                    return SignalOutcome::malformed(
                        "blood pressure components must be integers",
                    )
                }
            }
        }
        _ => return SignalOutcome::malformed("blood pressure must read systolic/diastolic"),
    };

    let contribution = if systolic >= SYSTOLIC_HIGH_MIN || diastolic >= DIASTOLIC_HIGH_MIN {
        3
    } else if (SYSTOLIC_ELEVATED_MIN..=SYSTOLIC_ELEVATED_MAX).contains(&systolic)
        || (DIASTOLIC_ELEVATED_MIN..=DIASTOLIC_ELEVATED_MAX).contains(&diastolic)
    {
        2
    } else if (SYSTOLIC_RAISED_MIN..=SYSTOLIC_RAISED_MAX).contains(&systolic)
        && diastolic < DIASTOLIC_ELEVATED_MIN
    {
        1
    } else {
        0
    };

    SignalOutcome::scored(
        contribution,
        format!("blood pressure {systolic}/{diastolic}"),
    )
}
