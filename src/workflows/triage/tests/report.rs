use super::common::*;
use crate::workflows::triage::report::{build_report, ReportBuilder};

#[test]
fn report_groups_patients_by_bucket_in_input_order() {
    let engine = risk_engine();
    let records = vec![
        vitals("ok-1", Some(30.0), Some(98.0), Some("110/70")),
        vitals("hot-1", Some(30.0), Some(101.2), Some("110/70")),
        raw_vitals("junk-1", Some("unknown"), Some("98.0"), Some("110/70")),
        vitals("risky-1", Some(70.0), Some(101.0), Some("150/95")),
        vitals("hot-2", Some(20.0), Some(99.8), Some("115/75")),
    ];

    let report = build_report(&engine, &records);

    assert_eq!(ids(&report.high_risk_patients), vec!["risky-1"]);
    assert_eq!(ids(&report.fever_patients), vec!["hot-1", "risky-1", "hot-2"]);
    assert_eq!(ids(&report.data_quality_issues), vec!["junk-1"]);
}

#[test]
fn high_risk_threshold_is_inclusive() {
    let engine = risk_engine();
    // age 66 contributes 2, blood pressure 130/85 contributes 2: total 4.
    let at_threshold = vitals("score-4", Some(66.0), Some(98.0), Some("130/85"));
    // age 66 contributes 2, blood pressure 125/75 contributes 1: total 3.
    let below = vitals("score-3", Some(66.0), Some(98.0), Some("125/75"));

    let report = build_report(&engine, &[at_threshold, below]);

    assert_eq!(ids(&report.high_risk_patients), vec!["score-4"]);
}

#[test]
fn duplicate_input_records_score_twice_but_appear_once() {
    let engine = risk_engine();
    let record = raw_vitals("dup-1", Some("70"), Some("102.4"), Some("oops"));

    let mut builder = ReportBuilder::new();
    for _ in 0..2 {
        builder.absorb(&engine.assess(&record));
    }

    assert_eq!(builder.evaluated(), 2);
    let report = builder.finish();
    assert_eq!(ids(&report.high_risk_patients), vec!["dup-1"]);
    assert_eq!(ids(&report.fever_patients), vec!["dup-1"]);
    assert_eq!(ids(&report.data_quality_issues), vec!["dup-1"]);
}

#[test]
fn one_patient_can_join_every_set() {
    let engine = risk_engine();
    let record = raw_vitals("all-sets", Some("80"), Some("103.0"), Some("broken"));

    let report = build_report(&engine, &[record]);

    assert_eq!(ids(&report.high_risk_patients), vec!["all-sets"]);
    assert_eq!(ids(&report.fever_patients), vec!["all-sets"]);
    assert_eq!(ids(&report.data_quality_issues), vec!["all-sets"]);
}

#[test]
fn summary_counts_match_set_sizes() {
    let engine = risk_engine();
    let records = vec![
        vitals("a", Some(70.0), Some(102.0), Some("150/95")),
        vitals("b", Some(30.0), Some(100.0), Some("110/70")),
        raw_vitals("c", None, Some("98.0"), Some("110/70")),
    ];

    let report = build_report(&engine, &records);
    let summary = report.summary();

    assert_eq!(summary.high_risk, report.high_risk_patients.len());
    assert_eq!(summary.fever, report.fever_patients.len());
    assert_eq!(summary.data_quality, report.data_quality_issues.len());
}

#[test]
fn report_serializes_in_submission_shape() {
    let engine = risk_engine();
    let records = vec![
        vitals("risky-1", Some(70.0), Some(102.0), Some("150/95")),
        raw_vitals("junk-1", Some("x"), Some("98.0"), Some("110/70")),
    ];

    let report = build_report(&engine, &records);
    let value = serde_json::to_value(&report).expect("report serializes");

    assert_eq!(
        value,
        serde_json::json!({
            "high_risk_patients": ["risky-1"],
            "fever_patients": ["risky-1"],
            "data_quality_issues": ["junk-1"],
        })
    );
}

fn ids(list: &[crate::workflows::triage::domain::PatientId]) -> Vec<&str> {
    list.iter().map(|id| id.as_str()).collect()
}
