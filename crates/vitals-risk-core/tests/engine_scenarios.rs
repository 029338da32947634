//! End-to-end scoring scenarios against the built-in catalog.

use std::collections::BTreeSet;
use std::sync::Arc;

use vitals_risk_core::scoring::{StepSchedule, Transform};
use vitals_risk_core::{
    BloodPressure, Disease, DiseaseCatalog, Factor, FixedVariance, Gender, PatientData,
    RiskEngine, Severity, TransformTable,
};

fn neutral_engine() -> RiskEngine {
    RiskEngine::new(Arc::new(DiseaseCatalog::builtin())).with_variance(FixedVariance::neutral())
}

fn history(ids: &[&str]) -> Option<BTreeSet<String>> {
    Some(ids.iter().map(|s| s.to_string()).collect())
}

fn compounding_risk_patient() -> PatientData {
    let mut patient = PatientData::new(65, Gender::Male, 175.0, 80.0);
    patient.blood_sugar = Some(200.0);
    patient.blood_pressure = Some(BloodPressure::new(150, 95));
    patient.cholesterol = Some(260.0);
    patient.smoking = Some(true);
    patient.diabetic = Some(true);
    patient.family_history = history(&["diabetes", "coronary"]);
    patient
}

#[test]
fn test_compounding_risk_ranks_high() -> anyhow::Result<()> {
    let engine = neutral_engine();
    let results = engine.evaluate(&compounding_risk_patient());

    assert_eq!(results.len(), 3);
    for id in ["diabetes", "coronary"] {
        let result = results
            .iter()
            .find(|r| r.disease_id == id)
            .ok_or_else(|| anyhow::anyhow!("missing result for {}", id))?;
        assert!(result.probability > 66.0, "{} scored {}", id, result.probability);
        assert_eq!(result.severity, Severity::High);
    }

    let coronary = engine.explain(&compounding_risk_patient(), "coronary")?;
    assert_eq!(coronary.disease, "Coronary Artery Disease");
    assert_eq!(coronary.contributions.len(), 7);
    Ok(())
}

#[test]
fn test_compounding_risk_survives_lowest_variance() {
    let engine = neutral_engine().with_variance(FixedVariance(0.9));
    let results = engine.evaluate(&compounding_risk_patient());

    for id in ["diabetes", "coronary"] {
        let result = results.iter().find(|r| r.disease_id == id).unwrap();
        assert_eq!(result.severity, Severity::High, "{} at {}", id, result.probability);
    }
}

#[test]
fn test_neutral_variance_is_reproducible() {
    let engine = neutral_engine();
    let patient = compounding_risk_patient();
    assert_eq!(engine.evaluate(&patient), engine.evaluate(&patient));
}

#[test]
fn test_required_fields_only() -> anyhow::Result<()> {
    let engine = neutral_engine();
    let patient = PatientData::new(35, Gender::Female, 170.0, 70.0);

    let results = engine.evaluate(&patient);
    assert_eq!(results.len(), engine.catalog().len());

    for disease in engine.catalog().list_diseases() {
        let score = engine.explain(&patient, &disease.id)?;
        let factors: Vec<Factor> = score.contributions.iter().map(|c| c.factor).collect();
        assert_eq!(factors, vec![Factor::Age, Factor::Bmi], "{}", disease.id);
    }

    // diabetes: age 35 → 0.4, BMI 24.22 → 0.1
    let diabetes = engine.explain(&patient, "diabetes")?;
    let expected = (0.4 * 0.2 + 0.1 * 0.3) / (0.2 + 0.3);
    assert!((diabetes.probability - expected).abs() < 1e-9);
    Ok(())
}

#[test]
fn test_missing_blood_pressure_matches_manual_average() -> anyhow::Result<()> {
    let engine = neutral_engine();
    let mut patient = compounding_risk_patient();
    patient.blood_pressure = None;

    let score = engine.explain(&patient, "hypertension")?;

    // age 0.9·0.3, BMI 26.1 → 0.5·0.3, family 0.1·0.2, cholesterol 0.7·0.3, smoking 0.8·0.4
    let expected = (0.9 * 0.3 + 0.5 * 0.3 + 0.1 * 0.2 + 0.7 * 0.3 + 0.8 * 0.4)
        / (0.3 + 0.3 + 0.2 + 0.3 + 0.4);
    assert!((score.weighted_average - expected).abs() < 1e-9);
    assert!((score.total_weight - 1.5).abs() < 1e-9);
    Ok(())
}

#[test]
fn test_family_history_only_for_named_disease() -> anyhow::Result<()> {
    let engine = neutral_engine();
    let mut patient = PatientData::new(40, Gender::Male, 180.0, 75.0);
    patient.family_history = history(&["hypertension"]);

    let family_score = |id: &str| -> anyhow::Result<f64> {
        let score = engine.explain(&patient, id)?;
        score
            .contributions
            .iter()
            .find(|c| c.factor == Factor::FamilyHistory)
            .map(|c| c.score)
            .ok_or_else(|| anyhow::anyhow!("no family history term for {}", id))
    };

    assert_eq!(family_score("hypertension")?, 0.7);
    assert_eq!(family_score("diabetes")?, 0.1);
    Ok(())
}

#[test]
fn test_severity_boundaries_through_engine() {
    let cases = [
        (0.32999, Severity::Low),
        (0.33, Severity::Medium),
        (0.65999, Severity::Medium),
        (0.66, Severity::High),
    ];

    for (score, expected) in cases {
        let disease = Disease::new("probe".into(), "Probe".into(), String::new())
            .with_weight(Factor::Age, 1.0);
        let catalog = DiseaseCatalog::new(vec![disease]).unwrap();
        let transforms = TransformTable::reference().with_override(
            Factor::Age,
            "probe",
            Transform::Steps(StepSchedule::constant(score)),
        );
        let engine = RiskEngine::new(Arc::new(catalog))
            .with_transforms(transforms)
            .with_variance(FixedVariance::neutral());

        let results = engine.evaluate(&PatientData::new(30, Gender::Other, 170.0, 70.0));
        assert_eq!(results[0].severity, expected, "score {}", score);
    }
}

#[test]
fn test_shared_catalog_across_threads() {
    let catalog = Arc::new(DiseaseCatalog::builtin());
    let engine = Arc::new(RiskEngine::new(Arc::clone(&catalog)));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || {
                let patient = PatientData::new(30 + i * 10, Gender::Female, 165.0, 60.0 + i as f64);
                engine.evaluate(&patient)
            })
        })
        .collect();

    for handle in handles {
        let results = handle.join().unwrap();
        assert_eq!(results.len(), 3);
    }
    assert_eq!(*catalog, DiseaseCatalog::builtin());
}
