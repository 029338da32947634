//! Reference disease definitions.

use crate::models::{Disease, Factor};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The three reference diseases, in declaration order.
pub fn reference_diseases() -> Vec<Disease> {
    vec![diabetes(), hypertension(), coronary()]
}

fn diabetes() -> Disease {
    let mut disease = Disease::new(
        "diabetes".into(),
        "Type 2 Diabetes".into(),
        "A chronic condition that affects how your body metabolizes sugar (glucose).".into(),
    )
    .with_weight(Factor::Age, 0.2)
    .with_weight(Factor::BloodSugar, 0.5)
    .with_weight(Factor::Bmi, 0.3)
    .with_weight(Factor::FamilyHistory, 0.4)
    .with_weight(Factor::Cholesterol, 0.1)
    .with_weight(Factor::BloodPressure, 0.2);

    disease.symptoms = strings(&[
        "frequent urination",
        "increased thirst",
        "unexplained weight loss",
        "fatigue",
        "blurred vision",
        "slow-healing sores",
    ]);
    disease.risk_factors = strings(&[
        "Being overweight",
        "Fat distribution",
        "Inactivity",
        "Family history",
        "Age",
        "Prediabetes",
        "Gestational diabetes",
    ]);
    disease.treatment_options = strings(&[
        "Healthy eating",
        "Regular exercise",
        "Weight loss",
        "Diabetes medication or insulin therapy",
        "Blood sugar monitoring",
    ]);
    disease
}

fn hypertension() -> Disease {
    let mut disease = Disease::new(
        "hypertension".into(),
        "Hypertension".into(),
        "High blood pressure is a common condition that can lead to serious health problems if untreated.".into(),
    )
    .with_weight(Factor::Age, 0.3)
    .with_weight(Factor::BloodPressure, 0.6)
    .with_weight(Factor::Bmi, 0.3)
    .with_weight(Factor::FamilyHistory, 0.2)
    .with_weight(Factor::Cholesterol, 0.3)
    .with_weight(Factor::Smoking, 0.4);

    disease.symptoms = strings(&[
        "headaches",
        "shortness of breath",
        "nosebleeds",
        "facial flushing",
        "dizziness",
        "chest pain",
    ]);
    disease.risk_factors = strings(&[
        "Age",
        "Family history",
        "Being overweight or obese",
        "Not being physically active",
        "Using tobacco",
        "Too much salt",
        "Drinking too much alcohol",
        "Stress",
        "Certain chronic conditions",
    ]);
    disease.treatment_options = strings(&[
        "Healthy diet",
        "Regular physical activity",
        "Maintaining a healthy weight",
        "Limiting alcohol",
        "Quitting smoking",
        "Managing stress",
        "Medication",
    ]);
    disease
}

fn coronary() -> Disease {
    let mut disease = Disease::new(
        "coronary".into(),
        "Coronary Artery Disease".into(),
        "A common heart condition that affects the major blood vessels that supply the heart with blood, oxygen, and nutrients.".into(),
    )
    .with_weight(Factor::Age, 0.4)
    .with_weight(Factor::BloodPressure, 0.4)
    .with_weight(Factor::Cholesterol, 0.5)
    .with_weight(Factor::Smoking, 0.5)
    .with_weight(Factor::Diabetes, 0.3)
    .with_weight(Factor::FamilyHistory, 0.3)
    .with_weight(Factor::Bmi, 0.2);

    disease.symptoms = strings(&[
        "chest pain (angina)",
        "shortness of breath",
        "pain in the neck, jaw, throat, upper abdomen or back",
        "nausea",
        "fatigue",
    ]);
    disease.risk_factors = strings(&[
        "Age",
        "Sex",
        "Family history",
        "Smoking",
        "High blood pressure",
        "High cholesterol",
        "Diabetes",
        "Overweight or obesity",
        "Physical inactivity",
        "Stress",
        "Unhealthy diet",
    ]);
    disease.treatment_options = strings(&[
        "Lifestyle changes",
        "Medications",
        "Medical procedures or surgery",
    ]);
    disease
}
