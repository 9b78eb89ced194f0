use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn is_male(&self) -> bool {
        matches!(self, Sex::Male)
    }
}

/// Qualifying vascular diagnoses counted by the risk model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VascularDisease {
    CoronaryArteryDisease,
    CerebrovascularDisease,
    PeripheralArteryDisease,
}

/// Clinical covariates for a single risk calculation.
///
/// Built once per request and never mutated. Range checks live in
/// [`crate::validation::InputValidator`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientProfile {
    /// Age in years
    pub age: u32,
    pub sex: Sex,
    /// Current systolic blood pressure, mmHg
    pub systolic_bp: f64,
    /// Total cholesterol, mmol/L
    pub total_cholesterol: f64,
    /// HDL cholesterol, mmol/L
    pub hdl_cholesterol: f64,
    pub smoker: bool,
    pub diabetes: bool,
    /// eGFR, mL/min/1.73m²
    pub egfr: f64,
    /// hs-CRP, mg/L
    pub crp: f64,
    /// Number of qualifying vascular diagnoses (0-3)
    pub vascular_disease_count: u8,
    /// LDL cholesterol before any lipid-lowering therapy, mmol/L
    pub baseline_ldl: f64,
    /// HbA1c, %
    pub hba1c: f64,
}

impl PatientProfile {
    /// Count distinct diagnoses; a diagnosis ticked twice still counts once.
    pub fn vascular_count_from(diagnoses: &[VascularDisease]) -> u8 {
        let distinct: HashSet<&VascularDisease> = diagnoses.iter().collect();
        distinct.len() as u8
    }

    pub fn with_vascular_diagnoses(mut self, diagnoses: &[VascularDisease]) -> Self {
        self.vascular_disease_count = Self::vascular_count_from(diagnoses);
        self
    }
}

impl Default for PatientProfile {
    /// Mirrors the default inputs of the calculator form.
    fn default() -> Self {
        Self {
            age: 60,
            sex: Sex::Male,
            systolic_bp: 145.0,
            total_cholesterol: 5.0,
            hdl_cholesterol: 1.0,
            smoker: false,
            diabetes: false,
            egfr: 80.0,
            crp: 2.0,
            vascular_disease_count: 0,
            baseline_ldl: 3.5,
            hba1c: 7.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vascular_count_ignores_duplicates() {
        let count = PatientProfile::vascular_count_from(&[
            VascularDisease::CoronaryArteryDisease,
            VascularDisease::PeripheralArteryDisease,
            VascularDisease::CoronaryArteryDisease,
        ]);
        assert_eq!(count, 2);
    }

    #[test]
    fn test_with_vascular_diagnoses() {
        let profile = PatientProfile::default().with_vascular_diagnoses(&[
            VascularDisease::CoronaryArteryDisease,
            VascularDisease::CerebrovascularDisease,
            VascularDisease::PeripheralArteryDisease,
        ]);
        assert_eq!(profile.vascular_disease_count, 3);
    }

    #[test]
    fn test_profile_deserializes_from_json() {
        let json = r#"{
            "age": 55, "sex": "Female", "systolic_bp": 130.0,
            "total_cholesterol": 4.8, "hdl_cholesterol": 1.4,
            "smoker": true, "diabetes": false, "egfr": 95.0, "crp": 1.2,
            "vascular_disease_count": 1, "baseline_ldl": 3.1, "hba1c": 5.6
        }"#;
        let profile: PatientProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.sex, Sex::Female);
        assert!(profile.smoker);
        assert_eq!(profile.vascular_disease_count, 1);
    }
}
