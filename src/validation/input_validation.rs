use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

use crate::config::ReferenceData;
use crate::models::{InterventionSelection, PatientProfile, TherapySelection};

#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("{field} must be greater than {min} and at most {max}, got {value}")]
    OutOfOpenRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    #[error("{field}: unknown therapy '{name}'")]
    UnknownTherapy { field: String, name: String },

    #[error("{field}: therapy '{name}' is already listed")]
    DuplicateTherapy { field: String, name: String },

    #[error("interventions: unknown intervention '{name}'")]
    UnknownIntervention { name: String },

    #[error("interventions: '{name}' is selected more than once")]
    DuplicateIntervention { name: String },
}

/// Every violation found in a request
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Accepted input domains
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRules {
    pub age_range: (u32, u32),
    pub systolic_bp_range: (f64, f64),
    pub total_cholesterol_range: (f64, f64),
    pub hdl_cholesterol_range: (f64, f64),
    pub egfr_range: (f64, f64),
    /// Lower bound exclusive
    pub crp_range: (f64, f64),
    pub vascular_disease_max: u8,
    pub baseline_ldl_range: (f64, f64),
    pub hba1c_range: (f64, f64),
    pub sbp_target_range: (f64, f64),
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            age_range: (30, 90),
            systolic_bp_range: (80.0, 220.0),
            total_cholesterol_range: (2.0, 10.0),
            hdl_cholesterol_range: (0.5, 3.0),
            egfr_range: (15.0, 120.0),
            crp_range: (0.0, 20.0),
            vascular_disease_max: 3,
            baseline_ldl_range: (0.5, 6.0),
            hba1c_range: (4.0, 14.0),
            sbp_target_range: (80.0, 220.0),
        }
    }
}

/// Rejects out-of-domain requests before any computation runs
#[derive(Debug, Clone, Default)]
pub struct InputValidator {
    rules: ValidationRules,
}

impl InputValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: ValidationRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    pub fn validate_profile(&self, profile: &PatientProfile) -> Vec<ValidationError> {
        let r = &self.rules;
        let mut errors = Vec::new();

        let (min_age, max_age) = r.age_range;
        if profile.age < min_age || profile.age > max_age {
            errors.push(ValidationError::OutOfRange {
                field: "age".to_string(),
                min: min_age as f64,
                max: max_age as f64,
                value: profile.age as f64,
            });
        }

        check_range(&mut errors, "systolic_bp", profile.systolic_bp, r.systolic_bp_range);
        check_range(&mut errors, "total_cholesterol", profile.total_cholesterol, r.total_cholesterol_range);
        check_range(&mut errors, "hdl_cholesterol", profile.hdl_cholesterol, r.hdl_cholesterol_range);
        check_range(&mut errors, "egfr", profile.egfr, r.egfr_range);

        let (crp_min, crp_max) = r.crp_range;
        if !profile.crp.is_finite() {
            errors.push(ValidationError::NotFinite { field: "crp".to_string() });
        } else if profile.crp <= crp_min || profile.crp > crp_max {
            errors.push(ValidationError::OutOfOpenRange {
                field: "crp".to_string(),
                min: crp_min,
                max: crp_max,
                value: profile.crp,
            });
        }

        if profile.vascular_disease_count > r.vascular_disease_max {
            errors.push(ValidationError::OutOfRange {
                field: "vascular_disease_count".to_string(),
                min: 0.0,
                max: r.vascular_disease_max as f64,
                value: profile.vascular_disease_count as f64,
            });
        }

        check_range(&mut errors, "baseline_ldl", profile.baseline_ldl, r.baseline_ldl_range);
        check_range(&mut errors, "hba1c", profile.hba1c, r.hba1c_range);

        errors
    }

    pub fn validate_sbp_target(&self, sbp_target: f64) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        check_range(&mut errors, "sbp_target", sbp_target, self.rules.sbp_target_range);
        errors
    }

    /// Every therapy must be known and appear once across both groups
    pub fn validate_therapies(
        &self,
        therapies: &TherapySelection,
        reference: &ReferenceData,
    ) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        let groups = [
            ("therapies.pre_existing", &therapies.pre_existing),
            ("therapies.add_on", &therapies.add_on),
        ];
        for (field, names) in groups {
            for name in names {
                if reference.therapy(name).is_none() {
                    errors.push(ValidationError::UnknownTherapy {
                        field: field.to_string(),
                        name: name.clone(),
                    });
                } else if !seen.insert(name.as_str()) {
                    errors.push(ValidationError::DuplicateTherapy {
                        field: field.to_string(),
                        name: name.clone(),
                    });
                }
            }
        }

        errors
    }

    pub fn validate_interventions(
        &self,
        interventions: &InterventionSelection,
        reference: &ReferenceData,
    ) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for name in &interventions.names {
            if reference.intervention(name).is_none() {
                errors.push(ValidationError::UnknownIntervention { name: name.clone() });
            } else if !seen.insert(name.as_str()) {
                errors.push(ValidationError::DuplicateIntervention { name: name.clone() });
            }
        }

        errors
    }

    /// Validate a whole request, reporting every violation at once
    pub fn validate_request(
        &self,
        profile: &PatientProfile,
        therapies: &TherapySelection,
        interventions: &InterventionSelection,
        sbp_target: f64,
        reference: &ReferenceData,
    ) -> Result<(), ValidationErrors> {
        let mut errors = self.validate_profile(profile);
        errors.extend(self.validate_sbp_target(sbp_target));
        errors.extend(self.validate_therapies(therapies, reference));
        errors.extend(self.validate_interventions(interventions, reference));
        ValidationErrors(errors).into_result()
    }
}

fn check_range(errors: &mut Vec<ValidationError>, field: &str, value: f64, (min, max): (f64, f64)) {
    if !value.is_finite() {
        errors.push(ValidationError::NotFinite { field: field.to_string() });
    } else if value < min || value > max {
        errors.push(ValidationError::OutOfRange {
            field: field.to_string(),
            min,
            max,
            value,
        });
    }
}
