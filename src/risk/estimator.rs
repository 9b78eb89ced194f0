// SMART-style baseline 10-year risk estimator
use serde::Serialize;
use tracing::debug;

use crate::models::PatientProfile;
use crate::risk::{BaselineRiskModel, RiskError};
use crate::utils::math::round1;

/// S0(10), the baseline 10-year survival of the reference population
pub const BASELINE_SURVIVAL: f64 = 0.900;

/// Centring constant subtracted from the linear predictor
pub const LINEAR_PREDICTOR_OFFSET: f64 = 5.8;

/// Ceiling on any estimated 10-year risk, percent
pub const MAX_ESTIMATED_RISK_PERCENT: f64 = 95.0;

/// Log-linear coefficients per covariate unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmartCoefficients {
    pub age: f64,
    pub male: f64,
    pub systolic_bp: f64,
    pub total_cholesterol: f64,
    pub hdl_cholesterol: f64,
    pub smoker: f64,
    pub diabetes: f64,
    /// Applied to eGFR / 10
    pub egfr_per_10: f64,
    /// Applied to ln(CRP + 1)
    pub log_crp: f64,
    pub vascular_disease: f64,
}

pub const SMART_COEFFICIENTS: SmartCoefficients = SmartCoefficients {
    age: 0.064,
    male: 0.34,
    systolic_bp: 0.02,
    total_cholesterol: 0.25,
    hdl_cholesterol: -0.25,
    smoker: 0.44,
    diabetes: 0.51,
    egfr_per_10: -0.2,
    log_crp: 0.25,
    vascular_disease: 0.4,
};

#[derive(Debug, Clone)]
pub struct SmartRiskModel {
    coefficients: SmartCoefficients,
    baseline_survival: f64,
    offset: f64,
    max_risk_percent: f64,
}

impl Default for SmartRiskModel {
    fn default() -> Self {
        Self::new()
    }
}

impl SmartRiskModel {
    pub fn new() -> Self {
        Self {
            coefficients: SMART_COEFFICIENTS,
            baseline_survival: BASELINE_SURVIVAL,
            offset: LINEAR_PREDICTOR_OFFSET,
            max_risk_percent: MAX_ESTIMATED_RISK_PERCENT,
        }
    }

    pub fn coefficients(&self) -> &SmartCoefficients {
        &self.coefficients
    }

    /// Weighted covariate sum
    pub fn linear_predictor(&self, profile: &PatientProfile) -> Result<f64, RiskError> {
        let continuous = [
            ("systolic_bp", profile.systolic_bp),
            ("total_cholesterol", profile.total_cholesterol),
            ("hdl_cholesterol", profile.hdl_cholesterol),
            ("egfr", profile.egfr),
            ("crp", profile.crp),
        ];
        for (field, value) in continuous {
            if !value.is_finite() {
                return Err(RiskError::invalid_input(field, "must be a finite number"));
            }
        }

        let crp_shifted = profile.crp + 1.0;
        if crp_shifted <= 0.0 {
            return Err(RiskError::invalid_input(
                "crp",
                format!("CRP + 1 must be positive for the log term, got CRP {}", profile.crp),
            ));
        }

        let c = &self.coefficients;
        let indicator = |flag: bool| if flag { 1.0 } else { 0.0 };

        Ok(c.age * profile.age as f64
            + c.male * indicator(profile.sex.is_male())
            + c.systolic_bp * profile.systolic_bp
            + c.total_cholesterol * profile.total_cholesterol
            + c.hdl_cholesterol * profile.hdl_cholesterol
            + c.smoker * indicator(profile.smoker)
            + c.diabetes * indicator(profile.diabetes)
            + c.egfr_per_10 * (profile.egfr / 10.0)
            + c.log_crp * crp_shifted.ln()
            + c.vascular_disease * profile.vascular_disease_count as f64)
    }
}

impl BaselineRiskModel for SmartRiskModel {
    fn estimate_10y_risk(&self, profile: &PatientProfile) -> Result<f64, RiskError> {
        let lp = self.linear_predictor(profile)?;
        let probability = 1.0 - self.baseline_survival.powf((lp - self.offset).exp());
        let risk = round1(probability * 100.0).max(0.0).min(self.max_risk_percent);

        debug!(
            linear_predictor = %lp,
            probability = %probability,
            risk_10y = %risk,
            "Estimated baseline 10-year risk"
        );

        Ok(risk)
    }

    fn model_name(&self) -> &'static str {
        "smart"
    }

    fn covariates(&self) -> Vec<&'static str> {
        vec![
            "age",
            "sex",
            "systolic_bp",
            "total_cholesterol",
            "hdl_cholesterol",
            "smoker",
            "diabetes",
            "egfr",
            "crp",
            "vascular_disease_count",
        ]
    }
}

/// Estimate with the default SMART coefficients
pub fn estimate_10y_risk(profile: &PatientProfile) -> Result<f64, RiskError> {
    SmartRiskModel::new().estimate_10y_risk(profile)
}
