// Baseline risk model interface
use crate::models::PatientProfile;
use crate::risk::RiskError;

/// A calibrated model producing absolute 10-year CVD risk from covariates
pub trait BaselineRiskModel: Send + Sync {
    /// Absolute 10-year risk as a percentage rounded to one decimal
    fn estimate_10y_risk(&self, profile: &PatientProfile) -> Result<f64, RiskError>;

    /// Name of the published model this implementation follows
    fn model_name(&self) -> &'static str;

    /// Covariates the model reads from the profile
    fn covariates(&self) -> Vec<&'static str>;

    /// Version of the coefficient set (for tracking recalibration)
    fn version(&self) -> &'static str {
        "1.0.0"
    }

    fn get_config(&self) -> serde_json::Value {
        serde_json::json!({
            "model": self.model_name(),
            "version": self.version(),
            "covariates": self.covariates(),
        })
    }
}
