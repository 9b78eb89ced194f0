use serde::{Deserialize, Serialize};

use super::horizon::Horizon;

/// Risk figures for a horizon where an estimate exists. All values are
/// percentages (ARR in percentage points) rounded to one decimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReduction {
    pub baseline_risk: f64,
    pub post_intervention_risk: f64,
    pub absolute_risk_reduction: f64,
    pub relative_risk_reduction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RiskOutcome {
    Estimated(RiskReduction),
    /// Lifetime horizon requested for a patient already at or past the
    /// lifetime reference age.
    NotApplicable { reason: String },
}

impl RiskOutcome {
    pub fn estimate(&self) -> Option<&RiskReduction> {
        match self {
            RiskOutcome::Estimated(reduction) => Some(reduction),
            RiskOutcome::NotApplicable { .. } => None,
        }
    }

    pub fn is_applicable(&self) -> bool {
        matches!(self, RiskOutcome::Estimated(_))
    }
}

/// A single multiplicative step applied to the remaining risk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentStep {
    pub source: String,
    /// Relative reduction applied by this step, percent
    pub relative_reduction: f64,
    /// Remaining absolute risk after the step, percent (unrounded)
    pub remaining_risk: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskResult {
    pub horizon: Horizon,
    pub outcome: RiskOutcome,
    /// Expected LDL-C at 3 months on the full regimen, mmol/L
    pub projected_ldl: f64,
    /// LDL-C on pre-existing therapy only, mmol/L
    pub ldl_on_existing_therapy: f64,
    pub adjustments: Vec<AdjustmentStep>,
    pub model: String,
    pub reference_data_version: String,
}

impl RiskResult {
    /// Plain-language summary for sharing with the patient
    pub fn patient_summary(&self) -> Vec<String> {
        match &self.outcome {
            RiskOutcome::Estimated(r) => vec![
                format!(
                    "Your starting risk over {} was {:.1}%.",
                    self.horizon.describe(),
                    r.baseline_risk
                ),
                format!(
                    "With the treatments selected, your new risk is {:.1}%.",
                    r.post_intervention_risk
                ),
                format!(
                    "This means a risk reduction of {:.1} percentage points.",
                    r.absolute_risk_reduction
                ),
            ],
            RiskOutcome::NotApplicable { reason } => vec![format!(
                "A risk estimate over {} is not available: {}.",
                self.horizon.describe(),
                reason
            )],
        }
    }
}
