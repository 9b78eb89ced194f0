// Sequential multiplicative risk adjustment
use tracing::debug;

use crate::config::ReferenceData;
use crate::models::{AdjustmentStep, Horizon, InterventionSelection};
use crate::risk::RiskError;
use crate::utils::math::{apply_relative_reduction, round1};

/// Relative risk reduction per 1 mmol/L LDL-C lowering, percent
pub const LDL_RRR_PER_MMOL: f64 = 22.0;
pub const LDL_RRR_CAP: f64 = 35.0;

/// Relative risk reduction per 10 mmHg systolic lowering, percent
pub const BP_RRR_PER_10_MMHG: f64 = 15.0;
pub const BP_RRR_CAP: f64 = 20.0;

/// HbA1c above which glycaemic control is credited, %
pub const HBA1C_TARGET: f64 = 7.0;
pub const HBA1C_RRR_PER_POINT: f64 = 9.0;
pub const HBA1C_RRR_CAP: f64 = 30.0;

/// Ceiling on reported relative risk reduction, percent
pub const MAX_RELATIVE_RISK_REDUCTION: f64 = 75.0;

#[derive(Debug, Clone)]
pub struct AdjustmentInputs<'a> {
    /// Baseline risk already capped for the horizon, percent
    pub baseline_risk: f64,
    pub interventions: &'a InterventionSelection,
    pub horizon: Horizon,
    pub ldl_before: f64,
    pub ldl_after: f64,
    pub sbp_current: f64,
    pub sbp_target: f64,
    pub hba1c: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Adjustment {
    pub final_risk: f64,
    pub absolute_risk_reduction: f64,
    pub relative_risk_reduction: f64,
    pub steps: Vec<AdjustmentStep>,
}

pub struct InterventionAdjuster<'a> {
    reference: &'a ReferenceData,
}

impl<'a> InterventionAdjuster<'a> {
    pub fn new(reference: &'a ReferenceData) -> Self {
        Self { reference }
    }

    /// Apply interventions, then LDL, BP and HbA1c reductions, each to the
    /// risk remaining after the previous step. The order is fixed.
    pub fn adjust(&self, inputs: &AdjustmentInputs<'_>) -> Result<Adjustment, RiskError> {
        for name in &inputs.interventions.names {
            if self.reference.intervention(name).is_none() {
                return Err(RiskError::UnknownIntervention { name: name.clone() });
            }
        }

        let mut remaining = inputs.baseline_risk / 100.0;
        let mut steps = Vec::new();
        let mut record = |source: &str, reduction: f64, remaining: f64| {
            steps.push(AdjustmentStep {
                source: source.to_string(),
                relative_reduction: reduction,
                remaining_risk: remaining * 100.0,
            });
        };

        // Reference-table order keeps results independent of selection order
        for effect in &self.reference.interventions {
            if inputs.interventions.contains(&effect.name) {
                let arr = effect.arr_for(inputs.horizon);
                remaining = apply_relative_reduction(remaining, arr);
                record(&effect.name, arr, remaining);
            }
        }

        if let Some(rrr) = ldl_relative_reduction(inputs.ldl_before, inputs.ldl_after) {
            remaining = apply_relative_reduction(remaining, rrr);
            record("LDL-C lowering", rrr, remaining);
        }

        if let Some(rrr) = bp_relative_reduction(inputs.sbp_current, inputs.sbp_target) {
            remaining = apply_relative_reduction(remaining, rrr);
            record("Blood pressure lowering", rrr, remaining);
        }

        if let Some(rrr) = hba1c_relative_reduction(inputs.hba1c) {
            remaining = apply_relative_reduction(remaining, rrr);
            record("Glycaemic control", rrr, remaining);
        }

        let final_risk = round1(remaining * 100.0);
        let absolute_risk_reduction = round1(inputs.baseline_risk - final_risk);
        let relative_risk_reduction = if inputs.baseline_risk == 0.0 {
            0.0
        } else {
            round1(
                (absolute_risk_reduction / inputs.baseline_risk * 100.0)
                    .min(MAX_RELATIVE_RISK_REDUCTION),
            )
        };

        debug!(
            horizon = %inputs.horizon,
            baseline_risk = %inputs.baseline_risk,
            final_risk = %final_risk,
            arr = %absolute_risk_reduction,
            rrr = %relative_risk_reduction,
            steps = steps.len(),
            "Applied risk adjustments"
        );

        Ok(Adjustment {
            final_risk,
            absolute_risk_reduction,
            relative_risk_reduction,
            steps,
        })
    }
}

/// Credit for LDL-C lowering, percent; `None` when LDL did not fall
pub fn ldl_relative_reduction(ldl_before: f64, ldl_after: f64) -> Option<f64> {
    (ldl_after < ldl_before)
        .then(|| (LDL_RRR_PER_MMOL * (ldl_before - ldl_after)).min(LDL_RRR_CAP))
}

/// Credit for systolic lowering, percent; `None` when the target is not lower
pub fn bp_relative_reduction(sbp_current: f64, sbp_target: f64) -> Option<f64> {
    (sbp_target < sbp_current)
        .then(|| (BP_RRR_PER_10_MMHG * ((sbp_current - sbp_target) / 10.0)).min(BP_RRR_CAP))
}

/// Credit for bringing HbA1c to target, percent; `None` at or below target
pub fn hba1c_relative_reduction(hba1c: f64) -> Option<f64> {
    (hba1c > HBA1C_TARGET)
        .then(|| ((hba1c - HBA1C_TARGET) * HBA1C_RRR_PER_POINT).min(HBA1C_RRR_CAP))
}
