// LDL-C projection under lipid-lowering therapy
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{ModelSettings, ReferenceData};
use crate::risk::RiskError;

/// Lowest LDL-C the projection will report, mmol/L
pub const MIN_PLAUSIBLE_LDL_MMOL_L: f64 = 1.0;

/// Share of an add-on therapy's listed effect retained on top of existing therapy
pub const ADDON_EFFECT_FACTOR: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LdlProjection {
    pub baseline: f64,
    /// After pre-existing therapy, floored
    pub after_existing: f64,
    /// After add-on therapy, floored
    pub projected: f64,
}

pub struct LdlProjector<'a> {
    reference: &'a ReferenceData,
    diminishing_addon_effect: bool,
    floor: f64,
}

impl<'a> LdlProjector<'a> {
    pub fn new(reference: &'a ReferenceData, diminishing_addon_effect: bool, floor: f64) -> Self {
        Self {
            reference,
            diminishing_addon_effect,
            floor,
        }
    }

    pub fn from_settings(reference: &'a ReferenceData, settings: &ModelSettings) -> Self {
        Self::new(
            reference,
            settings.diminishing_addon_effect,
            settings.ldl_floor_mmol_l,
        )
    }

    pub fn floor(&self) -> f64 {
        self.floor
    }

    /// Apply pre-existing then add-on therapies multiplicatively. The floor
    /// is applied after each group, so even an untreated LDL below the floor
    /// is reported at the floor.
    pub fn project_ldl(
        &self,
        baseline_ldl: f64,
        pre_therapies: &[String],
        add_therapies: &[String],
    ) -> Result<LdlProjection, RiskError> {
        if !baseline_ldl.is_finite() || baseline_ldl <= 0.0 {
            return Err(RiskError::invalid_input(
                "baseline_ldl",
                format!("must be a positive number, got {}", baseline_ldl),
            ));
        }

        let mut ldl = baseline_ldl;
        for name in pre_therapies {
            ldl *= 1.0 - self.reduction_percent(name)? / 100.0;
        }
        let after_existing = ldl.max(self.floor);

        let addon_factor = if self.diminishing_addon_effect {
            ADDON_EFFECT_FACTOR
        } else {
            1.0
        };

        let mut ldl = after_existing;
        for name in add_therapies {
            ldl *= 1.0 - self.reduction_percent(name)? / 100.0 * addon_factor;
        }
        let projected = ldl.max(self.floor);

        debug!(
            baseline_ldl = %baseline_ldl,
            after_existing = %after_existing,
            projected = %projected,
            pre_therapies = pre_therapies.len(),
            add_therapies = add_therapies.len(),
            diminishing_addon_effect = self.diminishing_addon_effect,
            "Projected LDL-C"
        );

        Ok(LdlProjection {
            baseline: baseline_ldl,
            after_existing,
            projected,
        })
    }

    fn reduction_percent(&self, name: &str) -> Result<f64, RiskError> {
        self.reference
            .ldl_reduction_percent(name)
            .ok_or_else(|| RiskError::UnknownTherapy {
                name: name.to_string(),
            })
    }
}
