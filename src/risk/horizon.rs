// Conversion of 10-year risk to other horizons
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{HorizonCaps, ModelSettings};
use crate::models::Horizon;
use crate::utils::math::{clamp_percent, rescale_probability, round1};

/// Horizon over which the baseline model is calibrated, years
pub const REFERENCE_HORIZON_YEARS: f64 = 10.0;

/// Age at which lifetime risk accrual ends
pub const LIFETIME_REFERENCE_AGE: u32 = 85;

/// How a 10-year probability is carried to a shorter or longer window.
///
/// Both forms assume a constant annual hazard and agree algebraically; they
/// differ only in floating point evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizonConversion {
    /// `annual = 1 - (1 - p10)^(1/10)`, then `1 - (1 - annual)^years`
    ConstantHazard,
    /// `1 - (1 - p10)^(years/10)` evaluated directly
    SquareRootApproximation,
}

/// Risk for a horizon, or a marker that the horizon does not apply
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "risk", rename_all = "snake_case")]
pub enum HorizonRisk {
    Estimated(f64),
    NotApplicable,
}

impl HorizonRisk {
    pub fn value(&self) -> Option<f64> {
        match self {
            HorizonRisk::Estimated(risk) => Some(*risk),
            HorizonRisk::NotApplicable => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HorizonConverter {
    conversion: HorizonConversion,
    caps: HorizonCaps,
}

impl Default for HorizonConverter {
    fn default() -> Self {
        Self::new(HorizonConversion::ConstantHazard, HorizonCaps::default())
    }
}

impl HorizonConverter {
    pub fn new(conversion: HorizonConversion, caps: HorizonCaps) -> Self {
        Self { conversion, caps }
    }

    pub fn from_settings(settings: &ModelSettings) -> Self {
        Self::new(settings.horizon_conversion, settings.risk_caps.clone())
    }

    pub fn caps(&self) -> &HorizonCaps {
        &self.caps
    }

    /// 5-year risk (percent) from a 10-year risk (percent)
    pub fn convert_5yr(&self, risk10: f64) -> f64 {
        let p5 = self.rescale(risk10 / 100.0, 5.0);
        clamp_percent(round1(p5 * 100.0), self.caps.five_year)
    }

    /// Risk accrued until the lifetime reference age
    pub fn estimate_lifetime_risk(&self, age: u32, risk10: f64) -> HorizonRisk {
        if age >= LIFETIME_REFERENCE_AGE {
            debug!(age = age, "Lifetime risk not applicable at or above reference age");
            return HorizonRisk::NotApplicable;
        }

        let years = (LIFETIME_REFERENCE_AGE - age) as f64;
        let lifetime = self.rescale(risk10 / 100.0, years);
        HorizonRisk::Estimated(clamp_percent(round1(lifetime * 100.0), self.caps.lifetime))
    }

    /// Capped baseline risk for the requested horizon
    pub fn baseline_for_horizon(&self, horizon: Horizon, age: u32, risk10: f64) -> HorizonRisk {
        let baseline = match horizon {
            Horizon::FiveYear => HorizonRisk::Estimated(self.convert_5yr(risk10)),
            Horizon::TenYear => HorizonRisk::Estimated(clamp_percent(risk10, self.caps.ten_year)),
            Horizon::Lifetime => self.estimate_lifetime_risk(age, risk10),
        };

        debug!(
            horizon = %horizon,
            risk_10y = %risk10,
            baseline = ?baseline,
            "Selected baseline risk for horizon"
        );

        baseline
    }

    fn rescale(&self, p10: f64, years: f64) -> f64 {
        let p10 = p10.max(0.0).min(1.0);
        match self.conversion {
            HorizonConversion::ConstantHazard => {
                rescale_probability(p10, REFERENCE_HORIZON_YEARS, years)
            }
            HorizonConversion::SquareRootApproximation => {
                1.0 - (1.0 - p10).powf(years / REFERENCE_HORIZON_YEARS)
            }
        }
    }
}

/// 5-year risk with the default converter
pub fn convert_5yr(risk10: f64) -> f64 {
    HorizonConverter::default().convert_5yr(risk10)
}

/// Lifetime risk with the default converter
pub fn estimate_lifetime_risk(age: u32, risk10: f64) -> HorizonRisk {
    HorizonConverter::default().estimate_lifetime_risk(age, risk10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_5yr_golden() {
        assert_eq!(convert_5yr(23.9), 12.8);
    }

    #[test]
    fn test_conversion_variants_agree_on_golden() {
        let approx = HorizonConverter::new(
            HorizonConversion::SquareRootApproximation,
            HorizonCaps::default(),
        );
        assert_eq!(approx.convert_5yr(23.9), convert_5yr(23.9));
    }

    #[test]
    fn test_convert_5yr_is_capped() {
        // 1 - (1 - 0.95)^0.5 = 77.6%, below the 80% ceiling
        assert_eq!(convert_5yr(95.0), 77.6);
        let tight = HorizonConverter::new(
            HorizonConversion::ConstantHazard,
            HorizonCaps {
                five_year: 50.0,
                ..HorizonCaps::default()
            },
        );
        assert_eq!(tight.convert_5yr(95.0), 50.0);
    }

    #[test]
    fn test_convert_5yr_zero() {
        assert_eq!(convert_5yr(0.0), 0.0);
    }

    #[test]
    fn test_lifetime_golden() {
        assert_eq!(estimate_lifetime_risk(60, 23.9), HorizonRisk::Estimated(49.5));
    }

    #[test]
    fn test_lifetime_not_applicable_at_85() {
        assert_eq!(estimate_lifetime_risk(85, 40.0), HorizonRisk::NotApplicable);
        assert_eq!(estimate_lifetime_risk(90, 40.0), HorizonRisk::NotApplicable);
        assert_eq!(estimate_lifetime_risk(90, 40.0).value(), None);
    }

    #[test]
    fn test_lifetime_is_capped() {
        assert_eq!(estimate_lifetime_risk(30, 60.0), HorizonRisk::Estimated(90.0));
    }

    #[test]
    fn test_ten_year_baseline_capped_at_85() {
        let converter = HorizonConverter::default();
        assert_eq!(
            converter.baseline_for_horizon(Horizon::TenYear, 70, 95.0),
            HorizonRisk::Estimated(85.0)
        );
        assert_eq!(
            converter.baseline_for_horizon(Horizon::TenYear, 70, 23.9),
            HorizonRisk::Estimated(23.9)
        );
    }
}
