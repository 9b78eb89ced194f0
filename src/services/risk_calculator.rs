use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::{ModelSettings, ReferenceData, Settings};
use crate::models::{
    Horizon, InterventionSelection, PatientProfile, RiskOutcome, RiskReduction, RiskResult,
    TherapySelection,
};
use crate::risk::{
    AdjustmentInputs, BaselineRiskModel, HorizonConverter, HorizonRisk, InterventionAdjuster,
    LdlProjector, RiskError, SmartRiskModel, LIFETIME_REFERENCE_AGE,
};
use crate::utils::math::round_to;
use crate::validation::InputValidator;

/// Everything a caller supplies for one calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskCalculationRequest {
    pub profile: PatientProfile,
    #[serde(default)]
    pub therapies: TherapySelection,
    #[serde(default)]
    pub interventions: InterventionSelection,
    /// Systolic target, mmHg
    pub sbp_target: f64,
    #[serde(default)]
    pub horizon: Horizon,
}

/// Runs validation and the full pipeline against shared read-only tables
#[derive(Clone)]
pub struct RiskCalculator {
    model: Arc<dyn BaselineRiskModel>,
    reference: Arc<ReferenceData>,
    settings: ModelSettings,
    validator: InputValidator,
}

impl RiskCalculator {
    pub fn new(reference: Arc<ReferenceData>, settings: ModelSettings) -> Self {
        Self {
            model: Arc::new(SmartRiskModel::new()),
            reference,
            settings,
            validator: InputValidator::new(),
        }
    }

    /// Model switches and input ranges taken from loaded settings
    pub fn from_settings(reference: Arc<ReferenceData>, settings: &Settings) -> Self {
        Self::new(reference, settings.model.clone())
            .with_validator(InputValidator::with_rules(settings.validation.clone()))
    }

    /// Calculator over the built-in tables and default model settings
    pub fn with_defaults() -> Result<Self, RiskError> {
        let reference = ReferenceData::builtin().map_err(|e| RiskError::ConfigurationError {
            message: e.to_string(),
        })?;
        Ok(Self::new(Arc::new(reference), ModelSettings::default()))
    }

    pub fn with_model(mut self, model: Arc<dyn BaselineRiskModel>) -> Self {
        self.model = model;
        self
    }

    pub fn with_validator(mut self, validator: InputValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn reference_data(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn settings(&self) -> &ModelSettings {
        &self.settings
    }

    pub fn model(&self) -> &dyn BaselineRiskModel {
        self.model.as_ref()
    }

    pub fn calculate(&self, request: &RiskCalculationRequest) -> Result<RiskResult, RiskError> {
        self.compute_risk_reduction(
            &request.profile,
            &request.therapies,
            &request.interventions,
            request.sbp_target,
            request.horizon,
        )
    }

    pub fn compute_risk_reduction(
        &self,
        profile: &PatientProfile,
        therapies: &TherapySelection,
        interventions: &InterventionSelection,
        sbp_target: f64,
        horizon: Horizon,
    ) -> Result<RiskResult, RiskError> {
        if let Err(errors) = self.validator.validate_request(
            profile,
            therapies,
            interventions,
            sbp_target,
            &self.reference,
        ) {
            warn!(violations = errors.len(), "Rejected risk calculation request: {}", errors);
            return Err(errors.into());
        }

        info!(
            horizon = %horizon,
            model = self.model.model_name(),
            therapies = therapies.all().count(),
            interventions = interventions.names.len(),
            "Calculating risk reduction"
        );

        let risk10 = self.model.estimate_10y_risk(profile)?;

        let ldl = LdlProjector::from_settings(&self.reference, &self.settings).project_ldl(
            profile.baseline_ldl,
            &therapies.pre_existing,
            &therapies.add_on,
        )?;

        let converter = HorizonConverter::from_settings(&self.settings);
        let (outcome, adjustments) = match converter.baseline_for_horizon(horizon, profile.age, risk10) {
            HorizonRisk::Estimated(baseline_risk) => {
                let adjustment = InterventionAdjuster::new(&self.reference).adjust(&AdjustmentInputs {
                    baseline_risk,
                    interventions,
                    horizon,
                    ldl_before: profile.baseline_ldl,
                    ldl_after: ldl.projected,
                    sbp_current: profile.systolic_bp,
                    sbp_target,
                    hba1c: profile.hba1c,
                })?;

                let outcome = RiskOutcome::Estimated(RiskReduction {
                    baseline_risk,
                    post_intervention_risk: adjustment.final_risk,
                    absolute_risk_reduction: adjustment.absolute_risk_reduction,
                    relative_risk_reduction: adjustment.relative_risk_reduction,
                });
                (outcome, adjustment.steps)
            }
            HorizonRisk::NotApplicable => {
                let outcome = RiskOutcome::NotApplicable {
                    reason: format!(
                        "lifetime risk is only estimated below age {}",
                        LIFETIME_REFERENCE_AGE
                    ),
                };
                (outcome, Vec::new())
            }
        };

        Ok(RiskResult {
            horizon,
            outcome,
            projected_ldl: round_to(ldl.projected, 2),
            ldl_on_existing_therapy: round_to(ldl.after_existing, 2),
            adjustments,
            model: self.model.model_name().to_string(),
            reference_data_version: self.reference.version.clone(),
        })
    }
}

/// One-shot calculation with the built-in tables and default settings
pub fn compute_risk_reduction(
    profile: &PatientProfile,
    therapies: &TherapySelection,
    interventions: &InterventionSelection,
    sbp_target: f64,
    horizon: Horizon,
) -> Result<RiskResult, RiskError> {
    RiskCalculator::with_defaults()?.compute_risk_reduction(
        profile,
        therapies,
        interventions,
        sbp_target,
        horizon,
    )
}
