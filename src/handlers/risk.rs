use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, info_span};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::RiskResult;
use crate::services::RiskCalculationRequest;
use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct RiskCalculationResponse {
    pub calculation_id: Uuid,
    pub calculated_at: DateTime<Utc>,
    pub result: RiskResult,
    pub patient_summary: Vec<String>,
}

pub async fn calculate_risk(
    State(state): State<AppState>,
    payload: Result<Json<RiskCalculationRequest>, JsonRejection>,
) -> Result<Json<RiskCalculationResponse>, AppError> {
    let Json(request) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let calculation_id = Uuid::new_v4();
    let span = info_span!("risk_calculation", calculation_id = %calculation_id);
    let _guard = span.enter();

    let result = state.calculator.calculate(&request)?;
    info!(applicable = result.outcome.is_applicable(), "Risk calculation completed");

    Ok(Json(RiskCalculationResponse {
        calculation_id,
        calculated_at: Utc::now(),
        patient_summary: result.patient_summary(),
        result,
    }))
}
