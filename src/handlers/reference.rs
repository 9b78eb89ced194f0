use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::error::AppError;
use crate::models::{EvidenceCitation, InterventionEffect, TherapyEffect};
use crate::AppState;

/// Active baseline model with its coefficient version and covariates
pub async fn model_info(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(state.calculator.model().get_config())
}

pub async fn list_therapies(State(state): State<AppState>) -> Json<Vec<TherapyEffect>> {
    Json(state.calculator.reference_data().therapies.clone())
}

pub async fn list_interventions(State(state): State<AppState>) -> Json<Vec<InterventionEffect>> {
    Json(state.calculator.reference_data().interventions.clone())
}

pub async fn list_citations(State(state): State<AppState>) -> Json<Vec<EvidenceCitation>> {
    Json(state.calculator.reference_data().citations.clone())
}

pub async fn get_citation(
    State(state): State<AppState>,
    Path(therapy): Path<String>,
) -> Result<Json<EvidenceCitation>, AppError> {
    state
        .calculator
        .reference_data()
        .citation(&therapy)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("no citation for therapy '{}'", therapy)))
}
