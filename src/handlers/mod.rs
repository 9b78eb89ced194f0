pub mod health;
pub mod reference;
pub mod risk;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::AppState;

pub use health::health_check;
pub use reference::{get_citation, list_citations, list_interventions, list_therapies, model_info};
pub use risk::{calculate_risk, RiskCalculationResponse};

pub fn create_reference_routes() -> Router<AppState> {
    Router::new()
        .route("/model", get(model_info))
        .route("/therapies", get(list_therapies))
        .route("/interventions", get(list_interventions))
        .route("/citations", get(list_citations))
        .route("/citations/:therapy", get(get_citation))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/risk/calculate", post(calculate_risk))
        .nest("/api/v1/reference", create_reference_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
