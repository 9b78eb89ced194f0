use cvd_risk_calculator::{
    config::{ReferenceData, Settings},
    handlers::create_router,
    services::RiskCalculator,
    utils::init_logging,
    AppState,
};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let settings = match Settings::new() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    init_logging(&settings.logging)?;
    info!("Starting CVD risk calculator");

    let reference = match ReferenceData::load(&settings.reference_data) {
        Ok(reference) => reference,
        Err(e) => {
            error!("Failed to load reference data: {}", e);
            return Err(e.into());
        }
    };

    let calculator = RiskCalculator::from_settings(Arc::new(reference), &settings);
    let app = create_router(AppState::new(calculator));

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", settings.api.host, settings.api.port)).await?;
    info!("API server listening on {}:{}", settings.api.host, settings.api.port);
    info!("  POST   /api/v1/risk/calculate - Calculate risk reduction");
    info!("  GET    /api/v1/reference/therapies - Therapy table");
    info!("  GET    /api/v1/reference/interventions - Intervention table");
    info!("  GET    /api/v1/reference/citations - Evidence citations");

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {}", e);
        }
        info!("Shutdown signal received, starting graceful shutdown");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Shutdown complete");
    Ok(())
}
