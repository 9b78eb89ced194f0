pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod risk;
pub mod services;
pub mod utils;
pub mod validation;

pub use error::types::*;

use std::sync::Arc;

use services::RiskCalculator;

/// Shared handler state; everything inside is read-only after startup
#[derive(Clone)]
pub struct AppState {
    pub calculator: Arc<RiskCalculator>,
}

impl AppState {
    pub fn new(calculator: RiskCalculator) -> Self {
        Self {
            calculator: Arc::new(calculator),
        }
    }
}
