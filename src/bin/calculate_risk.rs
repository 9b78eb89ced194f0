// Run one risk calculation from a JSON request file (or stdin) and print the result
use cvd_risk_calculator::{
    config::{ReferenceData, Settings},
    risk::RiskError,
    services::{RiskCalculationRequest, RiskCalculator},
};
use std::io::Read;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn read_request(path: Option<String>) -> Result<RiskCalculationRequest, Box<dyn std::error::Error>> {
    let contents = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    Ok(serde_json::from_str(&contents)?)
}

fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let settings = Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("cvd_risk_calculator={}", settings.logging.level))),
        )
        .with_writer(std::io::stderr)
        .init();

    let reference = ReferenceData::load(&settings.reference_data)?;
    let calculator = RiskCalculator::from_settings(Arc::new(reference), &settings);
    let request = read_request(std::env::args().nth(1))?;

    match calculator.calculate(&request) {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            for line in result.patient_summary() {
                eprintln!("{}", line);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(RiskError::Validation(errors)) => {
            eprintln!("Request rejected:");
            for error in errors.iter() {
                eprintln!("  - {}", error);
            }
            Ok(ExitCode::from(2))
        }
        Err(e) => Err(e.into()),
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
