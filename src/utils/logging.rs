use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingSettings;

/// Default filter directive when `RUST_LOG` is not set
pub fn default_directive(settings: &LoggingSettings) -> String {
    let level = settings
        .level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);
    format!("cvd_risk_calculator={}", level)
}

/// Install the global subscriber. Format is one of `json`, `pretty` or
/// `compact`; anything else falls back to compact.
pub fn init_logging(settings: &LoggingSettings) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(settings)));

    match settings.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()?;
        }
        "pretty" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .try_init()?;
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().compact())
                .try_init()?;
        }
    }

    info!("Logging initialized with level: {}, format: {}", settings.level, settings.format);
    Ok(())
}
