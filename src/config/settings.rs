use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::models::Horizon;
use crate::risk::{HorizonConversion, MIN_PLAUSIBLE_LDL_MMOL_L};
use crate::validation::ValidationRules;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub api: ApiSettings,
    pub logging: LoggingSettings,
    pub model: ModelSettings,
    /// Accepted input ranges
    pub validation: ValidationRules,
    pub reference_data: ReferenceDataSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    /// One of `json`, `pretty`, `compact`
    pub format: String,
}

/// Model variant switches and numeric ceilings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSettings {
    /// Halve the effect of add-on lipid therapy layered on existing therapy
    pub diminishing_addon_effect: bool,
    pub horizon_conversion: HorizonConversion,
    pub ldl_floor_mmol_l: f64,
    pub risk_caps: HorizonCaps,
}

/// Maximum reportable risk per horizon, percent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizonCaps {
    pub five_year: f64,
    pub ten_year: f64,
    pub lifetime: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceDataSettings {
    /// TOML file overriding the built-in tables
    pub path: Option<String>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        ModelSettings {
            diminishing_addon_effect: true,
            horizon_conversion: HorizonConversion::ConstantHazard,
            ldl_floor_mmol_l: MIN_PLAUSIBLE_LDL_MMOL_L,
            risk_caps: HorizonCaps::default(),
        }
    }
}

impl Default for HorizonCaps {
    fn default() -> Self {
        HorizonCaps {
            five_year: 80.0,
            ten_year: 85.0,
            lifetime: 90.0,
        }
    }
}

impl HorizonCaps {
    pub fn cap_for(&self, horizon: Horizon) -> f64 {
        match horizon {
            Horizon::FiveYear => self.five_year,
            Horizon::TenYear => self.ten_year,
            Horizon::Lifetime => self.lifetime,
        }
    }
}

impl ModelSettings {
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        for horizon in Horizon::ALL {
            let cap = self.risk_caps.cap_for(horizon);
            if !(cap > 0.0 && cap <= 100.0) {
                return Err(config::ConfigError::Message(format!(
                    "model.risk_caps for {} must be in (0, 100], got {}",
                    horizon, cap
                )));
            }
        }

        if !(self.ldl_floor_mmol_l > 0.0 && self.ldl_floor_mmol_l <= 2.0) {
            return Err(config::ConfigError::Message(format!(
                "model.ldl_floor_mmol_l must be in (0, 2], got {}",
                self.ldl_floor_mmol_l
            )));
        }

        Ok(())
    }
}

impl Settings {
    /// Defaults, then `config/default.toml` if present, then `CVD_RISK__*`
    /// environment variables.
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::load(Some(Path::new("config/default.toml")))
    }

    pub fn load(file: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?);

        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(false));
        }

        let settings: Settings = builder
            .add_source(
                config::Environment::with_prefix("CVD_RISK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.model.validate()?;
        Ok(settings)
    }
}
