use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use super::settings::ReferenceDataSettings;
use crate::models::{EvidenceCitation, InterventionEffect, TherapyEffect};

const BUILTIN_REFERENCE_DATA: &str = include_str!("../../config/reference_data.toml");

#[derive(Error, Debug)]
pub enum ReferenceDataError {
    #[error("Failed to read reference data from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse reference data: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid reference data: {0}")]
    Invalid(String),
}

/// Versioned lookup tables: therapy LDL effects, intervention ARRs and
/// evidence citations. Loaded once at startup and shared read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    pub version: String,
    pub therapies: Vec<TherapyEffect>,
    pub interventions: Vec<InterventionEffect>,
    #[serde(default)]
    pub citations: Vec<EvidenceCitation>,
}

impl ReferenceData {
    /// Tables shipped with the crate
    pub fn builtin() -> Result<Self, ReferenceDataError> {
        Self::from_toml_str(BUILTIN_REFERENCE_DATA)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ReferenceDataError> {
        let data: ReferenceData = toml::from_str(contents)?;
        data.validate()?;
        Ok(data)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ReferenceDataError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ReferenceDataError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Load the override file if one is configured, otherwise the built-in tables
    pub fn load(settings: &ReferenceDataSettings) -> Result<Self, ReferenceDataError> {
        let data = match &settings.path {
            Some(path) => Self::from_file(path)?,
            None => Self::builtin()?,
        };

        info!(
            version = %data.version,
            therapies = data.therapies.len(),
            interventions = data.interventions.len(),
            citations = data.citations.len(),
            source = settings.path.as_deref().unwrap_or("builtin"),
            "Reference data loaded"
        );

        Ok(data)
    }

    pub fn validate(&self) -> Result<(), ReferenceDataError> {
        if self.version.trim().is_empty() {
            return Err(ReferenceDataError::Invalid("version must not be empty".to_string()));
        }

        let mut therapy_names = HashSet::new();
        for therapy in &self.therapies {
            if !therapy_names.insert(therapy.name.as_str()) {
                return Err(ReferenceDataError::Invalid(format!(
                    "duplicate therapy '{}'",
                    therapy.name
                )));
            }
            let pct = therapy.ldl_reduction_percent;
            if !pct.is_finite() || pct <= 0.0 || pct >= 100.0 {
                return Err(ReferenceDataError::Invalid(format!(
                    "therapy '{}' LDL reduction must be in (0, 100), got {}",
                    therapy.name, pct
                )));
            }
        }

        let mut intervention_names = HashSet::new();
        for intervention in &self.interventions {
            if !intervention_names.insert(intervention.name.as_str()) {
                return Err(ReferenceDataError::Invalid(format!(
                    "duplicate intervention '{}'",
                    intervention.name
                )));
            }
            for (column, arr) in [("arr_5yr", intervention.arr_5yr), ("arr_lifetime", intervention.arr_lifetime)] {
                if !arr.is_finite() || arr < 0.0 || arr >= 100.0 {
                    return Err(ReferenceDataError::Invalid(format!(
                        "intervention '{}' {} must be in [0, 100), got {}",
                        intervention.name, column, arr
                    )));
                }
            }
        }

        let mut cited = HashSet::new();
        for citation in &self.citations {
            if !therapy_names.contains(citation.therapy.as_str()) {
                return Err(ReferenceDataError::Invalid(format!(
                    "citation refers to unknown therapy '{}'",
                    citation.therapy
                )));
            }
            if !cited.insert(citation.therapy.as_str()) {
                return Err(ReferenceDataError::Invalid(format!(
                    "more than one citation for therapy '{}'",
                    citation.therapy
                )));
            }
        }

        Ok(())
    }

    pub fn therapy(&self, name: &str) -> Option<&TherapyEffect> {
        self.therapies.iter().find(|t| t.name == name)
    }

    pub fn ldl_reduction_percent(&self, name: &str) -> Option<f64> {
        self.therapy(name).map(|t| t.ldl_reduction_percent)
    }

    pub fn intervention(&self, name: &str) -> Option<&InterventionEffect> {
        self.interventions.iter().find(|i| i.name == name)
    }

    pub fn citation(&self, therapy: &str) -> Option<&EvidenceCitation> {
        self.citations.iter().find(|c| c.therapy == therapy)
    }
}
