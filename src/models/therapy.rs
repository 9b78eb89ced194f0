use serde::{Deserialize, Serialize};

/// Lipid-lowering therapies grouped by whether the patient already takes them.
///
/// Names refer to entries of the therapy table in
/// [`crate::config::ReferenceData`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TherapySelection {
    #[serde(default)]
    pub pre_existing: Vec<String>,
    #[serde(default)]
    pub add_on: Vec<String>,
}

impl TherapySelection {
    pub fn new(pre_existing: Vec<String>, add_on: Vec<String>) -> Self {
        Self { pre_existing, add_on }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.pre_existing.is_empty() && self.add_on.is_empty()
    }

    pub fn all(&self) -> impl Iterator<Item = &String> {
        self.pre_existing.iter().chain(self.add_on.iter())
    }
}

/// One row of the therapy table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TherapyEffect {
    pub name: String,
    /// Expected LDL-C reduction when used alone, percent
    pub ldl_reduction_percent: f64,
}

/// Outcome trial backing a therapy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceCitation {
    pub therapy: String,
    pub trial: String,
    pub reference: String,
}
