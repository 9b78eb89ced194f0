use serde::{Deserialize, Serialize};

use super::horizon::{ArrColumn, Horizon};

/// Lifestyle or medical interventions chosen for the patient
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterventionSelection {
    pub names: Vec<String>,
}

impl InterventionSelection {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// One row of the intervention table. ARR values are percentage points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterventionEffect {
    pub name: String,
    pub arr_5yr: f64,
    pub arr_lifetime: f64,
}

impl InterventionEffect {
    pub fn arr_for(&self, horizon: Horizon) -> f64 {
        match ArrColumn::for_horizon(horizon) {
            ArrColumn::FiveYear => self.arr_5yr,
            ArrColumn::Lifetime => self.arr_lifetime,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arr_for_uses_lifetime_column_beyond_five_years() {
        let effect = InterventionEffect {
            name: "Smoking cessation".to_string(),
            arr_5yr: 5.0,
            arr_lifetime: 17.0,
        };
        assert_eq!(effect.arr_for(Horizon::FiveYear), 5.0);
        assert_eq!(effect.arr_for(Horizon::TenYear), 17.0);
        assert_eq!(effect.arr_for(Horizon::Lifetime), 17.0);
    }

    #[test]
    fn test_selection_is_a_plain_json_array() {
        let selection: InterventionSelection =
            serde_json::from_str(r#"["Mediterranean diet", "Physical activity"]"#).unwrap();
        assert!(selection.contains("Physical activity"));
        assert!(!selection.contains("Stress reduction"));
    }
}
