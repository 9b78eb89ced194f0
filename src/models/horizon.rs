use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Time window over which cumulative CVD risk is expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Horizon {
    #[serde(rename = "5yr")]
    FiveYear,
    #[serde(rename = "10yr")]
    TenYear,
    #[serde(rename = "lifetime")]
    Lifetime,
}

impl Horizon {
    pub const ALL: [Horizon; 3] = [Horizon::FiveYear, Horizon::TenYear, Horizon::Lifetime];

    pub fn as_str(&self) -> &'static str {
        match self {
            Horizon::FiveYear => "5yr",
            Horizon::TenYear => "10yr",
            Horizon::Lifetime => "lifetime",
        }
    }

    /// Human readable label used in patient-facing text
    pub fn describe(&self) -> &'static str {
        match self {
            Horizon::FiveYear => "the next 5 years",
            Horizon::TenYear => "the next 10 years",
            Horizon::Lifetime => "your lifetime",
        }
    }
}

impl Default for Horizon {
    fn default() -> Self {
        Horizon::TenYear
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Horizon {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "5yr" => Ok(Horizon::FiveYear),
            "10yr" => Ok(Horizon::TenYear),
            "lifetime" => Ok(Horizon::Lifetime),
            other => Err(format!("Unknown horizon '{}', expected one of 5yr, 10yr, lifetime", other)),
        }
    }
}

/// Which ARR column of the intervention table applies to a horizon.
///
/// Only the 5-year horizon has its own calibrated column; 10-year and lifetime
/// both read the lifetime column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrColumn {
    FiveYear,
    Lifetime,
}

impl ArrColumn {
    pub fn for_horizon(horizon: Horizon) -> Self {
        match horizon {
            Horizon::FiveYear => ArrColumn::FiveYear,
            Horizon::TenYear | Horizon::Lifetime => ArrColumn::Lifetime,
        }
    }
}
