pub mod risk_calculator;

pub use risk_calculator::*;
