pub mod input_validation;

pub use input_validation::*;
