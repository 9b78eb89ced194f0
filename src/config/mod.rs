pub mod reference_data;
pub mod settings;

pub use reference_data::*;
pub use settings::*;
