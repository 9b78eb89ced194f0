pub mod horizon;
pub mod intervention;
pub mod patient;
pub mod risk_result;
pub mod therapy;

pub use horizon::*;
pub use intervention::*;
pub use patient::*;
pub use risk_result::*;
pub use therapy::*;
