// Risk computation pipeline: baseline estimate, horizon conversion,
// LDL projection and intervention adjustment

pub mod adjuster;
pub mod errors;
pub mod estimator;
pub mod horizon;
pub mod ldl;
pub mod traits;

// Re-export main types
pub use adjuster::*;
pub use errors::*;
pub use estimator::*;
pub use horizon::*;
pub use ldl::*;
pub use traits::*;
