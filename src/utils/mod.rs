pub mod logging;
pub mod math;

pub use logging::init_logging;
