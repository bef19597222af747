pub mod altitude;
pub mod heading;

pub use altitude::{pressure_to_altitude, PRESSURE_STANDARD_ATMOSPHERE};
pub use heading::compute_heading;
