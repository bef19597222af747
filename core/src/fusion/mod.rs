pub mod engine;
pub mod lowpass;

pub use engine::FusionEngine;
pub use lowpass::{LowPass, SMOOTHING_FACTOR};
