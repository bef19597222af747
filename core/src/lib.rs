//! Sensor-fusion core for the compass readout platform.
//!
//! The modules mirror the original handset compass sample while providing
//! an explicit engine lifetime, tagged stream dispatch, and well-defined
//! derivation steps for heading and altitude.

pub mod fusion;
pub mod math;
pub mod prelude;
pub mod telemetry;

pub use fusion::FusionEngine;
pub use prelude::{AccuracyEvent, SampleSink, SensorEvent, StreamKind};
