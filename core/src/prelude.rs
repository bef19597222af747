use serde::{Deserialize, Serialize};

/// Identifies which sensor stream produced an event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StreamKind {
    Accelerometer,
    Magnetic,
    Pressure,
}

/// One raw sample delivered by the sensor subscription.
///
/// Accelerometer and magnetometer events carry three components;
/// pressure events carry at least one (hPa in the first slot).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorEvent {
    pub stream: StreamKind,
    pub values: Vec<f32>,
    pub timestamp: Option<f64>,
}

impl SensorEvent {
    pub fn new(stream: StreamKind, values: Vec<f32>, timestamp: Option<f64>) -> Self {
        Self {
            stream,
            values,
            timestamp,
        }
    }
}

/// Accuracy notification for a stream, delivered out of band with samples.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AccuracyEvent {
    pub stream: StreamKind,
    pub accuracy: i32,
}

/// Common error type for sample ingestion.
#[derive(thiserror::Error, Debug)]
pub enum FusionError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type FusionResult<T> = Result<T, FusionError>;

/// Trait describing consumers of delivered sensor events.
pub trait SampleSink {
    fn ingest(&mut self, event: &SensorEvent) -> FusionResult<()>;
    fn accuracy_changed(&mut self, event: &AccuracyEvent);
}
