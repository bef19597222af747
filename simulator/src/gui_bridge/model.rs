use crate::workflow::runner::WorkflowResult;
use serde::{Deserialize, Serialize};

/// Snapshot served to the presentation layer. Outputs that have not been
/// published yet render as the display defaults (0.0 / 0).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReadoutModel {
    pub heading_deg: f32,
    pub altitude_m: f32,
    pub accuracy: i32,
    pub samples_ingested: usize,
    pub notes: Vec<String>,
}

impl ReadoutModel {
    pub fn from_result(result: &WorkflowResult) -> Self {
        Self {
            heading_deg: result.heading_deg.unwrap_or(0.0),
            altitude_m: result.altitude_m.unwrap_or(0.0),
            accuracy: result.accuracy.unwrap_or(0),
            samples_ingested: result.samples_ingested,
            notes: result.notes.clone(),
        }
    }
}
