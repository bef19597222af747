use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use compasscore::prelude::{AccuracyEvent, SampleSink, SensorEvent, StreamKind};
use compasscore::FusionEngine;

/// Nominal accuracy reported by the synthetic subscription before any
/// samples arrive, mirroring a high-accuracy magnetometer status code.
const NOMINAL_MAGNETIC_ACCURACY: i32 = 3;

pub struct WorkflowResult {
    pub heading_deg: Option<f32>,
    pub altitude_m: Option<f32>,
    pub accuracy: Option<i32>,
    pub samples_ingested: usize,
    pub notes: Vec<String>,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    /// Drives a fresh engine through the event stream and reads back the
    /// published outputs.
    pub fn execute(&self, events: &[SensorEvent]) -> anyhow::Result<WorkflowResult> {
        let mut engine = FusionEngine::new();
        engine.accuracy_changed(&AccuracyEvent {
            stream: StreamKind::Magnetic,
            accuracy: NOMINAL_MAGNETIC_ACCURACY,
        });

        for event in events {
            engine
                .ingest(event)
                .with_context(|| format!("ingesting {:?} sample", event.stream))?;
        }

        let (samples_ingested, degenerate) = engine.metrics_snapshot();
        let notes = vec![format!("degenerate headings {}", degenerate)];

        Ok(WorkflowResult {
            heading_deg: engine.heading(),
            altitude_m: engine.altitude(),
            accuracy: engine.accuracy(),
            samples_ingested,
            notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::profile::build_event_stream_from_config;

    #[test]
    fn runner_executes_workflow() {
        let cfg = WorkflowConfig::from_args(512, 90.0, 950.0);
        let runner = Runner::new(cfg.clone());
        let events = build_event_stream_from_config(&cfg.to_generator_config()).unwrap();
        let result = runner.execute(&events).unwrap();

        assert_eq!(result.samples_ingested, events.len());
        assert_eq!(result.accuracy, Some(NOMINAL_MAGNETIC_ACCURACY));
        assert!((result.heading_deg.unwrap() - 90.0).abs() < 1.0);
        assert!(result.altitude_m.unwrap() > 0.0);
    }

    #[test]
    fn runner_reports_no_outputs_for_empty_stream() {
        let cfg = WorkflowConfig::from_args(1, 0.0, 1013.25);
        let runner = Runner::new(cfg);
        let result = runner.execute(&[]).unwrap();
        assert_eq!(result.heading_deg, None);
        assert_eq!(result.altitude_m, None);
        assert_eq!(result.samples_ingested, 0);
    }
}
