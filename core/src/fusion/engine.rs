use crate::fusion::lowpass::LowPass;
use crate::math::altitude::pressure_to_altitude;
use crate::math::heading::compute_heading;
use crate::prelude::{
    AccuracyEvent, FusionError, FusionResult, SampleSink, SensorEvent, StreamKind,
};
use crate::telemetry::log::LogManager;
use crate::telemetry::metrics::MetricsRecorder;
use tokio::sync::watch;

/// One-way readiness flags, set on the first sample of each stream and
/// never cleared for the engine's lifetime.
#[derive(Debug, Clone, Copy, Default)]
struct Readiness {
    accelerometer: bool,
    magnetometer: bool,
    pressure: bool,
}

/// Accumulate-and-derive filter fusing three sensor streams.
///
/// Each ingested sample is low-passed into the matching buffer; once the
/// relevant streams have reported at least once, heading and altitude are
/// recomputed after every sample and published through watch channels.
/// Single mutator assumed; only the watch readers cross threads.
pub struct FusionEngine {
    accelerometer: LowPass,
    magnetometer: LowPass,
    pressure: LowPass,
    ready: Readiness,
    heading_tx: watch::Sender<Option<f32>>,
    altitude_tx: watch::Sender<Option<f32>>,
    accuracy_tx: watch::Sender<Option<i32>>,
    logger: LogManager,
    metrics: MetricsRecorder,
}

impl FusionEngine {
    pub fn new() -> Self {
        let (heading_tx, _) = watch::channel(None);
        let (altitude_tx, _) = watch::channel(None);
        let (accuracy_tx, _) = watch::channel(None);
        Self {
            accelerometer: LowPass::new(),
            magnetometer: LowPass::new(),
            pressure: LowPass::new(),
            ready: Readiness::default(),
            heading_tx,
            altitude_tx,
            accuracy_tx,
            logger: LogManager::new(),
            metrics: MetricsRecorder::new(),
        }
    }

    /// Latest published heading in degrees, [0, 360).
    pub fn heading(&self) -> Option<f32> {
        *self.heading_tx.borrow()
    }

    /// Latest published altitude in meters above sea level.
    pub fn altitude(&self) -> Option<f32> {
        *self.altitude_tx.borrow()
    }

    /// Latest published magnetic-field accuracy code.
    pub fn accuracy(&self) -> Option<i32> {
        *self.accuracy_tx.borrow()
    }

    pub fn subscribe_heading(&self) -> watch::Receiver<Option<f32>> {
        self.heading_tx.subscribe()
    }

    pub fn subscribe_altitude(&self) -> watch::Receiver<Option<f32>> {
        self.altitude_tx.subscribe()
    }

    pub fn subscribe_accuracy(&self) -> watch::Receiver<Option<i32>> {
        self.accuracy_tx.subscribe()
    }

    /// (samples ingested, degenerate heading occurrences).
    pub fn metrics_snapshot(&self) -> (usize, usize) {
        self.metrics.snapshot()
    }

    fn check_arity(event: &SensorEvent, expected: usize) -> FusionResult<()> {
        if event.values.len() < expected {
            return Err(FusionError::InvalidInput(format!(
                "{:?} sample carries {} components, expected {}",
                event.stream,
                event.values.len(),
                expected
            )));
        }
        Ok(())
    }

    fn recompute(&mut self) {
        if self.ready.accelerometer && self.ready.magnetometer {
            match compute_heading(self.accelerometer.state(), self.magnetometer.state()) {
                Some(heading) => {
                    self.heading_tx.send_replace(Some(heading));
                }
                None => {
                    // Gravity and field are parallel: hold the last good
                    // heading, 0.0 before one exists.
                    self.metrics.record_degenerate();
                    self.logger
                        .flag("degenerate attitude input, holding prior heading");
                    let prior = self.heading().unwrap_or(0.0);
                    self.heading_tx.send_replace(Some(prior));
                }
            }
        }
        if self.ready.pressure {
            self.altitude_tx
                .send_replace(Some(pressure_to_altitude(self.pressure.first())));
        }
    }
}

impl SampleSink for FusionEngine {
    fn ingest(&mut self, event: &SensorEvent) -> FusionResult<()> {
        match event.stream {
            StreamKind::Accelerometer => {
                Self::check_arity(event, 3)?;
                self.accelerometer.apply(&event.values);
                self.ready.accelerometer = true;
            }
            StreamKind::Magnetic => {
                Self::check_arity(event, 3)?;
                self.magnetometer.apply(&event.values);
                self.ready.magnetometer = true;
            }
            StreamKind::Pressure => {
                Self::check_arity(event, 1)?;
                self.pressure.apply(&event.values);
                self.ready.pressure = true;
            }
        }
        self.metrics.record_sample();
        self.recompute();
        Ok(())
    }

    fn accuracy_changed(&mut self, event: &AccuracyEvent) {
        self.logger
            .record(&format!("accuracy is: {}", event.accuracy));
        if event.stream == StreamKind::Magnetic {
            self.accuracy_tx.send_replace(Some(event.accuracy));
        }
    }
}

impl Default for FusionEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::altitude::PRESSURE_STANDARD_ATMOSPHERE;

    const FLAT_GRAVITY: [f32; 3] = [0.0, 0.0, 9.81];
    const EAST_FIELD: [f32; 3] = [31.0, 0.0, -24.0];

    fn sample(stream: StreamKind, values: &[f32]) -> SensorEvent {
        SensorEvent::new(stream, values.to_vec(), None)
    }

    #[test]
    fn heading_waits_for_both_attitude_streams() {
        let mut engine = FusionEngine::new();
        engine
            .ingest(&sample(StreamKind::Accelerometer, &FLAT_GRAVITY))
            .unwrap();
        assert_eq!(engine.heading(), None);

        engine
            .ingest(&sample(StreamKind::Magnetic, &EAST_FIELD))
            .unwrap();
        let heading = engine.heading().unwrap();
        assert!((heading - 90.0).abs() < 1e-2);
    }

    #[test]
    fn altitude_waits_for_pressure() {
        let mut engine = FusionEngine::new();
        engine
            .ingest(&sample(StreamKind::Accelerometer, &FLAT_GRAVITY))
            .unwrap();
        engine
            .ingest(&sample(StreamKind::Magnetic, &EAST_FIELD))
            .unwrap();
        assert_eq!(engine.altitude(), None);

        engine
            .ingest(&sample(
                StreamKind::Pressure,
                &[PRESSURE_STANDARD_ATMOSPHERE],
            ))
            .unwrap();
        // One smoothing step from zero lands well below reference pressure,
        // so the derived altitude is far above sea level but defined.
        assert!(engine.altitude().is_some());
    }

    #[test]
    fn smoothed_pressure_converges_to_sea_level_altitude() {
        let mut engine = FusionEngine::new();
        for _ in 0..400 {
            engine
                .ingest(&sample(
                    StreamKind::Pressure,
                    &[PRESSURE_STANDARD_ATMOSPHERE],
                ))
                .unwrap();
        }
        assert!(engine.altitude().unwrap().abs() < 0.1);
    }

    #[test]
    fn accuracy_updates_only_on_magnetic_events() {
        let mut engine = FusionEngine::new();
        engine.accuracy_changed(&AccuracyEvent {
            stream: StreamKind::Accelerometer,
            accuracy: 1,
        });
        engine.accuracy_changed(&AccuracyEvent {
            stream: StreamKind::Pressure,
            accuracy: 2,
        });
        assert_eq!(engine.accuracy(), None);

        engine.accuracy_changed(&AccuracyEvent {
            stream: StreamKind::Magnetic,
            accuracy: 3,
        });
        assert_eq!(engine.accuracy(), Some(3));
    }

    #[test]
    fn degenerate_input_defaults_to_zero_heading() {
        let mut engine = FusionEngine::new();
        engine
            .ingest(&sample(StreamKind::Accelerometer, &[0.0, 0.0, 9.81]))
            .unwrap();
        engine
            .ingest(&sample(StreamKind::Magnetic, &[0.0, 0.0, 50.0]))
            .unwrap();
        assert_eq!(engine.heading(), Some(0.0));
        assert_eq!(engine.metrics_snapshot().1, 1);
    }

    #[test]
    fn degenerate_input_holds_prior_heading() {
        let mut engine = FusionEngine::new();
        for _ in 0..5 {
            engine
                .ingest(&sample(StreamKind::Accelerometer, &FLAT_GRAVITY))
                .unwrap();
            engine
                .ingest(&sample(StreamKind::Magnetic, &EAST_FIELD))
                .unwrap();
        }
        let established = engine.heading().unwrap();
        assert!((established - 90.0).abs() < 1e-2);

        // Drive the smoothed field parallel to gravity until the rotation
        // matrix collapses; the published heading must not move.
        for _ in 0..300 {
            engine
                .ingest(&sample(StreamKind::Magnetic, &[0.0, 0.0, 31.0]))
                .unwrap();
        }
        assert!(engine.metrics_snapshot().1 > 0);
        assert!((engine.heading().unwrap() - established).abs() < 1e-2);
    }

    #[test]
    fn short_attitude_sample_is_rejected() {
        let mut engine = FusionEngine::new();
        let err = engine
            .ingest(&sample(StreamKind::Magnetic, &[1.0, 2.0]))
            .unwrap_err();
        assert!(matches!(err, FusionError::InvalidInput(_)));
    }

    #[test]
    fn watch_subscribers_observe_published_values() {
        let mut engine = FusionEngine::new();
        let heading_rx = engine.subscribe_heading();
        let altitude_rx = engine.subscribe_altitude();

        engine
            .ingest(&sample(StreamKind::Accelerometer, &FLAT_GRAVITY))
            .unwrap();
        engine
            .ingest(&sample(StreamKind::Magnetic, &EAST_FIELD))
            .unwrap();
        engine
            .ingest(&sample(StreamKind::Pressure, &[1000.0]))
            .unwrap();

        assert!(heading_rx.borrow().is_some());
        assert!(altitude_rx.borrow().is_some());
    }
}
