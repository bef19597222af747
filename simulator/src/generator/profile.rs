use anyhow::Context;
use compasscore::prelude::{SensorEvent, StreamKind};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Standard gravity magnitude reported by a still, face-up device (m/s^2).
const GRAVITY_EARTH: f32 = 9.80665;

/// Magnetic dip angle used for the synthetic field, typical mid-latitude.
const DIP_RAD: f32 = 1.0471976; // 60 degrees

/// Delivery interval between samples of one stream, roughly the UI rate.
const SAMPLE_INTERVAL_S: f64 = 0.02;

/// Configuration for generating a synthetic sensor event stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub samples: usize,
    pub heading_deg: f32,
    pub pressure_hpa: f32,
    pub field_strength: f32,
    pub noise: f32,
    pub seed: u64,
    pub scenario: Option<String>,
    pub description: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            samples: 256,
            heading_deg: 0.0,
            pressure_hpa: 1013.25,
            field_strength: 48.0,
            noise: 0.02,
            seed: 0,
            scenario: None,
            description: None,
        }
    }
}

impl GeneratorConfig {
    fn normalized_samples(&self) -> usize {
        self.samples.max(1)
    }
}

fn jitter(rng: &mut StdRng, noise: f32) -> f32 {
    if noise > 0.0 {
        rng.gen_range(-noise..noise)
    } else {
        0.0
    }
}

/// Synthesizes interleaved accelerometer, magnetometer, and pressure events
/// for a device held flat and facing `heading_deg`. Feeding the stream
/// through the fusion engine converges on the configured heading and the
/// barometric altitude of `pressure_hpa`.
pub fn build_event_stream_from_config(config: &GeneratorConfig) -> anyhow::Result<Vec<SensorEvent>> {
    let samples = config.normalized_samples();
    let event_count = samples
        .checked_mul(3)
        .context("overflow computing event count for generator")?;

    let heading_rad = config.heading_deg.to_radians();
    let horizontal = config.field_strength * DIP_RAD.cos();
    let vertical = -config.field_strength * DIP_RAD.sin();

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut events = Vec::with_capacity(event_count);

    for index in 0..samples {
        let timestamp = Some(index as f64 * SAMPLE_INTERVAL_S);
        events.push(SensorEvent::new(
            StreamKind::Accelerometer,
            vec![
                jitter(&mut rng, config.noise),
                jitter(&mut rng, config.noise),
                GRAVITY_EARTH + jitter(&mut rng, config.noise),
            ],
            timestamp,
        ));
        events.push(SensorEvent::new(
            StreamKind::Magnetic,
            vec![
                horizontal * heading_rad.sin() + jitter(&mut rng, config.noise),
                horizontal * heading_rad.cos() + jitter(&mut rng, config.noise),
                vertical + jitter(&mut rng, config.noise),
            ],
            timestamp,
        ));
        events.push(SensorEvent::new(
            StreamKind::Pressure,
            vec![config.pressure_hpa + jitter(&mut rng, config.noise)],
            timestamp,
        ));
    }

    Ok(events)
}

pub fn build_event_stream(
    samples: usize,
    heading_deg: f32,
    pressure_hpa: f32,
) -> anyhow::Result<Vec<SensorEvent>> {
    let config = GeneratorConfig {
        samples,
        heading_deg,
        pressure_hpa,
        ..Default::default()
    };
    build_event_stream_from_config(&config)
}
