use crate::generator::profile::GeneratorConfig;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkflowConfig {
    pub samples: usize,
    pub heading_deg: f32,
    pub pressure_hpa: f32,
    #[serde(default = "default_noise")]
    pub noise: f32,
    #[serde(default)]
    pub seed: u64,
}

fn default_noise() -> f32 {
    0.02
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(samples: usize, heading_deg: f32, pressure_hpa: f32) -> Self {
        Self {
            samples,
            heading_deg,
            pressure_hpa,
            noise: default_noise(),
            seed: 0,
        }
    }

    pub fn to_generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            samples: self.samples,
            heading_deg: self.heading_deg,
            pressure_hpa: self.pressure_hpa,
            noise: self.noise,
            seed: self.seed,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_from_args_feeds_generator_config() {
        let cfg = WorkflowConfig::from_args(128, 270.0, 980.0);
        let gen = cfg.to_generator_config();
        assert_eq!(gen.samples, 128);
        assert_eq!(gen.heading_deg, 270.0);
        assert_eq!(gen.pressure_hpa, 980.0);
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"samples: 64\nheading_deg: 135.0\npressure_hpa: 1005.0\n")
            .unwrap();
        let path = temp.into_temp_path();
        let cfg = WorkflowConfig::load(&path).unwrap();
        assert_eq!(cfg.samples, 64);
        assert_eq!(cfg.heading_deg, 135.0);
        assert_eq!(cfg.noise, default_noise());
    }
}
