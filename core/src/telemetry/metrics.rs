use std::sync::Mutex;

/// Counters for samples ingested and degenerate attitude occurrences.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

struct Metrics {
    samples: usize,
    degenerate: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics {
                samples: 0,
                degenerate: 0,
            }),
        }
    }

    pub fn record_sample(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.samples += 1;
        }
    }

    pub fn record_degenerate(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.degenerate += 1;
        }
    }

    pub fn snapshot(&self) -> (usize, usize) {
        if let Ok(metrics) = self.inner.lock() {
            (metrics.samples, metrics.degenerate)
        } else {
            (0, 0)
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate_independently() {
        let metrics = MetricsRecorder::new();
        metrics.record_sample();
        metrics.record_sample();
        metrics.record_degenerate();
        assert_eq!(metrics.snapshot(), (2, 1));
    }
}
