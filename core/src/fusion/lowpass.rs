/// Smoothing factor applied per update.
pub const SMOOTHING_FACTOR: f32 = 0.05;

/// Exponentially smoothed three-component buffer.
///
/// Holds the running moving average of every sample blended in so far.
/// State starts at zero and is mutated in place for the lifetime of the
/// owning engine.
#[derive(Debug, Clone, Default)]
pub struct LowPass {
    state: [f32; 3],
}

impl LowPass {
    pub fn new() -> Self {
        Self { state: [0.0; 3] }
    }

    /// Blends a raw sample into the smoothed state, per component.
    /// Inputs shorter than three components leave the tail untouched.
    pub fn apply(&mut self, input: &[f32]) {
        for (slot, &raw) in self.state.iter_mut().zip(input) {
            *slot += SMOOTHING_FACTOR * (raw - *slot);
        }
    }

    pub fn state(&self) -> &[f32; 3] {
        &self.state
    }

    /// First component, the only one meaningful for scalar streams.
    pub fn first(&self) -> f32 {
        self.state[0]
    }
}
