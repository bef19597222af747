/// Linear heading sweep for dummy rotation scenarios, degrees per sample.
#[allow(dead_code)]
pub fn heading_sweep(samples: usize, start_deg: f32, end_deg: f32) -> Vec<f32> {
    let span = end_deg - start_deg;
    (0..samples)
        .map(|i| (start_deg + span * i as f32 / samples.max(1) as f32).rem_euclid(360.0))
        .collect()
}
