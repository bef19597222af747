/// Standard sea-level reference pressure in hPa.
pub const PRESSURE_STANDARD_ATMOSPHERE: f32 = 1013.25;

/// Barometric altitude in meters above sea level for a pressure reading
/// in hPa, assuming the standard atmosphere model.
///
/// Callers must supply positive pressure values; the sensor subsystem
/// never reports otherwise.
pub fn pressure_to_altitude(pressure_hpa: f32) -> f32 {
    44330.0 * (1.0 - (pressure_hpa / PRESSURE_STANDARD_ATMOSPHERE).powf(1.0 / 5.255))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sea_level_pressure_yields_zero_altitude() {
        assert!(pressure_to_altitude(PRESSURE_STANDARD_ATMOSPHERE).abs() < 1e-3);
    }

    #[test]
    fn lower_pressure_yields_higher_altitude() {
        let altitude = pressure_to_altitude(900.0);
        assert!(altitude > 0.0);
        assert!((altitude - 988.6).abs() < 1.0);
    }
}
