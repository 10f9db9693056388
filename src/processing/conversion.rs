//! ADC count and acceleration unit conversion

use crate::types::GScale;

/// Standard gravity in mm/s².
pub const STANDARD_GRAVITY_MM_S2: f64 = 9806.65;

/// Convert one raw ADC reading to acceleration in g.
///
/// `range` is the full-scale selector (2/4/8/16). Unknown values use the
/// ±2 g sensitivity.
pub fn adc_to_acceleration_g(adc: i32, range: u32) -> f64 {
    f64::from(adc) / GScale::from_range(range).sensitivity()
}

/// Convert acceleration in g to mm/s².
pub fn acceleration_g_to_mm_per_sec_squared(g: f64) -> f64 {
    g * STANDARD_GRAVITY_MM_S2
}

/// Convert a whole ADC buffer to g.
pub fn adc_buffer_to_g(samples: &[i32], scale: GScale) -> Vec<f64> {
    let sensitivity = scale.sensitivity();
    samples.iter().map(|&s| f64::from(s) / sensitivity).collect()
}

/// Convert a whole ADC buffer to mm/s².
pub fn adc_buffer_to_mm_per_sec_squared(samples: &[i32], scale: GScale) -> Vec<f64> {
    adc_buffer_to_g(samples, scale)
        .into_iter()
        .map(acceleration_g_to_mm_per_sec_squared)
        .collect()
}
