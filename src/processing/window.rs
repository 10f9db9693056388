//! Hann window

use std::f64::consts::PI;

/// Hann window coefficient for sample `i` of `n`.
///
/// A single-sample window is defined as 1.0.
pub fn hann_coefficient(i: usize, n: usize) -> f64 {
    if n < 2 {
        return 1.0;
    }
    0.5 * (1.0 - (2.0 * PI * i as f64 / (n - 1) as f64).cos())
}

/// Multiply `data` elementwise by a Hann window of the same length.
pub fn apply_hann_window(data: &[f64]) -> Vec<f64> {
    let n = data.len();
    data.iter()
        .enumerate()
        .map(|(i, &x)| x * hann_coefficient(i, n))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_endpoints_are_zero() {
        let w = apply_hann_window(&[1.0; 9]);
        assert!(w[0].abs() < 1e-12);
        assert!(w[8].abs() < 1e-12);
        assert!((w[4] - 1.0).abs() < 1e-12, "center of odd window is 1");
    }

    #[test]
    fn test_window_is_symmetric() {
        let w = apply_hann_window(&[1.0; 16]);
        for i in 0..8 {
            assert!((w[i] - w[15 - i]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_degenerate_lengths() {
        assert!(apply_hann_window(&[]).is_empty());
        assert_eq!(apply_hann_window(&[3.5]), vec![3.5]);
    }
}
