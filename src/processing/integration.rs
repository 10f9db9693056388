//! Time-domain integration of acceleration into velocity

/// Integrate an acceleration series into velocity with the trapezoidal rule.
///
/// The result has the same length as the input. `velocity[0]` is 0 and each
/// later entry is the running integral up to that sample:
///
/// `v[i+1] = v[i] + 0.5 · dt · (a[i] + a[i+1])`
///
/// No detrending is applied, so a DC offset in `accel` produces a linear
/// drift in velocity.
pub fn acceleration_to_velocity(accel: &[f64], dt: f64) -> Vec<f64> {
    let mut velocity = Vec::with_capacity(accel.len());
    if accel.is_empty() {
        return velocity;
    }

    let mut running = 0.0;
    velocity.push(running);
    for pair in accel.windows(2) {
        running += 0.5 * dt * (pair[0] + pair[1]);
        velocity.push(running);
    }
    velocity
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(acceleration_to_velocity(&[], 0.001).is_empty());
    }

    #[test]
    fn test_initial_condition_is_zero() {
        assert_eq!(acceleration_to_velocity(&[5.0], 0.1), vec![0.0]);
        let v = acceleration_to_velocity(&[3.0, -2.0, 7.0], 0.5);
        assert_eq!(v[0], 0.0);
    }

    #[test]
    fn test_zero_acceleration_gives_zero_velocity() {
        let v = acceleration_to_velocity(&[0.0; 64], 1e-3);
        assert_eq!(v.len(), 64);
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_constant_acceleration_drifts_linearly() {
        // a = 2 mm/s², dt = 0.5 s → v[i] = i
        let v = acceleration_to_velocity(&[2.0; 5], 0.5);
        assert_eq!(v, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_trapezoid_step() {
        let v = acceleration_to_velocity(&[0.0, 2.0, 4.0], 1.0);
        assert_eq!(v, vec![0.0, 1.0, 4.0]);
    }
}
