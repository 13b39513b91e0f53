//! Channel stabilizer - per-channel Kalman smoothing
//!
//! Each channel runs a constant-velocity Kalman filter with state
//! `[value, rate]` and a scalar measurement of `value`:
//!
//! ```text
//! predict:  x = F x            F = | 1 1 |
//!           P = F P Fᵀ + qI        | 0 1 |
//! correct:  K = P Hᵀ / (H P Hᵀ + r)        H = | 1 0 |
//!           x = x + K (z - H x)
//!           P = (I - K H) P
//! ```
//!
//! Everything is 2×2 arithmetic on the stack: the recurrence cannot fail,
//! block or allocate.

/// Stabilizer noise parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilizerConfig {
    /// Process noise (q): how fast the true value is allowed to wander
    pub process_noise: f64,

    /// Measurement noise (r): how much each observation is trusted
    pub measurement_noise: f64,
}

impl Default for StabilizerConfig {
    fn default() -> Self {
        Self {
            process_noise: 0.01,
            measurement_noise: 0.1,
        }
    }
}

impl StabilizerConfig {
    pub fn new(process_noise: f64, measurement_noise: f64) -> Self {
        Self {
            process_noise,
            measurement_noise,
        }
    }
}

/// Single-channel Kalman stabilizer
#[derive(Debug, Clone)]
pub struct Stabilizer {
    /// Estimate: [value, rate of change]
    state: [f64; 2],

    /// Estimate covariance
    covariance: [[f64; 2]; 2],

    /// Noise parameters (fixed at construction)
    config: StabilizerConfig,
}

impl Stabilizer {
    /// Create a stabilizer at zero with zero uncertainty
    pub fn new(config: StabilizerConfig) -> Self {
        Self {
            state: [0.0; 2],
            covariance: [[0.0; 2]; 2],
            config,
        }
    }

    /// Feed one observation for the current tick
    ///
    /// Non-finite observations poison the estimate; callers must filter them.
    pub fn update(&mut self, measurement: f64) {
        self.predict();
        self.correct(measurement);
    }

    /// Current filtered value
    #[inline]
    pub fn get(&self) -> f64 {
        self.state[0]
    }

    /// Current estimated rate of change (per tick)
    #[inline]
    pub fn rate(&self) -> f64 {
        self.state[1]
    }

    /// Noise parameters
    pub fn config(&self) -> StabilizerConfig {
        self.config
    }

    fn predict(&mut self) {
        let [value, rate] = self.state;
        self.state = [value + rate, rate];

        let [[p00, p01], [p10, p11]] = self.covariance;
        let q = self.config.process_noise;
        self.covariance = [
            [p00 + p01 + p10 + p11 + q, p01 + p11],
            [p10 + p11, p11 + q],
        ];
    }

    fn correct(&mut self, measurement: f64) {
        let [[p00, p01], [p10, p11]] = self.covariance;

        let innovation_cov = p00 + self.config.measurement_noise;
        if innovation_cov == 0.0 {
            // Zero noise everywhere: trust the prediction
            return;
        }

        let gain = [p00 / innovation_cov, p10 / innovation_cov];
        let innovation = measurement - self.state[0];

        self.state[0] += gain[0] * innovation;
        self.state[1] += gain[1] * innovation;

        self.covariance = [
            [(1.0 - gain[0]) * p00, (1.0 - gain[0]) * p01],
            [p10 - gain[1] * p00, p11 - gain[1] * p01],
        ];
    }
}

impl Default for Stabilizer {
    fn default() -> Self {
        Self::new(StabilizerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_update_moves_toward_target() {
        let mut stabilizer = Stabilizer::default();
        assert_eq!(stabilizer.get(), 0.0);

        stabilizer.update(1.0);
        let value = stabilizer.get();
        assert!(value > 0.0 && value < 1.0);

        // q / (q + r) for a cold filter
        assert!((value - 0.01 / 0.11).abs() < 1e-12);
    }

    #[test]
    fn test_get_is_idempotent() {
        let mut stabilizer = Stabilizer::default();
        stabilizer.update(3.0);

        let a = stabilizer.get();
        let b = stabilizer.get();
        assert_eq!(a, b);
    }

    #[test]
    fn test_converges_to_constant() {
        let mut stabilizer = Stabilizer::default();
        for _ in 0..100 {
            stabilizer.update(7.5);
        }
        assert!((stabilizer.get() - 7.5).abs() < 1e-3);
        assert!(stabilizer.rate().abs() < 1e-3);
    }

    #[test]
    fn test_step_response_overshoot_and_settle() {
        // The rate state carries a unit step about 10% past the target
        // before it settles back
        let mut stabilizer = Stabilizer::default();
        let values: Vec<f64> = (0..200)
            .map(|_| {
                stabilizer.update(1.0);
                stabilizer.get()
            })
            .collect();

        let peak = values.iter().copied().fold(f64::MIN, f64::max);
        assert!(peak > 1.10 && peak < 1.105, "peak {peak}");

        let last_outside = values
            .iter()
            .rposition(|v| (v - 1.0).abs() >= 1e-3)
            .unwrap();
        assert_eq!(last_outside + 1, 18);
        assert!(values[18..].iter().all(|v| (v - 1.0).abs() < 1e-3));
    }

    #[test]
    fn test_converges_from_negative_side() {
        let mut stabilizer = Stabilizer::default();
        for _ in 0..100 {
            stabilizer.update(-2.0);
        }
        assert!((stabilizer.get() + 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_tracks_ramp_monotonically() {
        let mut stabilizer = Stabilizer::default();
        let mut previous = stabilizer.get();

        for i in 0..120 {
            stabilizer.update(i as f64 * 10.0 / 120.0);
            let value = stabilizer.get();
            assert!(value > previous || i == 0, "tick {i}: {value} <= {previous}");
            previous = value;
        }

        // Velocity state removes lag on a ramp
        assert!((previous - 119.0 * 10.0 / 120.0).abs() < 0.05);
    }

    #[test]
    fn test_suppresses_noise() {
        let mut stabilizer = Stabilizer::default();
        let noisy = [1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0];

        for _ in 0..20 {
            for z in noisy {
                stabilizer.update(z);
            }
        }
        assert!(stabilizer.get().abs() < 1.0);
    }

    #[test]
    fn test_config_is_kept() {
        let config = StabilizerConfig::new(0.5, 2.0);
        let mut stabilizer = Stabilizer::new(config);
        stabilizer.update(1.0);
        assert_eq!(stabilizer.config(), config);

        // Higher process noise reacts faster
        let mut slow = Stabilizer::default();
        slow.update(1.0);
        assert!(stabilizer.get() > slow.get());
    }
}
