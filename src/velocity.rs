//! Wheel velocity estimation
//!
//! Raw per-cycle velocities computed from encoder deltas are noisy: a single
//! late or early frame produces a spike that a plain EMA would smear across
//! many cycles. The estimator therefore runs a two-stage cascade per wheel:
//! a median-of-3 over the last three raw samples rejects single-sample
//! spikes, then an EMA smooths what remains.

/// Median-of-3 with a deliberate tie-break
///
/// Uses pairwise sign comparisons to find the value strictly between the
/// other two. When no strict median exists (two or three equal values), the
/// first argument - the newest raw sample - is returned, favoring
/// responsiveness. This tie-break is part of the filter's observable
/// behavior and must stay exact.
fn median3(a: f64, b: f64, c: f64) -> f64 {
    if (b - a) * (c - a) < 0.0 {
        a
    } else if (a - b) * (c - b) < 0.0 {
        b
    } else if (a - c) * (b - c) < 0.0 {
        c
    } else {
        a
    }
}

/// Median-of-3 spike rejection followed by exponential smoothing, per wheel
#[derive(Debug)]
pub struct VelocityEstimator {
    /// Smoothing strength in [0, 1]: 0 = no smoothing, 1 = frozen
    alpha: f64,
    /// Previous raw (unfiltered) sample
    prev1: f64,
    /// Raw sample before that
    prev2: f64,
    /// Current filtered output
    filtered: f64,
}

impl VelocityEstimator {
    /// Create an estimator seeded at zero velocity
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            prev1: 0.0,
            prev2: 0.0,
            filtered: 0.0,
        }
    }

    /// Feed one cycle's wheel travel and elapsed time, returning the
    /// filtered velocity
    ///
    /// `distance` and `elapsed_s` share whatever length unit the caller
    /// uses (the driver feeds millimeters, so the output is mm/s). A
    /// non-positive elapsed time holds the previous filtered value - there
    /// is no valid raw sample to form, and no division by zero.
    pub fn update(&mut self, distance: f64, elapsed_s: f64) -> f64 {
        if elapsed_s <= 0.0 {
            return self.filtered;
        }
        let raw = distance / elapsed_s;
        let median = median3(raw, self.prev1, self.prev2);
        self.prev2 = self.prev1;
        self.prev1 = raw;
        self.filtered = self.filtered * self.alpha + median * (1.0 - self.alpha);
        self.filtered
    }

    /// Current filtered velocity without feeding a new sample
    pub fn current(&self) -> f64 {
        self.filtered
    }
}
