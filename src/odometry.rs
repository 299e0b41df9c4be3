//! Dead-reckoning odometry from wheel encoders
//!
//! Integrates unwrapped encoder deltas into a 2-D pose. Heading is
//! reconstructed each cycle from the *absolute* tick difference between the
//! wheels rather than accumulated from per-cycle deltas, so rounding errors
//! never drift into the heading estimate. Translation uses exact closed-form
//! circular-arc integration: at low encoder rates a fast turn produces large
//! per-cycle angle deltas, where a small-angle approximation would bend the
//! trajectory noticeably.

use serde::{Deserialize, Serialize};

/// Robot pose in the world frame
///
/// Heading is unbounded (not wrapped to +/-pi); it accumulates full turns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// X position in meters
    pub x: f64,
    /// Y position in meters
    pub y: f64,
    /// Heading in radians, positive = counter-clockwise
    pub heading: f64,
}

impl Pose {
    /// The origin pose
    pub const ORIGIN: Pose = Pose {
        x: 0.0,
        y: 0.0,
        heading: 0.0,
    };
}

impl Default for Pose {
    fn default() -> Self {
        Self::ORIGIN
    }
}

/// Integrates unwrapped encoder ticks into a [`Pose`]
///
/// The pose is owned exclusively by the integrator; callers receive copies
/// and mutation happens only inside [`OdometryIntegrator::integrate`].
#[derive(Debug)]
pub struct OdometryIntegrator {
    pose: Pose,
    meters_per_tick: f64,
    wheelbase_m: f64,
}

impl OdometryIntegrator {
    /// Create an integrator at the origin
    pub fn new(meters_per_tick: f64, wheelbase_m: f64) -> Self {
        Self {
            pose: Pose::ORIGIN,
            meters_per_tick,
            wheelbase_m,
        }
    }

    /// Current pose
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Integrate one telemetry cycle
    ///
    /// `delta_*` are the unwrapped tick deltas since the previous cycle;
    /// `abs_*` the unwrapped cumulative tick counts. Returns the updated
    /// pose.
    pub fn integrate(
        &mut self,
        delta_left: i64,
        delta_right: i64,
        abs_left: i64,
        abs_right: i64,
    ) -> Pose {
        // Mean forward displacement of the two wheels (meters)
        let d = (delta_left + delta_right) as f64 * self.meters_per_tick / 2.0;

        // Cumulative heading from the absolute tick difference
        let heading_new = (abs_right - abs_left) as f64 * self.meters_per_tick / self.wheelbase_m;
        let delta_heading = heading_new - self.pose.heading;

        if delta_heading == 0.0 {
            // Straight-line motion
            self.pose.x += d * heading_new.cos();
            self.pose.y += d * heading_new.sin();
        } else {
            // Constant-curvature arc: chord displacement in the robot frame
            // at the start of the arc, rotated into the world frame by the
            // *previous* heading
            let radius = d / delta_heading;
            let rel_x = radius * delta_heading.sin();
            let rel_y = radius * (1.0 - delta_heading.cos());

            let (sin_h, cos_h) = self.pose.heading.sin_cos();
            self.pose.x += rel_x * cos_h - rel_y * sin_h;
            self.pose.y += rel_y * cos_h + rel_x * sin_h;
        }

        self.pose.heading = heading_new;
        self.pose
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MPT: f64 = 0.001; // 1mm per tick keeps the arithmetic legible
    const WHEELBASE: f64 = 0.4;

    #[test]
    fn test_straight_line_along_current_heading() {
        let mut odom = OdometryIntegrator::new(MPT, WHEELBASE);

        // Turn in place to ~pi/2 first: d == 0, no translation
        let pose = odom.integrate(-314, 314, -314, 314);
        assert!((pose.heading - std::f64::consts::FRAC_PI_2).abs() < 2e-3);
        assert!(pose.x.abs() < 1e-9);
        assert!(pose.y.abs() < 1e-9);

        // Equal deltas on both wheels: delta heading is exactly zero, pose
        // moves along the current heading by exactly d
        let pose = odom.integrate(1000, 1000, 686, 1314);
        assert!((pose.heading - std::f64::consts::FRAC_PI_2).abs() < 2e-3);
        assert!((pose.y - 1.0 * pose.heading.sin()).abs() < 1e-9);
        assert!((pose.x - 1.0 * pose.heading.cos()).abs() < 1e-9);
        assert!(pose.y > 0.999);
    }

    #[test]
    fn test_quarter_turn_arc_chord() {
        let mut odom = OdometryIntegrator::new(MPT, WHEELBASE);

        // Right wheel only: quarter turn on an arc of radius wheelbase/2
        let pose = odom.integrate(0, 628, 0, 628);
        assert!((pose.heading - std::f64::consts::FRAC_PI_2).abs() < 2e-3);

        // Closed-form chord of a quarter circle with radius 0.2m is
        // (0.2, 0.2); the small-angle approximation would give (0.314, 0)
        assert!((pose.x - 0.2).abs() < 1e-3, "x = {}", pose.x);
        assert!((pose.y - 0.2).abs() < 1e-3, "y = {}", pose.y);
    }

    #[test]
    fn test_arc_round_trip_restores_heading() {
        let mut odom = OdometryIntegrator::new(MPT, WHEELBASE);

        let quarter = odom.integrate(0, 628, 0, 628);
        assert!((quarter.heading - std::f64::consts::FRAC_PI_2).abs() < 2e-3);

        // Exact inverse differential on the other wheel
        let pose = odom.integrate(628, 0, 628, 628);
        assert!(pose.heading.abs() < 1e-9, "heading = {}", pose.heading);

        // Two mirrored quarter arcs of radius 0.2m land at (0.4, 0.4)
        assert!((pose.x - 0.4).abs() < 1e-3, "x = {}", pose.x);
        assert!((pose.y - 0.4).abs() < 1e-3, "y = {}", pose.y);
    }

    #[test]
    fn test_heading_not_wrapped() {
        let mut odom = OdometryIntegrator::new(MPT, WHEELBASE);

        // One and a half full turns in place
        let ticks = (3.0 * std::f64::consts::PI * WHEELBASE / MPT / 2.0).round() as i64;
        let pose = odom.integrate(-ticks / 2, ticks / 2, -ticks / 2, ticks / 2);
        assert!(
            pose.heading > std::f64::consts::PI,
            "heading wrapped: {}",
            pose.heading
        );
    }
}
