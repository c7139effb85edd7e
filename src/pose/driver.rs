// Animation driver: maps wall-clock time to joint angles, or takes direct
// input while paused.

use super::params::PoseParameters;

/// Joint most recently touched through a manual setter. Read only by the
/// UI; the pose builder never looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Joint {
    Upper,
    Lower,
}

/// Angular frequency of the walk cycle, radians per second of elapsed
/// time.
const PHASE_RATE: f32 = 3.0;
/// Peak hip swing, degrees.
const UPPER_AMPLITUDE_DEG: f32 = 15.0;
/// Peak knee swing, degrees. Opposite sign keeps the knees in anti-phase
/// with the hips.
const LOWER_AMPLITUDE_DEG: f32 = -20.0;

/// Two-mode state machine owning the joint-angle state.
///
/// While animating, both joints are derived from one shared phase value
/// every tick, keeping them in sinusoidal lock-step. While paused, the
/// manual setters write the joints directly and ticks leave them alone.
/// Mode switches are immediate; there is no blending between the last
/// animated pose and the next manual one.
pub struct AnimationDriver {
    animating: bool,
    params: PoseParameters,
    last_touched: Option<Joint>,
}

impl AnimationDriver {
    pub fn new() -> Self {
        Self {
            animating: true,
            params: PoseParameters::default(),
            last_touched: None,
        }
    }

    /// Advances the driver by one tick and returns the parameters for
    /// this frame. `elapsed_secs` is the host loop's monotonically
    /// increasing clock.
    pub fn tick(&mut self, elapsed_secs: f32) -> PoseParameters {
        if self.animating {
            let phase = (elapsed_secs * PHASE_RATE).sin();
            self.params.upper_angle = UPPER_AMPLITUDE_DEG * phase;
            self.params.lower_angle = LOWER_AMPLITUDE_DEG * phase;
        }
        self.params
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn set_animating(&mut self, animating: bool) {
        self.animating = animating;
    }

    /// Sets the hip angle directly. Ignored while animating.
    pub fn set_upper_angle(&mut self, degrees: f32) {
        if !self.animating {
            self.params.upper_angle = degrees;
            self.last_touched = Some(Joint::Upper);
        }
    }

    /// Sets the knee angle directly. Ignored while animating.
    pub fn set_lower_angle(&mut self, degrees: f32) {
        if !self.animating {
            self.params.lower_angle = degrees;
            self.last_touched = Some(Joint::Lower);
        }
    }

    /// Sets the whole-figure yaw. Valid in any mode.
    pub fn set_global_yaw(&mut self, degrees: f32) {
        self.params.global_yaw = degrees;
    }

    pub fn params(&self) -> PoseParameters {
        self.params
    }

    pub fn last_touched(&self) -> Option<Joint> {
        self.last_touched
    }
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn phase_peak_hits_the_amplitudes() {
        let mut driver = AnimationDriver::new();
        // sin(3t) = 1 at t = pi/6.
        let params = driver.tick(std::f32::consts::PI / 6.0);
        assert!((params.upper_angle - 15.0).abs() < EPS);
        assert!((params.lower_angle + 20.0).abs() < EPS);
    }

    #[test]
    fn phase_zero_rests_both_joints() {
        let mut driver = AnimationDriver::new();
        let params = driver.tick(0.0);
        assert!(params.upper_angle.abs() < EPS);
        assert!(params.lower_angle.abs() < EPS);
        // sin(3t) = 0 again at t = pi/3.
        let params = driver.tick(std::f32::consts::PI / 3.0);
        assert!(params.upper_angle.abs() < EPS);
        assert!(params.lower_angle.abs() < EPS);
    }

    #[test]
    fn joints_stay_in_lock_step() {
        let mut driver = AnimationDriver::new();
        for step in 0..50 {
            let params = driver.tick(step as f32 * 0.1);
            // Both joints always come from the same phase sample.
            assert!(
                (params.lower_angle * 15.0 + params.upper_angle * 20.0).abs() < 1e-3,
                "step {step}"
            );
        }
    }

    #[test]
    fn manual_setters_are_ignored_while_animating() {
        let mut driver = AnimationDriver::new();
        driver.tick(0.0);
        driver.set_upper_angle(90.0);
        driver.set_lower_angle(-90.0);
        let params = driver.params();
        assert!(params.upper_angle.abs() < EPS);
        assert!(params.lower_angle.abs() < EPS);
        assert_eq!(driver.last_touched(), None);
    }

    #[test]
    fn paused_setters_apply_independently_and_latch() {
        let mut driver = AnimationDriver::new();
        driver.set_animating(false);
        driver.set_upper_angle(40.0);
        assert_eq!(driver.last_touched(), Some(Joint::Upper));
        driver.set_lower_angle(-10.0);
        assert_eq!(driver.last_touched(), Some(Joint::Lower));

        // Ticks do not disturb manual values while paused.
        let params = driver.tick(123.4);
        assert!((params.upper_angle - 40.0).abs() < EPS);
        assert!((params.lower_angle + 10.0).abs() < EPS);
    }

    #[test]
    fn mode_toggle_is_last_writer_wins() {
        let elapsed = std::f32::consts::PI / 6.0;
        let mut driver = AnimationDriver::new();
        let animated = driver.tick(elapsed);

        driver.set_animating(false);
        driver.set_upper_angle(77.0);
        driver.set_lower_angle(-77.0);

        // Back to animating at the same elapsed time: the phase function
        // overwrites the manual values, no blending.
        driver.set_animating(true);
        let resumed = driver.tick(elapsed);
        assert!((resumed.upper_angle - animated.upper_angle).abs() < EPS);
        assert!((resumed.lower_angle - animated.lower_angle).abs() < EPS);

        // And pausing again keeps the animated values, not 77/-77.
        driver.set_animating(false);
        let paused = driver.tick(elapsed);
        assert!((paused.upper_angle - animated.upper_angle).abs() < EPS);
        assert!((paused.lower_angle - animated.lower_angle).abs() < EPS);
    }

    #[test]
    fn yaw_is_settable_in_any_mode() {
        let mut driver = AnimationDriver::new();
        driver.set_global_yaw(45.0);
        assert!((driver.params().global_yaw - 45.0).abs() < EPS);
        driver.set_animating(false);
        driver.set_global_yaw(-30.0);
        assert!((driver.params().global_yaw + 30.0).abs() < EPS);
        // Ticking never touches the yaw.
        driver.set_animating(true);
        driver.tick(1.0);
        assert!((driver.params().global_yaw + 30.0).abs() < EPS);
    }
}
