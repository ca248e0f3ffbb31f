//! Similarity meter tween.
//!
//! Animates the displayed "voice similarity" percentage from zero toward its
//! target after a short delay. The value is presentational only; no
//! similarity computation exists behind it.

use std::time::Duration;

/// Ease-out-quart easing: fast start, soft landing.
pub fn ease_out_quart(progress: f32) -> f32 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(4)
}

/// Tween of the similarity percentage, a pure function of elapsed time.
/// The caller owns the clock.
#[derive(Debug, Clone, Copy)]
pub struct MeterTween {
    /// Final percentage the meter settles on.
    pub target: f32,
    /// Wait before the fill starts moving.
    pub delay: Duration,
    /// Time the fill takes to reach the target once moving.
    pub rise: Duration,
}

impl MeterTween {
    pub fn new(target: f32, delay: Duration, rise: Duration) -> Self {
        Self {
            target: target.clamp(0.0, 100.0),
            delay,
            rise,
        }
    }

    /// Meter value after `elapsed` time since the tween started.
    pub fn value_at(&self, elapsed: Duration) -> f32 {
        let active = elapsed.saturating_sub(self.delay);
        if self.rise.is_zero() {
            return self.target;
        }
        let progress = (active.as_secs_f32() / self.rise.as_secs_f32()).min(1.0);
        ease_out_quart(progress) * self.target
    }
}

impl Default for MeterTween {
    fn default() -> Self {
        Self::new(
            98.7,
            Duration::from_millis(500),
            Duration::from_millis(2000),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_shape() {
        assert_eq!(ease_out_quart(0.0), 0.0);
        assert_eq!(ease_out_quart(1.0), 1.0);
        // 1 - (1 - 0.5)^4 = 0.9375
        assert!((ease_out_quart(0.5) - 0.9375).abs() < 1e-6);
        // Out-of-range progress clamps
        assert_eq!(ease_out_quart(-1.0), 0.0);
        assert_eq!(ease_out_quart(2.0), 1.0);
    }

    #[test]
    fn test_meter_rests_during_delay() {
        let tween = MeterTween::default();
        assert_eq!(tween.value_at(Duration::ZERO), 0.0);
        assert_eq!(tween.value_at(Duration::from_millis(499)), 0.0);
    }

    #[test]
    fn test_meter_reaches_target() {
        let tween = MeterTween::default();
        let settled = tween.value_at(Duration::from_millis(2500));
        assert!((settled - 98.7).abs() < 1e-4);
        // And it stays there
        assert!((tween.value_at(Duration::from_secs(60)) - 98.7).abs() < 1e-4);
    }

    #[test]
    fn test_meter_is_monotone() {
        let tween = MeterTween::default();
        let mut last = -1.0;
        for ms in (0..3000).step_by(16) {
            let value = tween.value_at(Duration::from_millis(ms));
            assert!(value >= last, "meter regressed at {ms}ms");
            last = value;
        }
    }

    #[test]
    fn test_midpoint_follows_easing() {
        let tween = MeterTween::default();
        // Halfway through the rise: 500ms delay + 1000ms of 2000ms
        let value = tween.value_at(Duration::from_millis(1500));
        assert!((value - ease_out_quart(0.5) * 98.7).abs() < 1e-3);
    }

    #[test]
    fn test_target_clamps_to_percentage() {
        let tween = MeterTween::new(150.0, Duration::ZERO, Duration::ZERO);
        assert_eq!(tween.value_at(Duration::ZERO), 100.0);
    }
}
