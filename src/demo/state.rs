//! Studio session state.
//!
//! Owns the two waveform panels, the customization sliders, the similarity
//! meter, and the fake preview-generation flow. All timing flows through
//! `Instant` values passed in by the caller, so every transition is testable
//! with synthetic clocks.

use std::time::{Duration, Instant};

use crate::config::VoxtwinConfig;
use crate::playback::Animator;
use crate::render::{MeterTween, VoiceControls, WaveformParams, BREATHING_DEPTH};

/// Amount a slider moves per key press.
pub const SLIDER_STEP: i16 = 5;

/// Fake latency of the "generate preview" call.
const GENERATE_LATENCY: Duration = Duration::from_millis(1500);

/// How long the "Preview Generated!" confirmation stays up.
const GENERATED_HOLD: Duration = Duration::from_secs(2);

/// Maximum jitter added to the similarity target after a preview.
const SCORE_JITTER: f32 = 1.3;

/// The three voice customization sliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slider {
    Emotion,
    Pace,
    Pitch,
}

impl Slider {
    pub const ALL: [Slider; 3] = [Slider::Emotion, Slider::Pace, Slider::Pitch];

    pub fn label(self) -> &'static str {
        match self {
            Self::Emotion => "Emotion",
            Self::Pace => "Pace",
            Self::Pitch => "Pitch",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Emotion => Self::Pace,
            Self::Pace => Self::Pitch,
            Self::Pitch => Self::Emotion,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Emotion => Self::Pitch,
            Self::Pace => Self::Emotion,
            Self::Pitch => Self::Pace,
        }
    }
}

/// Fake preview generation flow.
///
/// `Generating` and `Ready` expire on their own; no work happens behind them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewState {
    Idle,
    Generating { since: Instant },
    Ready { since: Instant },
}

/// Complete state of one studio session.
pub struct DemoState {
    /// "Original" voice sample panel.
    pub original: Animator,
    /// "Cloned" voice sample panel, shaped by the sliders.
    pub cloned: Animator,
    /// Current slider values.
    pub controls: VoiceControls,
    /// Slider the arrow keys currently adjust.
    pub selected: Slider,
    /// Startup similarity meter animation.
    meter: MeterTween,
    meter_started: Instant,
    /// Score displayed after a preview replaced the startup tween.
    preview_score: Option<f32>,
    pub preview: PreviewState,
}

impl DemoState {
    /// Builds session state from config, with both panels animating the way
    /// the studio opens: waveforms in motion, meter rising from zero.
    pub fn new(config: &VoxtwinConfig, now: Instant) -> Self {
        let bars = config.display.bar_count.max(1);
        let controls = VoiceControls::new(
            config.voice.emotion,
            config.voice.pace,
            config.voice.pitch,
        );

        let mut original_shape = WaveformParams::original_sample();
        original_shape.breathing = BREATHING_DEPTH;
        original_shape.bars = bars;
        let mut original = Animator::new(original_shape);
        original.set_playing(true);

        let mut cloned_shape = WaveformParams::cloned_sample();
        cloned_shape.breathing = BREATHING_DEPTH;
        cloned_shape.bars = bars;
        let mut cloned = Animator::new(cloned_shape);
        cloned.apply_controls(&controls);
        cloned.set_playing(true);

        let meter = MeterTween::new(
            config.meter.target,
            Duration::from_millis(config.meter.delay_ms),
            Duration::from_millis(config.meter.rise_ms),
        );

        Self {
            original,
            cloned,
            controls,
            selected: Slider::Emotion,
            meter,
            meter_started: now,
            preview_score: None,
            preview: PreviewState::Idle,
        }
    }

    /// Advances time-driven transitions: preview latency and confirmation
    /// expiry.
    pub fn tick(&mut self, now: Instant) {
        match self.preview {
            PreviewState::Generating { since }
                if now.duration_since(since) >= GENERATE_LATENCY =>
            {
                let score = self.meter.target + fastrand::f32() * SCORE_JITTER;
                self.preview_score = Some(score.min(100.0));
                self.preview = PreviewState::Ready { since: now };
                tracing::debug!("Preview generated, similarity {:.1}%", score);
            }
            PreviewState::Ready { since } if now.duration_since(since) >= GENERATED_HOLD => {
                self.preview = PreviewState::Idle;
            }
            _ => {}
        }
    }

    /// Similarity percentage to display right now.
    pub fn meter_value(&self, now: Instant) -> f32 {
        match self.preview_score {
            Some(score) => score,
            None => self.meter.value_at(now.duration_since(self.meter_started)),
        }
    }

    pub fn toggle_original(&mut self) -> bool {
        self.original.toggle()
    }

    pub fn toggle_cloned(&mut self) -> bool {
        self.cloned.toggle()
    }

    pub fn select_next(&mut self) {
        self.selected = self.selected.next();
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.prev();
    }

    /// Current value of one slider.
    pub fn slider_value(&self, slider: Slider) -> u8 {
        match slider {
            Slider::Emotion => self.controls.emotion,
            Slider::Pace => self.controls.pace,
            Slider::Pitch => self.controls.pitch,
        }
    }

    /// Moves the selected slider by `delta`, clamped to 0-100, and re-derives
    /// the cloned panel's shape. The original panel is never affected.
    pub fn adjust_selected(&mut self, delta: i16) {
        let value = match self.selected {
            Slider::Emotion => &mut self.controls.emotion,
            Slider::Pace => &mut self.controls.pace,
            Slider::Pitch => &mut self.controls.pitch,
        };
        *value = (*value as i16 + delta).clamp(0, 100) as u8;
        self.cloned.apply_controls(&self.controls);
    }

    /// Starts the fake preview generation. Ignored unless idle; the button
    /// is disabled while a preview is pending or freshly shown.
    pub fn start_preview(&mut self, now: Instant) -> bool {
        if self.preview != PreviewState::Idle {
            return false;
        }
        self.preview = PreviewState::Generating { since: now };
        tracing::debug!("Preview generation requested");
        true
    }

    /// Label for the preview action in its current state.
    pub fn preview_label(&self) -> &'static str {
        match self.preview {
            PreviewState::Idle => "[ g ] Generate Preview",
            PreviewState::Generating { .. } => "Generating...",
            PreviewState::Ready { .. } => "Preview Generated!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_state(now: Instant) -> DemoState {
        DemoState::new(&VoxtwinConfig::default(), now)
    }

    #[test]
    fn test_panels_start_playing() {
        let state = demo_state(Instant::now());
        assert!(state.original.is_playing());
        assert!(state.cloned.is_playing());
    }

    #[test]
    fn test_meter_rises_then_settles() {
        let t0 = Instant::now();
        let state = demo_state(t0);
        assert_eq!(state.meter_value(t0), 0.0);
        let settled = state.meter_value(t0 + Duration::from_secs(5));
        assert!((settled - 98.7).abs() < 1e-3);
    }

    #[test]
    fn test_preview_flow() {
        let t0 = Instant::now();
        let mut state = demo_state(t0);

        assert!(state.start_preview(t0));
        assert!(matches!(state.preview, PreviewState::Generating { .. }));
        assert_eq!(state.preview_label(), "Generating...");

        // Pressing g again while pending is ignored
        assert!(!state.start_preview(t0 + Duration::from_millis(100)));

        // Latency not yet elapsed
        state.tick(t0 + Duration::from_millis(1400));
        assert!(matches!(state.preview, PreviewState::Generating { .. }));

        // Latency elapsed: preview ready, meter snapped to a jittered score
        let t1 = t0 + Duration::from_millis(1500);
        state.tick(t1);
        assert!(matches!(state.preview, PreviewState::Ready { .. }));
        assert_eq!(state.preview_label(), "Preview Generated!");
        let score = state.meter_value(t1);
        assert!((98.7..=100.0).contains(&score));

        // Confirmation expires back to idle, the score stays
        let t2 = t1 + Duration::from_secs(2);
        state.tick(t2);
        assert_eq!(state.preview, PreviewState::Idle);
        assert_eq!(state.meter_value(t2), score);
        assert!(state.start_preview(t2));
    }

    #[test]
    fn test_slider_adjustment_reshapes_cloned_panel() {
        let mut state = demo_state(Instant::now());
        state.selected = Slider::Emotion;
        for _ in 0..20 {
            state.adjust_selected(SLIDER_STEP);
        }
        assert_eq!(state.controls.emotion, 100);
        assert!((state.cloned.shape().amplitude_base() - 0.91).abs() < 1e-6);

        // The original panel keeps its preset shape
        assert!((state.original.shape().amplitude_base() - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_slider_clamps_at_both_ends() {
        let mut state = demo_state(Instant::now());
        state.selected = Slider::Pace;
        for _ in 0..30 {
            state.adjust_selected(-SLIDER_STEP);
        }
        assert_eq!(state.controls.pace, 0);
        for _ in 0..30 {
            state.adjust_selected(SLIDER_STEP);
        }
        assert_eq!(state.controls.pace, 100);
    }

    #[test]
    fn test_slider_selection_wraps() {
        let mut state = demo_state(Instant::now());
        assert_eq!(state.selected, Slider::Emotion);
        state.select_next();
        state.select_next();
        state.select_next();
        assert_eq!(state.selected, Slider::Emotion);
        state.select_prev();
        assert_eq!(state.selected, Slider::Pitch);
    }
}
