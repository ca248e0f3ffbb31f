//! Frame-driven waveform animation with explicit playback state.
//!
//! Each [`Animator`] owns the state for one waveform panel: its shape, its
//! running phase, and a playing flag. Nothing is shared between panels, so
//! any number of surfaces can animate independently. The animator exposes a
//! single `frame` callback and leaves scheduling to whoever drives it (the
//! demo tick loop, a test harness).

use crate::render::{render, Palette, Surface, VoiceControls, WaveformParams};

/// Phase advance per animation frame.
pub const PHASE_STEP: f32 = 0.1;

/// Animation state for one waveform surface.
pub struct Animator {
    shape: WaveformParams,
    phase: f32,
    phase_offset: f32,
    phase_step: f32,
    playing: bool,
}

impl Animator {
    /// Creates a stopped animator from a shape template. The template's own
    /// phase field is ignored; the animator starts at phase zero.
    pub fn new(shape: WaveformParams) -> Self {
        Self {
            shape,
            phase: 0.0,
            phase_offset: 0.0,
            phase_step: PHASE_STEP,
            playing: false,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    /// Flips the playing flag and returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.playing = !self.playing;
        self.playing
    }

    /// Re-derives the shape and phase offset from slider values, keeping the
    /// running phase so mid-playback shape changes do not cause a visual
    /// jump.
    pub fn apply_controls(&mut self, controls: &VoiceControls) {
        let mut shape = controls.params(self.shape.color);
        shape.breathing = self.shape.breathing;
        shape.bars = self.shape.bars;
        self.phase_offset = shape.phase;
        shape.phase = 0.0;
        self.shape = shape;
    }

    pub fn shape(&self) -> &WaveformParams {
        &self.shape
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// One scheduled animation frame: the "next-frame" callback.
    ///
    /// Checks the playing flag first: when stopped this draws nothing and
    /// returns `false`, telling the driver not to schedule another frame, so
    /// toggling playback off takes effect within one frame. When playing it
    /// clears and redraws the surface, advances the phase, and returns
    /// `true`.
    pub fn frame(&mut self, surface: &mut dyn Surface, palette: &Palette) -> bool {
        if !self.playing {
            return false;
        }
        render(surface, &self.current_params(), palette);
        self.phase += self.phase_step;
        true
    }

    /// Draws the current frame without advancing the phase, regardless of
    /// playback state. Used to show a frozen waveform on paused panels.
    pub fn draw_frame(&self, surface: &mut dyn Surface, palette: &Palette) {
        render(surface, &self.current_params(), palette);
    }

    fn current_params(&self) -> WaveformParams {
        let mut params = self.shape;
        params.phase = self.phase + self.phase_offset;
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Rgb;

    /// Surface test double recording every draw call.
    struct RecordingSurface {
        width: u32,
        height: u32,
        clears: usize,
        rects: Vec<(f32, f32, f32, f32)>,
    }

    impl RecordingSurface {
        fn new(width: u32, height: u32) -> Self {
            Self {
                width,
                height,
                clears: 0,
                rects: Vec::new(),
            }
        }
    }

    impl Surface for RecordingSurface {
        fn width(&self) -> u32 {
            self.width
        }

        fn height(&self) -> u32 {
            self.height
        }

        fn clear(&mut self) {
            self.clears += 1;
        }

        fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, _color: Rgb) {
            self.rects.push((x, y, w, h));
        }
    }

    #[test]
    fn test_stopped_frame_draws_nothing_and_halts() {
        let mut animator = Animator::new(WaveformParams::cloned_sample());
        animator.set_playing(true);
        animator.toggle();

        let mut surface = RecordingSurface::new(500, 100);
        let reschedule = animator.frame(&mut surface, &Palette::default());

        assert!(!reschedule);
        assert_eq!(surface.clears, 0);
        assert!(surface.rects.is_empty());
        assert_eq!(animator.phase(), 0.0);
    }

    #[test]
    fn test_playing_frame_draws_and_advances() {
        let mut animator = Animator::new(WaveformParams::cloned_sample());
        animator.set_playing(true);

        let mut surface = RecordingSurface::new(500, 100);
        assert!(animator.frame(&mut surface, &Palette::default()));
        assert!(animator.frame(&mut surface, &Palette::default()));

        assert_eq!(surface.clears, 2);
        assert_eq!(surface.rects.len(), 2 * animator.shape().bars);
        assert!((animator.phase() - 2.0 * PHASE_STEP).abs() < 1e-6);
    }

    #[test]
    fn test_panels_animate_independently() {
        let mut original = Animator::new(WaveformParams::original_sample());
        let mut cloned = Animator::new(WaveformParams::cloned_sample());
        original.set_playing(true);
        cloned.set_playing(true);

        let palette = Palette::default();
        let mut surface = RecordingSurface::new(500, 100);
        original.frame(&mut surface, &palette);
        original.frame(&mut surface, &palette);
        cloned.frame(&mut surface, &palette);

        assert!((original.phase() - 2.0 * PHASE_STEP).abs() < 1e-6);
        assert!((cloned.phase() - PHASE_STEP).abs() < 1e-6);
    }

    #[test]
    fn test_apply_controls_keeps_phase() {
        let mut animator = Animator::new(WaveformParams::cloned_sample());
        animator.set_playing(true);
        let mut surface = RecordingSurface::new(500, 100);
        for _ in 0..5 {
            animator.frame(&mut surface, &Palette::default());
        }
        let phase_before = animator.phase();

        animator.apply_controls(&VoiceControls::new(100, 0, 100));

        assert_eq!(animator.phase(), phase_before);
        assert!((animator.shape().amplitude_base() - 0.91).abs() < 1e-6);
        assert!((animator.shape().frequency_base() - 0.06).abs() < 1e-6);
    }

    #[test]
    fn test_draw_frame_does_not_advance() {
        let animator = Animator::new(WaveformParams::original_sample());
        let mut surface = RecordingSurface::new(500, 100);
        animator.draw_frame(&mut surface, &Palette::default());
        assert_eq!(surface.clears, 1);
        assert_eq!(surface.rects.len(), animator.shape().bars);
        assert_eq!(animator.phase(), 0.0);
    }
}
