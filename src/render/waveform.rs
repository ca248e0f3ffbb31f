//! Decorative sine-wave bar waveform rendering.
//!
//! Draws one frame of a bar-chart approximation of a voice waveform on any
//! [`Surface`]. Repeated calls with an advancing phase animate it; the
//! renderer itself keeps no state between frames.

use crate::render::surface::{Rgb, Surface};

/// Number of bars a waveform is partitioned into.
pub const BAR_COUNT: usize = 50;

/// Horizontal gap in pixels between adjacent bars.
const BAR_GAP: f32 = 2.0;

/// Amplitude bounds that keep bars inside the surface, covering both sample
/// presets and the full slider-derived range.
const AMPLITUDE_BOUNDS: (f32, f32) = (0.4, 1.0);

/// Frequency bounds, likewise sized to the slider-derived range.
const FREQUENCY_BOUNDS: (f32, f32) = (0.04, 0.09);

/// Breathing depth used while a sample is "playing back".
pub const BREATHING_DEPTH: f32 = 0.2;

/// Which of the two sample colors a waveform is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorToken {
    /// The "original" voice sample (blue).
    Primary,
    /// The "cloned" voice sample (purple).
    Secondary,
}

impl ColorToken {
    /// Resolves the token against a palette.
    pub fn rgb(self, palette: &Palette) -> Rgb {
        match self {
            Self::Primary => palette.primary,
            Self::Secondary => palette.secondary,
        }
    }
}

/// The two sample colors waveforms are drawn in.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub primary: Rgb,
    pub secondary: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: Rgb::new(0x21, 0x96, 0xF3),
            secondary: Rgb::new(0x9C, 0x27, 0xB0),
        }
    }
}

/// Shape parameters for one waveform frame.
///
/// A params value is built fresh for every draw call; the only thing carried
/// across frames is the phase, which the caller's clock or animator owns.
#[derive(Debug, Clone, Copy)]
pub struct WaveformParams {
    amplitude_base: f32,
    frequency_base: f32,
    /// Color the bars are filled with.
    pub color: ColorToken,
    /// Running sine input; advances each frame to create motion. Unbounded,
    /// wraps naturally through sine periodicity.
    pub phase: f32,
    /// Depth of the secondary "breathing" sine modulating per-bar amplitude.
    /// Zero disables it.
    pub breathing: f32,
    /// Bars the surface width is partitioned into.
    pub bars: usize,
}

impl WaveformParams {
    /// Creates params with the amplitude and frequency clamped into the
    /// bounds that keep bars inside the surface.
    pub fn new(amplitude_base: f32, frequency_base: f32, color: ColorToken) -> Self {
        Self {
            amplitude_base: amplitude_base.clamp(AMPLITUDE_BOUNDS.0, AMPLITUDE_BOUNDS.1),
            frequency_base: frequency_base.clamp(FREQUENCY_BOUNDS.0, FREQUENCY_BOUNDS.1),
            color,
            phase: 0.0,
            breathing: 0.0,
            bars: BAR_COUNT,
        }
    }

    /// Shape of the "original" voice sample.
    pub fn original_sample() -> Self {
        Self::new(0.6, 0.05, ColorToken::Primary)
    }

    /// Shape of the "cloned" voice sample.
    pub fn cloned_sample() -> Self {
        Self::new(0.7, 0.06, ColorToken::Secondary)
    }

    pub fn amplitude_base(&self) -> f32 {
        self.amplitude_base
    }

    pub fn frequency_base(&self) -> f32 {
        self.frequency_base
    }
}

/// Voice customization slider values, each normalized to 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceControls {
    pub emotion: u8,
    pub pace: u8,
    pub pitch: u8,
}

impl VoiceControls {
    /// Creates controls with each value clamped to 0-100.
    pub fn new(emotion: u8, pace: u8, pitch: u8) -> Self {
        Self {
            emotion: emotion.min(100),
            pace: pace.min(100),
            pitch: pitch.min(100),
        }
    }

    /// Derived bar frequency: faster pace compresses the wave.
    pub fn frequency_base(&self) -> f32 {
        0.06 * (1.0 + self.pace as f32 / 100.0 * 0.5)
    }

    /// Derived bar amplitude: stronger emotion grows the wave.
    pub fn amplitude_base(&self) -> f32 {
        0.7 * (1.0 + self.emotion as f32 / 100.0 * 0.3)
    }

    /// Derived phase offset: pitch shifts the wave sideways.
    pub fn phase_offset(&self) -> f32 {
        self.pitch as f32 / 100.0 * 0.1
    }

    /// Builds waveform params from the slider-derived shape.
    pub fn params(&self, color: ColorToken) -> WaveformParams {
        let mut params = WaveformParams::new(self.amplitude_base(), self.frequency_base(), color);
        params.phase = self.phase_offset();
        params
    }
}

impl Default for VoiceControls {
    fn default() -> Self {
        Self {
            emotion: 50,
            pace: 50,
            pitch: 50,
        }
    }
}

/// Computes the height of bar `i` on a surface of pixel height `h`.
///
/// Negative results (possible only with misconfigured parameters) clamp to
/// zero so rectangles never invert.
fn bar_height(params: &WaveformParams, i: usize, h: f32) -> f32 {
    let amplitude =
        params.amplitude_base + (params.phase + i as f32 * 0.1).sin() * params.breathing;
    let height =
        (i as f32 * params.frequency_base + params.phase).sin() * amplitude * h * 0.4 + h * 0.1;
    height.max(0.0)
}

/// Renders one waveform frame onto the surface.
///
/// Partitions the surface width into [`WaveformParams::bars`] equal slots and
/// fills one vertically-centered bar per slot. A surface with zero width or
/// height produces no draw calls; slots too narrow for the 2-pixel bar gap
/// degenerate to nothing rather than drawing inverted rectangles.
pub fn render(surface: &mut dyn Surface, params: &WaveformParams, palette: &Palette) {
    let w = surface.width() as f32;
    let h = surface.height() as f32;
    if w <= 0.0 || h <= 0.0 || params.bars == 0 {
        return;
    }

    surface.clear();

    let slot = w / params.bars as f32;
    let bar_width = slot - BAR_GAP;
    let center_y = h / 2.0;
    let color = params.color.rgb(palette);

    for i in 0..params.bars {
        let height = bar_height(params, i, h);
        surface.fill_rect(
            i as f32 * slot,
            center_y - height / 2.0,
            bar_width,
            height,
            color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::surface::FrameBuffer;

    const BG: Rgb = Rgb::new(0, 0, 0);

    /// Counts colored (non-background) pixels in one column.
    fn column_height(buffer: &FrameBuffer, x: u32) -> u32 {
        (0..buffer.height())
            .filter(|&y| buffer.pixel(x, y) != Some(BG))
            .count() as u32
    }

    #[test]
    fn test_bar_width_non_negative_at_boundary() {
        // (W/N) - 2 >= 0 exactly when W >= 2N
        let w = (2 * BAR_COUNT) as f32;
        assert!(w / BAR_COUNT as f32 - 2.0 >= 0.0);
        let narrow = (2 * BAR_COUNT - 1) as f32;
        assert!(narrow / BAR_COUNT as f32 - 2.0 < 0.0);
    }

    #[test]
    fn test_bar_zero_height_is_deterministic() {
        // sin(0) * 0.7 * 100 * 0.4 + 100 * 0.1 = 10
        let params = WaveformParams::new(0.7, 0.06, ColorToken::Secondary);
        assert_eq!(bar_height(&params, 0, 100.0), 10.0);

        let mut buffer = FrameBuffer::new(500, 100, BG);
        render(&mut buffer, &params, &Palette::default());
        assert_eq!(column_height(&buffer, 0), 10);
    }

    #[test]
    fn test_zero_dimension_surface_is_noop() {
        let params = WaveformParams::cloned_sample();
        for (w, h) in [(0, 100), (500, 0), (0, 0)] {
            let mut buffer = FrameBuffer::new(w, h, BG);
            render(&mut buffer, &params, &Palette::default());
            // Nothing to observe beyond "no panic, no pixels": every
            // coordinate is out of bounds on a zero-dimension buffer.
            assert_eq!(buffer.pixel(0, 0), None);
        }
    }

    #[test]
    fn test_narrow_surface_draws_no_inverted_bars() {
        let params = WaveformParams::cloned_sample();
        let mut buffer = FrameBuffer::new(60, 40, BG);
        render(&mut buffer, &params, &Palette::default());
        for x in 0..60 {
            assert_eq!(column_height(&buffer, x), 0);
        }
    }

    #[test]
    fn test_control_derivation_formulas() {
        let controls = VoiceControls::new(100, 0, 0);
        assert!((controls.amplitude_base() - 0.91).abs() < 1e-6);
        assert!((controls.frequency_base() - 0.06).abs() < 1e-6);
        assert_eq!(controls.phase_offset(), 0.0);

        let controls = VoiceControls::new(0, 100, 100);
        assert!((controls.frequency_base() - 0.09).abs() < 1e-6);
        assert!((controls.amplitude_base() - 0.7).abs() < 1e-6);
        assert!((controls.phase_offset() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_controls_clamp_to_range() {
        let controls = VoiceControls::new(250, 101, 200);
        assert_eq!(controls, VoiceControls::new(100, 100, 100));
    }

    #[test]
    fn test_params_clamp_out_of_range_inputs() {
        let params = WaveformParams::new(5.0, 1.0, ColorToken::Primary);
        assert_eq!(params.amplitude_base(), 1.0);
        assert!((params.frequency_base() - 0.09).abs() < 1e-6);

        let params = WaveformParams::new(0.0, 0.0, ColorToken::Primary);
        assert_eq!(params.amplitude_base(), 0.4);
        assert!((params.frequency_base() - 0.04).abs() < 1e-6);
    }

    #[test]
    fn test_negative_heights_clamp_to_zero() {
        // Phase placing bar 0 deep in the sine trough: sin(3*pi/2) = -1,
        // so -1 * 1.0 * 0.4h + 0.1h is well below zero.
        let mut params = WaveformParams::new(1.0, 0.04, ColorToken::Primary);
        params.phase = 3.0 * std::f32::consts::FRAC_PI_2;
        assert_eq!(bar_height(&params, 0, 100.0), 0.0);
    }

    #[test]
    fn test_phase_advance_is_continuous() {
        // The per-frame height jump is bounded by the phase delta through the
        // derivative bound of sine (|d/dp sin| <= 1), scaled by the amplitude
        // envelope.
        let h = 100.0;
        let step = 0.1;
        let mut params = WaveformParams::cloned_sample();
        let bound = step * params.amplitude_base() * h * 0.4 + 1e-3;

        let mut phase = 0.0_f32;
        for _ in 0..500 {
            for i in 0..BAR_COUNT {
                params.phase = phase;
                let before = bar_height(&params, i, h);
                params.phase = phase + step;
                let after = bar_height(&params, i, h);
                assert!(
                    (after - before).abs() <= bound,
                    "discontinuity at phase {phase} bar {i}"
                );
            }
            phase += step;
        }
    }

    #[test]
    fn test_breathing_stays_within_surface() {
        let mut params = WaveformParams::cloned_sample();
        params.breathing = BREATHING_DEPTH;
        let h = 100.0;
        let mut phase = 0.0_f32;
        for _ in 0..200 {
            params.phase = phase;
            for i in 0..BAR_COUNT {
                let height = bar_height(&params, i, h);
                assert!(height >= 0.0 && height <= h / 2.0);
            }
            phase += 0.1;
        }
    }
}
