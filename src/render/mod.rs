//! Waveform rendering for the studio display.
//!
//! The renderer is a pure function of (surface, params): it draws through the
//! [`Surface`] abstraction and owns no animation state, so it can be driven
//! by any frame source and tested without a live animation driver.

pub mod meter;
pub mod surface;
pub mod waveform;

pub use meter::MeterTween;
pub use surface::{FrameBuffer, Rgb, Surface};
pub use waveform::{
    render, ColorToken, Palette, VoiceControls, WaveformParams, BAR_COUNT, BREATHING_DEPTH,
};
