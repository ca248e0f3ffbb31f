//! Interactive voice cloning studio demo.
//!
//! State and terminal UI for the demo session. The render module draws the
//! waveforms; this module owns everything around them.

pub mod state;
pub mod ui;

pub use state::{DemoState, PreviewState, Slider};
pub use ui::{DemoCommand, StudioTui};
