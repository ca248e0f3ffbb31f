//! Interactive studio demo command.
//!
//! Runs the animated studio TUI: two waveform panels, customization sliders,
//! the similarity meter, and the fake preview generation flow. Supports an
//! external playback toggle via SIGUSR1.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::config::VoxtwinConfig;
use crate::demo::{DemoCommand, DemoState, StudioTui};
use crate::ui::ErrorScreen;

/// Runs the interactive studio demo until the user quits.
///
/// Loads configuration, builds the session state, and drives the TUI at the
/// configured frame rate. SIGUSR1 toggles cloned sample playback, so window
/// manager keybindings can drive the demo externally.
pub async fn handle_demo() -> Result<(), anyhow::Error> {
    tracing::info!("=== voxtwin Studio Started ===");

    let config_data = match VoxtwinConfig::load() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("Failed to load configuration: {err}");
            let error_message = format!(
                "Configuration Error:\n\n{err}\n\nPlease check your ~/.config/voxtwin/voxtwin.toml file and try again."
            );
            let mut error_screen = ErrorScreen::new()?;
            error_screen.show_error(&error_message)?;
            error_screen.cleanup()?;
            return Err(anyhow::anyhow!("Configuration error: {err}"));
        }
    };

    tracing::info!(
        "Configuration loaded: bars={}, frame_rate={}fps, colors={}/{}",
        config_data.display.bar_count,
        config_data.display.frame_rate,
        config_data.display.primary_color,
        config_data.display.secondary_color
    );

    let palette = match config_data.display.palette() {
        Ok(palette) => palette,
        Err(err) => {
            tracing::error!("Invalid color configuration: {err}");
            let mut error_screen = ErrorScreen::new()?;
            error_screen.show_error(&format!(
                "Configuration Error:\n\n{err}\n\nColors must be in #RRGGBB format."
            ))?;
            error_screen.cleanup()?;
            return Err(anyhow::anyhow!("Invalid color configuration: {err}"));
        }
    };

    let mut state = DemoState::new(&config_data, Instant::now());
    let mut tui =
        StudioTui::new().map_err(|e| anyhow::anyhow!("Failed to initialize UI: {e}"))?;

    let external_toggle = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(signal_hook::consts::SIGUSR1, external_toggle.clone())
        .map_err(|e| anyhow::anyhow!("Failed to register signal handler: {e}"))?;

    tracing::debug!(
        "Entering demo loop. '1'/'2' toggle playback, 'g' generates a preview, 'q' quits."
    );

    let mut ticker = tokio::time::interval(config_data.display.frame_interval());
    let mut frame_count = 0u64;

    loop {
        ticker.tick().await;

        if external_toggle.swap(false, Ordering::Relaxed) {
            let playing = state.toggle_cloned();
            tracing::info!("Received SIGUSR1: cloned sample playing={playing}");
        }

        match tui.handle_input(std::time::Duration::ZERO) {
            Ok(DemoCommand::Continue) => {}
            Ok(DemoCommand::Quit) => break,
            Ok(DemoCommand::ToggleOriginal) => {
                let playing = state.toggle_original();
                tracing::debug!(
                    "Original sample playing={playing} at phase {:.1}",
                    state.original.phase()
                );
            }
            Ok(DemoCommand::ToggleCloned) => {
                let playing = state.toggle_cloned();
                tracing::debug!(
                    "Cloned sample playing={playing} at phase {:.1}",
                    state.cloned.phase()
                );
            }
            Ok(DemoCommand::NextSlider) => state.select_next(),
            Ok(DemoCommand::PrevSlider) => state.select_prev(),
            Ok(DemoCommand::Increase) => {
                state.adjust_selected(crate::demo::state::SLIDER_STEP);
                log_derived_shape(&state);
            }
            Ok(DemoCommand::Decrease) => {
                state.adjust_selected(-crate::demo::state::SLIDER_STEP);
                log_derived_shape(&state);
            }
            Ok(DemoCommand::GeneratePreview) => {
                state.start_preview(Instant::now());
            }
            Err(e) => {
                tracing::error!("Input handling error: {}", e);
                tui.cleanup().ok();
                return Err(anyhow::anyhow!("Input handling error: {e}"));
            }
        }

        let now = Instant::now();
        state.tick(now);
        tui.render(&mut state, &palette, now)
            .map_err(|e| anyhow::anyhow!("Render failed: {e}"))?;

        frame_count += 1;
        if frame_count.is_multiple_of(300) {
            tracing::debug!("Demo running: {frame_count} frames rendered");
        }
    }

    tui.cleanup()
        .map_err(|e| anyhow::anyhow!("Cleanup failed: {e}"))?;

    tracing::info!("=== voxtwin Studio Exited Successfully ===");
    Ok(())
}

/// Logs the cloned panel shape derived from the current slider values.
fn log_derived_shape(state: &DemoState) {
    let shape = state.cloned.shape();
    tracing::debug!(
        "Sliders emotion={} pace={} pitch={} -> amplitude {:.2}, frequency {:.3}",
        state.controls.emotion,
        state.controls.pace,
        state.controls.pitch,
        shape.amplitude_base(),
        shape.frequency_base()
    );
}
