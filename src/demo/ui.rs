//! Terminal user interface for the voice cloning studio demo.
//!
//! Lays out the two animated waveform panels, the similarity meter, the
//! voice customization sliders, and the preview action, and translates key
//! presses into demo commands. Waveforms are rasterized into a pixel
//! [`FrameBuffer`] and blitted to terminal cells as half-blocks, two pixel
//! rows per cell.

use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use std::error::Error;
use std::io::{stdout, Stdout};
use std::time::{Duration, Instant};

use crate::demo::state::{DemoState, PreviewState, Slider};
use crate::playback::Animator;
use crate::render::{FrameBuffer, Palette, Rgb};

/// User input command during the demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoCommand {
    /// Continue running (no key pressed)
    Continue,
    /// Exit the demo (Escape or 'q')
    Quit,
    /// Play/pause the original sample ('1')
    ToggleOriginal,
    /// Play/pause the cloned sample ('2')
    ToggleCloned,
    /// Focus the next slider (Tab or Down)
    NextSlider,
    /// Focus the previous slider (Shift+Tab or Up)
    PrevSlider,
    /// Nudge the focused slider up (Right)
    Increase,
    /// Nudge the focused slider down (Left)
    Decrease,
    /// Start fake preview generation ('g')
    GeneratePreview,
}

/// Background of the waveform panels.
const PANEL_BG: Rgb = Rgb::new(10, 10, 14);
/// Unfilled portion of meter and slider tracks.
const TRACK_DIM: Color = Color::Rgb(60, 60, 70);
const HELP_FG: Color = Color::Rgb(100, 100, 100);

/// Terminal UI for the studio demo.
pub struct StudioTui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    original_pixels: FrameBuffer,
    cloned_pixels: FrameBuffer,
}

impl StudioTui {
    /// Creates a new TUI instance and enters alternate screen mode.
    ///
    /// # Errors
    /// - If terminal cannot be initialized
    /// - If raw mode cannot be enabled
    /// - If alternate screen cannot be entered
    pub fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(StudioTui {
            terminal,
            original_pixels: FrameBuffer::new(0, 0, PANEL_BG),
            cloned_pixels: FrameBuffer::new(0, 0, PANEL_BG),
        })
    }

    /// Processes user input and returns the appropriate demo command.
    ///
    /// Polls for at most `poll` before returning `Continue`.
    ///
    /// # Errors
    /// - If event polling fails
    pub fn handle_input(&mut self, poll: Duration) -> Result<DemoCommand, Box<dyn Error>> {
        if event::poll(poll)? {
            if let Event::Key(key) = event::read()? {
                return Ok(match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        tracing::debug!("Quit requested");
                        DemoCommand::Quit
                    }
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        tracing::debug!("Ctrl+C pressed: quitting");
                        DemoCommand::Quit
                    }
                    KeyCode::Char('1') => DemoCommand::ToggleOriginal,
                    KeyCode::Char('2') => DemoCommand::ToggleCloned,
                    KeyCode::Tab | KeyCode::Down => DemoCommand::NextSlider,
                    KeyCode::BackTab | KeyCode::Up => DemoCommand::PrevSlider,
                    KeyCode::Right => DemoCommand::Increase,
                    KeyCode::Left => DemoCommand::Decrease,
                    KeyCode::Char('g') => DemoCommand::GeneratePreview,
                    _ => DemoCommand::Continue,
                });
            }
        }
        Ok(DemoCommand::Continue)
    }

    /// Renders one frame of the studio: advances playing panels, then draws
    /// panels, meter, sliders, preview action, and the help footer.
    ///
    /// # Errors
    /// - If terminal rendering fails
    pub fn render(
        &mut self,
        state: &mut DemoState,
        palette: &Palette,
        now: Instant,
    ) -> Result<(), Box<dyn Error>> {
        let meter_value = state.meter_value(now);

        // Field borrows stay disjoint inside the draw closure
        let Self {
            terminal,
            original_pixels,
            cloned_pixels,
        } = self;

        terminal.draw(|frame| {
            let [original_area, cloned_area, meter_area, sliders_area, preview_area, footer_area] =
                Layout::vertical([
                    Constraint::Fill(1),
                    Constraint::Fill(1),
                    Constraint::Length(1),
                    Constraint::Length(3),
                    Constraint::Length(1),
                    Constraint::Length(1),
                ])
                .areas(frame.area());

            draw_panel(
                frame,
                original_area,
                "Original Sample",
                &mut state.original,
                original_pixels,
                palette,
            );
            draw_panel(
                frame,
                cloned_area,
                "Cloned Sample",
                &mut state.cloned,
                cloned_pixels,
                palette,
            );

            frame.render_widget(
                Paragraph::new(meter_line(meter_value, meter_area.width, palette)),
                meter_area,
            );

            for (row, slider) in Slider::ALL.iter().enumerate() {
                let area = Rect {
                    x: sliders_area.x,
                    y: sliders_area.y + row as u16,
                    width: sliders_area.width,
                    height: 1,
                };
                if area.y < sliders_area.y + sliders_area.height {
                    frame.render_widget(
                        Paragraph::new(slider_line(state, *slider, area.width, palette)),
                        area,
                    );
                }
            }

            frame.render_widget(preview_paragraph(state, palette), preview_area);

            let help = Paragraph::new(Line::from(
                " 1/2 play/pause · tab select · ←/→ adjust · g preview · q quit",
            ))
            .style(Style::default().fg(HELP_FG));
            frame.render_widget(help, footer_area);
        })?;

        Ok(())
    }

    /// Cleans up terminal state and exits alternate screen mode.
    ///
    /// # Errors
    /// - If terminal mode cannot be disabled
    /// - If cursor cannot be shown
    pub fn cleanup(&mut self) -> Result<(), Box<dyn Error>> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            crossterm::terminal::LeaveAlternateScreen
        )?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

/// Draws one waveform panel: border, title with play indicator, pixels.
fn draw_panel(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    animator: &mut Animator,
    pixels: &mut FrameBuffer,
    palette: &Palette,
) {
    let indicator = if animator.is_playing() { "⏸" } else { "▶" };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} {indicator} "));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    // One pixel column per cell, two pixel rows per cell (half-blocks)
    pixels.resize(inner.width as u32, inner.height as u32 * 2);
    if !animator.frame(pixels, palette) {
        animator.draw_frame(pixels, palette);
    }

    frame.render_widget(PixelView(pixels), inner);
}

/// Blits a [`FrameBuffer`] into terminal cells using upper-half blocks:
/// the foreground colors the top pixel of a cell, the background the bottom.
struct PixelView<'a>(&'a FrameBuffer);

impl Widget for PixelView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        use crate::render::Surface;

        let cols = area.width.min(self.0.width() as u16);
        let rows = area.height.min((self.0.height() / 2) as u16);
        for row in 0..rows {
            for col in 0..cols {
                let top = self.0.pixel(col as u32, row as u32 * 2);
                let bottom = self.0.pixel(col as u32, row as u32 * 2 + 1);
                if let (Some(top), Some(bottom)) = (top, bottom) {
                    if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                        cell.set_symbol("▀")
                            .set_fg(to_color(top))
                            .set_bg(to_color(bottom));
                    }
                }
            }
        }
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

/// Builds the similarity meter line: label, filled track, percentage.
fn meter_line(value: f32, width: u16, palette: &Palette) -> Line<'static> {
    let label = " Similarity ";
    let value_text = format!(" {value:5.1}%");
    let track_len = (width as usize).saturating_sub(label.len() + value_text.len());
    let filled = ((value / 100.0) * track_len as f32).round() as usize;

    let mut spans = vec![Span::raw(label)];
    spans.extend(gradient_track(track_len, filled, palette));
    spans.push(Span::raw(value_text));
    Line::from(spans)
}

/// Builds one slider line: focus marker, label, filled track, value.
fn slider_line(state: &DemoState, slider: Slider, width: u16, palette: &Palette) -> Line<'static> {
    let selected = state.selected == slider;
    let marker = if selected { " › " } else { "   " };
    let label = format!("{:<9}", slider.label());
    let value = state.slider_value(slider);
    let value_text = format!(" {value:>3}");

    let track_len =
        (width as usize).saturating_sub(marker.len() + label.len() + value_text.len());
    let filled = (value as usize * track_len) / 100;

    let label_style = if selected {
        Style::default().fg(to_color(palette.primary)).bold()
    } else {
        Style::default()
    };

    let mut spans = vec![
        Span::styled(marker.to_string(), label_style),
        Span::styled(label, label_style),
    ];
    spans.extend(gradient_track(track_len, filled, palette));
    spans.push(Span::raw(value_text));
    Line::from(spans)
}

/// Track cells with the filled portion blending from the secondary color to
/// the primary color, the way the original slider tracks recolor on input.
fn gradient_track(track_len: usize, filled: usize, palette: &Palette) -> Vec<Span<'static>> {
    let filled = filled.min(track_len);
    let mut spans = Vec::with_capacity(track_len);
    for i in 0..track_len {
        if i < filled {
            let t = if filled > 1 {
                i as f32 / (filled - 1) as f32
            } else {
                0.0
            };
            let color = palette.secondary.blend(palette.primary, t);
            spans.push(Span::styled("█", Style::default().fg(to_color(color))));
        } else {
            spans.push(Span::styled("░", Style::default().fg(TRACK_DIM)));
        }
    }
    spans
}

/// The preview action line in its current state.
fn preview_paragraph(state: &DemoState, palette: &Palette) -> Paragraph<'static> {
    let style = match state.preview {
        PreviewState::Idle => Style::default().fg(to_color(palette.primary)),
        PreviewState::Generating { .. } => Style::default().fg(Color::Yellow),
        PreviewState::Ready { .. } => Style::default().fg(Color::Green).bold(),
    };
    Paragraph::new(Line::from(Span::styled(
        state.preview_label().to_string(),
        style,
    )))
    .alignment(Alignment::Center)
}
