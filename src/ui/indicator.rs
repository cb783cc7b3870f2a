//! Loading indicator shown over a form while a request is in flight

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::Instant;

use super::layout::centered_fixed;

/// Rendering capability for a blocking "busy" overlay
pub trait LoadingIndicator {
    /// Draw the indicator over `area`
    fn render_indicator(&self, frame: &mut Frame, area: Rect);
}

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const FRAME_MS: u128 = 80;

/// Braille spinner in a small bordered box, animated by wall-clock time
pub struct SpinnerOverlay {
    label: String,
    started: Instant,
}

impl SpinnerOverlay {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            started: Instant::now(),
        }
    }

    fn frame_symbol(&self) -> &'static str {
        let index = (self.started.elapsed().as_millis() / FRAME_MS) as usize;
        SPINNER_FRAMES[index % SPINNER_FRAMES.len()]
    }
}

impl LoadingIndicator for SpinnerOverlay {
    fn render_indicator(&self, frame: &mut Frame, area: Rect) {
        let label_width = u16::try_from(self.label.chars().count()).unwrap_or(u16::MAX);
        let width = label_width.saturating_add(8).min(area.width);
        let overlay = centered_fixed(width, 3, area);
        frame.render_widget(Clear, overlay);

        let line = Line::from(vec![
            Span::styled(
                self.frame_symbol(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::raw(self.label.as_str()),
        ]);
        let paragraph = Paragraph::new(line).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
        frame.render_widget(paragraph, overlay);
    }
}
