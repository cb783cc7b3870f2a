//! Render methods for each wizard step

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear},
    Frame,
};

use crate::ui::layout::centered_rect;
use crate::ui::wizard::{WizardScreen, WizardStep};

mod newsletter;
mod success;
mod welcome;

impl WizardScreen {
    /// Draw the bordered step frame with its progress title and return the
    /// inner area
    pub(crate) fn render_step_frame(&self, frame: &mut Frame, heading: &str) -> Rect {
        let area = centered_rect(70, 80, frame.area());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(
                    heading.to_string(),
                    Style::default()
                        .fg(Color::LightRed)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(
                    " ({}/{}) ",
                    self.step().position(),
                    WizardStep::COUNT
                )),
            ]))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let inner = block.inner(area);
        frame.render_widget(block, area);
        inner
    }

    /// Key hints shown at the bottom of each step
    pub(crate) fn footer_line(&self, hints: &[(&str, &str)]) -> Line<'static> {
        let mut spans = Vec::new();
        for (i, (key, action)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(
                key.to_string(),
                Style::default().fg(Color::Yellow),
            ));
            spans.push(Span::raw(format!(" {}", self.tr(action))));
        }
        Line::from(spans)
    }
}
